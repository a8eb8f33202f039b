//! Bundled data sources for the autocomplete widget.
//!
//! - `currency` - static ISO currency names, filtered locally
//! - `nominatim` - place names from the Nominatim geocoding API

mod currency;
mod nominatim;

pub use currency::{CurrencySource, CURRENCIES};
pub use nominatim::{display_names, NominatimSource};
