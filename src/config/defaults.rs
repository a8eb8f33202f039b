//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Quiet period after the last keystroke before a lookup is dispatched
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Grace period between losing focus and hiding the list, so a click on an
/// item lands before the list disappears
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 200;

/// Maximum number of entries returned by the currency source
pub const DEFAULT_CURRENCY_LIMIT: usize = 10;

/// Geocoding endpoint
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim's usage policy requires an identifying user agent
pub const DEFAULT_NOMINATIM_USER_AGENT: &str =
    concat!("autocomplete-kit/", env!("CARGO_PKG_VERSION"));

/// Default placeholders for the two bundled widgets
pub const DEFAULT_REGION_PLACEHOLDER: &str = "Please enter a region";
pub const DEFAULT_CURRENCY_PLACEHOLDER: &str = "Please enter a currency";

/// Default class hook for the text input
pub const DEFAULT_CLASS_NAME: &str = "my-autocomplete";

/// Location of the config file
pub const DEFAULT_CONFIG_PATH: &str = "~/.autocomplete-kit/config.json";
