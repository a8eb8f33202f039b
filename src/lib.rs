//! Autocomplete Kit - headless search-as-you-type widget
//!
//! This library provides the interaction core of an autocomplete field:
//! debounced lookups against a pluggable data source, staleness-safe result
//! handling, keyboard selection and match highlighting.

pub mod autocomplete;
pub mod config;
pub mod error;
pub mod list_item;
pub mod logging;
pub mod lookup;
pub mod markup;
pub mod matching;
pub mod render;
pub mod timer;

// Bundled data sources (currency list, geocoding)
pub mod sources;

pub use autocomplete::{Autocomplete, NavKey};
pub use config::AutocompleteConfig;
pub use error::{AutocompleteError, Result};
pub use lookup::{LoadData, Responder};
