//! Configuration module - Widget options and application settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.autocomplete-kit/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (AutocompleteConfig, AppConfig, etc.)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_CLOSE_DELAY_MS, DEFAULT_CURRENCY_LIMIT, DEFAULT_DEBOUNCE_MS,
    DEFAULT_NOMINATIM_BASE_URL, DEFAULT_NOMINATIM_USER_AGENT,
};

pub use types::{AppConfig, AutocompleteConfig, NominatimConfig};

pub use loader::{default_config_path, load_config, try_load_config};

#[cfg(test)]
pub use defaults::{DEFAULT_CLASS_NAME, DEFAULT_CURRENCY_PLACEHOLDER, DEFAULT_REGION_PLACEHOLDER};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
