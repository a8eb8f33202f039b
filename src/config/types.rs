//! Configuration type definitions
//!
//! This module contains all the struct definitions for configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::*;

// ============================================
// WIDGET CONFIG
// ============================================

/// Options recognized by a single autocomplete widget.
///
/// The change callback and the data source are not serializable and are
/// supplied to the controller directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteConfig {
    /// Initial query text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Styling hook passed through to the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Placeholder passed through to the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Debounce delay in milliseconds (default: 500)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Close grace delay in milliseconds (default: 200)
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_close_delay_ms() -> u64 {
    DEFAULT_CLOSE_DELAY_MS
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            value: None,
            class_name: None,
            placeholder: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            close_delay_ms: DEFAULT_CLOSE_DELAY_MS,
        }
    }
}

impl AutocompleteConfig {
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

// ============================================
// NOMINATIM CONFIG
// ============================================

/// Settings for the geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominatimConfig {
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,
    #[serde(default = "default_nominatim_user_agent")]
    pub user_agent: String,
}

fn default_nominatim_base_url() -> String {
    DEFAULT_NOMINATIM_BASE_URL.to_string()
}
fn default_nominatim_user_agent() -> String {
    DEFAULT_NOMINATIM_USER_AGENT.to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        NominatimConfig {
            base_url: default_nominatim_base_url(),
            user_agent: default_nominatim_user_agent(),
        }
    }
}

// ============================================
// APP CONFIG
// ============================================

/// Top-level config for the bundled region and currency widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_region")]
    pub region: AutocompleteConfig,
    #[serde(default = "default_currency")]
    pub currency: AutocompleteConfig,
    #[serde(default)]
    pub nominatim: NominatimConfig,
    /// Maximum currency suggestions (default: 10)
    #[serde(default = "default_currency_limit")]
    pub currency_limit: usize,
}

fn default_region() -> AutocompleteConfig {
    AutocompleteConfig::default()
        .with_class_name(DEFAULT_CLASS_NAME)
        .with_placeholder(DEFAULT_REGION_PLACEHOLDER)
}
fn default_currency() -> AutocompleteConfig {
    AutocompleteConfig::default()
        .with_class_name(DEFAULT_CLASS_NAME)
        .with_placeholder(DEFAULT_CURRENCY_PLACEHOLDER)
}
fn default_currency_limit() -> usize {
    DEFAULT_CURRENCY_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            region: default_region(),
            currency: default_currency(),
            nominatim: NominatimConfig::default(),
            currency_limit: DEFAULT_CURRENCY_LIMIT,
        }
    }
}
