//! Geocoding source backed by the Nominatim search API.
//!
//! Each lookup runs on a worker thread and answers with the `display_name`
//! of every place in the response, in response order.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::config::NominatimConfig;
use crate::lookup::{spawn_blocking_lookup, LoadData, Responder};

#[derive(Debug, Clone, Default)]
pub struct NominatimSource {
    config: NominatimConfig,
}

impl NominatimSource {
    pub fn new(config: NominatimConfig) -> Self {
        Self { config }
    }

    /// Blocking search request.
    pub fn search(&self, query: &str) -> Result<Vec<String>> {
        search(&self.config, query)
    }
}

impl LoadData for NominatimSource {
    fn load(&self, query: &str, responder: Responder) {
        let config = self.config.clone();
        spawn_blocking_lookup("nominatim", query, responder, move |q| {
            search(&config, &q)
        });
    }
}

fn search(config: &NominatimConfig, query: &str) -> Result<Vec<String>> {
    debug!(query, base_url = %config.base_url, "Sending Nominatim search");

    let body: Value = ureq::get(config.base_url.as_str())
        .query("q", query)
        .query("format", "json")
        .header("User-Agent", &config.user_agent)
        .call()
        .context("Failed to send request to Nominatim")?
        .into_body()
        .read_json()
        .context("Failed to parse Nominatim response")?;

    let names = display_names(&body);
    debug!(query, count = names.len(), "Nominatim search finished");
    Ok(names)
}

/// Extract `display_name` from each element of a search response.
/// Anything other than a JSON array yields no places.
pub fn display_names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|places| {
            places
                .iter()
                .filter_map(|place| place.get("display_name")?.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
