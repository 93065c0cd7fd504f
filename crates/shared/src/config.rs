//! Application configuration management.

use serde::Deserialize;

use crate::types::field::{FieldDescriptor, default_fields};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Exchange-rate service configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Purchase store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Purchase form configuration.
    #[serde(default)]
    pub form: FormConfig,
}

/// Exchange-rate service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Base URL of the rates endpoint. Requests append `latest` or
    /// `historical/<ISO-date>`.
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,
    /// Currency all rates are expressed relative to.
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_rates_base_url(),
            reference_currency: default_reference_currency(),
        }
    }
}

fn default_rates_base_url() -> String {
    "http://localhost:3000/api/rates".to_string()
}

fn default_reference_currency() -> String {
    "PLN".to_string()
}

/// Purchase store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON file holding recorded purchases.
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "grosz-purchases.json".to_string()
}

/// Purchase form configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Supported currency codes offered by the selector.
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    /// Form field descriptors.
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldDescriptor>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            currencies: default_currencies(),
            fields: default_fields(),
        }
    }
}

fn default_currencies() -> Vec<String> {
    ["USD", "EUR", "CHF", "GBP"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GROSZ").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
