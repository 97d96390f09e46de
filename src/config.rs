//! Configuration management for the EconoArena inventory ledger
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with EA_ prefix

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Company identity and locale defaults
    pub company: CompanyConfig,

    /// Inventory behavior settings
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompanyConfig {
    /// Display name of the business
    pub name: String,

    /// ISO currency code for valuations
    pub currency: String,

    /// Currency symbol used by renderers
    pub currency_symbol: String,

    /// IANA timezone of the business (display metadata)
    pub timezone: String,

    /// Contact email shown on rendered reports
    pub email: String,

    /// Contact phone shown on rendered reports
    pub phone: String,

    /// Business address shown on rendered reports
    pub address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Global low-stock threshold, used when a product has no minimum of its own
    pub low_stock_threshold: u32,

    /// What happens when an exit exceeds available stock
    pub overdraw_policy: OverdrawPolicy,

    /// How many times a movement write is retried after a concurrent update
    pub apply_retries: u32,
}

/// Behavior when an exit movement requests more than the available stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdrawPolicy {
    /// Apply the exit and floor the resulting stock at zero
    Clamp,
    /// Refuse the exit, leaving stock and the movement log untouched
    Reject,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("EA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("company.name", "EconoArena")?
            .set_default("company.currency", "PEN")?
            .set_default("company.currency_symbol", "S/")?
            .set_default("company.timezone", "America/Lima")?
            .set_default("company.email", "info@econoarena.com")?
            .set_default("company.phone", "+51 999 888 777")?
            .set_default("company.address", "Av. Principal 123, Lima, Perú")?
            .set_default("inventory.low_stock_threshold", 10)?
            .set_default("inventory.overdraw_policy", "clamp")?
            .set_default("inventory.apply_retries", 8)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (EA_ prefix)
            .add_source(
                Environment::with_prefix("EA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            company: CompanyConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "EconoArena".to_string(),
            currency: "PEN".to_string(),
            currency_symbol: "S/".to_string(),
            timezone: "America/Lima".to_string(),
            email: "info@econoarena.com".to_string(),
            phone: "+51 999 888 777".to_string(),
            address: "Av. Principal 123, Lima, Perú".to_string(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            overdraw_policy: OverdrawPolicy::Clamp,
            apply_retries: 8,
        }
    }
}
