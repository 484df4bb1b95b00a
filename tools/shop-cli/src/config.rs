//! CLI configuration.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::Currency;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Storefront service connection.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Cart settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse config text as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Cart currency as a domain value.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.cart.currency)
            .ok_or_else(|| anyhow!("Unknown cart currency: {}", self.cart.currency))
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.service.endpoint.starts_with("http://")
            || self.service.endpoint.starts_with("https://"))
        {
            errors.push(format!(
                "service.endpoint '{}' must start with http:// or https://",
                self.service.endpoint
            ));
        }
        if self.service.timeout_secs == 0 {
            errors.push("service.timeout_secs must be greater than 0".to_string());
        }
        if Currency::from_code(&self.cart.currency).is_none() {
            errors.push(format!("cart.currency '{}' is not supported", self.cart.currency));
        }
        errors
    }
}

/// Storefront service connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// GraphQL endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_endpoint() -> String {
    "http://localhost:8000/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
        }
    }
}

/// Cart settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// ISO code of the cart currency.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront client configuration

[service]
endpoint = "{endpoint}"
timeout_secs = {timeout}

# Extra headers sent with every request
[service.headers]
# Authorization = "Bearer ..."

[cart]
currency = "{currency}"
"#,
        endpoint = default_endpoint(),
        timeout = default_timeout_secs(),
        currency = default_currency(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = ShopConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config, ShopConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ShopConfig::parse(
            r#"
            [service]
            endpoint = "https://shop.example.com/graphql"

            [service.headers]
            X-Store = "eu"
            "#,
            false,
        )
        .unwrap();
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.service.headers.get("X-Store").map(String::as_str), Some("eu"));
        assert_eq!(config.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_json_config() {
        let config = ShopConfig::parse(r#"{ "cart": { "currency": "EUR" } }"#, true).unwrap();
        assert_eq!(config.currency().unwrap(), Currency::EUR);
        assert_eq!(config.service.endpoint, "http://localhost:8000/graphql");
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = ShopConfig::default();
        config.service.endpoint = "shop.example.com/".to_string();
        config.service.timeout_secs = 0;
        config.cart.currency = "XYZ".to_string();
        assert_eq!(config.validate().len(), 3);
        assert!(config.currency().is_err());
    }
}
