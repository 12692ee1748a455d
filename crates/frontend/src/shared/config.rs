//! Настройки панели: встроенный `config.toml`, разобранный один раз

use once_cell::sync::Lazy;
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_window: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            page_size_options: vec![25, 50, 100, 200],
            search_window: 10000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    pub page_size: usize,
    pub branches: Vec<String>,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            branches: contracts::domain::a008_stock_control::rows::default_branches(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub lifetime_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { lifetime_ms: 4000 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub lists: ListConfig,
    pub stock: StockConfig,
    pub toast: ToastConfig,
}

impl Config {
    pub fn parse(raw: &str) -> Result<Config, String> {
        toml::from_str(raw).map_err(|e| format!("config.toml: {}", e))
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| match Config::parse(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::error!("{}, используются значения по умолчанию", e);
        Config::default()
    }
});

pub fn config() -> &'static Config {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.stock.page_size, 100);
        assert_eq!(config.stock.branches, vec!["La Paz", "Santa Cruz"]);
        assert_eq!(config.lists.search_window, 10000);
        assert!(config.lists.page_size_options.contains(&config.lists.page_size));
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let config = Config::parse("[api]\nport = 8080\n").unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.toast, ToastConfig::default());
        assert_eq!(config.stock.branches.len(), 2);
    }

    #[test]
    fn test_broken_toml_is_error() {
        assert!(Config::parse("[api\nport = ").is_err());
    }
}
