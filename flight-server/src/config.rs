//! Application configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::airport::{AirportClientConfig, DEFAULT_API_HOST, DEFAULT_BASE_URL, LookupConfig};
use crate::flights::{FlightClientConfig, SearchDefaults, SortOrder};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Provider key; empty when unset
    pub api_key: String,
    pub api_host: String,
    pub base_url: String,
    /// Never call the remote airport search
    pub force_local_airports: bool,
    pub defaults: SearchDefaults,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let fallback = SearchDefaults::default();

        let sort_order = match var("SEARCH_SORT") {
            Some(value) => SortOrder::parse(&value).ok_or(ConfigError::Invalid {
                name: "SEARCH_SORT",
                value,
            })?,
            None => fallback.sort_order,
        };

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        Ok(Self {
            api_key: var("RAPIDAPI_KEY").unwrap_or_default(),
            api_host: var("RAPIDAPI_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            base_url: var("FLIGHT_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            force_local_airports: var("FORCE_LOCAL_AIRPORTS").is_some_and(|v| is_truthy(&v)),
            defaults: SearchDefaults {
                sort_order,
                currency: var("SEARCH_CURRENCY").unwrap_or(fallback.currency),
                market: var("SEARCH_MARKET").unwrap_or(fallback.market),
                country_code: var("SEARCH_COUNTRY_CODE").unwrap_or(fallback.country_code),
            },
            bind_addr,
            static_dir: var("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
        })
    }

    pub fn airport_client(&self) -> AirportClientConfig {
        AirportClientConfig::new(&self.api_key)
            .with_api_host(&self.api_host)
            .with_base_url(&self.base_url)
    }

    pub fn flight_client(&self) -> FlightClientConfig {
        FlightClientConfig::new(&self.api_key)
            .with_api_host(&self.api_host)
            .with_base_url(&self.base_url)
    }

    pub fn lookup(&self) -> LookupConfig {
        LookupConfig::default().with_local_only(self.force_local_airports)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key, "");
        assert_eq!(config.api_host, "sky-scrapper.p.rapidapi.com");
        assert_eq!(config.base_url, "https://sky-scrapper.p.rapidapi.com");
        assert!(!config.force_local_airports);
        assert_eq!(config.defaults, SearchDefaults::default());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("RAPIDAPI_KEY", " secret "),
            ("FORCE_LOCAL_AIRPORTS", "YES"),
            ("SEARCH_CURRENCY", "EUR"),
            ("SEARCH_MARKET", "es-ES"),
            ("SEARCH_COUNTRY_CODE", "ES"),
            ("SEARCH_SORT", "fastest"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert!(config.force_local_airports);
        assert_eq!(config.defaults.currency, "EUR");
        assert_eq!(config.defaults.market, "es-ES");
        assert_eq!(config.defaults.country_code, "ES");
        assert_eq!(config.defaults.sort_order, SortOrder::Fastest);
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.lookup().local_only);
    }

    #[test]
    fn force_local_only_accepts_truthy_values() {
        for value in ["true", "1", "yes", "TRUE"] {
            let config = config_from(&[("FORCE_LOCAL_AIRPORTS", value)]).unwrap();
            assert!(config.force_local_airports, "{value}");
        }
        for value in ["false", "0", "no", "maybe"] {
            let config = config_from(&[("FORCE_LOCAL_AIRPORTS", value)]).unwrap();
            assert!(!config.force_local_airports, "{value}");
        }
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("BIND_ADDR", "not-an-address")]),
            Err(ConfigError::Invalid { name: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config_from(&[("SEARCH_SORT", "random")]),
            Err(ConfigError::Invalid { name: "SEARCH_SORT", .. })
        ));
    }
}
