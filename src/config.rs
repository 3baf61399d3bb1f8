use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::store::sheets::Credentials;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set in the environment or .env file")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("Either SHEETS_ACCESS_TOKEN or SHEETS_API_KEY has to be set")]
    MissingCredentials,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub credentials: Credentials,
    pub sheets_base_url: String,
    pub cache_ttl: Duration,
}

impl Config {
    /// Read the configuration from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or(String::from("127.0.0.1"));
        let port = var("PORT").unwrap_or(String::from("8000"));
        let server_url = format!("{}:{}", host, port);
        let addr = server_url.parse().map_err(|_| ConfigError::Invalid {
            name: "HOST/PORT",
            value: server_url,
        })?;

        let spreadsheet_id =
            var("SHEETS_SPREADSHEET_ID").ok_or(ConfigError::Missing("SHEETS_SPREADSHEET_ID"))?;
        let worksheet = var("SHEETS_WORKSHEET").unwrap_or(String::from("Sheet1"));

        let credentials = match (var("SHEETS_ACCESS_TOKEN"), var("SHEETS_API_KEY")) {
            (Some(token), _) => Credentials::Bearer(token),
            (None, Some(key)) => Credentials::ApiKey(key),
            (None, None) => return Err(ConfigError::MissingCredentials),
        };

        let sheets_base_url =
            var("SHEETS_BASE_URL").unwrap_or(String::from(DEFAULT_SHEETS_BASE_URL));
        let cache_ttl = Duration::from_secs(parse_or("CACHE_TTL_SECS", var("CACHE_TTL_SECS"), 5)?);

        Ok(Self {
            addr,
            spreadsheet_id,
            worksheet,
            credentials,
            sheets_base_url,
            cache_ttl,
        })
    }
}

fn parse_or<T: FromStr>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[("SHEETS_SPREADSHEET_ID", "abc"), ("SHEETS_API_KEY", "key")]).unwrap();

        assert_eq!(config.addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.worksheet, "Sheet1");
        assert_eq!(config.credentials, Credentials::ApiKey("key".into()));
        assert_eq!(config.sheets_base_url, DEFAULT_SHEETS_BASE_URL);
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
    }

    #[test]
    fn token_wins_over_api_key() {
        let config = config(&[
            ("SHEETS_SPREADSHEET_ID", "abc"),
            ("SHEETS_API_KEY", "key"),
            ("SHEETS_ACCESS_TOKEN", "token"),
            ("CACHE_TTL_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.credentials, Credentials::Bearer("token".into()));
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
    }

    #[test]
    fn missing_values() {
        assert!(matches!(
            config(&[("SHEETS_API_KEY", "key")]),
            Err(ConfigError::Missing("SHEETS_SPREADSHEET_ID"))
        ));
        assert!(matches!(
            config(&[("SHEETS_SPREADSHEET_ID", "abc")]),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            config(&[("SHEETS_SPREADSHEET_ID", "abc"), ("SHEETS_API_KEY", "k"), ("CACHE_TTL_SECS", "soon")]),
            Err(ConfigError::Invalid { name: "CACHE_TTL_SECS", .. })
        ));
        assert!(matches!(
            config(&[("SHEETS_SPREADSHEET_ID", "abc"), ("SHEETS_API_KEY", "k"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "HOST/PORT", .. })
        ));
    }
}
