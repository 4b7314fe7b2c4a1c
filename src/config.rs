use crate::unwrap::{DEFAULT_LEADING_TRIM, DEFAULT_TRAILING_TRIM, Extraction};
use std::{env, time::Duration};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown PAYLOAD_EXTRACTION `{0}` (expected `delimited` or `fixed`)")]
    UnknownExtraction(String),
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub extraction: Extraction,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_base_url = lookup("FITNESS_API_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = number(&lookup, "FITNESS_API_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let extraction = match lookup("PAYLOAD_EXTRACTION")
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("delimited") => Extraction::Delimited,
            Some("fixed") => Extraction::FixedTrim {
                leading: number(&lookup, "PAYLOAD_LEADING_TRIM")?
                    .map_or(DEFAULT_LEADING_TRIM, |value| value as usize),
                trailing: number(&lookup, "PAYLOAD_TRAILING_TRIM")?
                    .map_or(DEFAULT_TRAILING_TRIM, |value| value as usize),
            },
            Some(other) => return Err(ConfigError::UnknownExtraction(other.to_string())),
        };

        Ok(Self {
            port,
            api_base_url,
            request_timeout: Duration::from_secs(timeout),
            extraction,
        })
    }
}

fn number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}
