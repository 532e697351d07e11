use crate::domain::value_objects::{LoanPeriod, LoanPeriodError};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Configuration errors reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid {expected}: {value:?}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("LOAN_PERIOD_DAYS is out of range: {0}")]
    InvalidLoanPeriod(LoanPeriodError),
}

/// Server and session settings.
///
/// Read from the environment (a `.env` file is honoured by the binary):
/// - `HOST` (default `0.0.0.0`)
/// - `PORT` (default `3000`)
/// - `LOAN_PERIOD_DAYS` (default 14)
/// - `SEED_CATALOG` (default `true`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub loan_period: LoanPeriod,
    pub seed_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            loan_period: LoanPeriod::default(),
            seed_catalog: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                expected: "port number",
                value,
            })?,
            None => defaults.port,
        };

        let loan_period = match lookup("LOAN_PERIOD_DAYS") {
            Some(value) => {
                let days: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "LOAN_PERIOD_DAYS",
                    expected: "number of days",
                    value,
                })?;
                LoanPeriod::try_from(days).map_err(ConfigError::InvalidLoanPeriod)?
            }
            None => defaults.loan_period,
        };

        let seed_catalog = match lookup("SEED_CATALOG") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                key: "SEED_CATALOG",
                expected: "boolean",
                value,
            })?,
            None => defaults.seed_catalog,
        };

        Ok(Self {
            host,
            port,
            loan_period,
            seed_catalog,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
