//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

use crate::store::Category;

/// What deleting a house does to the keys that reference it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HouseDeletePolicy {
    /// Keys keep their house id and dangle; lookups resolve to nothing
    Detach,
    /// Keys of the deleted house are deleted with it
    Cascade,
    /// Deletion is refused while any key references the house
    Deny,
}

impl Default for HouseDeletePolicy {
    fn default() -> Self {
        Self::Detach
    }
}

impl FromStr for HouseDeletePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "detach" => Ok(Self::Detach),
            "cascade" => Ok(Self::Cascade),
            "deny" => Ok(Self::Deny),
            _ => Err(ConfigError::InvalidDeletePolicy(s.to_string())),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Policy applied to a house's keys when the house is deleted
    pub house_delete_policy: HouseDeletePolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let house_delete_policy = match env::var("HOUSE_DELETE_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => HouseDeletePolicy::default(),
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            house_delete_policy,
        })
    }

    /// The fixed category set, immutable for the session
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            house_delete_policy: HouseDeletePolicy::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HOUSE_DELETE_POLICY: {0} (expected detach, cascade, or deny)")]
    InvalidDeletePolicy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_policy_parses_known_values() {
        assert_eq!(
            "cascade".parse::<HouseDeletePolicy>().unwrap(),
            HouseDeletePolicy::Cascade
        );
        assert_eq!(
            "DENY".parse::<HouseDeletePolicy>().unwrap(),
            HouseDeletePolicy::Deny
        );
        assert!("purge".parse::<HouseDeletePolicy>().is_err());
    }

    #[test]
    fn default_config_detaches_on_delete() {
        let config = Config::default();
        assert_eq!(config.house_delete_policy, HouseDeletePolicy::Detach);
        assert_eq!(config.categories().len(), 5);
    }
}
