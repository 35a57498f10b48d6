//! Service configuration.
//!
//! Every setting has a default, so the service starts with no environment at
//! all. Two variables override the defaults:
//!
//! - `CATALOG_ADDR`: socket address to listen on (default `0.0.0.0:3000`)
//! - `CATALOG_API_KEY`: shared secret expected in `x-api-key`
//!   (default `your-secret-api-key`)

use std::env;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_KEY: &str = "your-secret-api-key";
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub addr: String,
    pub api_key: String,
    /// Every path under this prefix requires the API key.
    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_owned(),
            api_key: DEFAULT_API_KEY.to_owned(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            addr: env_or_default("CATALOG_ADDR", DEFAULT_ADDR),
            api_key: env_or_default("CATALOG_API_KEY", DEFAULT_API_KEY),
            ..Self::default()
        }
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        temp_env::with_vars_unset(["CATALOG_ADDR", "CATALOG_API_KEY"], || {
            assert_eq!(Config::from_env(), Config::default());
        });
    }

    #[test]
    fn environment_overrides_addr_and_key() {
        temp_env::with_vars(
            [("CATALOG_ADDR", Some("127.0.0.1:8080")), ("CATALOG_API_KEY", Some("k"))],
            || {
                let config = Config::from_env();
                assert_eq!(config.addr, "127.0.0.1:8080");
                assert_eq!(config.api_key, "k");
                assert_eq!(config.api_prefix, "/api");
            },
        );
    }
}
