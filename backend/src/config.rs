//! Process configuration (spec §6, §4.15): reads the recognised environment
//! variables directly via `std::env::var` with typed parsing and documented
//! defaults. Deliberately no external config crate — parsing process
//! environment is ambient plumbing, not a feature this crate is scoped to
//! build out further.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustProxy {
    None,
    Cloudflare,
    Any,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub kv_url: String,
    pub tick_interval: Duration,
    pub relay_url: String,
    pub relay_shared_secret: String,
    pub admin_secret: String,
    pub trust_proxy: TrustProxy,
    pub auto_ban_violation_threshold: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} is out of range: {1}")]
    OutOfRange(&'static str, String),
    #[error("{0} must be at least {1} characters")]
    TooShort(&'static str, usize),
    #[error("{0} has an unrecognised value: {1}")]
    Invalid(&'static str, String),
}

impl Config {
    /// Loads configuration from the process environment, applying the
    /// defaults spec.md §6 documents for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = env_or("LISTEN_ADDR", "0.0.0.0:8080".to_string());
        let kv_url = env_or("KV_URL", "redis://127.0.0.1:6379".to_string());

        let tick_interval_ms: u64 = env_parsed_or("TICK_INTERVAL_MS", 15_000)?;
        if !(1_000..=60_000).contains(&tick_interval_ms) {
            return Err(ConfigError::OutOfRange(
                "TICK_INTERVAL_MS",
                tick_interval_ms.to_string(),
            ));
        }

        let relay_url = require_env("RELAY_URL")?;

        let relay_shared_secret = require_env("RELAY_SHARED_SECRET")?;
        if relay_shared_secret.len() < 16 {
            return Err(ConfigError::TooShort("RELAY_SHARED_SECRET", 16));
        }

        let admin_secret = require_env("ADMIN_SECRET")?;
        if admin_secret.len() < 16 {
            return Err(ConfigError::TooShort("ADMIN_SECRET", 16));
        }

        let trust_proxy = match env_or("TRUST_PROXY", "none".to_string()).as_str() {
            "none" => TrustProxy::None,
            "cloudflare" => TrustProxy::Cloudflare,
            "any" => TrustProxy::Any,
            other => return Err(ConfigError::Invalid("TRUST_PROXY", other.to_string())),
        };

        let auto_ban_violation_threshold = env_parsed_or("AUTO_BAN_VIOLATION_THRESHOLD", 5)?;

        Ok(Self {
            listen_addr,
            kv_url,
            tick_interval: Duration::from_millis(tick_interval_ms),
            relay_url,
            relay_shared_secret,
            admin_secret,
            trust_proxy,
            auto_ban_violation_threshold,
        })
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn env_parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "LISTEN_ADDR",
            "KV_URL",
            "TICK_INTERVAL_MS",
            "RELAY_URL",
            "RELAY_SHARED_SECRET",
            "ADMIN_SECRET",
            "TRUST_PROXY",
            "AUTO_BAN_VIOLATION_THRESHOLD",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn missing_relay_url_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RELAY_URL")));
    }

    #[test]
    fn missing_required_secret_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("RELAY_URL", "ws://localhost:9000/home/connect");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RELAY_SHARED_SECRET")));
        clear_env();
    }

    #[test]
    fn tick_interval_out_of_range_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("RELAY_URL", "ws://localhost:9000/home/connect");
        std::env::set_var("RELAY_SHARED_SECRET", "0123456789abcdef");
        std::env::set_var("ADMIN_SECRET", "0123456789abcdef");
        std::env::set_var("TICK_INTERVAL_MS", "999");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange("TICK_INTERVAL_MS", _)));
        clear_env();
    }

    #[test]
    fn defaults_load_with_only_the_required_fields_set() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("RELAY_URL", "ws://localhost:9000/home/connect");
        std::env::set_var("RELAY_SHARED_SECRET", "0123456789abcdef");
        std::env::set_var("ADMIN_SECRET", "0123456789abcdef");
        let config = Config::from_env().unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(15_000));
        assert_eq!(config.trust_proxy, TrustProxy::None);
        clear_env();
    }
}
