//! Process configuration (spec §6, §4.15): the relay's slice of the
//! recognised environment variables, read directly via `std::env::var`.
//! Mirrors `backend::config::Config` in shape but carries only what an
//! HTTP/WS-facing replica needs.

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
    pub registration_secret: Option<String>,
    pub admin_secret: String,
    pub relay_shared_secret: String,
    pub trust_proxy: TrustProxy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must be at least {1} characters")]
    TooShort(&'static str, usize),
    #[error("{0} has an unrecognised value: {1}")]
    Invalid(&'static str, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let kv_url = std::env::var("KV_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let registration_secret = std::env::var("REGISTRATION_SECRET").ok();

        let admin_secret = std::env::var("ADMIN_SECRET").map_err(|_| ConfigError::Missing("ADMIN_SECRET"))?;
        if admin_secret.len() < 16 {
            return Err(ConfigError::TooShort("ADMIN_SECRET", 16));
        }

        let relay_shared_secret =
            std::env::var("RELAY_SHARED_SECRET").map_err(|_| ConfigError::Missing("RELAY_SHARED_SECRET"))?;
        if relay_shared_secret.len() < 16 {
            return Err(ConfigError::TooShort("RELAY_SHARED_SECRET", 16));
        }

        let trust_proxy = match std::env::var("TRUST_PROXY").unwrap_or_else(|_| "none".to_string()).as_str() {
            "none" => TrustProxy::None,
            "cloudflare" => TrustProxy::Cloudflare,
            "any" => TrustProxy::Any,
            other => return Err(ConfigError::Invalid("TRUST_PROXY", other.to_string())),
        };

        Ok(Self {
            listen_addr,
            kv_url,
            registration_secret,
            admin_secret,
            relay_shared_secret,
            trust_proxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "LISTEN_ADDR",
            "KV_URL",
            "REGISTRATION_SECRET",
            "ADMIN_SECRET",
            "RELAY_SHARED_SECRET",
            "TRUST_PROXY",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn missing_admin_secret_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ADMIN_SECRET")));
        clear_env();
    }

    #[test]
    fn short_admin_secret_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("ADMIN_SECRET", "short");
        std::env::set_var("RELAY_SHARED_SECRET", "0123456789abcdef");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::TooShort("ADMIN_SECRET", 16)));
        clear_env();
    }

    #[test]
    fn missing_relay_shared_secret_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("ADMIN_SECRET", "0123456789abcdef");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RELAY_SHARED_SECRET")));
        clear_env();
    }

    #[test]
    fn defaults_load_with_only_required_secrets_set() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("ADMIN_SECRET", "0123456789abcdef");
        std::env::set_var("RELAY_SHARED_SECRET", "fedcba9876543210");
        let config = Config::from_env().unwrap();
        assert_eq!(config.trust_proxy, TrustProxy::None);
        assert!(config.registration_secret.is_none());
        clear_env();
    }
}
