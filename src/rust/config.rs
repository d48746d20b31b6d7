use std::env;
use std::time::Duration;

/// Environment variable holding the prediction service base URL.
pub const API_BASE_VAR: &str = "PDFSPAM_API_BASE";
/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_VAR: &str = "PDFSPAM_TIMEOUT_SECS";
/// Where the prediction service listens by default.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5002";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var} value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection settings for the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port of the service, without the `/api/...` path
    pub api_base: String,
    /// Upper bound on a whole request. `None` waits for as long as it takes.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None, // No timeout unless asked for
        }
    }
}

impl ClientConfig {
    /// Reads `PDFSPAM_API_BASE` and `PDFSPAM_TIMEOUT_SECS`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(base) = env::var(API_BASE_VAR) {
            config = config.with_api_base(base);
        }

        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            let secs = parse_timeout(&raw)?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        log::debug!("Client configuration: {:?}", config);
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins an `/api/...` path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        var: TIMEOUT_VAR,
        value: raw.to_string(),
        reason,
    };
    let secs: u64 = raw.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
    if secs == 0 {
        return Err(invalid("must be at least 1 second".to_string()));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serialises tests that touch the process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Clears the variables these tests set, even when an assert fails.
    struct EnvRestore;

    impl Drop for EnvRestore {
        fn drop(&mut self) {
            env::remove_var(API_BASE_VAR);
            env::remove_var(TIMEOUT_VAR);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:5002");
        assert_eq!(config.timeout, None);
        assert_eq!(config.endpoint("/api/predict"), "http://127.0.0.1:5002/api/predict");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::default().with_api_base("http://spam.local:8000/");
        assert_eq!(config.endpoint("/api/health"), "http://spam.local:8000/api/health");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(" 30 ").unwrap(), 30);
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_from_env() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _restore = EnvRestore;
        env::set_var(API_BASE_VAR, "http://10.0.0.5:5002/");
        env::set_var(TIMEOUT_VAR, "15");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base, "http://10.0.0.5:5002");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        env::set_var(TIMEOUT_VAR, "-1");
        assert!(ClientConfig::from_env().is_err());
    }

    #[test]
    fn test_env_restored_after_failed_assert() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let outcome = std::panic::catch_unwind(|| {
            let _restore = EnvRestore;
            env::set_var(TIMEOUT_VAR, "not-a-number");
            panic!("assertion failed mid-test");
        });
        assert!(outcome.is_err());
        assert!(env::var(TIMEOUT_VAR).is_err());
    }
}
