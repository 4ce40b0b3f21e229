use std::time::Duration;

use reqwest::Url;

use crate::GatewayError;

/// Connection settings for an HTTP completion gateway.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
}

impl AdapterConfig {
    /// Read `OUTFITTER_{prefix}_*` variables.
    ///
    /// The API key is required. An unparseable base URL is an error; an
    /// unparseable timeout falls back to `default_timeout_ms`.
    pub fn from_env(
        prefix: &str,
        default_model: &str,
        default_base: &str,
        default_timeout_ms: u64,
    ) -> Result<Self, GatewayError> {
        let key_var = format!("OUTFITTER_{}_API_KEY", prefix);
        let api_key = std::env::var(&key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GatewayError::MissingApiKey(key_var))?;

        let base_var = format!("OUTFITTER_{}_BASE_URL", prefix);
        let base_url = std::env::var(&base_var).unwrap_or_else(|_| default_base.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| GatewayError::Config(format!("invalid {base_var} url {base_url}: {e}")))?;

        let model_var = format!("OUTFITTER_{}_MODEL", prefix);
        let model = std::env::var(&model_var).unwrap_or_else(|_| default_model.to_string());

        let timeout_var = format!("OUTFITTER_{}_TIMEOUT_MS", prefix);
        let timeout_ms = std::env::var(&timeout_var)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(default_timeout_ms);

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "OUTFITTER_TESTLLM_API_KEY",
        "OUTFITTER_TESTLLM_BASE_URL",
        "OUTFITTER_TESTLLM_MODEL",
        "OUTFITTER_TESTLLM_TIMEOUT_MS",
    ];

    fn clear() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn load() -> Result<AdapterConfig, GatewayError> {
        AdapterConfig::from_env("TESTLLM", "model-default", "https://api.example.com/v1/", 30_000)
    }

    /// Given: only the API key is set
    /// When: loading the adapter config
    /// Then: every optional field takes its default
    #[test]
    #[serial]
    fn given_minimal_env_when_from_env_then_uses_defaults() {
        clear();
        std::env::set_var("OUTFITTER_TESTLLM_API_KEY", "test-key-123");

        let config = load().unwrap();

        assert_eq!(config.api_key, "test-key-123");
        assert_eq!(config.base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(config.model, "model-default");
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        clear();
    }

    /// Given: every variable is set
    /// When: loading the adapter config
    /// Then: the custom values win
    #[test]
    #[serial]
    fn given_custom_env_when_from_env_then_uses_custom_values() {
        clear();
        std::env::set_var("OUTFITTER_TESTLLM_API_KEY", "custom-key");
        std::env::set_var("OUTFITTER_TESTLLM_BASE_URL", "http://localhost:9000/");
        std::env::set_var("OUTFITTER_TESTLLM_MODEL", "custom-model");
        std::env::set_var("OUTFITTER_TESTLLM_TIMEOUT_MS", "5000");

        let config = load().unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.timeout, Duration::from_millis(5000));
        clear();
    }

    /// Given: no API key, or a blank one
    /// When: loading the adapter config
    /// Then: the error names the missing variable
    #[test]
    #[serial]
    fn given_missing_api_key_when_from_env_then_returns_error() {
        clear();
        let err = load().unwrap_err();
        assert!(
            matches!(err, GatewayError::MissingApiKey(ref v) if v == "OUTFITTER_TESTLLM_API_KEY")
        );

        std::env::set_var("OUTFITTER_TESTLLM_API_KEY", "   ");
        assert!(matches!(load(), Err(GatewayError::MissingApiKey(_))));
        clear();
    }

    /// Given: a base URL that does not parse
    /// When: loading the adapter config
    /// Then: a config error mentions the variable
    #[test]
    #[serial]
    fn given_invalid_base_url_when_from_env_then_returns_url_error() {
        clear();
        std::env::set_var("OUTFITTER_TESTLLM_API_KEY", "test-key");
        std::env::set_var("OUTFITTER_TESTLLM_BASE_URL", "not-a-valid-url");

        let err = load().unwrap_err().to_string();

        assert!(err.contains("OUTFITTER_TESTLLM_BASE_URL"));
        assert!(err.contains("invalid"));
        clear();
    }

    /// Given: a non-numeric timeout
    /// When: loading the adapter config
    /// Then: the default timeout is used
    #[test]
    #[serial]
    fn given_invalid_timeout_when_from_env_then_uses_default_timeout() {
        clear();
        std::env::set_var("OUTFITTER_TESTLLM_API_KEY", "test-key");
        std::env::set_var("OUTFITTER_TESTLLM_TIMEOUT_MS", "soon");

        let config = load().unwrap();

        assert_eq!(config.timeout, Duration::from_millis(30_000));
        clear();
    }
}
