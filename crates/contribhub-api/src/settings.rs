use ::config::{Config, ConfigError, Environment};
use contribhub_core::engine::DEFAULT_MAX_CONCURRENT_REQUESTS;
use contribhub_core::EngineConfig;
use contribhub_github::{ClientConfig, DEFAULT_API_URL};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ORG: &str = "c2siorg";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server configuration, read from the process environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// GITHUB_ACCESS_TOKEN
    pub github_access_token: String,
    /// GITHUB_ORG
    pub github_org: String,
    /// GITHUB_API_URL
    pub github_api_url: String,
    /// PORT
    pub port: u16,
    /// MAX_CONCURRENT_REQUESTS
    pub max_concurrent_requests: usize,
    /// REQUEST_TIMEOUT_SECS (0 disables the timeout)
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("github_org", DEFAULT_ORG)?
            .set_default("github_api_url", DEFAULT_API_URL)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("max_concurrent_requests", DEFAULT_MAX_CONCURRENT_REQUESTS as i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no engine can run with. Shared by every way of
    /// building `Settings`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github_access_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "GITHUB_ACCESS_TOKEN must be set".to_string(),
            ));
        }
        if self.github_org.trim().is_empty() {
            return Err(ConfigError::Message("GITHUB_ORG must not be empty".to_string()));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::Message(
                "MAX_CONCURRENT_REQUESTS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.github_access_token.clone())
            .with_base_url(self.github_api_url.clone());

        if self.request_timeout_secs > 0 {
            config.with_timeout(Duration::from_secs(self.request_timeout_secs))
        } else {
            config
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.github_org.clone())
            .with_max_concurrent_requests(self.max_concurrent_requests)
    }
}
