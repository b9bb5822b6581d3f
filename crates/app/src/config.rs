//! Application configuration

use std::time::Duration;

use orison_orchestrator::PollPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the prayer API
    pub api_base_url: String,
    /// Bearer credential for authenticated requests. Absent means remote
    /// voices fail fast into the device-voice fallback.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Poll-ceiling override
    #[serde(default)]
    pub poll_max_attempts: Option<u32>,
    /// Poll-cadence override in seconds
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
    /// Speaking rate for the on-device engine (words per minute)
    #[serde(default)]
    pub speech_rate_wpm: Option<u32>,
}

impl AppConfig {
    /// Load from `orison.toml` (if present) layered under `ORISON_*`
    /// environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("api_base_url", "https://api.orison.app")?
            .add_source(config::File::with_name("orison").required(false))
            .add_source(config::Environment::with_prefix("ORISON"))
            .build()?
            .try_deserialize()
    }

    pub fn poll_policy(&self) -> PollPolicy {
        let default = PollPolicy::default();
        PollPolicy {
            max_attempts: self.poll_max_attempts.unwrap_or(default.max_attempts),
            interval: self
                .poll_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(default.interval),
        }
    }
}
