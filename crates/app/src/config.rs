//! Harness settings.
//!
//! Loaded with the `config` crate: built-in defaults, overridden by
//! `APIPROBE_*` environment variables.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use apiprobe_infrastructure::{DEFAULT_USER_AGENT, TransportOptions};
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Prefix of the environment variables read by [`HarnessSettings::load`].
pub const ENV_PREFIX: &str = "APIPROBE";

/// Settings shared by every harness in a test run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    /// External endpoint used when no in-process app is configured.
    pub base_url: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Address the in-process server binds to.
    pub bind_addr: SocketAddr,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: 30_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        }
    }
}

impl HarnessSettings {
    /// Loads defaults overridden by `APIPROBE_BASE_URL`, `APIPROBE_TIMEOUT_MS`,
    /// `APIPROBE_USER_AGENT` and `APIPROBE_BIND_ADDR`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed into its field.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        tracing::debug!(?settings, "harness settings loaded");
        Ok(settings)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Options for the HTTP transport.
    #[must_use]
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: self.timeout(),
            user_agent: self.user_agent.clone(),
        }
    }
}
