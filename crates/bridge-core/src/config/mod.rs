mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use url::Url;

use crate::route::Route;

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!("config file {} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Check the settings the server cannot run without.
    ///
    /// # Errors
    ///
    /// Returns an error if the bearer token is missing, a hook URL is not an
    /// absolute http(s) URL, or a size/timeout limit is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.gateway.auth_token {
            Some(ref t) if !t.is_empty() => {}
            _ => bail!("API_BEARER_TOKEN must be set to a non-empty value"),
        }
        if self.gateway.max_body_size == 0 {
            bail!("gateway.max_body_size must be greater than 0");
        }
        if self.gateway.relay_timeout_secs == 0 {
            bail!("gateway.relay_timeout_secs must be greater than 0");
        }
        for route in Route::ALL {
            if let Some(raw) = self.hooks.get(route) {
                let url = Url::parse(raw)
                    .with_context(|| format!("invalid hook URL for {route}: {raw}"))?;
                if !matches!(url.scheme(), "http" | "https") {
                    bail!("hook URL for {route} must use http or https, got {}", url.scheme());
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.relay_timeout_secs)
    }
}
