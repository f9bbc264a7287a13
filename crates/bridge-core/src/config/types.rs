use serde::Deserialize;

use crate::route::Route;
use crate::secret::Secret;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub hooks: HookConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Only ever populated from `API_BEARER_TOKEN`.
    #[serde(skip)]
    pub auth_token: Option<Secret>,
    #[serde(default = "default_gateway_rate_limit")]
    pub rate_limit: u32,
    #[serde(default = "default_gateway_max_body")]
    pub max_body_size: usize,
    #[serde(default = "default_relay_timeout_secs")]
    pub relay_timeout_secs: u64,
}

fn default_gateway_bind() -> String {
    "127.0.0.1".into()
}

fn default_gateway_port() -> u16 {
    8090
}

fn default_gateway_rate_limit() -> u32 {
    120
}

fn default_gateway_max_body() -> usize {
    1_048_576
}

fn default_relay_timeout_secs() -> u64 {
    15
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_gateway_bind(),
            port: default_gateway_port(),
            auth_token: None,
            rate_limit: default_gateway_rate_limit(),
            max_body_size: default_gateway_max_body(),
            relay_timeout_secs: default_relay_timeout_secs(),
        }
    }
}

/// Destination webhook per route. Empty strings count as unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookConfig {
    #[serde(default)]
    pub invoice: Option<String>,
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub deposit: Option<String>,
    #[serde(default)]
    pub close_package: Option<String>,
    #[serde(default)]
    pub drive_ingest: Option<String>,
}

impl HookConfig {
    #[must_use]
    pub fn get(&self, route: Route) -> Option<&str> {
        let slot = match route {
            Route::Invoice => &self.invoice,
            Route::Payment => &self.payment,
            Route::Deposit => &self.deposit,
            Route::ClosePackage => &self.close_package,
            Route::DriveIngest => &self.drive_ingest,
        };
        slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, route: Route, url: Option<String>) {
        let slot = match route {
            Route::Invoice => &mut self.invoice,
            Route::Payment => &mut self.payment,
            Route::Deposit => &mut self.deposit,
            Route::ClosePackage => &mut self.close_package,
            Route::DriveIngest => &mut self.drive_ingest,
        };
        *slot = url;
    }
}
