use super::Config;
use crate::route::Route;
use crate::secret::Secret;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_gateway();
        self.apply_env_overrides_hooks();
    }

    fn apply_env_overrides_gateway(&mut self) {
        if let Ok(v) = std::env::var("API_BEARER_TOKEN") {
            self.gateway.auth_token = Some(Secret::new(v));
        }
        if let Ok(v) = std::env::var("BRIDGE_BIND") {
            self.gateway.bind = v;
        }
        // Hosting platforms inject PORT; an explicit BRIDGE_PORT wins.
        for key in ["PORT", "BRIDGE_PORT"] {
            if let Ok(v) = std::env::var(key) {
                match v.parse::<u16>() {
                    Ok(port) => self.gateway.port = port,
                    Err(_) => tracing::warn!("ignoring invalid {key} value: {v}"),
                }
            }
        }
        if let Ok(v) = std::env::var("BRIDGE_RATE_LIMIT") {
            match v.parse::<u32>() {
                Ok(limit) => self.gateway.rate_limit = limit,
                Err(_) => tracing::warn!("ignoring invalid BRIDGE_RATE_LIMIT value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("BRIDGE_MAX_BODY_SIZE") {
            match v.parse::<usize>() {
                Ok(size) => self.gateway.max_body_size = size,
                Err(_) => tracing::warn!("ignoring invalid BRIDGE_MAX_BODY_SIZE value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("BRIDGE_RELAY_TIMEOUT") {
            match v.parse::<u64>() {
                Ok(secs) => self.gateway.relay_timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid BRIDGE_RELAY_TIMEOUT value: {v}"),
            }
        }
    }

    fn apply_env_overrides_hooks(&mut self) {
        for route in Route::ALL {
            if let Ok(v) = std::env::var(route.hook_env_var()) {
                self.hooks.set(route, Some(v));
            }
        }
    }
}
