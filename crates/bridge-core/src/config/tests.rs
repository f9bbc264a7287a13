use std::io::Write;

use serial_test::serial;

use super::*;
use crate::secret::Secret;

const ENV_KEYS: [&str; 12] = [
    "API_BEARER_TOKEN",
    "BRIDGE_BIND",
    "BRIDGE_PORT",
    "PORT",
    "BRIDGE_RATE_LIMIT",
    "BRIDGE_MAX_BODY_SIZE",
    "BRIDGE_RELAY_TIMEOUT",
    "ZAPIER_HOOK_INVOICE",
    "ZAPIER_HOOK_PAYMENT",
    "ZAPIER_HOOK_DEPOSIT",
    "ZAPIER_HOOK_CLOSE_PACKAGE",
    "ZAPIER_HOOK_DRIVE_INGEST",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

fn valid_config() -> Config {
    let mut config = Config::default();
    config.gateway.auth_token = Some(Secret::new("secret"));
    config
}

#[test]
fn defaults_when_file_missing() {
    let config = Config::default();
    assert_eq!(config.gateway.bind, "127.0.0.1");
    assert_eq!(config.gateway.port, 8090);
    assert_eq!(config.gateway.rate_limit, 120);
    assert_eq!(config.gateway.max_body_size, 1_048_576);
    assert_eq!(config.gateway.relay_timeout_secs, 15);
    assert!(config.gateway.auth_token.is_none());
    for route in Route::ALL {
        assert!(config.hooks.get(route).is_none());
    }
}

#[test]
#[serial]
fn load_missing_file_uses_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.gateway.port, 8090);
}

#[test]
#[serial]
fn parse_valid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"
[gateway]
bind = "0.0.0.0"
port = 9000
rate_limit = 0
relay_timeout_secs = 5

[hooks]
invoice = "https://hooks.zapier.com/hooks/catch/1/abc"
payment = ""
"#
    )
    .unwrap();

    clear_env();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.gateway.bind, "0.0.0.0");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.gateway.rate_limit, 0);
    assert_eq!(config.relay_timeout(), Duration::from_secs(5));
    assert_eq!(
        config.hooks.get(Route::Invoice),
        Some("https://hooks.zapier.com/hooks/catch/1/abc")
    );
    assert!(config.hooks.get(Route::Payment).is_none());
}

#[test]
#[serial]
fn malformed_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[gateway\nport = ").unwrap();
    clear_env();
    assert!(Config::load(&path).is_err());
}

#[test]
#[serial]
fn env_override_token_and_hooks() {
    clear_env();
    let mut config = Config::default();

    unsafe {
        std::env::set_var("API_BEARER_TOKEN", "tok");
        std::env::set_var("ZAPIER_HOOK_CLOSE_PACKAGE", "https://example.com/close");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.gateway.auth_token.as_ref().unwrap().expose(), "tok");
    assert_eq!(
        config.hooks.get(Route::ClosePackage),
        Some("https://example.com/close")
    );
    assert!(config.hooks.get(Route::Invoice).is_none());
}

#[test]
#[serial]
fn env_hook_overrides_file_hook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.toml");
    std::fs::write(&path, "[hooks]\ninvoice = \"https://from-file.example\"\n").unwrap();
    clear_env();

    unsafe { std::env::set_var("ZAPIER_HOOK_INVOICE", "") };
    let config = Config::load(&path).unwrap();
    clear_env();

    assert!(config.hooks.get(Route::Invoice).is_none());
}

#[test]
#[serial]
fn env_override_port_prefers_bridge_port() {
    clear_env();
    let mut config = Config::default();

    unsafe {
        std::env::set_var("PORT", "3000");
        std::env::set_var("BRIDGE_PORT", "4000");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.gateway.port, 4000);
}

#[test]
#[serial]
fn env_override_invalid_numbers_ignored() {
    clear_env();
    let mut config = Config::default();

    unsafe {
        std::env::set_var("BRIDGE_RATE_LIMIT", "lots");
        std::env::set_var("BRIDGE_RELAY_TIMEOUT", "-1");
        std::env::set_var("PORT", "99999");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.gateway.rate_limit, 120);
    assert_eq!(config.gateway.relay_timeout_secs, 15);
    assert_eq!(config.gateway.port, 8090);
}

#[test]
fn validate_requires_token() {
    let config = Config::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("API_BEARER_TOKEN"));

    let mut config = Config::default();
    config.gateway.auth_token = Some(Secret::new(""));
    assert!(config.validate().is_err());
}

#[test]
fn validate_accepts_minimal_config() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn validate_rejects_bad_hook_url() {
    let mut config = valid_config();
    config.hooks.set(Route::Deposit, Some("not a url".into()));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("deposit"));

    let mut config = valid_config();
    config.hooks.set(Route::Deposit, Some("ftp://example.com/hook".into()));
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_zero_limits() {
    let mut config = valid_config();
    config.gateway.relay_timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = valid_config();
    config.gateway.max_body_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn token_is_redacted_in_debug() {
    let config = valid_config();
    let dump = format!("{config:?}");
    assert!(!dump.contains("secret"));
    assert!(dump.contains("[REDACTED]"));
}
