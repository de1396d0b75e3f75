use std::{collections::HashMap, path::PathBuf};

use beep_api::config::{ApiConfig, DEFAULT_DATABASE_URL, DEFAULT_PORT};
use pretty_assertions::assert_eq;
use tracing::Level;

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.jwt_secret, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.static_dir, PathBuf::from("./static"));
    assert_eq!(config.server_addr(), "0.0.0.0:8080");
}

#[test]
fn test_port_prefers_port_over_api_port() {
    let config = config_from(&[("PORT", "9000"), ("API_PORT", "9100")]).unwrap();
    assert_eq!(config.port, 9000);

    let config = config_from(&[("API_PORT", "9100")]).unwrap();
    assert_eq!(config.port, 9100);
}

#[test]
fn test_invalid_port_is_an_error() {
    assert!(config_from(&[("PORT", "eighty")]).is_err());
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("API_HOST", "127.0.0.1"),
        ("DATABASE_URL", "postgres://u:p@db:5432/beep"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://localhost:3000, https://beep.kz ,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("STATIC_DIR", "/srv/beep/static"),
        ("JWT_SECRET", "s3cret"),
    ])
    .unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.database_url, "postgres://u:p@db:5432/beep");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:3000".to_string(),
            "https://beep.kz".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.static_dir, PathBuf::from("/srv/beep/static"));
    assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
}

#[test]
fn test_blank_cors_list_means_any_origin() {
    let config = config_from(&[("API_CORS_ORIGINS", " , ")]).unwrap();
    assert_eq!(config.cors_origins, None);
}

#[test]
fn test_unparseable_timeout_falls_back() {
    let config = config_from(&[("API_REQUEST_TIMEOUT_SECONDS", "soon")]).unwrap();
    assert_eq!(config.request_timeout, 30);
}
