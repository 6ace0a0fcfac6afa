use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::models::validation_policy::ValidationPolicy;
use crate::utils::qr_png::{DEFAULT_MAX_IMAGE_DIMENSION, QrRenderer, SymbolRenderer};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub policy: ValidationPolicy,
    pub renderer: Arc<dyn QrRenderer>,
}

impl AppState {
    pub fn new(policy: ValidationPolicy, renderer: Arc<dyn QrRenderer>) -> Self {
        Self { policy, renderer }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.policy,
            Arc::new(SymbolRenderer {
                max_dimension: config.max_image_dimension,
            }),
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ValidationPolicy::default(), Arc::new(SymbolRenderer::default()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub policy: ValidationPolicy,
    pub max_image_dimension: u32,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| String::from("127.0.0.1"));

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {}", port))?,
            None => 8080,
        };

        let policy = match lookup("QR_VALIDATION_POLICY") {
            Some(policy) => policy
                .parse::<ValidationPolicy>()
                .map_err(anyhow::Error::msg)
                .context("QR_VALIDATION_POLICY is invalid")?,
            None => ValidationPolicy::default(),
        };

        let max_image_dimension = match lookup("QR_MAX_IMAGE_DIMENSION") {
            Some(max) => max
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|m| *m > 0)
                .with_context(|| {
                    format!("QR_MAX_IMAGE_DIMENSION must be a positive integer: {}", max)
                })?,
            None => DEFAULT_MAX_IMAGE_DIMENSION,
        };

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            policy,
            max_image_dimension,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.policy, ValidationPolicy::Lenient);
        assert_eq!(cfg.max_image_dimension, DEFAULT_MAX_IMAGE_DIMENSION);
        assert!(cfg.allowed_origins.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("QR_VALIDATION_POLICY", "strict"),
            ("QR_MAX_IMAGE_DIMENSION", "2048"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, http://localhost:4173,"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.policy, ValidationPolicy::Strict);
        assert_eq!(cfg.max_image_dimension, 2048);
        assert_eq!(
            cfg.allowed_origins,
            ["http://localhost:5173", "http://localhost:4173"]
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("QR_VALIDATION_POLICY", "loose")]).is_err());
        assert!(config(&[("QR_MAX_IMAGE_DIMENSION", "0")]).is_err());
    }
}
