//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::clients::directions_client::DEFAULT_DIRECTIONS_URL;
use crate::services::route_optimizer_service::DEFAULT_TRAVEL_MODE;

pub const DEFAULT_MY_LIST_API_URL: &str = "http://localhost:8000/api/v1";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    // Servicio de persistencia de listas
    pub my_list_api_url: String,
    // Proveedor de optimización
    pub google_maps_api_key: Option<String>,
    pub directions_api_url: String,
    pub travel_mode: String,
    pub http_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            my_list_api_url: DEFAULT_MY_LIST_API_URL.to_string(),
            google_maps_api_key: None,
            directions_api_url: DEFAULT_DIRECTIONS_URL.to_string(),
            travel_mode: DEFAULT_TRAVEL_MODE.to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde variables de entorno (llamar después de `dotenvy::dotenv()`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar usando una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => defaults.port,
        };
        let http_timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a valid number, got '{}'", raw))?,
            None => defaults.http_timeout_secs,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: var("HOST").unwrap_or(defaults.host),
            cors_origins: var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            my_list_api_url: var("MY_LIST_API_URL").unwrap_or(defaults.my_list_api_url),
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY"),
            directions_api_url: var("DIRECTIONS_API_URL").unwrap_or(defaults.directions_api_url),
            travel_mode: var("TRAVEL_MODE")
                .map(|mode| mode.trim().to_uppercase())
                .unwrap_or(defaults.travel_mode),
            http_timeout_secs,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EnvironmentConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert!(config.is_development());
        assert_eq!(config.port, 8000);
        assert_eq!(config.my_list_api_url, DEFAULT_MY_LIST_API_URL);
        assert_eq!(config.travel_mode, "DRIVING");
        assert!(config.google_maps_api_key.is_none());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("TRAVEL_MODE", "walking"),
            ("GOOGLE_MAPS_API_KEY", "key"),
        ])
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:9000");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.travel_mode, "WALKING");
        assert_eq!(config.google_maps_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_malformed_number_is_error() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("HTTP_TIMEOUT_SECS", "-1")]).is_err());
    }
}
