//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::alternatives::CuratedTerms;
use crate::source::SourceKind;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_ALTERNATIVE_PAGE_SIZE: u32 = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to load curated terms from {path}: {reason}")]
    CuratedTerms { path: PathBuf, reason: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub food_source: SourceKind,
    pub page_size: u32,
    pub alternative_page_size: u32,
    pub http_timeout: Duration,
    pub session_cookie: Option<String>,
    pub curated_terms_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            food_source: SourceKind::Usda,
            page_size: DEFAULT_PAGE_SIZE,
            alternative_page_size: DEFAULT_ALTERNATIVE_PAGE_SIZE,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            session_cookie: None,
            curated_terms_path: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get("FOODSWAP_BACKEND_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    var: "FOODSWAP_BACKEND_URL",
                    value: url,
                    reason: "expected an http:// or https:// URL".to_string(),
                });
            }
            config.backend_url = url;
        }

        if let Some(value) = get("FOODSWAP_FOOD_SOURCE") {
            config.food_source = SourceKind::from_str(&value).ok_or_else(|| ConfigError::Invalid {
                var: "FOODSWAP_FOOD_SOURCE",
                value: value.clone(),
                reason: "expected 'llm' or 'usda'".to_string(),
            })?;
        }

        if let Some(value) = get("FOODSWAP_PAGE_SIZE") {
            config.page_size = parse_positive("FOODSWAP_PAGE_SIZE", &value)?;
        }
        if let Some(value) = get("FOODSWAP_ALTERNATIVE_PAGE_SIZE") {
            config.alternative_page_size = parse_positive("FOODSWAP_ALTERNATIVE_PAGE_SIZE", &value)?;
        }
        if let Some(value) = get("FOODSWAP_HTTP_TIMEOUT_SECS") {
            let secs = parse_positive("FOODSWAP_HTTP_TIMEOUT_SECS", &value)?;
            config.http_timeout = Duration::from_secs(u64::from(secs));
        }

        config.session_cookie = get("FOODSWAP_SESSION_COOKIE");
        config.curated_terms_path = get("FOODSWAP_CURATED_TERMS").map(PathBuf::from);

        Ok(config)
    }

    /// Curated terms from the configured file, or the built-in table
    pub fn curated_terms(&self) -> ConfigResult<CuratedTerms> {
        match &self.curated_terms_path {
            Some(path) => {
                let terms = CuratedTerms::from_json_file(path).map_err(|reason| ConfigError::CuratedTerms {
                    path: path.clone(),
                    reason,
                })?;
                tracing::info!("Loaded {} curated terms from {}", terms.len(), path.display());
                Ok(terms)
            }
            None => Ok(CuratedTerms::builtin()),
        }
    }
}

fn parse_positive(var: &'static str, value: &str) -> ConfigResult<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "must be greater than 0".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> ConfigResult<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.food_source, SourceKind::Usda);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.alternative_page_size, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.session_cookie.is_none());
        assert!(config.curated_terms().unwrap().terms_for("pizza").is_some());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FOODSWAP_BACKEND_URL", "https://food.example.com"),
            ("FOODSWAP_FOOD_SOURCE", "LLM"),
            ("FOODSWAP_PAGE_SIZE", "25"),
            ("FOODSWAP_HTTP_TIMEOUT_SECS", "3"),
            ("FOODSWAP_SESSION_COOKIE", "session=abc"),
            ("FOODSWAP_ALTERNATIVE_PAGE_SIZE", "  "),
        ])
        .unwrap();
        assert_eq!(config.backend_url, "https://food.example.com");
        assert_eq!(config.food_source, SourceKind::Llm);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.alternative_page_size, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("FOODSWAP_FOOD_SOURCE", "openfoodfacts")]).is_err());
        assert!(load(&[("FOODSWAP_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("FOODSWAP_PAGE_SIZE", "ten")]).is_err());
        let err = load(&[("FOODSWAP_BACKEND_URL", "localhost:5000")]).unwrap_err();
        assert!(err.to_string().contains("FOODSWAP_BACKEND_URL"));
    }

    #[test]
    fn test_missing_curated_file() {
        let config = load(&[("FOODSWAP_CURATED_TERMS", "/nonexistent/terms.json")]).unwrap();
        assert!(matches!(
            config.curated_terms(),
            Err(ConfigError::CuratedTerms { .. })
        ));
    }
}
