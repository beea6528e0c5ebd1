use std::env;
use std::path::PathBuf;

pub const APP_NAME: &str = "EasyBook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CATALOG_ENV: &str = "EASYBOOK_CATALOG";
pub const LOG_ENV: &str = "EASYBOOK_LOG";

/// Log filter used when neither RUST_LOG nor EASYBOOK_LOG is set.
pub fn default_log_filter() -> &'static str {
    "easybook=info"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON catalog to load instead of the bundled one.
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
    /// Variables that were unset or blank and fell back to a default.
    pub fallbacks: Vec<&'static str>,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Runs before logging is initialised, so fallbacks are reported by the
    /// caller rather than logged here.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(CATALOG_ENV).ok(), env::var(LOG_ENV).ok())
    }

    fn from_vars(catalog: Option<String>, log: Option<String>) -> Self {
        let catalog_path = catalog
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let log_filter = log.filter(|value| !value.trim().is_empty());

        let mut fallbacks = Vec::new();
        if catalog_path.is_none() {
            fallbacks.push(CATALOG_ENV);
        }
        if log_filter.is_none() {
            fallbacks.push(LOG_ENV);
        }
        let log_filter = log_filter.unwrap_or_else(|| default_log_filter().to_string());

        AppConfig {
            catalog_path,
            log_filter,
            fallbacks,
        }
    }

    pub fn uses_bundled_catalog(&self) -> bool {
        self.catalog_path.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_vars() {
        let config = AppConfig::from_vars(None, None);
        assert!(config.uses_bundled_catalog());
        assert_eq!(config.log_filter, "easybook=info");
        assert_eq!(config.fallbacks, vec![CATALOG_ENV, LOG_ENV]);
    }

    #[test]
    fn catalog_path_from_var() {
        let config = AppConfig::from_vars(
            Some(" /tmp/doctors.json ".to_string()),
            Some("debug".to_string()),
        );
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/doctors.json")));
        assert_eq!(config.log_filter, "debug");
        assert!(config.fallbacks.is_empty());
    }

    #[test]
    fn blank_values_fall_back() {
        let config = AppConfig::from_vars(Some("   ".to_string()), Some("".to_string()));
        assert!(config.uses_bundled_catalog());
        assert_eq!(config.log_filter, default_log_filter());
        assert_eq!(config.fallbacks, vec![CATALOG_ENV, LOG_ENV]);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
