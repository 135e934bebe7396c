//! Application configuration schema.
//!
//! The configuration is deserialized from a TOML file merged with
//! `CONFBAK`-prefixed environment variables via the `config` crate. Every
//! section and field is optional; an empty configuration is valid and means
//! "no extensions, all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Run-wide default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Run-wide default settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory containing extension shared libraries. When absent, no
    /// extensions are loaded.
    #[serde(default)]
    pub plugins_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a TOML file merged with environment variables.
    ///
    /// When `path` is `None`, a `confbak.toml` in the working directory is
    /// used if present. Environment variables use the `CONFBAK` prefix with
    /// `__` as the nesting separator, e.g.
    /// `CONFBAK_DEFAULTS__PLUGINS_DIR=/etc/confbak/plugins`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let builder = match path {
            Some(path) => config::Config::builder().add_source(config::File::from(path)),
            None => config::Config::builder()
                .add_source(config::File::with_name("confbak").required(false)),
        };

        let merged = builder
            .add_source(
                config::Environment::with_prefix("CONFBAK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        merged
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_config_has_no_plugins_dir() {
        let cfg = parse("");
        assert!(cfg.defaults.plugins_dir.is_none());
    }

    #[test]
    fn plugins_dir_is_parsed() {
        let cfg = parse("[defaults]\nplugins_dir = \"/etc/confbak/plugins\"\n");
        assert_eq!(
            cfg.defaults.plugins_dir.as_deref(),
            Some(Path::new("/etc/confbak/plugins"))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/confbak.toml"))).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
