use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Environment variables consulted, in order, when no API key is configured
pub const API_KEY_FALLBACK_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .ahp/config.yaml (project config)
    /// 3. .ahp/local.yaml (project local overrides, optional)
    /// 4. Environment variables (AHP_* prefix, `__` for nesting)
    ///
    /// The API key then falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    pub fn load() -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".ahp/config.yaml"))
            .merge(Yaml::file(".ahp/local.yaml"))
            .merge(Env::prefixed("AHP_").split("__"));

        Self::finish(figment).context("Failed to extract configuration from figment")
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("AHP_").split("__"));

        Self::finish(figment).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn finish(figment: Figment) -> Result<Config> {
        let mut config: Config = figment.extract()?;
        Self::apply_api_key_fallback(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_api_key_fallback(config: &mut Config) {
        if config
            .generator
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
        {
            return;
        }

        config.generator.api_key = API_KEY_FALLBACK_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));
    }

    /// Validate configuration after loading
    ///
    /// Generator settings are checked when the generator is built, where a bad
    /// value degrades that backend instead of stopping the process.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LogFormat, RotationPolicy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NO_KEYS: [(&str, Option<&str>); 2] =
        [("GEMINI_API_KEY", None), ("GOOGLE_API_KEY", None)];

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generator.model, "gemini-2.5-flash");
        assert_eq!(
            config.generator.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert!(config.generator.api_key.is_none());
        assert!(config.generator.timeout_secs.is_none());
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
generator:
  model: gemini-2.0-pro
  timeout_secs: 45
logging:
  level: debug
  format: json
  rotation: hourly
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.generator.model, "gemini-2.0-pro");
        assert_eq!(config.generator.timeout_secs, Some(45));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.rotation, RotationPolicy::Hourly);
        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_from_file_merges_defaults() {
        let file = yaml_file("generator:\n  api_key: from-file\n");

        temp_env::with_vars(NO_KEYS, || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.generator.api_key.as_deref(), Some("from-file"));
            assert_eq!(config.generator.model, "gemini-2.5-flash");
        });
    }

    #[test]
    fn test_env_overrides_file() {
        let file = yaml_file("generator:\n  model: from-file\n");

        temp_env::with_vars(
            [
                ("AHP_GENERATOR__MODEL", Some("from-env")),
                ("AHP_LOGGING__LEVEL", Some("info")),
                ("GEMINI_API_KEY", None),
                ("GOOGLE_API_KEY", None),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.generator.model, "from-env");
                assert_eq!(config.logging.level, "info");
            },
        );
    }

    #[test]
    fn test_api_key_fallback_to_gemini_env() {
        let file = yaml_file("logging:\n  level: warn\n");

        temp_env::with_vars(
            [
                ("GEMINI_API_KEY", Some("gemini-key")),
                ("GOOGLE_API_KEY", Some("google-key")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.generator.api_key.as_deref(), Some("gemini-key"));
            },
        );
    }

    #[test]
    fn test_api_key_fallback_to_google_env() {
        let file = yaml_file("logging:\n  level: warn\n");

        temp_env::with_vars(
            [("GEMINI_API_KEY", None), ("GOOGLE_API_KEY", Some("google-key"))],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.generator.api_key.as_deref(), Some("google-key"));
            },
        );
    }

    #[test]
    fn test_configured_key_wins_over_fallback() {
        let file = yaml_file("generator:\n  api_key: configured\n");

        temp_env::with_var("GEMINI_API_KEY", Some("fallback"), || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.generator.api_key.as_deref(), Some("configured"));
        });
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = ConfigLoader::load_from_file("/definitely/not/here.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_file_value_is_error() {
        let file = yaml_file("logging:\n  level: loud\n");

        temp_env::with_vars(NO_KEYS, || {
            let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
            assert!(format!("{err:#}").contains("Invalid log level: loud"));
        });
    }

    #[test]
    fn test_unusable_generator_settings_still_load() {
        let file = yaml_file("generator:\n  model: \"\"\n  timeout_secs: 0\n  api_key: from-file\n");

        temp_env::with_vars(NO_KEYS, || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.generator.model, "");
            assert_eq!(config.generator.timeout_secs, Some(0));
        });
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }
}
