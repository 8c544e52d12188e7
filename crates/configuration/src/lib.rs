use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, EventSettings, ImpactSettings, OutputFormat, ReportSettings};

/// Printed floats are formatted with at most this many decimals.
const MAX_PRECISION: usize = 17;

/// Loads the application configuration.
///
/// Built-in defaults are overlaid by an optional `config.toml` in the working directory,
/// then by `CHANGEPOINT_*` environment variables (nested keys use `__`, e.g.
/// `CHANGEPOINT_EVENTS__NEAREST_K=5`).
pub fn load_config() -> Result<Config, ConfigError> {
    load(File::with_name("config.toml").required(false))
}

/// Like `load_config`, but reads the given file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load(File::from(path).format(FileFormat::Toml))
}

fn load<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .set_default("log_level", "info")?
        .set_default("events.nearest_k", 3)?
        .set_default("events.window_days", 90)?
        .set_default("report.format", "table")?
        .set_default("report.precision", 6)?
        .add_source(file)
        .add_source(
            Environment::with_prefix("CHANGEPOINT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;
    tracing::debug!(?config, "Loaded configuration");

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report.precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "report.precision must be at most {MAX_PRECISION}, got {}",
            config.report.precision
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        load(File::from_str(toml, FileFormat::Toml))
    }

    #[test]
    fn defaults_apply_to_an_empty_file() {
        let config = from_toml("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.impact.window_days, None);
        assert_eq!(config.events.nearest_k, 3);
        assert_eq!(config.events.window_days, 90);
        assert_eq!(config.report.format, OutputFormat::Table);
        assert_eq!(config.report.precision, 6);
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            log_level = "debug"
            [impact]
            window_days = 30
            [events]
            nearest_k = 5
            [report]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.impact.window_days, Some(30));
        assert_eq!(config.events.nearest_k, 5);
        assert_eq!(config.events.window_days, 90);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_excessive_precision() {
        let err = from_toml("[report]\nprecision = 40").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_negative_windows() {
        let err = from_toml("[events]\nwindow_days = -5").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
