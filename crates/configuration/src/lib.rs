use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod model_settings;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use model_settings::{
    AnomalyScoreWeights, AnomalySettings, ConfidenceBands, EnsembleWeights, ForecastSettings,
};
pub use settings::{
    AnalyticsConfig, BenchmarkTable, CategorySettings, DEFAULT_INDUSTRY, IndustryProfiles,
    ScoringSettings,
};

/// Loads the analytics configuration from the `config.toml` file in the working directory.
///
/// The file is deserialized into the strongly-typed [`AnalyticsConfig`] and then
/// validated, so a configuration returned from here is safe to build engines from.
pub fn load_config() -> Result<AnalyticsConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml"))
        .build()?;

    finish(builder)
}

/// Loads the configuration from an explicit file path.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<AnalyticsConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()))
        .build()?;

    finish(builder)
}

/// Parses the configuration from an in-memory TOML document.
pub fn load_config_from_str(toml: &str) -> Result<AnalyticsConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<AnalyticsConfig, ConfigError> {
    let config = builder.try_deserialize::<AnalyticsConfig>()?;
    config.validate()?;

    tracing::debug!(
        industries = config.benchmarks.industries().count(),
        categories = config.scoring.categories.len(),
        "Analytics configuration loaded"
    );
    Ok(config)
}
