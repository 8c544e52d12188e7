use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is not set (e.g., "info", "analytics=debug").
    pub log_level: String,
    #[serde(default)]
    pub impact: ImpactSettings,
    pub events: EventSettings,
    pub report: ReportSettings,
}

/// Parameters for the before/after impact summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImpactSettings {
    /// Day window around the changepoint. When absent, the series is split at tau and
    /// every row on each side is used.
    #[serde(default)]
    pub window_days: Option<u32>,
}

/// Parameters for relating the changepoint to external events.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSettings {
    /// How many of the closest events to list.
    pub nearest_k: usize,
    /// Half-width, in days, of the window used to list surrounding events.
    pub window_days: u32,
}

/// Controls how results are printed.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub format: OutputFormat,
    /// Decimal places for floating point values in table output.
    pub precision: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
}
