use serde::Deserialize;
use std::env;

/// Tunable business values for the offer surface.
///
/// Defaults apply when no config files are present, so library callers
/// can construct the surface without any on-disk configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SurfaceConfig {
    /// Commission share shown next to each quote.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,

    /// Cap on multi-date picks per offer; unlimited when absent.
    #[serde(default)]
    pub max_selected_dates: Option<usize>,
}

fn default_commission_rate() -> f64 {
    0.10
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            commission_rate: default_commission_rate(),
            max_selected_dates: None,
        }
    }
}

impl SurfaceConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file
            // Default to 'development' env
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of VERANDA)
            // Eg.. `VERANDA_COMMISSION_RATE=0.12` would set the commission rate
            .add_source(config::Environment::with_prefix("VERANDA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
