use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::env;
use tourdesk_catalog::{MarkupPolicy, PricingConfig};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    #[serde(default = "default_child_ratio")]
    pub child_ratio: f64,
    #[serde(default = "default_infant_ratio")]
    pub infant_ratio: f64,
    /// Used when a quote request carries no markup of its own
    #[serde(default)]
    pub default_markup: MarkupPolicy,
}

fn default_child_ratio() -> f64 { PricingConfig::default().child_ratio }
fn default_infant_ratio() -> f64 { PricingConfig::default().infant_ratio }

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            child_ratio: default_child_ratio(),
            infant_ratio: default_infant_ratio(),
            default_markup: MarkupPolicy::default(),
        }
    }
}

impl PricingSettings {
    pub fn fallback_ratios(&self) -> PricingConfig {
        PricingConfig {
            child_ratio: self.child_ratio,
            infant_ratio: self.infant_ratio,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "tourdesk_cli=info,tourdesk_booking=info,tourdesk_offer=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `TOURDESK__PRICING__INFANT_RATIO=0.5`
            .add_source(
                config::Environment::with_prefix("TOURDESK")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
