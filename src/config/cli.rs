use super::toml_config::SubmitterConfig;
use crate::domain::model::Document;
use crate::domain::ports::TimeUnit;
use crate::utils::error::{CrptError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "crpt-submit")]
#[command(about = "Submit signed commissioning documents under a request rate limit")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the registration endpoint URL")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Maximum submissions per time unit")]
    pub request_limit: Option<usize>,

    #[arg(long, value_enum, help = "Length of the rate window")]
    pub time_unit: Option<TimeUnit>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "JSON file holding the document")]
    pub document: PathBuf,

    #[arg(long)]
    pub signature: String,

    #[arg(long, default_value = "1", help = "Submit the document this many times")]
    pub repeat: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// File values first, then command line overrides, then validation.
    pub fn resolve(&self) -> Result<SubmitterConfig> {
        let mut config = match &self.config {
            Some(path) => SubmitterConfig::from_file(path)?,
            None => {
                let request_limit = self.request_limit.ok_or_else(|| {
                    CrptError::invalid_configuration(
                        "request_limit",
                        "--request-limit is required without --config",
                    )
                })?;
                let time_unit = self.time_unit.unwrap_or(TimeUnit::Seconds);
                SubmitterConfig::new(time_unit, request_limit)
            }
        };

        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(request_limit) = self.request_limit {
            config.rate_limit.request_limit = request_limit;
        }
        if let Some(time_unit) = self.time_unit {
            config.rate_limit.time_unit = time_unit;
        }
        if self.timeout_seconds.is_some() {
            config.api.timeout_seconds = self.timeout_seconds;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_document(&self) -> Result<Document> {
        let content = std::fs::read_to_string(&self.document)?;
        Ok(serde_json::from_str(&content)?)
    }
}
