use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, File};
use fleet_api::ApiSettings;
use fleet_core::{ExpenseCategory, LedgerFilter};
use serde::Deserialize;
use snafu::ResultExt;
use strum::{AsRefStr, Display, EnumString};
use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{Result, error::ConfigSnafu};

const ENV_PREFIX: &str = "FLEET_DASHBOARD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Local,
    Test,
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub api: ApiSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub filter: ExportFilter,
}

/// Filter of the exported ledger listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub vessel_name: Option<String>,
    pub category: Option<ExpenseCategory>,
}

impl Settings {
    /// Loads `config/{APP_ENVIRONMENT}.yml`, the environment defaults to `local`.
    pub fn new() -> Result<Self> {
        let environment = std::env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Environment::Local);

        Self::from_dir("config", environment)
    }

    pub fn from_dir(dir: impl AsRef<Path>, environment: Environment) -> Result<Self> {
        let base = dir.as_ref().join(environment.as_ref());
        let secret = dir.as_ref().join(format!("{environment}.secret"));

        Config::builder()
            .add_source(File::with_name(&base.to_string_lossy()).required(true))
            .add_source(File::with_name(&secret.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_override("environment", environment.as_ref())
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .context(ConfigSnafu)
    }

    pub fn init_tracer(&self) {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::from(self.log_level))
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            warn!("a tracing subscriber is already installed");
        }
    }
}

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl From<&ExportFilter> for LedgerFilter {
    fn from(v: &ExportFilter) -> Self {
        Self {
            start_date: v.start_date,
            end_date: v.end_date,
            vessel_name: v.vessel_name.clone(),
            category: v.category,
            ..Default::default()
        }
    }
}
