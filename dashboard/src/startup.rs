use std::{path::PathBuf, sync::Arc};

use chrono::{Local, NaiveDate};
use fleet_api::FleetApiClient;
use fleet_core::{DashboardOutbound, LedgerFilter, LedgerKind, LedgerPort};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use crate::{
    Result, export,
    ledgers::LedgerLists,
    settings::{ExportSettings, Settings},
};

/// The `ledger-export` job: loads the global ledger listings and writes one CSV per ledger.
pub struct App {
    api: Arc<dyn DashboardOutbound>,
    export: ExportSettings,
}

impl App {
    pub fn build(settings: &Settings) -> Result<Self> {
        let api = FleetApiClient::new(&settings.api)?;
        info!("using api at {}", api.base_url());

        Ok(Self::with_api(Arc::new(api), settings.export.clone()))
    }

    pub fn with_api(api: Arc<dyn DashboardOutbound>, export: ExportSettings) -> Self {
        Self { api, export }
    }

    pub async fn run(self) -> Result<Vec<PathBuf>> {
        let today = Local::now().date_naive();
        run_export(&*self.api, &self.export, today).await
    }
}

#[instrument(skip(api))]
pub async fn run_export<A: LedgerPort + ?Sized>(
    api: &A,
    settings: &ExportSettings,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    let filter = LedgerFilter::from(&settings.filter);
    let lists = LedgerLists::load_all(api, &filter).await?;

    LedgerKind::iter()
        .map(|kind| export::export_ledger(&settings.output_dir, &lists, kind, date))
        .collect()
}
