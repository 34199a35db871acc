use std::sync::Arc;

use fleet_core::{DashboardOutbound, Statistics, VoyagePort};
use tracing::instrument;

use crate::ViewStatus;

/// Fleet wide counters shown on the landing page.
pub struct OverviewPage {
    api: Arc<dyn DashboardOutbound>,
    statistics: Option<Statistics>,
    pub status: ViewStatus,
}

impl OverviewPage {
    pub fn new(api: Arc<dyn DashboardOutbound>) -> Self {
        Self {
            api,
            statistics: None,
            status: ViewStatus::default(),
        }
    }

    #[instrument(skip(self))]
    pub async fn mount(&mut self) {
        self.status.start();
        if let Some(statistics) = self
            .status
            .check("load statistics", self.api.statistics().await)
        {
            self.statistics = Some(statistics);
        }
        self.status.finish();
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }
}
