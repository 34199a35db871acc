use async_trait::async_trait;
use fleet_core::{Mmsi, Result, VesselInfo, VesselPort};
use tracing::instrument;

use crate::FleetApiClient;

#[async_trait]
impl VesselPort for FleetApiClient {
    #[instrument(skip(self))]
    async fn vessels(&self, search: Option<&str>) -> Result<Vec<VesselInfo>> {
        let query = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| ("search", s))
            .into_iter()
            .collect::<Vec<_>>();

        self.list_with("/vessels", &query).await
    }

    #[instrument(skip(self))]
    async fn vessel(&self, mmsi: &Mmsi) -> Result<VesselInfo> {
        self.data(&format!("/vessels/{mmsi}")).await
    }
}
