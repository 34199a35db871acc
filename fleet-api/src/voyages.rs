use async_trait::async_trait;
use fleet_core::{
    MonthlyVoyage, MonthlyVoyageRequest, Result, Statistics, Voyage, VoyageFilter, VoyageId,
    VoyagePort, VoyageUpdate,
};
use tracing::instrument;

use crate::FleetApiClient;

#[async_trait]
impl VoyagePort for FleetApiClient {
    #[instrument(skip(self))]
    async fn voyages(&self, filter: &VoyageFilter) -> Result<Vec<Voyage>> {
        self.list_with("/voyages", filter).await
    }

    #[instrument(skip(self))]
    async fn voyage(&self, id: &VoyageId) -> Result<Voyage> {
        self.data(&format!("/voyages/{id}")).await
    }

    #[instrument(skip(self))]
    async fn update_voyage(&self, id: &VoyageId, update: &VoyageUpdate) -> Result<Voyage> {
        self.put(&format!("/voyages/{id}"), update).await
    }

    #[instrument(skip(self))]
    async fn get_or_create_monthly_voyage(
        &self,
        request: &MonthlyVoyageRequest,
    ) -> Result<MonthlyVoyage> {
        self.post_query("/voyages/get-or-create-monthly", request)
            .await
    }

    #[instrument(skip(self))]
    async fn statistics(&self) -> Result<Statistics> {
        self.get("/statistics").await
    }
}
