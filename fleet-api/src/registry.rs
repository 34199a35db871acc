use async_trait::async_trait;
use fleet_core::{
    CsvImportResult, Facet, RegistryFilter, RegistryPage, RegistryPort, RegistryStatus, Result,
    Upload, VesselRegistry, VesselRegistryId, VesselRegistryUpdate,
};
use http_client::Form;
use tracing::instrument;

use crate::{FleetApiClient, client::file_part};

#[async_trait]
impl RegistryPort for FleetApiClient {
    #[instrument(skip(self))]
    async fn vessel_registry(&self, filter: &RegistryFilter) -> Result<RegistryPage> {
        self.get_with("/vessel-registry", &filter.query()).await
    }

    #[instrument(skip(self))]
    async fn vessel_registry_detail(&self, id: VesselRegistryId) -> Result<VesselRegistry> {
        self.data(&format!("/vessel-registry/{id}")).await
    }

    #[instrument(skip(self))]
    async fn update_vessel_registry(
        &self,
        id: VesselRegistryId,
        update: &VesselRegistryUpdate,
    ) -> Result<VesselRegistry> {
        self.put(&format!("/vessel-registry/{id}"), update).await
    }

    #[instrument(skip(self))]
    async fn ports(&self) -> Result<Vec<Facet>> {
        self.list("/vessel-registry/ports/list").await
    }

    #[instrument(skip(self))]
    async fn groups(&self) -> Result<Vec<Facet>> {
        self.list("/vessel-registry/groups/list").await
    }

    #[instrument(skip(self))]
    async fn business_types(&self) -> Result<Vec<Facet>> {
        self.list("/vessel-registry/business-types/list").await
    }

    #[instrument(skip(self))]
    async fn organizations(&self) -> Result<Vec<Facet>> {
        self.list("/vessel-registry/organizations/list").await
    }

    #[instrument(skip(self))]
    async fn vessel_registry_status(&self) -> Result<RegistryStatus> {
        self.get("/vessel-registry/status").await
    }

    #[instrument(skip(self, csv), fields(file_name = %csv.file_name))]
    async fn upload_vessel_csv(&self, csv: &Upload, force: bool) -> Result<CsvImportResult> {
        let form = Form::new().part("file", file_part(csv)?);
        self.post_multipart(
            "/vessel-registry/upload-csv",
            &[("force", force.to_string())],
            form,
        )
        .await
    }
}
