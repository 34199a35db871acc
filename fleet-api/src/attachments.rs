use async_trait::async_trait;
use fleet_core::{
    AttachmentPort, FileId, MemoId, PhotoId, Result, Upload, VesselFile, VesselMemo, VesselPhoto,
    VesselRegistryId,
};
use http_client::Form;
use serde::Serialize;
use tracing::instrument;

use crate::{FleetApiClient, client::file_part, envelope::Data};

#[derive(Debug, Serialize)]
struct MemoBody<'a> {
    content: &'a str,
}

const NO_QUERY: [(&str, &str); 0] = [];

#[async_trait]
impl AttachmentPort for FleetApiClient {
    #[instrument(skip(self))]
    async fn vessel_memos(&self, id: VesselRegistryId) -> Result<Vec<VesselMemo>> {
        self.list(&format!("/vessel-registry/{id}/memos")).await
    }

    #[instrument(skip(self, content))]
    async fn create_vessel_memo(&self, id: VesselRegistryId, content: &str) -> Result<VesselMemo> {
        self.post(&format!("/vessel-registry/{id}/memos"), &MemoBody { content })
            .await
    }

    #[instrument(skip(self, content))]
    async fn update_vessel_memo(
        &self,
        id: VesselRegistryId,
        memo_id: MemoId,
        content: &str,
    ) -> Result<VesselMemo> {
        self.put(
            &format!("/vessel-registry/{id}/memos/{}", memo_id.0),
            &MemoBody { content },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_vessel_memo(&self, id: VesselRegistryId, memo_id: MemoId) -> Result<()> {
        self.delete(&format!("/vessel-registry/{id}/memos/{}", memo_id.0))
            .await
    }

    #[instrument(skip(self))]
    async fn vessel_photos(&self, id: VesselRegistryId) -> Result<Vec<VesselPhoto>> {
        self.list(&format!("/vessel-registry/{id}/photos")).await
    }

    #[instrument(skip(self, photo), fields(file_name = %photo.file_name))]
    async fn upload_vessel_photo(
        &self,
        id: VesselRegistryId,
        photo: &Upload,
        is_primary: bool,
    ) -> Result<VesselPhoto> {
        let form = Form::new()
            .part("file", file_part(photo)?)
            .text("is_primary", is_primary.to_string());

        let response: Data<VesselPhoto> = self
            .post_multipart(&format!("/vessel-registry/{id}/photos"), &NO_QUERY, form)
            .await?;
        Ok(response.data)
    }

    #[instrument(skip(self))]
    async fn delete_vessel_photo(&self, id: VesselRegistryId, photo_id: PhotoId) -> Result<()> {
        self.delete(&format!("/vessel-registry/{id}/photos/{}", photo_id.0))
            .await
    }

    #[instrument(skip(self))]
    async fn set_primary_photo(&self, id: VesselRegistryId, photo_id: PhotoId) -> Result<()> {
        self.put_empty(&format!(
            "/vessel-registry/{id}/photos/{}/primary",
            photo_id.0
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn vessel_files(&self, id: VesselRegistryId) -> Result<Vec<VesselFile>> {
        self.list(&format!("/vessel-registry/{id}/files")).await
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    async fn upload_vessel_file(
        &self,
        id: VesselRegistryId,
        file: &Upload,
        description: &str,
    ) -> Result<VesselFile> {
        let form = Form::new()
            .part("file", file_part(file)?)
            .text("description", description.to_string());

        let response: Data<VesselFile> = self
            .post_multipart(&format!("/vessel-registry/{id}/files"), &NO_QUERY, form)
            .await?;
        Ok(response.data)
    }

    #[instrument(skip(self))]
    async fn delete_vessel_file(&self, id: VesselRegistryId, file_id: FileId) -> Result<()> {
        self.delete(&format!("/vessel-registry/{id}/files/{}", file_id.0))
            .await
    }

    fn photo_url(&self, filename: &str) -> String {
        self.url(&format!("/uploads/photos/{filename}"))
    }

    fn file_download_url(&self, filename: &str) -> String {
        self.url(&format!("/uploads/files/{filename}"))
    }
}
