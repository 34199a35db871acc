use std::sync::Arc;

use fleet_core::{
    AttachmentPort, CsvImportResult, DashboardOutbound, FileId, MemoId, PhotoId, RegistryFilter,
    RegistryPage, RegistryPort, RegistryStatus, Result, Upload, VesselFile, VesselMemo,
    VesselPhoto, VesselRegistry, VesselRegistryId,
};
use futures::try_join;
use tracing::{error, info, instrument, warn};

use crate::{
    Confirm, ViewStatus,
    confirm::{DELETE_FILE, DELETE_MEMO, DELETE_PHOTO},
    facets::FacetLists,
    forms::{MemoForm, RegistryEditForm},
};

pub const PAGE_SIZE: u32 = 15;

/// Memos, photos and files of a registry vessel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    pub memos: Vec<VesselMemo>,
    pub photos: Vec<VesselPhoto>,
    pub files: Vec<VesselFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VesselDetail {
    pub vessel: VesselRegistry,
    pub attachments: Attachments,
}

/// Outcome of a batch upload, one entry per file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: Vec<String>,
    /// Files that are not images, only relevant for photo uploads.
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
    pub primary: Option<PhotoId>,
}

/// Paginated registry search with the vessel detail dialog, its attachments and the edit dialog.
pub struct VesselRegistryPage {
    api: Arc<dyn DashboardOutbound>,
    pub filter: RegistryFilter,
    page: Option<RegistryPage>,
    current_page: u32,
    facets: FacetLists,
    registry_status: Option<RegistryStatus>,
    detail: Option<VesselDetail>,
    edit: Option<(VesselRegistryId, RegistryEditForm)>,
    pub memo_form: MemoForm,
    memo_edit: Option<(MemoId, MemoForm)>,
    pub file_description: String,
    pub status: ViewStatus,
}

impl Attachments {
    #[instrument(skip(api))]
    pub async fn load<A: AttachmentPort + ?Sized>(api: &A, id: VesselRegistryId) -> Result<Self> {
        let (memos, photos, files) =
            try_join!(api.vessel_memos(id), api.vessel_photos(id), api.vessel_files(id))?;

        Ok(Self {
            memos,
            photos,
            files,
        })
    }

    pub fn primary_photo(&self) -> Option<&VesselPhoto> {
        self.photos.iter().find(|p| p.is_primary)
    }
}

impl VesselRegistryPage {
    pub fn new(api: Arc<dyn DashboardOutbound>) -> Self {
        Self {
            api,
            filter: RegistryFilter::default(),
            page: None,
            current_page: 1,
            facets: FacetLists::default(),
            registry_status: None,
            detail: None,
            edit: None,
            memo_form: MemoForm::default(),
            memo_edit: None,
            file_description: String::new(),
            status: ViewStatus::default(),
        }
    }

    /// Loads the filter options, the registry status and the first page.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) {
        self.status.start();
        self.load_facets().await;
        if let Some(status) = self
            .status
            .check("load registry status", self.api.vessel_registry_status().await)
        {
            self.registry_status = Some(status);
        }
        self.status.finish();

        self.load_page(1).await;
    }

    pub async fn search(&mut self) {
        self.load_page(1).await;
    }

    /// A failed load keeps the previous page.
    #[instrument(skip(self))]
    pub async fn load_page(&mut self, page: u32) {
        self.status.start();

        let filter = RegistryFilter {
            page: Some(page.max(1)),
            page_size: Some(PAGE_SIZE),
            ..self.filter.clone()
        };
        if let Some(result) = self
            .status
            .check("search registry", self.api.vessel_registry(&filter).await)
        {
            self.current_page = result.page;
            self.page = Some(result);
        }

        self.status.finish();
    }

    pub async fn reset_filters(&mut self) {
        self.filter = RegistryFilter::default();
        self.load_page(1).await;
    }

    async fn load_facets(&mut self) {
        if let Some(facets) = self.status.check(
            "load filter options",
            FacetLists::load_with_ports(&*self.api).await,
        ) {
            self.facets = facets;
        }
    }

    /// Opens the detail dialog, the dialog is only shown once the attachments are loaded.
    #[instrument(skip(self))]
    pub async fn open_detail(&mut self, id: VesselRegistryId) {
        self.status.start();
        let api = &*self.api;
        let detail = async {
            let vessel = api.vessel_registry_detail(id).await?;
            let attachments = Attachments::load(api, id).await?;
            Ok::<_, fleet_core::Error>(VesselDetail {
                vessel,
                attachments,
            })
        }
        .await;

        if let Some(detail) = self.status.check("load vessel detail", detail) {
            self.memo_form = MemoForm::default();
            self.memo_edit = None;
            self.detail = Some(detail);
        }
        self.status.finish();
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.memo_edit = None;
    }

    async fn reload_attachments(&mut self) {
        let Some(detail) = &self.detail else {
            return;
        };
        let id = detail.vessel.id;
        if let Some(attachments) = self
            .status
            .check("load attachments", Attachments::load(&*self.api, id).await)
        {
            if let Some(detail) = self.detail.as_mut() {
                detail.attachments = attachments;
            }
        }
    }

    fn detail_id(&self) -> Option<VesselRegistryId> {
        self.detail.as_ref().map(|d| d.vessel.id)
    }

    pub fn open_edit(&mut self, vessel: &VesselRegistry) {
        self.edit = Some((vessel.id, RegistryEditForm::from(vessel)));
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut RegistryEditForm> {
        self.edit.as_mut().map(|(_, f)| f)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Sends the edited fields, then reloads the current page and the filter options since the
    /// edit may have introduced a new group, port or business type.
    #[instrument(skip(self))]
    pub async fn save_edit(&mut self) -> bool {
        let Some((id, form)) = &self.edit else {
            return false;
        };
        let id = *id;
        let update = match form.validate() {
            Ok(v) => v,
            Err(e) => {
                self.status.invalid(&e);
                return false;
            }
        };

        self.status.start();
        let saved = self
            .status
            .check("update vessel", self.api.update_vessel_registry(id, &update).await);
        let Some(vessel) = saved else {
            self.status.finish();
            return false;
        };

        self.edit = None;
        if let Some(detail) = self.detail.as_mut().filter(|d| d.vessel.id == id) {
            detail.vessel = vessel;
        }
        self.load_facets().await;
        self.status.finish();

        self.load_page(self.current_page).await;
        true
    }

    #[instrument(skip(self))]
    pub async fn add_memo(&mut self) -> bool {
        let Some(id) = self.detail_id() else {
            return false;
        };
        let content = match self.memo_form.validate() {
            Ok(v) => v,
            Err(e) => {
                self.status.invalid(&e);
                return false;
            }
        };

        self.status.start();
        let created = self
            .status
            .check("create memo", self.api.create_vessel_memo(id, &content).await)
            .is_some();
        if created {
            self.memo_form = MemoForm::default();
            self.reload_attachments().await;
        }
        self.status.finish();

        created
    }

    pub fn start_memo_edit(&mut self, memo: &VesselMemo) {
        self.memo_edit = Some((
            memo.id,
            MemoForm {
                content: memo.content.clone(),
            },
        ));
    }

    pub fn memo_edit_mut(&mut self) -> Option<&mut MemoForm> {
        self.memo_edit.as_mut().map(|(_, f)| f)
    }

    pub fn cancel_memo_edit(&mut self) {
        self.memo_edit = None;
    }

    #[instrument(skip(self))]
    pub async fn save_memo_edit(&mut self) -> bool {
        let (Some(id), Some((memo_id, form))) = (self.detail_id(), &self.memo_edit) else {
            return false;
        };
        let memo_id = *memo_id;
        let content = match form.validate() {
            Ok(v) => v,
            Err(e) => {
                self.status.invalid(&e);
                return false;
            }
        };

        self.status.start();
        let saved = self
            .status
            .check(
                "update memo",
                self.api.update_vessel_memo(id, memo_id, &content).await,
            )
            .is_some();
        if saved {
            self.memo_edit = None;
            self.reload_attachments().await;
        }
        self.status.finish();

        saved
    }

    #[instrument(skip(self, confirm))]
    pub async fn delete_memo(&mut self, memo_id: MemoId, confirm: &impl Confirm) -> bool {
        let Some(id) = self.detail_id() else {
            return false;
        };
        if !confirm.confirm(DELETE_MEMO) {
            return false;
        }

        self.status.start();
        let deleted = self
            .status
            .check("delete memo", self.api.delete_vessel_memo(id, memo_id).await)
            .is_some();
        self.reload_attachments().await;
        self.status.finish();

        deleted
    }

    /// Uploads `files` one by one, non image files are skipped.
    ///
    /// If the vessel had no photo before the batch, the first photo that uploads successfully
    /// becomes the primary photo. A failed upload does not stop the batch.
    ///
    /// The photos are read again before the batch, the dialog's list may be out of date. If that
    /// read fails the dialog's list is used.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_photos(&mut self, files: Vec<Upload>) -> UploadReport {
        let mut report = UploadReport::default();
        let Some(detail) = &self.detail else {
            return report;
        };
        let id = detail.vessel.id;
        let loaded_photos = !detail.attachments.photos.is_empty();

        self.status.start();
        let had_photos = match self.api.vessel_photos(id).await {
            Ok(photos) => !photos.is_empty(),
            Err(e) => {
                warn!("failed to read photos of vessel {id} before upload: {e:?}");
                loaded_photos
            }
        };

        for file in files {
            if !file.is_image() {
                report.skipped.push(file.file_name);
                continue;
            }

            let is_primary = !had_photos && report.uploaded.is_empty();
            match self.api.upload_vessel_photo(id, &file, is_primary).await {
                Ok(photo) => {
                    if is_primary {
                        report.primary = Some(photo.id);
                    }
                    report.uploaded.push(file.file_name);
                }
                Err(e) => {
                    warn!("failed to upload photo '{}': {e:?}", file.file_name);
                    report.failed.push(file.file_name);
                }
            }
        }
        self.finish_uploads(&report).await;

        report
    }

    /// Uploads `files` one by one with the current file description.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_files(&mut self, files: Vec<Upload>) -> UploadReport {
        let mut report = UploadReport::default();
        let Some(id) = self.detail_id() else {
            return report;
        };

        self.status.start();
        for file in files {
            match self
                .api
                .upload_vessel_file(id, &file, self.file_description.trim())
                .await
            {
                Ok(_) => report.uploaded.push(file.file_name),
                Err(e) => {
                    warn!("failed to upload file '{}': {e:?}", file.file_name);
                    report.failed.push(file.file_name);
                }
            }
        }
        if !report.uploaded.is_empty() {
            self.file_description.clear();
        }
        self.finish_uploads(&report).await;

        report
    }

    async fn finish_uploads(&mut self, report: &UploadReport) {
        if !report.failed.is_empty() {
            error!("{} of the uploads failed", report.failed.len());
        }
        info!(
            "uploaded {}, skipped {}, failed {}",
            report.uploaded.len(),
            report.skipped.len(),
            report.failed.len()
        );
        self.reload_attachments().await;
        self.status.finish();
    }

    #[instrument(skip(self, confirm))]
    pub async fn delete_photo(&mut self, photo_id: PhotoId, confirm: &impl Confirm) -> bool {
        let Some(id) = self.detail_id() else {
            return false;
        };
        if !confirm.confirm(DELETE_PHOTO) {
            return false;
        }

        self.status.start();
        let deleted = self
            .status
            .check("delete photo", self.api.delete_vessel_photo(id, photo_id).await)
            .is_some();
        self.reload_attachments().await;
        self.status.finish();

        deleted
    }

    /// Makes `photo_id` the primary photo, the server unsets the previous one.
    #[instrument(skip(self))]
    pub async fn set_primary_photo(&mut self, photo_id: PhotoId) -> bool {
        let Some(id) = self.detail_id() else {
            return false;
        };

        self.status.start();
        let updated = self
            .status
            .check("set primary photo", self.api.set_primary_photo(id, photo_id).await)
            .is_some();
        self.reload_attachments().await;
        self.status.finish();

        updated
    }

    #[instrument(skip(self, confirm))]
    pub async fn delete_file(&mut self, file_id: FileId, confirm: &impl Confirm) -> bool {
        let Some(id) = self.detail_id() else {
            return false;
        };
        if !confirm.confirm(DELETE_FILE) {
            return false;
        }

        self.status.start();
        let deleted = self
            .status
            .check("delete file", self.api.delete_vessel_file(id, file_id).await)
            .is_some();
        self.reload_attachments().await;
        self.status.finish();

        deleted
    }

    /// Imports a registry CSV. Without `force` the server refuses to replace existing data and
    /// the returned result says so.
    #[instrument(skip(self, csv), fields(file_name = %csv.file_name))]
    pub async fn import_csv(&mut self, csv: &Upload, force: bool) -> Option<CsvImportResult> {
        self.status.start();
        let result = self
            .status
            .check("import registry csv", self.api.upload_vessel_csv(csv, force).await);

        if result.as_ref().is_some_and(|r| r.success) {
            if let Some(status) = self
                .status
                .check("load registry status", self.api.vessel_registry_status().await)
            {
                self.registry_status = Some(status);
            }
            self.load_facets().await;
            self.status.finish();
            self.load_page(1).await;
        } else {
            self.status.finish();
        }

        result
    }

    pub fn photo_url(&self, photo: &VesselPhoto) -> String {
        self.api.photo_url(&photo.filename)
    }

    pub fn file_url(&self, file: &VesselFile) -> String {
        self.api.file_download_url(&file.filename)
    }

    pub fn page(&self) -> Option<&RegistryPage> {
        self.page.as_ref()
    }

    pub fn vessels(&self) -> &[VesselRegistry] {
        self.page.as_ref().map(|p| p.data.as_slice()).unwrap_or_default()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn facets(&self) -> &FacetLists {
        &self.facets
    }

    pub fn registry_status(&self) -> Option<&RegistryStatus> {
        self.registry_status.as_ref()
    }

    pub fn detail(&self) -> Option<&VesselDetail> {
        self.detail.as_ref()
    }

    pub fn edit_form(&self) -> Option<&RegistryEditForm> {
        self.edit.as_ref().map(|(_, f)| f)
    }
}
