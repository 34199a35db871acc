use async_trait::async_trait;

use crate::*;

#[async_trait]
pub trait VesselPort: Send + Sync {
    async fn vessels(&self, search: Option<&str>) -> Result<Vec<VesselInfo>>;
    async fn vessel(&self, mmsi: &Mmsi) -> Result<VesselInfo>;
}

#[async_trait]
pub trait VoyagePort: Send + Sync {
    async fn voyages(&self, filter: &VoyageFilter) -> Result<Vec<Voyage>>;
    async fn voyage(&self, id: &VoyageId) -> Result<Voyage>;
    async fn update_voyage(&self, id: &VoyageId, update: &VoyageUpdate) -> Result<Voyage>;
    async fn get_or_create_monthly_voyage(
        &self,
        request: &MonthlyVoyageRequest,
    ) -> Result<MonthlyVoyage>;
    async fn statistics(&self) -> Result<Statistics>;
}

#[async_trait]
pub trait LedgerPort: Send + Sync {
    async fn auctions(&self, voyage_id: &VoyageId) -> Result<Vec<Auction>>;
    async fn create_auction(&self, auction: &NewAuction) -> Result<Auction>;
    async fn delete_auction(&self, id: &RecordId) -> Result<()>;

    async fn private_sales(&self, voyage_id: &VoyageId) -> Result<Vec<PrivateSale>>;
    async fn create_private_sale(&self, sale: &NewPrivateSale) -> Result<PrivateSale>;
    async fn delete_private_sale(&self, id: &RecordId) -> Result<()>;

    async fn expenses(&self, voyage_id: &VoyageId) -> Result<Vec<Expense>>;
    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense>;
    async fn delete_expense(&self, id: &RecordId) -> Result<()>;

    async fn all_auctions(&self, filter: &LedgerFilter) -> Result<Vec<Auction>>;
    async fn all_private_sales(&self, filter: &LedgerFilter) -> Result<Vec<PrivateSale>>;
    async fn all_expenses(&self, filter: &LedgerFilter) -> Result<Vec<Expense>>;

    async fn ledger_history(
        &self,
        kind: LedgerKind,
        id: &RecordId,
    ) -> Result<Vec<ModificationHistory>>;
}

#[async_trait]
pub trait RegistryPort: Send + Sync {
    async fn vessel_registry(&self, filter: &RegistryFilter) -> Result<RegistryPage>;
    async fn vessel_registry_detail(&self, id: VesselRegistryId) -> Result<VesselRegistry>;
    async fn update_vessel_registry(
        &self,
        id: VesselRegistryId,
        update: &VesselRegistryUpdate,
    ) -> Result<VesselRegistry>;
    async fn ports(&self) -> Result<Vec<Facet>>;
    async fn groups(&self) -> Result<Vec<Facet>>;
    async fn business_types(&self) -> Result<Vec<Facet>>;
    async fn organizations(&self) -> Result<Vec<Facet>>;
    async fn vessel_registry_status(&self) -> Result<RegistryStatus>;
    async fn upload_vessel_csv(&self, csv: &Upload, force: bool) -> Result<CsvImportResult>;
}

#[async_trait]
pub trait AttachmentPort: Send + Sync {
    async fn vessel_memos(&self, id: VesselRegistryId) -> Result<Vec<VesselMemo>>;
    async fn create_vessel_memo(&self, id: VesselRegistryId, content: &str) -> Result<VesselMemo>;
    async fn update_vessel_memo(
        &self,
        id: VesselRegistryId,
        memo_id: MemoId,
        content: &str,
    ) -> Result<VesselMemo>;
    async fn delete_vessel_memo(&self, id: VesselRegistryId, memo_id: MemoId) -> Result<()>;

    async fn vessel_photos(&self, id: VesselRegistryId) -> Result<Vec<VesselPhoto>>;
    async fn upload_vessel_photo(
        &self,
        id: VesselRegistryId,
        photo: &Upload,
        is_primary: bool,
    ) -> Result<VesselPhoto>;
    async fn delete_vessel_photo(&self, id: VesselRegistryId, photo_id: PhotoId) -> Result<()>;
    async fn set_primary_photo(&self, id: VesselRegistryId, photo_id: PhotoId) -> Result<()>;

    async fn vessel_files(&self, id: VesselRegistryId) -> Result<Vec<VesselFile>>;
    async fn upload_vessel_file(
        &self,
        id: VesselRegistryId,
        file: &Upload,
        description: &str,
    ) -> Result<VesselFile>;
    async fn delete_vessel_file(&self, id: VesselRegistryId, file_id: FileId) -> Result<()>;

    fn photo_url(&self, filename: &str) -> String;
    fn file_download_url(&self, filename: &str) -> String;
}

#[async_trait]
pub trait TrackPort: Send + Sync {
    async fn track_list(&self, mmsi: &Mmsi) -> Result<TrackList>;
    async fn track_years(&self, mmsi: &Mmsi) -> Result<Vec<i32>>;
    async fn track_months(&self, mmsi: &Mmsi, year: i32) -> Result<Vec<TrackMonth>>;
    async fn track_html(&self, mmsi: &Mmsi, filename: &str) -> Result<TrackHtml>;
}

/// Everything the dashboard pages read from and write to.
pub trait DashboardOutbound:
    VesselPort + VoyagePort + LedgerPort + RegistryPort + AttachmentPort + TrackPort + 'static
{
}

impl<T> DashboardOutbound for T where
    T: VesselPort + VoyagePort + LedgerPort + RegistryPort + AttachmentPort + TrackPort + 'static
{
}
