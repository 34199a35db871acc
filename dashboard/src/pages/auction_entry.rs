use std::sync::Arc;

use chrono::NaiveDateTime;
use fleet_core::{
    DashboardOutbound, LedgerKind, LedgerPort, LedgerTotals, MonthlyVoyageRequest, NewAuction,
    NewExpense, NewPrivateSale, RecordId, RegistryFilter, RegistryPort, VesselRegistry, Voyage,
    VoyageId, VoyagePort,
};
use tracing::{info, instrument};

use super::{apply_voyage, apply_voyages};
use crate::{
    Confirm, ViewStatus,
    confirm::DELETE_RECORD,
    facets::FacetLists,
    forms::{AuctionForm, ExpenseForm, PrivateSaleForm},
    history::{HistoryViewer, LedgerRecord},
    ledgers::{LedgerLists, delete_entry},
    selection::{Loaded, SelectionCascade, VoyageRequest, VoyagesRequest, fetch_voyages},
};

/// Vessels listed by the registry search of the entry page.
pub const SEARCH_PAGE_SIZE: u32 = 100;

type Cascade = SelectionCascade<VesselRegistry, LedgerLists>;

/// The create dialog that is currently open.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryForm {
    Auction(AuctionForm),
    PrivateSale(PrivateSaleForm),
    Expense(ExpenseForm),
}

enum NewEntry {
    Auction(NewAuction),
    PrivateSale(NewPrivateSale),
    Expense(NewExpense),
}

/// Entry of auctions, private sales and expenses for a voyage picked through
/// vessel → year → voyage.
pub struct AuctionEntryPage {
    api: Arc<dyn DashboardOutbound>,
    pub filter: RegistryFilter,
    vessels: Vec<VesselRegistry>,
    facets: FacetLists,
    cascade: Cascade,
    form: Option<EntryForm>,
    history: HistoryViewer,
    pub status: ViewStatus,
}

#[instrument(skip(api))]
pub async fn fetch_ledgers<A: LedgerPort + ?Sized>(
    api: &A,
    request: VoyageRequest,
) -> Loaded<LedgerLists> {
    Loaded {
        ticket: request.ticket,
        result: LedgerLists::load(api, &request.voyage_id).await,
    }
}

impl EntryForm {
    pub fn kind(&self) -> LedgerKind {
        match self {
            EntryForm::Auction(_) => LedgerKind::Auction,
            EntryForm::PrivateSale(_) => LedgerKind::PrivateSale,
            EntryForm::Expense(_) => LedgerKind::Expense,
        }
    }

    /// Total price preview of the sale forms.
    pub fn expected_amount(&self) -> Option<f64> {
        match self {
            EntryForm::Auction(f) => Some(f.expected_amount()),
            EntryForm::PrivateSale(f) => Some(f.expected_amount()),
            EntryForm::Expense(_) => None,
        }
    }
}

impl AuctionEntryPage {
    pub fn new(api: Arc<dyn DashboardOutbound>) -> Self {
        Self {
            api,
            filter: RegistryFilter::default(),
            vessels: Vec::new(),
            facets: FacetLists::default(),
            cascade: Cascade::new(),
            form: None,
            history: HistoryViewer::default(),
            status: ViewStatus::default(),
        }
    }

    /// Loads the filter options and the initial vessel list.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) {
        self.status.start();
        if let Some(facets) = self
            .status
            .check("load filter options", FacetLists::load(&*self.api).await)
        {
            self.facets = facets;
        }
        self.status.finish();

        self.search().await;
    }

    /// Searches the registry and returns the chain to "no vessel selected".
    #[instrument(skip(self))]
    pub async fn search(&mut self) {
        self.status.start();

        let filter = RegistryFilter {
            page: Some(1),
            page_size: Some(SEARCH_PAGE_SIZE),
            ..self.filter.clone()
        };
        if let Some(page) = self
            .status
            .check("search vessels", self.api.vessel_registry(&filter).await)
        {
            self.vessels = page.data;
            self.cascade.reset();
            self.form = None;
        }

        self.status.finish();
    }

    /// Selects a vessel, a vessel without mmsi shows an empty voyage list and issues no request.
    pub fn select_vessel(&mut self, vessel: VesselRegistry) -> Option<VoyagesRequest> {
        self.form = None;
        self.cascade.select_vessel(vessel)
    }

    pub fn apply_voyages(&mut self, loaded: Loaded<Vec<Voyage>>) -> bool {
        apply_voyages(&mut self.cascade, &mut self.status, loaded)
    }

    #[instrument(skip(self, vessel), fields(vessel = %vessel.id))]
    pub async fn choose_vessel(&mut self, vessel: VesselRegistry) {
        self.status.start();
        if let Some(request) = self.select_vessel(vessel) {
            let loaded = fetch_voyages(&*self.api, request).await;
            self.apply_voyages(loaded);
        }
        self.status.finish();
    }

    pub fn select_year(&mut self, year: Option<i32>) {
        self.form = None;
        self.cascade.select_year(year);
    }

    pub fn select_voyage(&mut self, voyage_id: VoyageId) -> Option<VoyageRequest> {
        self.form = None;
        self.cascade.select_voyage(voyage_id)
    }

    pub fn apply_ledgers(&mut self, loaded: Loaded<LedgerLists>) -> bool {
        apply_voyage(&mut self.cascade, &mut self.status, "load ledgers", loaded)
    }

    /// Selects a voyage and loads its three ledgers concurrently.
    #[instrument(skip(self))]
    pub async fn choose_voyage(&mut self, voyage_id: VoyageId) {
        self.status.start();
        if let Some(request) = self.select_voyage(voyage_id) {
            let loaded = fetch_ledgers(&*self.api, request).await;
            self.apply_ledgers(loaded);
        }
        self.status.finish();
    }

    /// Opens the voyage of the given month for the selected vessel, creating it if needed.
    /// Returns whether a new voyage was created.
    #[instrument(skip(self))]
    pub async fn open_month(&mut self, year: i32, month: u32) -> bool {
        let Some(vessel) = self.cascade.vessel() else {
            return false;
        };
        let Some(mmsi) = vessel.mmsi.clone() else {
            return false;
        };
        let request = MonthlyVoyageRequest {
            mmsi,
            year,
            month,
            vessel_name: vessel.vessel_name.clone(),
        };

        self.status.start();
        let Some(monthly) = self.status.check(
            "open monthly voyage",
            self.api.get_or_create_monthly_voyage(&request).await,
        ) else {
            self.status.finish();
            return false;
        };
        if monthly.created {
            info!("created voyage {}", monthly.voyage.id);
        }

        if let Some(request) = self.cascade.reload_voyages() {
            let loaded = fetch_voyages(&*self.api, request).await;
            self.apply_voyages(loaded);
        }
        self.cascade.select_year(Some(monthly.voyage.year()));
        if let Some(request) = self.select_voyage(monthly.voyage.id) {
            let loaded = fetch_ledgers(&*self.api, request).await;
            self.apply_ledgers(loaded);
        }
        self.status.finish();

        monthly.created
    }

    /// Opens the create dialog of `kind`, pre-filled with `now`.
    pub fn open_form(&mut self, kind: LedgerKind, now: NaiveDateTime) -> bool {
        if self.cascade.voyage_id().is_none() {
            return false;
        }
        self.form = Some(match kind {
            LedgerKind::Auction => EntryForm::Auction(AuctionForm::at(now)),
            LedgerKind::PrivateSale => EntryForm::PrivateSale(PrivateSaleForm::at(now)),
            LedgerKind::Expense => EntryForm::Expense(ExpenseForm::at(now)),
        });
        true
    }

    pub fn form(&self) -> Option<&EntryForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EntryForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Creates the record of the open dialog for the selected voyage and reloads the ledgers.
    /// Invalid input is reported without sending anything, the dialog stays open on failure.
    #[instrument(skip(self))]
    pub async fn submit_form(&mut self) -> bool {
        let (Some(form), Some(voyage_id)) = (&self.form, self.cascade.voyage_id()) else {
            return false;
        };
        let entry = match form {
            EntryForm::Auction(f) => f.validate(voyage_id).map(NewEntry::Auction),
            EntryForm::PrivateSale(f) => f.validate(voyage_id).map(NewEntry::PrivateSale),
            EntryForm::Expense(f) => f.validate(voyage_id).map(NewEntry::Expense),
        };
        let entry = match entry {
            Ok(v) => v,
            Err(e) => {
                self.status.invalid(&e);
                return false;
            }
        };

        self.status.start();
        let result = match &entry {
            NewEntry::Auction(v) => self.api.create_auction(v).await.map(|_| ()),
            NewEntry::PrivateSale(v) => self.api.create_private_sale(v).await.map(|_| ()),
            NewEntry::Expense(v) => self.api.create_expense(v).await.map(|_| ()),
        };
        let created = self.status.check("create record", result).is_some();
        if created {
            self.form = None;
            self.reload_ledgers().await;
        }
        self.status.finish();

        created
    }

    /// Deletes a record after confirmation. The ledgers are reloaded afterwards whether or not
    /// the delete succeeded, a record that was already gone is not an error.
    #[instrument(skip(self, confirm))]
    pub async fn delete(&mut self, kind: LedgerKind, id: &RecordId, confirm: &impl Confirm) -> bool {
        if !confirm.confirm(DELETE_RECORD) {
            return false;
        }

        self.status.start();
        let deleted = self
            .status
            .check("delete record", delete_entry(&*self.api, kind, id).await)
            .is_some();
        self.reload_ledgers().await;
        self.status.finish();

        deleted
    }

    async fn reload_ledgers(&mut self) {
        if let Some(request) = self.cascade.reload_voyage() {
            let loaded = fetch_ledgers(&*self.api, request).await;
            self.apply_ledgers(loaded);
        }
    }

    pub async fn open_history(&mut self, record: LedgerRecord) {
        self.history.open(&*self.api, record).await;
    }

    pub fn close_history(&mut self) {
        self.history.close();
    }

    pub fn vessels(&self) -> &[VesselRegistry] {
        &self.vessels
    }

    pub fn facets(&self) -> &FacetLists {
        &self.facets
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn ledgers(&self) -> &LedgerLists {
        self.cascade.downstream()
    }

    pub fn totals(&self, kind: LedgerKind) -> LedgerTotals {
        self.ledgers().totals(kind)
    }

    pub fn history(&self) -> &HistoryViewer {
        &self.history
    }
}
