use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Display,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::*;

/// In memory implementation of every outbound port, used to drive the dashboard pages in tests.
///
/// Every call is logged so tests can assert on which requests a page issued, and any method can
/// be made to fail with [`FakeApi::fail`].
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub vessels: Vec<VesselInfo>,
    pub voyages: Vec<Voyage>,
    pub auctions: Vec<Auction>,
    pub private_sales: Vec<PrivateSale>,
    pub expenses: Vec<Expense>,
    pub history: HashMap<RecordId, Vec<ModificationHistory>>,
    pub registry: Vec<VesselRegistry>,
    pub memos: Vec<VesselMemo>,
    pub photos: Vec<VesselPhoto>,
    pub files: Vec<VesselFile>,
    pub tracks: HashMap<Mmsi, Vec<TrackFile>>,
    pub imported_csv: Vec<(String, bool)>,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
    failing_uploads: HashSet<String>,
    id_counter: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub args: String,
}

const BASE_URL: &str = "http://fake.api";

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vessel(self, vessel: VesselInfo) -> Self {
        self.state().vessels.push(vessel);
        self
    }

    pub fn with_voyage(self, voyage: Voyage) -> Self {
        self.state().voyages.push(voyage);
        self
    }

    pub fn with_registry(self, vessel: VesselRegistry) -> Self {
        self.state().registry.push(vessel);
        self
    }

    pub fn with_auction(self, voyage_id: &VoyageId, quantity: f64, unit_price: f64) -> Self {
        {
            let mut state = self.state();
            let id = state.next_id("AUC");
            state.auctions.push(Auction {
                id,
                voyage_id: voyage_id.clone(),
                auction_date: test_timestamp(),
                auction_port: "부산공동어시장".to_string(),
                fish_species: "오징어".to_string(),
                quantity,
                unit_price,
                total_price: quantity * unit_price,
                buyer: None,
                note: None,
                vessel_name: None,
                mmsi: None,
            });
        }
        self
    }

    pub fn with_expense(self, voyage_id: &VoyageId, category: ExpenseCategory, amount: f64) -> Self {
        {
            let mut state = self.state();
            let id = state.next_id("EXP");
            state.expenses.push(Expense {
                id,
                voyage_id: voyage_id.clone(),
                expense_date: test_timestamp(),
                category,
                description: None,
                amount,
                note: None,
                vessel_name: None,
                mmsi: None,
            });
        }
        self
    }

    pub fn with_history(self, id: &RecordId, entries: Vec<ModificationHistory>) -> Self {
        self.state().history.insert(id.clone(), entries);
        self
    }

    /// Direct access to the stored data, for seeding and for asserting on the result of writes.
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Makes every following call of `method` fail with a 500 response.
    pub fn fail(&self, method: &'static str) {
        self.state().failing.insert(method);
    }

    pub fn recover(&self, method: &'static str) {
        self.state().failing.remove(method);
    }

    /// Makes photo and file uploads of `file_name` fail.
    pub fn fail_upload(&self, file_name: &str) {
        self.state().failing_uploads.insert(file_name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Arguments of every call to `method`, in call order.
    pub fn calls_to(&self, method: &str) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.args.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn call(&self, method: &'static str, args: impl Display) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(Call {
            method,
            args: args.to_string(),
        });
        if state.failing.contains(method) {
            return Err(Error::http_status(500, method, "injected failure"));
        }
        Ok(state)
    }
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> RecordId {
        self.id_counter += 1;
        RecordId(format!("{prefix}-{:03}", self.id_counter))
    }

    fn next_int(&mut self) -> i64 {
        self.id_counter += 1;
        self.id_counter as i64
    }

    fn vessel_name_of(&self, voyage_id: &VoyageId) -> Option<String> {
        self.voyages
            .iter()
            .find(|v| &v.id == voyage_id)
            .map(|v| v.vessel_name.clone())
    }

    fn registry_mut(&mut self, id: VesselRegistryId) -> Result<&mut VesselRegistry> {
        self.registry
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found(format!("/vessel-registry/{id}")))
    }

    fn facets(&self, field: impl Fn(&VesselRegistry) -> Vec<String>) -> Vec<Facet> {
        let mut counts = BTreeMap::<String, u64>::new();
        for v in &self.registry {
            for value in field(v) {
                *counts.entry(value).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(value, count)| Facet { value, count })
            .collect()
    }
}

pub fn test_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 13)
        .unwrap()
        .and_hms_opt(5, 0, 0)
        .unwrap()
}

fn not_found(url: String) -> Error {
    Error::http_status(404, url, "{\"detail\":\"not found\"}")
}

fn remove_by<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool, url: String) -> Result<()> {
    let len = items.len();
    items.retain(|v| !pred(v));
    if items.len() == len {
        Err(not_found(url))
    } else {
        Ok(())
    }
}

fn in_range(date: &NaiveDateTime, filter: &LedgerFilter) -> bool {
    filter.start_date.is_none_or(|s| date.date() >= s)
        && filter.end_date.is_none_or(|e| date.date() <= e)
}

fn matches_vessel(
    mmsi: &Mmsi,
    vessel_name: Option<&str>,
    filter: &LedgerFilter,
) -> bool {
    filter.mmsi.as_ref().is_none_or(|m| m == mmsi)
        && filter
            .vessel_name
            .as_deref()
            .is_none_or(|n| vessel_name.is_some_and(|v| v.contains(n)))
}

fn contains_opt(value: &Option<String>, needle: &str) -> bool {
    value.as_deref().is_some_and(|v| v.contains(needle))
}

#[async_trait]
impl VesselPort for FakeApi {
    async fn vessels(&self, search: Option<&str>) -> Result<Vec<VesselInfo>> {
        let state = self.call("vessels", search.unwrap_or_default())?;
        Ok(state
            .vessels
            .iter()
            .filter(|v| {
                search.is_none_or(|s| v.vessel_name.contains(s) || v.mmsi.as_ref().contains(s))
            })
            .cloned()
            .collect())
    }

    async fn vessel(&self, mmsi: &Mmsi) -> Result<VesselInfo> {
        let state = self.call("vessel", mmsi)?;
        state
            .vessels
            .iter()
            .find(|v| &v.mmsi == mmsi)
            .cloned()
            .ok_or_else(|| not_found(format!("/vessels/{mmsi}")))
    }
}

#[async_trait]
impl VoyagePort for FakeApi {
    async fn voyages(&self, filter: &VoyageFilter) -> Result<Vec<Voyage>> {
        let args = filter.mmsi.as_ref().map(|m| m.to_string()).unwrap_or_default();
        let state = self.call("voyages", args)?;
        Ok(state
            .voyages
            .iter()
            .filter(|v| filter.mmsi.as_ref().is_none_or(|m| &v.mmsi == m))
            .filter(|v| filter.year.is_none_or(|y| v.year() == y))
            .filter(|v| filter.status.is_none_or(|s| v.status == s))
            .cloned()
            .collect())
    }

    async fn voyage(&self, id: &VoyageId) -> Result<Voyage> {
        let state = self.call("voyage", id)?;
        state
            .voyages
            .iter()
            .find(|v| &v.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("/voyages/{id}")))
    }

    async fn update_voyage(&self, id: &VoyageId, update: &VoyageUpdate) -> Result<Voyage> {
        let mut state = self.call("update_voyage", id)?;
        let voyage = state
            .voyages
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| not_found(format!("/voyages/{id}")))?;

        if let Some(v) = &update.arrival_port {
            voyage.arrival_port = Some(v.clone());
        }
        if let Some(v) = update.arrival_date {
            voyage.arrival_date = Some(v);
        }
        if let Some(v) = &update.fishing_area {
            voyage.fishing_area = v.clone();
        }
        if let Some(v) = update.catch_amount {
            voyage.catch_amount = v;
        }
        if let Some(v) = &update.fish_species {
            voyage.fish_species = v.clone();
        }
        if let Some(v) = update.status {
            voyage.status = v;
        }

        Ok(voyage.clone())
    }

    async fn get_or_create_monthly_voyage(
        &self,
        request: &MonthlyVoyageRequest,
    ) -> Result<MonthlyVoyage> {
        let mut state = self.call(
            "get_or_create_monthly_voyage",
            format!("{}-{}-{}", request.mmsi, request.year, request.month),
        )?;
        let id = VoyageId::new(request.mmsi.clone(), request.year, request.month);

        if let Some(voyage) = state.voyages.iter().find(|v| v.id == id) {
            return Ok(MonthlyVoyage {
                voyage: voyage.clone(),
                created: false,
            });
        }

        let voyage = Voyage {
            id,
            mmsi: request.mmsi.clone(),
            vessel_name: request.vessel_name.clone(),
            departure_port: String::new(),
            departure_date: NaiveDate::from_ymd_opt(request.year, request.month, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            arrival_port: None,
            arrival_date: None,
            fishing_area: String::new(),
            track_points: vec![],
            catch_amount: 0.0,
            fish_species: String::new(),
            status: VoyageStatus::InProgress,
        };
        state.voyages.push(voyage.clone());

        Ok(MonthlyVoyage {
            voyage,
            created: true,
        })
    }

    async fn statistics(&self) -> Result<Statistics> {
        let state = self.call("statistics", "")?;
        Ok(Statistics {
            total_vessels: state.vessels.len() as u64,
            total_voyages: state.voyages.len() as u64,
            active_voyages: state
                .voyages
                .iter()
                .filter(|v| v.status == VoyageStatus::InProgress)
                .count() as u64,
            total_catch_amount: state.voyages.iter().map(|v| v.catch_amount).sum(),
            total_auction_amount: state.auctions.iter().map(|a| a.total_price).sum(),
        })
    }
}

#[async_trait]
impl LedgerPort for FakeApi {
    async fn auctions(&self, voyage_id: &VoyageId) -> Result<Vec<Auction>> {
        let state = self.call("auctions", voyage_id)?;
        Ok(state
            .auctions
            .iter()
            .filter(|a| &a.voyage_id == voyage_id)
            .cloned()
            .collect())
    }

    async fn create_auction(&self, auction: &NewAuction) -> Result<Auction> {
        let mut state = self.call("create_auction", &auction.voyage_id)?;
        let id = state.next_id("AUC");
        let auction = Auction {
            id,
            voyage_id: auction.voyage_id.clone(),
            auction_date: auction.auction_date,
            auction_port: auction.auction_port.clone(),
            fish_species: auction.fish_species.clone(),
            quantity: auction.quantity,
            unit_price: auction.unit_price,
            total_price: auction.quantity * auction.unit_price,
            buyer: auction.buyer.clone(),
            note: auction.note.clone(),
            vessel_name: None,
            mmsi: None,
        };
        state.auctions.push(auction.clone());
        Ok(auction)
    }

    async fn delete_auction(&self, id: &RecordId) -> Result<()> {
        let mut state = self.call("delete_auction", id)?;
        remove_by(&mut state.auctions, |a| &a.id == id, format!("/auctions/{id}"))
    }

    async fn private_sales(&self, voyage_id: &VoyageId) -> Result<Vec<PrivateSale>> {
        let state = self.call("private_sales", voyage_id)?;
        Ok(state
            .private_sales
            .iter()
            .filter(|a| &a.voyage_id == voyage_id)
            .cloned()
            .collect())
    }

    async fn create_private_sale(&self, sale: &NewPrivateSale) -> Result<PrivateSale> {
        let mut state = self.call("create_private_sale", &sale.voyage_id)?;
        let id = state.next_id("PS");
        let sale = PrivateSale {
            id,
            voyage_id: sale.voyage_id.clone(),
            sale_date: sale.sale_date,
            fish_species: sale.fish_species.clone(),
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            total_price: sale.quantity * sale.unit_price,
            buyer: sale.buyer.clone(),
            note: sale.note.clone(),
            vessel_name: None,
            mmsi: None,
        };
        state.private_sales.push(sale.clone());
        Ok(sale)
    }

    async fn delete_private_sale(&self, id: &RecordId) -> Result<()> {
        let mut state = self.call("delete_private_sale", id)?;
        remove_by(
            &mut state.private_sales,
            |a| &a.id == id,
            format!("/private-sales/{id}"),
        )
    }

    async fn expenses(&self, voyage_id: &VoyageId) -> Result<Vec<Expense>> {
        let state = self.call("expenses", voyage_id)?;
        Ok(state
            .expenses
            .iter()
            .filter(|a| &a.voyage_id == voyage_id)
            .cloned()
            .collect())
    }

    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let mut state = self.call("create_expense", &expense.voyage_id)?;
        let id = state.next_id("EXP");
        let expense = Expense {
            id,
            voyage_id: expense.voyage_id.clone(),
            expense_date: expense.expense_date,
            category: expense.category,
            description: expense.description.clone(),
            amount: expense.amount,
            note: expense.note.clone(),
            vessel_name: None,
            mmsi: None,
        };
        state.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn delete_expense(&self, id: &RecordId) -> Result<()> {
        let mut state = self.call("delete_expense", id)?;
        remove_by(&mut state.expenses, |a| &a.id == id, format!("/expenses/{id}"))
    }

    async fn all_auctions(&self, filter: &LedgerFilter) -> Result<Vec<Auction>> {
        let state = self.call("all_auctions", format!("{filter:?}"))?;
        Ok(state
            .auctions
            .iter()
            .map(|a| Auction {
                vessel_name: state.vessel_name_of(&a.voyage_id),
                mmsi: Some(a.voyage_id.mmsi().clone()),
                ..a.clone()
            })
            .filter(|a| in_range(&a.auction_date, filter))
            .filter(|a| filter.fish_species.as_ref().is_none_or(|s| &a.fish_species == s))
            .filter(|a| matches_vessel(a.voyage_id.mmsi(), a.vessel_name.as_deref(), filter))
            .collect())
    }

    async fn all_private_sales(&self, filter: &LedgerFilter) -> Result<Vec<PrivateSale>> {
        let state = self.call("all_private_sales", format!("{filter:?}"))?;
        Ok(state
            .private_sales
            .iter()
            .map(|a| PrivateSale {
                vessel_name: state.vessel_name_of(&a.voyage_id),
                mmsi: Some(a.voyage_id.mmsi().clone()),
                ..a.clone()
            })
            .filter(|a| in_range(&a.sale_date, filter))
            .filter(|a| filter.fish_species.as_ref().is_none_or(|s| &a.fish_species == s))
            .filter(|a| matches_vessel(a.voyage_id.mmsi(), a.vessel_name.as_deref(), filter))
            .collect())
    }

    async fn all_expenses(&self, filter: &LedgerFilter) -> Result<Vec<Expense>> {
        let state = self.call("all_expenses", format!("{filter:?}"))?;
        Ok(state
            .expenses
            .iter()
            .map(|a| Expense {
                vessel_name: state.vessel_name_of(&a.voyage_id),
                mmsi: Some(a.voyage_id.mmsi().clone()),
                ..a.clone()
            })
            .filter(|a| in_range(&a.expense_date, filter))
            .filter(|a| filter.category.is_none_or(|c| a.category == c))
            .filter(|a| matches_vessel(a.voyage_id.mmsi(), a.vessel_name.as_deref(), filter))
            .collect())
    }

    async fn ledger_history(
        &self,
        kind: LedgerKind,
        id: &RecordId,
    ) -> Result<Vec<ModificationHistory>> {
        let state = self.call("ledger_history", format!("{}/{id}", kind.path()))?;
        Ok(state.history.get(id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl RegistryPort for FakeApi {
    async fn vessel_registry(&self, filter: &RegistryFilter) -> Result<RegistryPage> {
        let state = self.call("vessel_registry", format!("{filter:?}"))?;

        let matching = state
            .registry
            .iter()
            .filter(|v| {
                filter.search.as_deref().is_none_or(|s| {
                    v.vessel_name.contains(s)
                        || v.mmsi.as_ref().is_some_and(|m| m.as_ref().contains(s))
                        || contains_opt(&v.registration_no, s)
                })
            })
            .filter(|v| filter.port.as_ref().is_none_or(|p| v.port.as_ref() == Some(p)))
            .filter(|v| {
                filter
                    .business_type
                    .as_ref()
                    .is_none_or(|b| v.business_type.as_ref() == Some(b))
            })
            .filter(|v| filter.group_name.as_deref().is_none_or(|g| v.group_tags().contains(g)))
            .filter(|v| {
                filter
                    .organization
                    .as_ref()
                    .is_none_or(|o| v.organization.as_ref() == Some(o))
            })
            .cloned()
            .collect::<Vec<_>>();

        let page = filter.page.unwrap_or(1).max(1);
        let page_size = filter.page_size.unwrap_or(20).max(1);
        let total = matching.len() as u64;

        Ok(RegistryPage {
            data: matching
                .into_iter()
                .skip(((page - 1) * page_size) as usize)
                .take(page_size as usize)
                .collect(),
            total,
            page,
            page_size,
            total_pages: total.div_ceil(page_size as u64) as u32,
        })
    }

    async fn vessel_registry_detail(&self, id: VesselRegistryId) -> Result<VesselRegistry> {
        let mut state = self.call("vessel_registry_detail", id)?;
        state.registry_mut(id).map(|v| v.clone())
    }

    async fn update_vessel_registry(
        &self,
        id: VesselRegistryId,
        update: &VesselRegistryUpdate,
    ) -> Result<VesselRegistry> {
        let mut state = self.call("update_vessel_registry", id)?;
        let vessel = state.registry_mut(id)?;

        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(v) = &update.$field {
                    vessel.$field = Some(v.clone());
                })*
            };
        }

        if let Some(v) = &update.vessel_name {
            vessel.vessel_name = v.clone();
        }
        if let Some(v) = &update.mmsi {
            vessel.mmsi = Mmsi::new(v.as_str());
        }
        apply!(
            tonnage,
            length,
            engine_type,
            engine_count,
            engine_power_ps,
            engine_power_kw,
            engine_name,
            hull_material,
            port,
            business_type,
            license_local,
            license_start_local,
            license_end_local,
            group_name,
            fishing_hours,
            organization,
            owner_name
        );

        Ok(vessel.clone())
    }

    async fn ports(&self) -> Result<Vec<Facet>> {
        let state = self.call("ports", "")?;
        Ok(state.facets(|v| v.port.iter().cloned().collect()))
    }

    async fn groups(&self) -> Result<Vec<Facet>> {
        let state = self.call("groups", "")?;
        Ok(state.facets(|v| v.group_tags().iter().map(ToString::to_string).collect()))
    }

    async fn business_types(&self) -> Result<Vec<Facet>> {
        let state = self.call("business_types", "")?;
        Ok(state.facets(|v| v.business_type.iter().cloned().collect()))
    }

    async fn organizations(&self) -> Result<Vec<Facet>> {
        let state = self.call("organizations", "")?;
        Ok(state.facets(|v| v.organization.iter().cloned().collect()))
    }

    async fn vessel_registry_status(&self) -> Result<RegistryStatus> {
        let state = self.call("vessel_registry_status", "")?;
        let count = state.registry.len() as u64;
        Ok(RegistryStatus {
            count,
            has_data: count > 0,
            message: format!("{count}척의 어선 정보가 등록되어 있습니다."),
        })
    }

    async fn upload_vessel_csv(&self, csv: &Upload, force: bool) -> Result<CsvImportResult> {
        let mut state = self.call("upload_vessel_csv", &csv.file_name)?;
        if !state.registry.is_empty() && !force {
            return Ok(CsvImportResult {
                success: false,
                message: "이미 데이터가 존재합니다.".to_string(),
                count: 0,
            });
        }
        let rows = csv.bytes.split(|b| *b == b'\n').skip(1).filter(|l| !l.is_empty()).count();
        state.imported_csv.push((csv.file_name.clone(), force));
        Ok(CsvImportResult {
            success: true,
            message: format!("{rows}건을 가져왔습니다."),
            count: rows as u64,
        })
    }
}

#[async_trait]
impl AttachmentPort for FakeApi {
    async fn vessel_memos(&self, id: VesselRegistryId) -> Result<Vec<VesselMemo>> {
        let state = self.call("vessel_memos", id)?;
        Ok(state
            .memos
            .iter()
            .filter(|m| m.vessel_id == id)
            .cloned()
            .collect())
    }

    async fn create_vessel_memo(&self, id: VesselRegistryId, content: &str) -> Result<VesselMemo> {
        let mut state = self.call("create_vessel_memo", id)?;
        let memo = VesselMemo {
            id: MemoId(state.next_int()),
            vessel_id: id,
            content: content.to_string(),
            created_at: test_timestamp(),
            updated_at: test_timestamp(),
        };
        state.memos.push(memo.clone());
        Ok(memo)
    }

    async fn update_vessel_memo(
        &self,
        id: VesselRegistryId,
        memo_id: MemoId,
        content: &str,
    ) -> Result<VesselMemo> {
        let mut state = self.call("update_vessel_memo", format!("{id}/{}", memo_id.0))?;
        let memo = state
            .memos
            .iter_mut()
            .find(|m| m.vessel_id == id && m.id == memo_id)
            .ok_or_else(|| not_found(format!("/vessel-registry/{id}/memos/{}", memo_id.0)))?;
        memo.content = content.to_string();
        Ok(memo.clone())
    }

    async fn delete_vessel_memo(&self, id: VesselRegistryId, memo_id: MemoId) -> Result<()> {
        let mut state = self.call("delete_vessel_memo", format!("{id}/{}", memo_id.0))?;
        remove_by(
            &mut state.memos,
            |m| m.vessel_id == id && m.id == memo_id,
            format!("/vessel-registry/{id}/memos/{}", memo_id.0),
        )
    }

    async fn vessel_photos(&self, id: VesselRegistryId) -> Result<Vec<VesselPhoto>> {
        let state = self.call("vessel_photos", id)?;
        Ok(state
            .photos
            .iter()
            .filter(|p| p.vessel_id == id)
            .cloned()
            .collect())
    }

    async fn upload_vessel_photo(
        &self,
        id: VesselRegistryId,
        photo: &Upload,
        is_primary: bool,
    ) -> Result<VesselPhoto> {
        let mut state = self.call(
            "upload_vessel_photo",
            format!("{}:{is_primary}", photo.file_name),
        )?;
        if state.failing_uploads.contains(&photo.file_name) {
            return Err(Error::http_status(500, "upload_vessel_photo", "upload failed"));
        }
        if is_primary {
            state
                .photos
                .iter_mut()
                .filter(|p| p.vessel_id == id)
                .for_each(|p| p.is_primary = false);
        }
        let photo_id = state.next_int();
        let photo = VesselPhoto {
            id: PhotoId(photo_id),
            vessel_id: id,
            filename: format!("{photo_id}_{}", photo.file_name),
            original_name: photo.file_name.clone(),
            file_size: photo.len() as u64,
            mime_type: photo.mime_type.clone(),
            is_primary,
            created_at: test_timestamp(),
        };
        state.photos.push(photo.clone());
        Ok(photo)
    }

    async fn delete_vessel_photo(&self, id: VesselRegistryId, photo_id: PhotoId) -> Result<()> {
        let mut state = self.call("delete_vessel_photo", format!("{id}/{}", photo_id.0))?;
        remove_by(
            &mut state.photos,
            |p| p.vessel_id == id && p.id == photo_id,
            format!("/vessel-registry/{id}/photos/{}", photo_id.0),
        )
    }

    async fn set_primary_photo(&self, id: VesselRegistryId, photo_id: PhotoId) -> Result<()> {
        let mut state = self.call("set_primary_photo", format!("{id}/{}", photo_id.0))?;
        if !state
            .photos
            .iter()
            .any(|p| p.vessel_id == id && p.id == photo_id)
        {
            return Err(not_found(format!(
                "/vessel-registry/{id}/photos/{}/primary",
                photo_id.0
            )));
        }
        state
            .photos
            .iter_mut()
            .filter(|p| p.vessel_id == id)
            .for_each(|p| p.is_primary = p.id == photo_id);
        Ok(())
    }

    async fn vessel_files(&self, id: VesselRegistryId) -> Result<Vec<VesselFile>> {
        let state = self.call("vessel_files", id)?;
        Ok(state
            .files
            .iter()
            .filter(|f| f.vessel_id == id)
            .cloned()
            .collect())
    }

    async fn upload_vessel_file(
        &self,
        id: VesselRegistryId,
        file: &Upload,
        description: &str,
    ) -> Result<VesselFile> {
        let mut state = self.call("upload_vessel_file", &file.file_name)?;
        if state.failing_uploads.contains(&file.file_name) {
            return Err(Error::http_status(500, "upload_vessel_file", "upload failed"));
        }
        let file_id = state.next_int();
        let file = VesselFile {
            id: FileId(file_id),
            vessel_id: id,
            filename: format!("{file_id}_{}", file.file_name),
            original_name: file.file_name.clone(),
            file_size: file.len() as u64,
            mime_type: file.mime_type.clone(),
            description: description.to_string(),
            created_at: test_timestamp(),
        };
        state.files.push(file.clone());
        Ok(file)
    }

    async fn delete_vessel_file(&self, id: VesselRegistryId, file_id: FileId) -> Result<()> {
        let mut state = self.call("delete_vessel_file", format!("{id}/{}", file_id.0))?;
        remove_by(
            &mut state.files,
            |f| f.vessel_id == id && f.id == file_id,
            format!("/vessel-registry/{id}/files/{}", file_id.0),
        )
    }

    fn photo_url(&self, filename: &str) -> String {
        format!("{BASE_URL}/uploads/photos/{filename}")
    }

    fn file_download_url(&self, filename: &str) -> String {
        format!("{BASE_URL}/uploads/files/{filename}")
    }
}

#[async_trait]
impl TrackPort for FakeApi {
    async fn track_list(&self, mmsi: &Mmsi) -> Result<TrackList> {
        let state = self.call("track_list", mmsi)?;
        let files = state.tracks.get(mmsi).cloned().unwrap_or_default();
        let mut years = files.iter().map(|f| f.year).collect::<Vec<_>>();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(TrackList { files, years })
    }

    async fn track_years(&self, mmsi: &Mmsi) -> Result<Vec<i32>> {
        let list = self.track_list(mmsi).await?;
        Ok(list.years)
    }

    async fn track_months(&self, mmsi: &Mmsi, year: i32) -> Result<Vec<TrackMonth>> {
        let state = self.call("track_months", format!("{mmsi}/{year}"))?;
        Ok(state
            .tracks
            .get(mmsi)
            .into_iter()
            .flatten()
            .filter(|f| f.year == year)
            .map(|f| TrackMonth {
                month: f.month,
                count: f.count,
                filename: f.filename.clone(),
            })
            .collect())
    }

    async fn track_html(&self, mmsi: &Mmsi, filename: &str) -> Result<TrackHtml> {
        let state = self.call("track_html", format!("{mmsi}/{filename}"))?;
        state
            .tracks
            .get(mmsi)
            .into_iter()
            .flatten()
            .find(|f| f.filename == filename)
            .map(|f| TrackHtml {
                html: format!("<html><body>{} positions</body></html>", f.count),
                filename: f.filename.clone(),
            })
            .ok_or_else(|| not_found(format!("/tracks/html/{mmsi}/{filename}")))
    }
}
