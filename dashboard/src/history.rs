use chrono::NaiveDateTime;
use fleet_core::{
    Auction, Expense, LedgerKind, LedgerPort, ModificationHistory, PrivateSale, RecordId,
    field_label,
};
use tracing::{instrument, warn};

/// A ledger record whose detail dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerRecord {
    Auction(Auction),
    PrivateSale(PrivateSale),
    Expense(Expense),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub field_name: String,
    pub label: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub modified_at: NaiveDateTime,
}

/// Detail dialog of a ledger record and its modification history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryViewer {
    record: Option<LedgerRecord>,
    rows: Vec<HistoryRow>,
    loading: bool,
}

impl LedgerRecord {
    pub fn kind(&self) -> LedgerKind {
        match self {
            LedgerRecord::Auction(_) => LedgerKind::Auction,
            LedgerRecord::PrivateSale(_) => LedgerKind::PrivateSale,
            LedgerRecord::Expense(_) => LedgerKind::Expense,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            LedgerRecord::Auction(v) => &v.id,
            LedgerRecord::PrivateSale(v) => &v.id,
            LedgerRecord::Expense(v) => &v.id,
        }
    }
}

impl From<ModificationHistory> for HistoryRow {
    fn from(v: ModificationHistory) -> Self {
        Self {
            label: field_label(&v.field_name).to_string(),
            field_name: v.field_name,
            old_value: v.old_value,
            new_value: v.new_value,
            modified_at: v.modified_at,
        }
    }
}

/// Fetch of the history of the record whose dialog was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub kind: LedgerKind,
    pub id: RecordId,
}

#[instrument(skip(api))]
pub async fn fetch_history<A: LedgerPort + ?Sized>(
    api: &A,
    request: &HistoryRequest,
) -> fleet_core::Result<Vec<ModificationHistory>> {
    api.ledger_history(request.kind, &request.id).await
}

impl HistoryViewer {
    /// Shows the dialog of `record` without history and returns the fetch to issue. The
    /// dialog reports loading until the result is applied.
    pub fn begin(&mut self, record: LedgerRecord) -> HistoryRequest {
        let request = HistoryRequest {
            kind: record.kind(),
            id: record.id().clone(),
        };
        self.rows.clear();
        self.loading = true;
        self.record = Some(record);
        request
    }

    /// Applies a history fetch, oldest change first. A failed fetch shows the dialog without
    /// history. Returns false if the dialog was closed or switched to another record meanwhile.
    pub fn apply(
        &mut self,
        request: &HistoryRequest,
        result: fleet_core::Result<Vec<ModificationHistory>>,
    ) -> bool {
        let current = self
            .record
            .as_ref()
            .is_some_and(|r| r.kind() == request.kind && r.id() == &request.id);
        if !current {
            return false;
        }

        match result {
            Ok(mut history) => {
                history.sort_by_key(|h| h.modified_at);
                self.rows = history.into_iter().map(HistoryRow::from).collect();
            }
            Err(e) => warn!(
                "failed to load history of {} record {}: {e:?}",
                request.kind.label(),
                request.id
            ),
        }
        self.loading = false;
        true
    }

    /// Opens the dialog of `record` and loads its history.
    #[instrument(skip(self, api, record), fields(id = %record.id()))]
    pub async fn open<A: LedgerPort + ?Sized>(&mut self, api: &A, record: LedgerRecord) {
        let request = self.begin(record);
        let result = fetch_history(api, &request).await;
        self.apply(&request, result);
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn record(&self) -> Option<&LedgerRecord> {
        self.record.as_ref()
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Open without any recorded change, shown as "no history".
    pub fn is_empty_state(&self) -> bool {
        self.is_open() && !self.loading && self.rows.is_empty()
    }
}
