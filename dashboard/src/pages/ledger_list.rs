use std::{
    collections::HashSet,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use fleet_core::{
    DashboardOutbound, ExpenseCategory, LedgerFilter, LedgerKind, LedgerTotals, Mmsi,
    RegistryFilter, RegistryPort, Result,
};
use tracing::{debug, instrument};

use crate::{
    ViewStatus, export,
    facets::FacetLists,
    history::{HistoryViewer, LedgerRecord},
    ledgers::LedgerLists,
};

/// Vessels fetched from the registry to resolve group, organization and business type filters.
pub const VESSEL_LOOKUP_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerListFilter {
    /// Matched against vessel names.
    pub keyword: String,
    pub group_name: Option<String>,
    pub organization: Option<String>,
    pub business_type: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub fish_species: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Listing of every auction, private sale and expense, one tab per ledger.
pub struct LedgerListPage {
    api: Arc<dyn DashboardOutbound>,
    pub filter: LedgerListFilter,
    facets: FacetLists,
    lists: LedgerLists,
    pub tab: LedgerKind,
    history: HistoryViewer,
    pub status: ViewStatus,
}

impl LedgerListFilter {
    fn keyword(&self) -> Option<String> {
        Some(self.keyword.trim())
            .filter(|k| !k.is_empty())
            .map(ToString::to_string)
    }

    fn ledger_filter(&self) -> LedgerFilter {
        LedgerFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            fish_species: self.fish_species.clone(),
            category: self.category,
            vessel_name: self.keyword(),
            mmsi: None,
        }
    }

    /// Registry search resolving the vessel filters, `None` if no vessel filter is set.
    fn registry_filter(&self) -> Option<RegistryFilter> {
        let filter = RegistryFilter {
            search: self.keyword(),
            group_name: self.group_name.clone(),
            organization: self.organization.clone(),
            business_type: self.business_type.clone(),
            page_size: Some(VESSEL_LOOKUP_PAGE_SIZE),
            ..Default::default()
        };
        filter.has_facet_filter().then_some(filter)
    }
}

impl LedgerListPage {
    pub fn new(api: Arc<dyn DashboardOutbound>) -> Self {
        Self {
            api,
            filter: LedgerListFilter::default(),
            facets: FacetLists::default(),
            lists: LedgerLists::default(),
            tab: LedgerKind::Auction,
            history: HistoryViewer::default(),
            status: ViewStatus::default(),
        }
    }

    /// Loads the filter options and the unfiltered listing.
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

    /// Loads the three listings with the current filter. On failure the lists are emptied.
    #[instrument(skip(self))]
    pub async fn search(&mut self) {
        self.status.start();
        match load(&*self.api, &self.filter).await {
            Ok(lists) => self.lists = lists,
            Err(e) => {
                self.lists.clear();
                self.status.fail("load ledgers", &e);
            }
        }
        self.status.finish();
    }

    pub async fn reset(&mut self) {
        self.filter = LedgerListFilter::default();
        self.search().await;
    }

    pub fn select_tab(&mut self, kind: LedgerKind) {
        self.tab = kind;
    }

    pub fn lists(&self) -> &LedgerLists {
        &self.lists
    }

    pub fn facets(&self) -> &FacetLists {
        &self.facets
    }

    pub fn totals(&self, kind: LedgerKind) -> LedgerTotals {
        self.lists.totals(kind)
    }

    /// Writes the active tab as CSV into `writer`.
    pub fn export_csv<W: Write>(&self, writer: W) -> std::result::Result<W, csv::Error> {
        export::write_ledger(writer, &self.lists, self.tab)
    }

    /// Writes the active tab into `dir`, named after the ledger and `date`.
    pub fn export_to(&self, dir: &Path, date: NaiveDate) -> crate::Result<PathBuf> {
        export::export_ledger(dir, &self.lists, self.tab, date)
    }

    pub async fn open_history(&mut self, record: LedgerRecord) {
        self.history.open(&*self.api, record).await;
    }

    pub fn close_history(&mut self) {
        self.history.close();
    }

    pub fn history(&self) -> &HistoryViewer {
        &self.history
    }
}

/// Loads the global listings matching `filter`.
///
/// Group, organization and business type are properties of the registry vessel, they are
/// resolved to the set of matching mmsis first and applied to the voyage id of each entry.
/// Registry vessels without mmsi never match.
#[instrument(skip(api))]
pub async fn load<A: DashboardOutbound + ?Sized>(
    api: &A,
    filter: &LedgerListFilter,
) -> Result<LedgerLists> {
    let vessels = match filter.registry_filter() {
        None => None,
        Some(registry) => {
            let page = api.vessel_registry(&registry).await?;
            let vessels = page
                .data
                .into_iter()
                .filter_map(|v| v.mmsi)
                .collect::<HashSet<Mmsi>>();
            debug!("vessel filters matched {} vessels", vessels.len());
            Some(vessels)
        }
    };

    if vessels.as_ref().is_some_and(HashSet::is_empty) {
        return Ok(LedgerLists::default());
    }

    let mut lists = LedgerLists::load_all(api, &filter.ledger_filter()).await?;
    if let Some(vessels) = vessels {
        lists.retain_vessels(&vessels);
    }
    Ok(lists)
}
