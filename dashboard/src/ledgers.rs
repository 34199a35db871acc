use std::collections::HashSet;

use fleet_core::{
    Auction, Expense, LedgerEntry, LedgerFilter, LedgerKind, LedgerPort, LedgerTotals, Mmsi,
    PrivateSale, RecordId, Result, VoyageId,
};
use futures::try_join;
use tracing::{instrument, warn};

/// The three ledgers, either of one voyage or of the global listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerLists {
    pub auctions: Vec<Auction>,
    pub private_sales: Vec<PrivateSale>,
    pub expenses: Vec<Expense>,
}

impl LedgerLists {
    #[instrument(skip(api))]
    pub async fn load<A: LedgerPort + ?Sized>(api: &A, voyage_id: &VoyageId) -> Result<Self> {
        let (auctions, private_sales, expenses) = try_join!(
            api.auctions(voyage_id),
            api.private_sales(voyage_id),
            api.expenses(voyage_id),
        )?;

        Ok(Self {
            auctions,
            private_sales,
            expenses,
        })
    }

    #[instrument(skip(api))]
    pub async fn load_all<A: LedgerPort + ?Sized>(api: &A, filter: &LedgerFilter) -> Result<Self> {
        let (auctions, private_sales, expenses) = try_join!(
            api.all_auctions(filter),
            api.all_private_sales(filter),
            api.all_expenses(filter),
        )?;

        Ok(Self {
            auctions,
            private_sales,
            expenses,
        })
    }

    pub fn totals(&self, kind: LedgerKind) -> LedgerTotals {
        match kind {
            LedgerKind::Auction => LedgerTotals::of(&self.auctions),
            LedgerKind::PrivateSale => LedgerTotals::of(&self.private_sales),
            LedgerKind::Expense => LedgerTotals::of(&self.expenses),
        }
    }

    pub fn len(&self, kind: LedgerKind) -> usize {
        match kind {
            LedgerKind::Auction => self.auctions.len(),
            LedgerKind::PrivateSale => self.private_sales.len(),
            LedgerKind::Expense => self.expenses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty() && self.private_sales.is_empty() && self.expenses.is_empty()
    }

    /// Keeps the entries whose voyage belongs to one of `vessels`.
    pub fn retain_vessels(&mut self, vessels: &HashSet<Mmsi>) {
        fn retain<T: LedgerEntry>(entries: &mut Vec<T>, vessels: &HashSet<Mmsi>) {
            entries.retain(|e| vessels.contains(e.voyage_id().mmsi()));
        }
        retain(&mut self.auctions, vessels);
        retain(&mut self.private_sales, vessels);
        retain(&mut self.expenses, vessels);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Deletes a ledger record. A record that no longer exists is treated as deleted.
#[instrument(skip(api))]
pub async fn delete_entry<A: LedgerPort + ?Sized>(
    api: &A,
    kind: LedgerKind,
    id: &RecordId,
) -> Result<()> {
    let result = match kind {
        LedgerKind::Auction => api.delete_auction(id).await,
        LedgerKind::PrivateSale => api.delete_private_sale(id).await,
        LedgerKind::Expense => api.delete_expense(id).await,
    };

    match result {
        Err(e) if e.status() == Some(404) => {
            warn!("{} record {id} was already deleted", kind.label());
            Ok(())
        }
        other => other,
    }
}
