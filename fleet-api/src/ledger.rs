use async_trait::async_trait;
use fleet_core::{
    Auction, Expense, LedgerFilter, LedgerKind, LedgerPort, ModificationHistory, NewAuction,
    NewExpense, NewPrivateSale, PrivateSale, RecordId, Result, VoyageId,
};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::FleetApiClient;

impl FleetApiClient {
    async fn ledger<T: DeserializeOwned>(
        &self,
        kind: LedgerKind,
        voyage_id: &VoyageId,
    ) -> Result<Vec<T>> {
        self.list_with(
            &format!("/{}", kind.path()),
            &[("voyage_id", voyage_id.as_ref())],
        )
        .await
    }

    async fn all_ledger<T: DeserializeOwned>(
        &self,
        kind: LedgerKind,
        filter: &LedgerFilter,
    ) -> Result<Vec<T>> {
        self.list_with(&format!("/{}/all", kind.path()), &filter.query(kind))
            .await
    }

    async fn delete_ledger(&self, kind: LedgerKind, id: &RecordId) -> Result<()> {
        self.delete(&format!("/{}/{id}", kind.path())).await
    }
}

#[async_trait]
impl LedgerPort for FleetApiClient {
    #[instrument(skip(self))]
    async fn auctions(&self, voyage_id: &VoyageId) -> Result<Vec<Auction>> {
        self.ledger(LedgerKind::Auction, voyage_id).await
    }

    #[instrument(skip(self))]
    async fn create_auction(&self, auction: &NewAuction) -> Result<Auction> {
        self.post("/auctions", auction).await
    }

    #[instrument(skip(self))]
    async fn delete_auction(&self, id: &RecordId) -> Result<()> {
        self.delete_ledger(LedgerKind::Auction, id).await
    }

    #[instrument(skip(self))]
    async fn private_sales(&self, voyage_id: &VoyageId) -> Result<Vec<PrivateSale>> {
        self.ledger(LedgerKind::PrivateSale, voyage_id).await
    }

    #[instrument(skip(self))]
    async fn create_private_sale(&self, sale: &NewPrivateSale) -> Result<PrivateSale> {
        self.post("/private-sales", sale).await
    }

    #[instrument(skip(self))]
    async fn delete_private_sale(&self, id: &RecordId) -> Result<()> {
        self.delete_ledger(LedgerKind::PrivateSale, id).await
    }

    #[instrument(skip(self))]
    async fn expenses(&self, voyage_id: &VoyageId) -> Result<Vec<Expense>> {
        self.ledger(LedgerKind::Expense, voyage_id).await
    }

    #[instrument(skip(self))]
    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense> {
        self.post("/expenses", expense).await
    }

    #[instrument(skip(self))]
    async fn delete_expense(&self, id: &RecordId) -> Result<()> {
        self.delete_ledger(LedgerKind::Expense, id).await
    }

    #[instrument(skip(self))]
    async fn all_auctions(&self, filter: &LedgerFilter) -> Result<Vec<Auction>> {
        self.all_ledger(LedgerKind::Auction, filter).await
    }

    #[instrument(skip(self))]
    async fn all_private_sales(&self, filter: &LedgerFilter) -> Result<Vec<PrivateSale>> {
        self.all_ledger(LedgerKind::PrivateSale, filter).await
    }

    #[instrument(skip(self))]
    async fn all_expenses(&self, filter: &LedgerFilter) -> Result<Vec<Expense>> {
        self.all_ledger(LedgerKind::Expense, filter).await
    }

    #[instrument(skip(self))]
    async fn ledger_history(
        &self,
        kind: LedgerKind,
        id: &RecordId,
    ) -> Result<Vec<ModificationHistory>> {
        self.list(&format!("/{}/{id}/history", kind.path())).await
    }
}
