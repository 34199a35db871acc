use chrono::{Duration, NaiveDate};
use dashboard::{
    history::LedgerRecord,
    pages::{LedgerListPage, ledger_list},
};
use fleet_core::{test_helper::*, *};

use crate::helper::*;

const EAST: &str = "440000001";
const SOUTH: &str = "440000002";

fn registry(id: i64, name: &str, mmsi: Option<&str>, group: &str) -> VesselRegistry {
    VesselRegistry {
        group_name: Some(group.to_string()),
        ..VesselRegistry::test_default(id, name, mmsi)
    }
}

fn voyage_id(mmsi: &str) -> VoyageId {
    VoyageId::new(Mmsi::from(mmsi.to_string()), 2025, 1)
}

fn voyage(mmsi: &str, vessel_name: &str) -> Voyage {
    Voyage {
        vessel_name: vessel_name.to_string(),
        ..Voyage::test_default(mmsi, 2025, 1)
    }
}

fn api() -> FakeApi {
    FakeApi::new()
        .with_registry(registry(1, "동해호", Some(EAST), "동해, 정치망"))
        .with_registry(registry(2, "남해호", Some(SOUTH), "남해"))
        .with_registry(registry(3, "미등록호", None, "동해"))
        .with_voyage(voyage(EAST, "동해호"))
        .with_voyage(voyage(SOUTH, "남해호"))
        .with_auction(&voyage_id(EAST), 100.0, 500.0)
        .with_auction(&voyage_id(SOUTH), 50.0, 800.0)
        .with_expense(&voyage_id(EAST), ExpenseCategory::Fuel, 300_000.0)
        .with_expense(&voyage_id(SOUTH), ExpenseCategory::Labor, 1_000_000.0)
}

#[tokio::test]
async fn test_group_filter_only_keeps_ledgers_of_matching_vessels() {
    test(api(), |helper| async move {
        let mut page = LedgerListPage::new(helper.outbound());
        page.mount().await;
        assert_eq!(page.lists().auctions.len(), 2);
        assert_eq!(page.facets().groups.len(), 3);
        assert!(helper.calls_to("vessel_registry").is_empty());

        page.filter.group_name = Some("동해".into());
        page.search().await;

        assert_eq!(helper.calls_to("vessel_registry").len(), 1);
        let lists = page.lists();
        assert_eq!(lists.auctions.len(), 1);
        assert_eq!(lists.auctions[0].voyage_id, voyage_id(EAST));
        assert_eq!(lists.expenses.len(), 1);
        assert_eq!(page.totals(LedgerKind::Auction).amount, 50_000.0);
        assert_eq!(page.totals(LedgerKind::Expense).amount, 300_000.0);
    })
    .await;
}

#[tokio::test]
async fn test_filter_without_matching_vessel_gives_empty_lists() {
    test(api(), |helper| async move {
        let filter = ledger_list::LedgerListFilter {
            organization: Some("서해수협".into()),
            ..Default::default()
        };

        let lists = ledger_list::load(&*helper.api, &filter).await.unwrap();

        assert!(lists.is_empty());
        assert_eq!(helper.calls_to("vessel_registry").len(), 1);
        assert!(helper.calls_to("all_auctions").is_empty());
        assert!(helper.calls_to("all_expenses").is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_vessels_without_mmsi_never_match() {
    let api = FakeApi::new()
        .with_registry(registry(3, "미등록호", None, "서해"))
        .with_voyage(Voyage::test_default(EAST, 2025, 1))
        .with_auction(&voyage_id(EAST), 10.0, 10.0);

    test(api, |helper| async move {
        let filter = ledger_list::LedgerListFilter {
            group_name: Some("서해".into()),
            ..Default::default()
        };

        let lists = ledger_list::load(&*helper.api, &filter).await.unwrap();

        assert!(lists.is_empty());
        assert!(helper.calls_to("all_auctions").is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_failed_search_clears_lists() {
    test(api(), |helper| async move {
        let mut page = LedgerListPage::new(helper.outbound());
        page.search().await;
        assert!(!page.lists().is_empty());

        helper.fail("all_expenses");
        page.search().await;

        assert!(page.lists().is_empty());
        assert_eq!(page.status.error_kind(), Some(ErrorKind::HttpStatus));
        assert!(!page.status.loading);
    })
    .await;
}

#[tokio::test]
async fn test_keyword_and_category_are_sent_to_listing() {
    test(api(), |helper| async move {
        let mut page = LedgerListPage::new(helper.outbound());
        page.filter.keyword = " 남해 ".into();
        page.filter.category = Some(ExpenseCategory::Labor);
        page.search().await;

        assert!(helper.calls_to("vessel_registry").is_empty());
        assert_eq!(page.lists().auctions.len(), 1);
        assert_eq!(page.lists().expenses.len(), 1);
        assert_eq!(page.lists().expenses[0].category, ExpenseCategory::Labor);
        assert_eq!(
            page.lists().expenses[0].vessel_name.as_deref(),
            Some("남해호")
        );

        page.reset().await;
        assert_eq!(page.filter, ledger_list::LedgerListFilter::default());
        assert_eq!(page.lists().expenses.len(), 2);
    })
    .await;
}

#[tokio::test]
async fn test_export_writes_active_tab() {
    test(api(), |helper| async move {
        let dir = tempfile::tempdir().unwrap();
        let mut page = LedgerListPage::new(helper.outbound());
        page.search().await;
        page.select_tab(LedgerKind::Expense);

        let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let path = page.export_to(dir.path(), date).unwrap();

        assert_eq!(path.file_name().unwrap(), "경비내역_2025-01-13.csv");
        let content = std::fs::read(&path).unwrap();
        assert!(content.starts_with(b"\xEF\xBB\xBF"));
        let content = String::from_utf8(content).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("유류비"));
        assert!(content.contains("인건비"));
    })
    .await;
}

#[tokio::test]
async fn test_history_is_shown_oldest_first() {
    let id = RecordId("AUC-001".into());
    let change = |field: &str, old: &str, new: &str, minutes: i64| ModificationHistory {
        id: None,
        record_id: Some(id.clone()),
        field_name: field.to_string(),
        old_value: Some(old.to_string()),
        new_value: Some(new.to_string()),
        modified_at: test_timestamp() + Duration::minutes(minutes),
    };
    let history = vec![change("unit_price", "500", "550", 30), change("quantity", "90", "100", 10)];
    let api = api().with_history(&id, history);

    test(api, |helper| async move {
        let mut page = LedgerListPage::new(helper.outbound());
        page.search().await;

        let auction = page
            .lists()
            .auctions
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .unwrap();
        page.open_history(LedgerRecord::Auction(auction)).await;

        let labels = page
            .history()
            .rows()
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["수량", "단가"]);
        assert_eq!(helper.calls_to("ledger_history"), vec!["auctions/AUC-001"]);

        page.close_history();
        assert!(!page.history().is_open());
    })
    .await;
}

#[tokio::test]
async fn test_failed_history_shows_empty_dialog() {
    test(api(), |helper| async move {
        let mut page = LedgerListPage::new(helper.outbound());
        page.search().await;
        let expense = page.lists().expenses[0].clone();

        helper.fail("ledger_history");
        page.open_history(LedgerRecord::Expense(expense)).await;

        assert!(page.history().is_empty_state());
        assert_eq!(page.status.error, None);
    })
    .await;
}
