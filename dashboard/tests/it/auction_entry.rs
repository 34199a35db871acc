use dashboard::{
    pages::{AuctionEntryPage, auction_entry::EntryForm},
    selection::{Level, fetch_voyages},
    status::StatusError,
};
use fleet_core::{test_helper::*, *};

use crate::helper::*;

const MMSI: &str = "440001234";

fn vessel() -> VesselRegistry {
    VesselRegistry::test_default(1, "해양호", Some(MMSI))
}

#[tokio::test]
async fn test_late_voyages_of_previous_vessel_are_discarded() {
    let api = FakeApi::new()
        .with_voyage(Voyage::test_default("440000001", 2025, 1))
        .with_voyage(Voyage::test_default("440000002", 2025, 1))
        .with_voyage(Voyage::test_default("440000002", 2025, 2));

    test(api, |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());

        let a = page
            .select_vessel(VesselRegistry::test_default(1, "A호", Some("440000001")))
            .unwrap();
        let b = page
            .select_vessel(VesselRegistry::test_default(2, "B호", Some("440000002")))
            .unwrap();

        let late_a = fetch_voyages(&*helper.api, a).await;
        let b = fetch_voyages(&*helper.api, b).await;

        assert!(page.apply_voyages(b));
        assert!(!page.apply_voyages(late_a));

        let voyages = page.cascade().voyages();
        assert_eq!(voyages.len(), 2);
        assert!(voyages.iter().all(|v| v.mmsi.as_ref() == "440000002"));
        assert_eq!(page.cascade().vessel().unwrap().vessel_name, "B호");
    })
    .await;
}

#[tokio::test]
async fn test_vessel_without_mmsi_shows_no_voyages_and_sends_no_request() {
    test(FakeApi::new(), |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());

        page.choose_vessel(VesselRegistry::test_default(3, "무선호", None))
            .await;

        assert!(helper.calls_to("voyages").is_empty());
        assert!(page.cascade().voyages().is_empty());
        assert_eq!(page.cascade().level(), Level::VesselSelected);
        assert_eq!(page.status.error, None);
    })
    .await;
}

#[tokio::test]
async fn test_year_filter_is_applied_locally() {
    let api = FakeApi::new()
        .with_voyage(Voyage::test_default(MMSI, 2024, 1))
        .with_voyage(Voyage::test_default(MMSI, 2025, 1))
        .with_voyage(Voyage::test_default(MMSI, 2025, 2));

    test(api, |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;
        assert_eq!(page.cascade().years(), vec![2025, 2024]);

        helper.clear_calls();
        page.select_year(Some(2024));

        assert!(helper.calls().is_empty());
        let visible = page.cascade().visible_voyages().collect::<Vec<_>>();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].year(), 2024);
    })
    .await;
}

#[tokio::test]
async fn test_submitting_auction_creates_record_and_reloads_ledgers() {
    let voyage = Voyage::test_default(MMSI, 2025, 1);
    let id = voyage.id.clone();

    test(FakeApi::new().with_voyage(voyage), |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;
        page.choose_voyage(id.clone()).await;
        assert_eq!(page.cascade().level(), Level::VoyageSelected);

        assert!(page.open_form(LedgerKind::Auction, test_timestamp()));
        let Some(EntryForm::Auction(form)) = page.form_mut() else {
            panic!("auction form is not open");
        };
        form.auction_port = "부산공동어시장".into();
        form.fish_species = "오징어".into();
        form.quantity = "100".into();
        form.unit_price = "500".into();
        assert_eq!(page.form().unwrap().expected_amount(), Some(50_000.0));

        helper.clear_calls();
        assert!(page.submit_form().await);

        assert_eq!(helper.calls_to("create_auction"), vec![id.to_string()]);
        assert_eq!(helper.calls_to("auctions"), vec![id.to_string()]);
        assert!(page.form().is_none());
        assert_eq!(page.ledgers().auctions.len(), 1);

        let totals = page.totals(LedgerKind::Auction);
        assert_eq!(totals.quantity, 100.0);
        assert_eq!(totals.amount, 50_000.0);
        assert_eq!(page.status.error, None);
    })
    .await;
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let voyage = Voyage::test_default(MMSI, 2025, 1);
    let id = voyage.id.clone();

    test(FakeApi::new().with_voyage(voyage), |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;
        page.choose_voyage(id).await;

        assert!(page.open_form(LedgerKind::PrivateSale, test_timestamp()));
        assert!(!page.submit_form().await);

        assert!(helper.calls_to("create_private_sale").is_empty());
        assert!(matches!(page.status.error, Some(StatusError::Invalid { .. })));
        assert!(page.form().is_some());
    })
    .await;
}

#[tokio::test]
async fn test_form_can_not_be_opened_without_voyage() {
    test(FakeApi::new(), |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        assert!(!page.open_form(LedgerKind::Expense, test_timestamp()));
        assert!(page.form().is_none());
    })
    .await;
}

#[tokio::test]
async fn test_deleting_already_removed_record_refreshes_without_error() {
    let voyage = Voyage::test_default(MMSI, 2025, 1);
    let id = voyage.id.clone();
    let api = FakeApi::new()
        .with_voyage(voyage)
        .with_auction(&id, 10.0, 1_000.0);

    test(api, |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;
        page.choose_voyage(id.clone()).await;

        let record = page.ledgers().auctions[0].id.clone();
        helper.state().auctions.clear();

        assert!(
            page.delete(LedgerKind::Auction, &record, &|_: &str| true)
                .await
        );

        assert_eq!(helper.calls_to("delete_auction"), vec![record.to_string()]);
        assert_eq!(page.status.error, None);
        assert!(page.ledgers().auctions.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let voyage = Voyage::test_default(MMSI, 2025, 1);
    let id = voyage.id.clone();
    let api = FakeApi::new()
        .with_voyage(voyage)
        .with_expense(&id, ExpenseCategory::Fuel, 120_000.0);

    test(api, |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;
        page.choose_voyage(id).await;

        let record = page.ledgers().expenses[0].id.clone();
        helper.clear_calls();

        assert!(
            !page
                .delete(LedgerKind::Expense, &record, &|_: &str| false)
                .await
        );

        assert!(helper.calls().is_empty());
        assert_eq!(page.ledgers().expenses.len(), 1);
        assert_eq!(page.totals(LedgerKind::Expense).amount, 120_000.0);
    })
    .await;
}

#[tokio::test]
async fn test_failed_ledger_load_is_reported() {
    let voyage = Voyage::test_default(MMSI, 2025, 1);
    let id = voyage.id.clone();

    test(FakeApi::new().with_voyage(voyage), |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;

        helper.fail("expenses");
        page.choose_voyage(id).await;

        assert_eq!(page.status.error_kind(), Some(ErrorKind::HttpStatus));
        assert!(page.ledgers().is_empty());
        assert!(!page.status.loading);
    })
    .await;
}

#[tokio::test]
async fn test_open_month_creates_voyage_once() {
    test(FakeApi::new(), |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.choose_vessel(vessel()).await;

        assert!(page.open_month(2025, 3).await);
        assert_eq!(
            helper.calls_to("get_or_create_monthly_voyage"),
            vec!["440001234-2025-3".to_string()]
        );
        assert_eq!(page.cascade().year(), Some(2025));
        assert_eq!(
            page.cascade().voyage_id().map(ToString::to_string).as_deref(),
            Some("440001234-2025-003")
        );
        assert_eq!(page.cascade().voyages().len(), 1);

        assert!(!page.open_month(2025, 3).await);
        assert_eq!(helper.state().voyages.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_search_resets_selection() {
    let voyage = Voyage::test_default(MMSI, 2025, 1);
    let id = voyage.id.clone();
    let api = FakeApi::new()
        .with_registry(vessel())
        .with_registry(VesselRegistry::test_default(2, "동해호", None))
        .with_voyage(voyage);

    test(api, |helper| async move {
        let mut page = AuctionEntryPage::new(helper.outbound());
        page.mount().await;
        assert_eq!(page.vessels().len(), 2);
        assert_eq!(page.facets().business_types.len(), 1);

        page.choose_vessel(vessel()).await;
        page.choose_voyage(id).await;

        page.filter.search = Some("해양".into());
        page.search().await;

        assert_eq!(page.vessels().len(), 1);
        assert_eq!(page.cascade().level(), Level::NoVessel);
        assert!(page.ledgers().is_empty());
    })
    .await;
}
