use dashboard::pages::OverviewPage;
use fleet_core::{test_helper::*, *};

use crate::helper::*;

#[tokio::test]
async fn test_overview_shows_fleet_statistics() {
    let docked = Voyage {
        status: VoyageStatus::Docked,
        catch_amount: 1_200.0,
        ..Voyage::test_default("440001234", 2024, 3)
    };
    let api = FakeApi::new()
        .with_vessel(VesselInfo::test_default("440001234", "해양호"))
        .with_voyage(docked.clone())
        .with_voyage(Voyage::test_default("440001234", 2025, 1))
        .with_auction(&docked.id, 100.0, 500.0);

    test(api, |helper| async move {
        let mut page = OverviewPage::new(helper.outbound());
        page.mount().await;

        let statistics = page.statistics().unwrap();
        assert_eq!(statistics.total_vessels, 1);
        assert_eq!(statistics.total_voyages, 2);
        assert_eq!(statistics.active_voyages, 1);
        assert_eq!(statistics.total_catch_amount, 1_200.0);
        assert_eq!(statistics.total_auction_amount, 50_000.0);
    })
    .await;
}

#[tokio::test]
async fn test_failed_statistics_are_reported() {
    test(FakeApi::new(), |helper| async move {
        helper.fail("statistics");
        let mut page = OverviewPage::new(helper.outbound());
        page.mount().await;

        assert!(page.statistics().is_none());
        assert_eq!(page.status.error_kind(), Some(ErrorKind::HttpStatus));
    })
    .await;
}
