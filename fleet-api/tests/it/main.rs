use std::time::Duration;

use fleet_api::{ApiSettings, FleetApiClient};
use fleet_core::*;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, method, path, query_param, query_param_is_missing},
};

fn client(server: &MockServer) -> FleetApiClient {
    FleetApiClient::new(&ApiSettings {
        base_url: format!("{}/api/", server.uri()),
        timeout: Duration::from_secs(5),
        max_retries: 0,
    })
    .unwrap()
}

fn voyage_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "mmsi": "440001234",
        "year": 2025,
        "voyage_no": 1,
        "vessel_name": "해양호",
        "departure_port": "부산",
        "departure_date": "2025-01-10T06:00:00",
        "arrival_port": null,
        "arrival_date": null,
        "fishing_area": "동해 남부",
        "track_points": [
            { "timestamp": "2025-01-10T06:00:00", "latitude": 35.1, "longitude": 129.0, "speed": 8.5, "course": 90.0 }
        ],
        "catch_amount": 1200.5,
        "fish_species": "오징어",
        "status": "조업중",
    })
}

fn auction_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "voyage_id": "440001234-2025-001",
        "auction_date": "2025-01-13T05:00:00",
        "auction_port": "부산공동어시장",
        "fish_species": "오징어",
        "quantity": 10.0,
        "unit_price": 5000.0,
        "total_price": 50000.0,
        "buyer": null,
        "note": null,
    })
}

#[tokio::test]
async fn test_vessels_sends_search_only_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vessels"))
        .and(query_param("search", "해양"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "mmsi": "440001234",
                "vessel_name": "해양호",
                "call_sign": "DSAB1",
                "vessel_type": "연안어선",
                "tonnage": 9.77,
                "owner": "김철수",
                "port": "부산",
            }],
            "total": 1,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vessels"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "total": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let vessels = client.vessels(Some("해양")).await.unwrap();
    assert_eq!(vessels.len(), 1);
    assert_eq!(vessels[0].mmsi.as_ref(), "440001234");

    assert!(client.vessels(Some("  ")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_voyages_are_decoded_with_their_id_parts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/voyages"))
        .and(query_param("mmsi", "440001234"))
        .and(query_param_is_missing("year"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [voyage_json("440001234-2025-001")],
            "total": 1,
        })))
        .mount(&server)
        .await;

    let voyages = client(&server)
        .voyages(&VoyageFilter {
            mmsi: Mmsi::new("440001234"),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(voyages.len(), 1);
    assert_eq!(voyages[0].id.to_string(), "440001234-2025-001");
    assert_eq!(voyages[0].year(), 2025);
    assert_eq!(voyages[0].voyage_no(), 1);
    assert_eq!(voyages[0].status, VoyageStatus::InProgress);
    assert_eq!(voyages[0].track_points.len(), 1);
}

#[tokio::test]
async fn test_non_success_status_maps_to_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/voyages/440001234-2025-009"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "항차를 찾을 수 없습니다" })))
        .mount(&server)
        .await;

    let id = VoyageId::try_from("440001234-2025-009").unwrap();
    let error = client(&server).voyage(&id).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::HttpStatus);
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_unexpected_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let error = client(&server).statistics().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_unreachable_server_maps_to_network_error() {
    let client = FleetApiClient::new(&ApiSettings {
        base_url: "http://127.0.0.1:1/api".into(),
        timeout: Duration::from_secs(1),
        max_retries: 0,
    })
    .unwrap();

    let error = client.statistics().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_create_auction_posts_json_and_unwraps_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auctions"))
        .and(body_json(json!({
            "voyage_id": "440001234-2025-001",
            "auction_date": "2025-01-13T05:00:00",
            "auction_port": "부산공동어시장",
            "fish_species": "오징어",
            "quantity": 10.0,
            "unit_price": 5000.0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "등록되었습니다",
            "data": auction_json("AUC-001"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auction = client(&server)
        .create_auction(&NewAuction {
            voyage_id: VoyageId::try_from("440001234-2025-001").unwrap(),
            auction_date: parse_timestamp("2025-01-13T05:00").unwrap(),
            auction_port: "부산공동어시장".into(),
            fish_species: "오징어".into(),
            quantity: 10.0,
            unit_price: 5000.0,
            buyer: None,
            note: None,
        })
        .await
        .unwrap();

    assert_eq!(auction.id, RecordId("AUC-001".into()));
    assert_eq!(auction.total_price, 50000.0);
}

#[tokio::test]
async fn test_delete_accepts_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/private-sales/PS-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "삭제되었습니다" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete_private_sale(&RecordId("PS-001".into()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_all_expenses_only_sends_applicable_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/expenses/all"))
        .and(query_param("category", "유류비"))
        .and(query_param("start_date", "2025-01-01"))
        .and(query_param_is_missing("fish_species"))
        .and(query_param_is_missing("vessel_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "EXP-001",
                "voyage_id": "440001234-2025-001",
                "expense_date": "2025-01-12T09:00:00",
                "category": "유류비",
                "description": "경유 2000L",
                "amount": 3000000.0,
                "note": null,
                "vessel_name": "해양호",
                "mmsi": "440001234",
            }],
        })))
        .mount(&server)
        .await;

    let expenses = client(&server)
        .all_expenses(&LedgerFilter {
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            fish_species: Some("오징어".into()),
            category: Some(ExpenseCategory::Fuel),
            vessel_name: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, ExpenseCategory::Fuel);
    assert_eq!(expenses[0].vessel_name.as_deref(), Some("해양호"));
}

#[tokio::test]
async fn test_ledger_history_uses_ledger_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auctions/AUC-001/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 1,
                "record_id": "AUC-001",
                "field_name": "unit_price",
                "old_value": "4500",
                "new_value": 5000,
                "modified_at": "2025-01-14T10:00:00",
            }],
        })))
        .mount(&server)
        .await;

    let history = client(&server)
        .ledger_history(LedgerKind::Auction, &RecordId("AUC-001".into()))
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].new_value.as_deref(), Some("5000"));
}

#[tokio::test]
async fn test_registry_search_leaves_out_all_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vessel-registry"))
        .and(query_param("group_name", "A선단"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "15"))
        .and(query_param_is_missing("organization"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "total": 16,
            "page": 2,
            "page_size": 15,
            "total_pages": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .vessel_registry(&RegistryFilter {
            search: Some(String::new()),
            group_name: Some("A선단".into()),
            organization: Some(ALL_OPTION.into()),
            page: Some(2),
            page_size: Some(15),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_facets_accept_named_value_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vessel-registry/organizations/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "organization": "부산수협", "count": 12 }],
        })))
        .mount(&server)
        .await;

    let facets = client(&server).organizations().await.unwrap();
    assert_eq!(
        facets,
        vec![Facet {
            value: "부산수협".into(),
            count: 12
        }]
    );
}

#[tokio::test]
async fn test_photo_upload_is_multipart_with_primary_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vessel-registry/7/photos"))
        .and(body_string_contains("name=\"is_primary\""))
        .and(body_string_contains("true"))
        .and(body_string_contains("filename=\"bow.jpg\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "업로드되었습니다",
            "data": {
                "id": 3,
                "vessel_id": 7,
                "filename": "a1b2.jpg",
                "original_name": "bow.jpg",
                "file_size": 4,
                "mime_type": "image/jpeg",
                "is_primary": 1,
                "created_at": "2025-01-13 05:00:00",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let photo = client(&server)
        .upload_vessel_photo(
            VesselRegistryId(7),
            &Upload::new("bow.jpg", "image/jpeg", vec![1, 2, 3, 4]),
            true,
        )
        .await
        .unwrap();

    assert!(photo.is_primary);
    assert_eq!(photo.id, PhotoId(3));
}

#[tokio::test]
async fn test_failed_upload_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vessel-registry/7/files"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = FleetApiClient::new(&ApiSettings {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        max_retries: 3,
    })
    .unwrap();

    let error = client
        .upload_vessel_file(
            VesselRegistryId(7),
            &Upload::new("license.pdf", "application/pdf", vec![1]),
            "면허증",
        )
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(503));
}

#[tokio::test]
async fn test_csv_upload_sends_force_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vessel-registry/upload-csv"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "120개의 어선 정보가 등록되었습니다.",
            "count": 120,
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .upload_vessel_csv(&Upload::new("vessels.csv", "text/csv", b"a,b\n1,2\n".to_vec()), true)
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.count, 120);
}

#[tokio::test]
async fn test_set_primary_photo_only_sends_photo_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/vessel-registry/7/photos/4/primary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "대표 사진이 설정되었습니다" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .set_primary_photo(VesselRegistryId(7), PhotoId(4))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_monthly_voyage_sends_parameters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/voyages/get-or-create-monthly"))
        .and(query_param("mmsi", "440001234"))
        .and(query_param("year", "2025"))
        .and(query_param("month", "3"))
        .and(query_param("vessel_name", "해양호"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": voyage_json("440001234-2025-003"),
            "created": true,
        })))
        .mount(&server)
        .await;

    let monthly = client(&server)
        .get_or_create_monthly_voyage(&MonthlyVoyageRequest {
            mmsi: "440001234".parse().unwrap(),
            year: 2025,
            month: 3,
            vessel_name: "해양호".into(),
        })
        .await
        .unwrap();

    assert!(monthly.created);
    assert_eq!(monthly.voyage.voyage_no(), 3);
}

#[tokio::test]
async fn test_track_months_unwrap_months_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tracks/months/440001234/2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "months": [{ "month": 1, "count": 340, "filename": "440001234_2025_01.html" }],
        })))
        .mount(&server)
        .await;

    let months = client(&server)
        .track_months(&"440001234".parse().unwrap(), 2025)
        .await
        .unwrap();

    assert_eq!(months.len(), 1);
    assert_eq!(months[0].filename, "440001234_2025_01.html");
}

#[tokio::test]
async fn test_track_years_unwrap_years_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tracks/years/440001234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "years": [2025, 2024] })))
        .mount(&server)
        .await;

    let years = client(&server)
        .track_years(&"440001234".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(years, vec![2025, 2024]);
}

#[tokio::test]
async fn test_vessel_unwraps_data_and_defaults_null_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vessels/440001234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "mmsi": "440001234",
                "vessel_name": "해양호",
                "call_sign": null,
                "vessel_type": null,
                "tonnage": null,
                "owner": "김철수",
                "port": "부산",
            }
        })))
        .mount(&server)
        .await;

    let vessel = client(&server)
        .vessel(&"440001234".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(vessel.vessel_name, "해양호");
    assert_eq!(vessel.tonnage, 0.0);
    assert!(vessel.vessel_type.is_empty());
}

#[test]
fn test_upload_urls_are_built_from_base_url() {
    let client = FleetApiClient::new(&ApiSettings {
        base_url: "http://localhost:8000/api/".into(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        client.photo_url("a1b2.jpg"),
        "http://localhost:8000/api/uploads/photos/a1b2.jpg"
    );
    assert_eq!(
        client.file_download_url("doc.pdf"),
        "http://localhost:8000/api/uploads/files/doc.pdf"
    );
}
