use dashboard::pages::{VesselRegistryPage, vessel_registry::PAGE_SIZE};
use fleet_core::{test_helper::*, *};

use crate::helper::*;

const VESSEL: VesselRegistryId = VesselRegistryId(1);

fn api() -> FakeApi {
    FakeApi::new().with_registry(VesselRegistry {
        group_name: Some("A, B".into()),
        ..VesselRegistry::test_default(1, "해양호", Some("440001234"))
    })
}

fn image(name: &str) -> Upload {
    Upload::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

fn photo(id: i64, is_primary: bool) -> VesselPhoto {
    VesselPhoto {
        id: PhotoId(id),
        vessel_id: VESSEL,
        filename: format!("{id}_old.jpg"),
        original_name: "old.jpg".into(),
        file_size: 3,
        mime_type: "image/jpeg".into(),
        is_primary,
        created_at: test_timestamp(),
    }
}

#[tokio::test]
async fn test_first_successful_photo_becomes_primary_of_empty_vessel() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;
        helper.fail_upload("a.jpg");

        let report = page
            .upload_photos(vec![
                image("a.jpg"),
                image("b.jpg"),
                Upload::new("notes.txt", "text/plain", b"memo".to_vec()),
                image("c.jpg"),
            ])
            .await;

        assert_eq!(report.uploaded, vec!["b.jpg", "c.jpg"]);
        assert_eq!(report.failed, vec!["a.jpg"]);
        assert_eq!(report.skipped, vec!["notes.txt"]);
        assert_eq!(
            helper.calls_to("upload_vessel_photo"),
            vec!["a.jpg:true", "b.jpg:true", "c.jpg:false"]
        );

        let attachments = &page.detail().unwrap().attachments;
        let primary = attachments.primary_photo().unwrap();
        assert_eq!(primary.original_name, "b.jpg");
        assert_eq!(report.primary, Some(primary.id));
        assert_eq!(attachments.photos.iter().filter(|p| p.is_primary).count(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_uploads_to_vessel_with_photos_are_not_primary() {
    let api = api();
    api.state().photos.push(photo(100, true));

    test(api, |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;

        let report = page
            .upload_photos(vec![image("a.jpg"), image("b.jpg")])
            .await;

        assert_eq!(report.primary, None);
        assert_eq!(
            helper.calls_to("upload_vessel_photo"),
            vec!["a.jpg:false", "b.jpg:false"]
        );
        let attachments = &page.detail().unwrap().attachments;
        assert_eq!(attachments.photos.len(), 3);
        assert_eq!(attachments.primary_photo().unwrap().id, PhotoId(100));
    })
    .await;
}

#[tokio::test]
async fn test_primary_choice_uses_current_photos_not_dialog_list() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;
        assert!(page.detail().unwrap().attachments.photos.is_empty());

        helper.state().photos.push(photo(100, true));

        let report = page.upload_photos(vec![image("a.jpg")]).await;

        assert_eq!(report.primary, None);
        assert_eq!(helper.calls_to("upload_vessel_photo"), vec!["a.jpg:false"]);
        let attachments = &page.detail().unwrap().attachments;
        assert_eq!(attachments.primary_photo().unwrap().id, PhotoId(100));
    })
    .await;
}

#[tokio::test]
async fn test_setting_primary_photo_unsets_previous() {
    let api = api();
    api.state().photos.extend([photo(100, true), photo(101, false)]);

    test(api, |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;

        assert!(page.set_primary_photo(PhotoId(101)).await);

        let attachments = &page.detail().unwrap().attachments;
        assert_eq!(attachments.primary_photo().unwrap().id, PhotoId(101));
        assert_eq!(attachments.photos.iter().filter(|p| p.is_primary).count(), 1);
        assert_eq!(
            page.photo_url(attachments.primary_photo().unwrap()),
            "http://fake.api/uploads/photos/101_old.jpg"
        );
    })
    .await;
}

#[tokio::test]
async fn test_declined_photo_delete_sends_nothing() {
    let api = api();
    api.state().photos.push(photo(100, true));

    test(api, |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;

        assert!(!page.delete_photo(PhotoId(100), &|_: &str| false).await);
        assert!(helper.calls_to("delete_vessel_photo").is_empty());

        assert!(page.delete_photo(PhotoId(100), &|_: &str| true).await);
        assert!(page.detail().unwrap().attachments.photos.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_saving_tag_edit_sends_joined_tags() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.mount().await;
        assert_eq!(page.facets().groups.len(), 2);

        let vessel = page.vessels()[0].clone();
        page.open_edit(&vessel);
        let form = page.edit_form_mut().unwrap();
        assert!(form.remove_tag("A"));
        assert_eq!(form.tags.joined(), "B");
        form.new_tag = "C".into();
        assert!(form.add_tag());
        assert_eq!(form.tags.joined(), "B, C");

        helper.clear_calls();
        assert!(page.save_edit().await);

        assert_eq!(
            helper.state().registry[0].group_name.as_deref(),
            Some("B, C")
        );
        assert!(page.edit_form().is_none());
        assert_eq!(helper.calls_to("groups").len(), 1);
        assert_eq!(helper.calls_to("vessel_registry").len(), 1);
        assert_eq!(page.vessels()[0].group_name.as_deref(), Some("B, C"));

        let groups = page
            .facets()
            .groups
            .iter()
            .map(|f| f.value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(groups, vec!["B", "C"]);
    })
    .await;
}

#[tokio::test]
async fn test_edit_without_name_is_not_sent() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        let vessel = helper.state().registry[0].clone();
        page.open_edit(&vessel);
        page.edit_form_mut().unwrap().update.vessel_name = Some("  ".into());

        assert!(!page.save_edit().await);
        assert!(helper.calls_to("update_vessel_registry").is_empty());
        assert!(page.edit_form().is_some());
    })
    .await;
}

#[tokio::test]
async fn test_memo_lifecycle() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;

        page.memo_form.content = "엔진 점검 필요".into();
        assert!(page.add_memo().await);
        assert!(page.memo_form.content.is_empty());

        let memo = page.detail().unwrap().attachments.memos[0].clone();
        page.start_memo_edit(&memo);
        page.memo_edit_mut().unwrap().content = "엔진 점검 완료".into();
        assert!(page.save_memo_edit().await);
        assert_eq!(
            page.detail().unwrap().attachments.memos[0].content,
            "엔진 점검 완료"
        );

        assert!(page.delete_memo(memo.id, &|_: &str| true).await);
        assert!(page.detail().unwrap().attachments.memos.is_empty());
        assert_eq!(helper.calls_to("vessel_memos").len(), 4);
    })
    .await;
}

#[tokio::test]
async fn test_empty_memo_is_not_sent() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;

        page.memo_form.content = "   ".into();
        assert!(!page.add_memo().await);
        assert!(helper.calls_to("create_vessel_memo").is_empty());
        assert!(page.status.error.is_some());
    })
    .await;
}

#[tokio::test]
async fn test_file_upload_uses_description() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.open_detail(VESSEL).await;

        page.file_description = "선박검사증서".into();
        let report = page
            .upload_files(vec![Upload::new(
                "certificate.pdf",
                "application/pdf",
                b"%PDF".to_vec(),
            )])
            .await;

        assert_eq!(report.uploaded, vec!["certificate.pdf"]);
        assert!(page.file_description.is_empty());
        let file = &page.detail().unwrap().attachments.files[0];
        assert_eq!(file.description, "선박검사증서");
        assert!(page.file_url(file).ends_with(&file.filename));
    })
    .await;
}

#[tokio::test]
async fn test_csv_import_requires_force_when_data_exists() {
    test(api(), |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        let csv = Upload::new(
            "vessels.csv",
            "text/csv",
            "선명,MMSI\n해양호,440001234\n동해호,440005678\n".as_bytes().to_vec(),
        );

        let refused = page.import_csv(&csv, false).await.unwrap();
        assert!(!refused.success);
        assert!(helper.state().imported_csv.is_empty());

        let imported = page.import_csv(&csv, true).await.unwrap();
        assert!(imported.success);
        assert_eq!(imported.count, 2);
        assert_eq!(
            helper.state().imported_csv,
            vec![("vessels.csv".to_string(), true)]
        );
        assert!(page.registry_status().unwrap().has_data);
    })
    .await;
}

#[tokio::test]
async fn test_registry_is_paginated() {
    let api = (1..=20).fold(FakeApi::new(), |api, id| {
        api.with_registry(VesselRegistry::test_default(id, &format!("{id}호"), None))
    });

    test(api, |helper| async move {
        let mut page = VesselRegistryPage::new(helper.outbound());
        page.mount().await;

        assert_eq!(page.vessels().len(), PAGE_SIZE as usize);
        assert_eq!(page.page().unwrap().total_pages, 2);
        assert_eq!(page.registry_status().unwrap().count, 20);

        page.load_page(2).await;
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.vessels().len(), 5);

        helper.fail("vessel_registry");
        page.load_page(1).await;
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.vessels().len(), 5);
        assert_eq!(page.status.error_kind(), Some(ErrorKind::HttpStatus));
    })
    .await;
}
