//! InventoryView over an in-process store, decoding real workbooks.

use std::time::Duration;

use stock_viewer::inventory::sample_table;
use stock_viewer::service::{FilePart, UploadRequest};
use stock_viewer::view::{
    media_type_for, CredentialGate, PublicOnly, StoreSource, UploadFailed, Uploader,
};
use stock_viewer::{
    BranchId, InMemoryBranchStore, InventoryView, LoadState, UploadResponse, UploadService,
};

use crate::support::{acme_sheet, n, t, xlsx, BLANK};

/// Uploader that calls the upload service directly, skipping HTTP.
struct LocalUploader {
    service: UploadService<InMemoryBranchStore>,
}

impl Uploader for LocalUploader {
    async fn upload(
        &self,
        branch: BranchId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, UploadFailed> {
        let request = UploadRequest {
            query_branch: Some(branch.id().to_string()),
            field_branch: None,
            file: Some(FilePart {
                file_name: Some(file_name.to_string()),
                media_type: media_type_for(file_name).to_string(),
                bytes,
            }),
        };
        self.service
            .handle(request)
            .map_err(|e| UploadFailed::Rejected {
                status: e.status_code(),
                message: e.to_string(),
            })
    }
}

fn fixture() -> (InMemoryBranchStore, LocalUploader) {
    let store = InMemoryBranchStore::new();
    let uploader = LocalUploader {
        service: UploadService::new(store.clone()),
    };
    (store, uploader)
}

fn view_over(store: &InMemoryBranchStore) -> InventoryView<StoreSource<InMemoryBranchStore>> {
    InventoryView::new(StoreSource::new(store.clone()), BranchId::Dubai)
        .with_reload_delay(Duration::from_millis(1))
}

fn admin() -> CredentialGate {
    let mut gate = CredentialGate::new("admin", Some("s3cret".to_string()));
    gate.login("admin", "s3cret").unwrap();
    gate
}

#[tokio::test]
async fn mount_without_files_shows_sample_data() {
    let store = InMemoryBranchStore::new();
    let view = InventoryView::mount(StoreSource::new(store), BranchId::Dubai).await;

    assert_eq!(view.state(), LoadState::NotFound);
    assert_eq!(view.rows(), sample_table().as_slice());
    assert_eq!(view.total_units(), 2101);
    assert_eq!(view.status(), "Showing sample data (Dubai stock file not found)");
}

#[tokio::test]
async fn upload_then_switch_loads_uploaded_rows() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    view.reload().await;

    let response = view
        .upload(&admin(), &uploader, "stock.xlsx", acme_sheet(), BranchId::HongKong)
        .await
        .unwrap();

    assert_eq!(response.branch, BranchId::HongKong);
    assert_eq!(response.filename, "hongkong.xlsx");
    assert_eq!(view.branch(), BranchId::HongKong);
    assert_eq!(view.state(), LoadState::Loaded);
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].quantity, 5);
    assert_eq!(view.status(), "Uploaded stock.xlsx to Hong Kong branch, loaded 1 items");
}

#[tokio::test]
async fn upload_to_active_branch_replaces_table() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    let gate = admin();

    view.upload(&gate, &uploader, "a.xlsx", acme_sheet(), BranchId::Dubai)
        .await
        .unwrap();
    assert_eq!(view.rows()[0].model, "X1");

    let replacement = xlsx(
        &["Make", "Model", "Quantity"],
        &[
            &[t("Apple"), t("iPhone 15"), n(10.0)],
            &[t("Apple"), t("iPhone 15 Pro"), n(4.0)],
        ],
    );
    view.upload(&gate, &uploader, "b.xlsx", replacement, BranchId::Dubai)
        .await
        .unwrap();

    assert_eq!(view.branch(), BranchId::Dubai);
    assert_eq!(view.rows().len(), 2);
    assert_eq!(view.total_units(), 14);
}

#[tokio::test]
async fn sheet_without_valid_rows_falls_back_as_empty() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    let sheet = xlsx(
        &["Make", "Model", "Quantity"],
        &[&[t("Acme"), BLANK, n(5.0)]],
    );

    view.upload(&admin(), &uploader, "stock.xlsx", sheet, BranchId::Dubai)
        .await
        .unwrap();

    assert_eq!(view.state(), LoadState::Empty);
    assert_eq!(view.rows(), sample_table().as_slice());
    assert_eq!(view.status(), "Showing sample data (Dubai stock file is empty)");
}

#[tokio::test]
async fn unreadable_upload_falls_back_as_failed() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);

    view.upload(&admin(), &uploader, "broken.xlsx", b"not a workbook".to_vec(), BranchId::Dubai)
        .await
        .unwrap();

    assert_eq!(view.state(), LoadState::Failed);
    assert_eq!(view.status(), "Showing sample data (Dubai branch)");
}

#[tokio::test]
async fn public_viewer_cannot_upload() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);

    assert!(!view.upload_allowed(&PublicOnly));
    let err = view
        .upload(&PublicOnly, &uploader, "stock.xlsx", acme_sheet(), BranchId::Dubai)
        .await
        .unwrap_err();

    assert_eq!(err, UploadFailed::Unauthorized);
    assert_eq!(view.status(), "Admin login required to upload");
    assert!(store.is_empty());
}

#[tokio::test]
async fn logged_out_admin_cannot_upload() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    let mut gate = admin();
    assert!(view.upload_allowed(&gate));

    gate.logout();

    let err = view
        .upload(&gate, &uploader, "stock.xlsx", acme_sheet(), BranchId::Dubai)
        .await
        .unwrap_err();
    assert_eq!(err, UploadFailed::Unauthorized);
}

#[tokio::test]
async fn rejected_upload_keeps_current_table() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    let gate = admin();
    view.upload(&gate, &uploader, "stock.xlsx", acme_sheet(), BranchId::Dubai)
        .await
        .unwrap();

    let err = view
        .upload(&gate, &uploader, "stock.csv", b"a,b".to_vec(), BranchId::Dubai)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadFailed::Rejected { status: 400, .. }));
    assert_eq!(view.status(), err.to_string());
    assert_eq!(view.state(), LoadState::Loaded);
    assert_eq!(view.rows()[0].make, "Acme");
}

#[tokio::test]
async fn loading_twice_gives_the_same_table() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    view.upload(&admin(), &uploader, "stock.xlsx", acme_sheet(), BranchId::Dubai)
        .await
        .unwrap();
    let first = view.rows().to_vec();

    view.reload().await;

    assert_eq!(view.rows(), first.as_slice());
}

#[tokio::test]
async fn switching_back_and_forth_reloads_each_branch() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    let gate = admin();
    view.upload(&gate, &uploader, "dxb.xlsx", acme_sheet(), BranchId::Dubai)
        .await
        .unwrap();

    assert_eq!(view.select_branch(BranchId::HongKong).await, LoadState::NotFound);
    assert_eq!(view.select_branch(BranchId::Dubai).await, LoadState::Loaded);
    assert_eq!(view.rows()[0].make, "Acme");
}

#[tokio::test]
async fn filter_matches_quantity_text() {
    let (store, uploader) = fixture();
    let mut view = view_over(&store);
    let sheet = xlsx(
        &["Make", "Model", "Quantity", "Grading"],
        &[
            &[t("Apple"), t("iPhone 11"), n(15.0), t("A")],
            &[t("Google"), t("Pixel 7a"), n(3.0), t("B")],
        ],
    );
    view.upload(&admin(), &uploader, "stock.xlsx", sheet, BranchId::Dubai)
        .await
        .unwrap();

    view.set_query("15");
    let visible = view.visible_rows();

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].model, "iPhone 11");
}
