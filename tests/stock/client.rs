//! Viewer talking to a live upload server: HttpSource and HttpUploader.

use std::time::Duration;

use stock_viewer::inventory::sample_table;
use stock_viewer::view::{
    CredentialGate, HttpSource, HttpUploader, StockSource, UploadFailed, Uploader,
};
use stock_viewer::{BranchId, ClientConfig, InventoryView, LoadState};

use crate::support::{acme_sheet, start_server, TestServer};

fn client_config(server: &TestServer) -> ClientConfig {
    ClientConfig {
        upload_url: server.url("/upload"),
        stock_base_url: server.base.clone(),
        admin_username: "admin".to_string(),
        admin_password: Some("s3cret".to_string()),
    }
}

#[tokio::test]
async fn uploader_reports_resolved_branch() {
    let server = start_server().await;
    let uploader = HttpUploader::new(server.url("/upload"));

    let response = uploader
        .upload(BranchId::HongKong, "Stock.XLSX", acme_sheet())
        .await
        .unwrap();

    assert_eq!(response.branch, BranchId::HongKong);
    assert_eq!(response.path, "/hongkong.xlsx");
    assert_eq!(server.stored("hongkong.xlsx"), Some(acme_sheet()));
}

#[tokio::test]
async fn uploader_surfaces_server_error_message() {
    let server = start_server().await;
    let uploader = HttpUploader::new(server.url("/upload"));

    let err = uploader
        .upload(BranchId::Dubai, "notes.txt", b"hello".to_vec())
        .await
        .unwrap_err();

    match err {
        UploadFailed::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("Invalid file type"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn uploader_reports_unreachable_server() {
    let uploader = HttpUploader::new("http://127.0.0.1:1/upload");

    let err = uploader
        .upload(BranchId::Dubai, "stock.xlsx", acme_sheet())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadFailed::Network(_)));
}

#[tokio::test]
async fn source_maps_404_to_none() {
    let server = start_server().await;
    let source = HttpSource::new(server.base.clone());

    assert_eq!(source.url_for(BranchId::Dubai), server.url("/dubai.xlsx"));
    assert_eq!(source.fetch(BranchId::Dubai).await.unwrap(), None);
}

#[tokio::test]
async fn admin_uploads_and_viewer_reads_back() {
    let server = start_server().await;
    let config = client_config(&server);
    let mut gate = CredentialGate::from_config(&config);
    gate.login("admin", "s3cret").unwrap();
    let uploader = HttpUploader::new(config.upload_url.clone());

    let mut view = InventoryView::mount(HttpSource::new(config.stock_base_url.clone()), BranchId::Dubai)
        .await
        .with_reload_delay(Duration::from_millis(10));
    assert_eq!(view.state(), LoadState::NotFound);
    assert_eq!(view.rows(), sample_table().as_slice());

    view.upload(&gate, &uploader, "stock.xlsx", acme_sheet(), BranchId::HongKong)
        .await
        .unwrap();

    assert_eq!(view.branch(), BranchId::HongKong);
    assert_eq!(view.state(), LoadState::Loaded);
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].make, "Acme");
    assert_eq!(view.rows()[0].quantity, 5);

    let mut public = InventoryView::mount(HttpSource::new(server.base.clone()), BranchId::HongKong).await;
    assert_eq!(public.state(), LoadState::Loaded);
    public.set_query("x1");
    assert_eq!(public.visible_rows().len(), 1);
    assert_eq!(public.select_branch(BranchId::Dubai).await, LoadState::NotFound);
    assert_eq!(public.status(), "Showing sample data (Dubai stock file not found)");
}

#[tokio::test]
async fn unreachable_server_falls_back_to_sample_data() {
    let view = InventoryView::mount(HttpSource::new("http://127.0.0.1:1"), BranchId::Dubai).await;

    assert_eq!(view.state(), LoadState::Failed);
    assert_eq!(view.rows(), sample_table().as_slice());
    assert_eq!(view.status(), "Showing sample data (Dubai branch)");
}
