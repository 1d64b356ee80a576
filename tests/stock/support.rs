//! Fixtures: in-memory workbooks and a live upload server.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

/// A fixture cell.
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

pub fn t(text: &'static str) -> Cell {
    Cell::Text(text)
}

pub fn n(number: f64) -> Cell {
    Cell::Number(number)
}

pub const BLANK: Cell = Cell::Blank;

/// Build an `.xlsx` whose first sheet has `header` on row 1 and `rows` below.
pub fn xlsx(header: &[&str], rows: &[&[Cell]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, label) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *label).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(r, col, *text).unwrap();
                }
                Cell::Number(number) => {
                    sheet.write_number(r, col, *number).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// The single-row sheet used across scenarios: `("Acme", "X1", 5, "A")`.
pub fn acme_sheet() -> Vec<u8> {
    xlsx(
        &["Make", "Model", "Quantity", "Grading"],
        &[&[t("Acme"), t("X1"), n(5.0), t("A")]],
    )
}

/// A running upload server backed by a temporary storage directory.
#[cfg(feature = "server")]
pub struct TestServer {
    pub base: String,
    pub storage: tempfile::TempDir,
}

#[cfg(feature = "server")]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn stored(&self, file_name: &str) -> Option<Vec<u8>> {
        std::fs::read(self.storage.path().join(file_name)).ok()
    }
}

/// Bind to port 0 and return the running server.
#[cfg(feature = "server")]
pub async fn start_server() -> TestServer {
    let storage = tempfile::tempdir().unwrap();
    let base = serve_from(storage.path().to_path_buf()).await;
    TestServer { base, storage }
}

/// Serve uploads into `storage_dir` and return the base URL.
#[cfg(feature = "server")]
pub async fn serve_from(storage_dir: std::path::PathBuf) -> String {
    use std::sync::Arc;
    use stock_viewer::{http, FsBranchStore, ServerConfig, UploadService};

    let config = ServerConfig {
        storage_dir,
        ..ServerConfig::default()
    };
    let service = Arc::new(UploadService::new(FsBranchStore::new(&config.storage_dir)));
    let app = http::router(service, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Multipart form with a `file` part.
#[cfg(feature = "server")]
pub fn file_form(file_name: &str, media_type: &str, bytes: Vec<u8>) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(media_type)
        .unwrap();
    reqwest::multipart::Form::new().part("file", part)
}
