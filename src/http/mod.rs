//! HTTP transport for the upload service.
//!
//! Requires the `server` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /upload`: multipart `file` (+ optional `branch` field) and/or
//!   `?branch=`; responds with [`UploadResponse`].
//! - `GET /health`: `{ "status": "ok" }`.
//! - `GET /dubai.xlsx`, `GET /hongkong.xlsx`: the current branch files, 404
//!   until first uploaded.
//! - anything else: the built frontend, when `DIST_DIR` is configured.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stock_viewer::{http, FsBranchStore, ServerConfig, UploadService};
//!
//! let config = ServerConfig::load()?;
//! let service = Arc::new(UploadService::new(FsBranchStore::new(&config.storage_dir)));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone(), &config);
//!
//! // Or serve directly
//! http::serve(config).await?;
//! ```

mod error;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use self::error::{error_response, multipart_error};
use crate::api::{HealthResponse, UploadResponse};
use crate::branch::BranchId;
use crate::config::ServerConfig;
use crate::error::UploadError;
use crate::service::{FilePart, UploadRequest, UploadService};
use crate::store::{BranchStore, FsBranchStore, MAX_UPLOAD_BYTES, XLSX_MEDIA_TYPE};

/// Room for multipart boundaries and the `branch` field on top of the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Request body limit for `POST /upload`.
pub const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD;

#[derive(Debug, Default, Deserialize)]
struct UploadParams {
    branch: Option<String>,
}

/// Build an axum `Router` serving uploads and branch files from `service`.
pub fn router<S: BranchStore + 'static>(
    service: Arc<UploadService<S>>,
    config: &ServerConfig,
) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/upload",
            post(upload_handler::<S>).layer(DefaultBodyLimit::max(BODY_LIMIT)),
        );

    for branch in BranchId::ALL {
        app = app.route(
            &branch.public_path(),
            get(move |State(service): State<Arc<UploadService<S>>>| {
                branch_file_handler(service, branch)
            }),
        );
    }

    let app = app.layer(cors_layer(&config.frontend_url)).with_state(service);

    match &config.dist_dir {
        Some(dist) => {
            let index = ServeFile::new(dist.join("index.html"));
            app.fallback_service(ServeDir::new(dist).fallback(index))
        }
        None => app,
    }
}

/// Serve uploads from `config.storage_dir` until Ctrl+C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), std::io::Error> {
    let store = FsBranchStore::new(&config.storage_dir);
    info!(dir = %store.dir().display(), "using storage directory");

    let service = Arc::new(UploadService::new(store));
    let app = router(service, &config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");
    info!("Upload endpoint: http://{address}/upload");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if frontend_url == "*" {
        return cors.allow_origin(AllowOrigin::any());
    }
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(e) => {
            warn!("FRONTEND_URL {frontend_url:?} is not a valid origin ({e}); cross-origin requests disabled");
            cors
        }
    }
}

/// `GET /health`: returns `{ "status": "ok" }`.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// `POST /upload`: resolve the branch, validate and overwrite its file.
async fn upload_handler<S: BranchStore + 'static>(
    State(service): State<Arc<UploadService<S>>>,
    Query(params): Query<UploadParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    // A body that is not multipart at all carries no file part.
    let multipart = multipart.map_err(|rejection| {
        warn!("upload without a multipart body: {}", rejection.body_text());
        UploadError::MissingFile
    })?;
    let mut request = read_upload_form(multipart).await?;
    request.query_branch = params.branch;

    let response = tokio::task::spawn_blocking(move || service.handle(request))
        .await
        .map_err(|e| UploadError::Internal(e.to_string()))??;

    Ok(Json(response))
}

/// Collect the `file` and `branch` parts; other parts are ignored.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadRequest, UploadError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, BODY_LIMIT))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let media_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, BODY_LIMIT))?;
                request.file = Some(FilePart {
                    file_name,
                    media_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("branch") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, BODY_LIMIT))?;
                request.field_branch = Some(text);
            }
            _ => {}
        }
    }

    Ok(request)
}

/// `GET /<branch file>`: current bytes of the branch's stock file.
async fn branch_file_handler<S: BranchStore + 'static>(
    service: Arc<UploadService<S>>,
    branch: BranchId,
) -> Response {
    let loaded = tokio::task::spawn_blocking(move || service.load(branch)).await;
    match loaded {
        Ok(Ok(Some(bytes))) => ([(CONTENT_TYPE, XLSX_MEDIA_TYPE)], bytes).into_response(),
        Ok(Ok(None)) => error_response(
            StatusCode::NOT_FOUND,
            format!("{} stock file not found", branch.display_name()),
        ),
        Ok(Err(e)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
