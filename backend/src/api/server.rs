//! HTTP server for the matrix API.
//!
//! Every matrix endpoint runs the same stage: extract the multipart file,
//! validate it into a square matrix, apply one [`Operation`].
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                           |
//! |--------|---------------|---------------------------------------|
//! | POST   | `/echo`       | Matrix as uploaded                    |
//! | POST   | `/invert`     | Transposed matrix                     |
//! | POST   | `/flatten`    | All cells on one line                 |
//! | POST   | `/sum`        | Sum of all cells                      |
//! | POST   | `/multiply`   | Product of all cells                  |
//! | GET    | `/health`     | Health check                          |
//! | GET    | `/logs`       | SSE stream of request logs            |

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart},
    http::{header, Method},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_request, RequestLog, LOG_BROADCASTER};
use super::types::HealthResponse;
use crate::error::{MatrixError, MatrixResult, ServerError, ServerResult};
use crate::models::Upload;
use crate::transform::{run, Operation};

/// Multipart field holding the uploaded CSV.
pub const MULTIPART_FILE_FIELD: &str = "file";

/// Build the application router.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/logs", get(sse_logs));

    for op in Operation::ALL {
        app = app.route(
            op.path(),
            post(move |multipart: Result<Multipart, MultipartRejection>| {
                serve_operation(op, multipart)
            }),
        );
    }

    // Uploads are bounded by memory only, not axum's 2 MB default
    app.layer(DefaultBodyLimit::disable()).layer(cors)
}

/// Start the HTTP server
pub async fn start_server(addr: SocketAddr) -> ServerResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    println!("🚀 Matrix server running on http://{}", addr);
    for op in Operation::ALL {
        println!("   POST {:<10} - {}", op.path(), op.description());
    }
    println!("   GET  /logs      - SSE log stream");
    println!("   GET  /health    - Health check");
    println!();

    axum::serve(listener, router()).await.map_err(ServerError::Serve)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

/// SSE endpoint for real-time request logs
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Shared handler: intake, then one operation.
async fn serve_operation(
    operation: Operation,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let upload = match extract_upload(multipart).await {
        Ok(upload) => upload,
        Err(err) => {
            log_request(RequestLog::rejected(operation.path(), None, err.to_string()));
            return err.into_response();
        }
    };

    match run(operation, &upload) {
        Ok(body) => {
            log_request(RequestLog::ok(operation.path(), upload.byte_len()));
            body.into_response()
        }
        Err(err) => {
            log_request(RequestLog::rejected(
                operation.path(),
                Some(upload.byte_len()),
                err.to_string(),
            ));
            err.into_response()
        }
    }
}

/// Read the first file part named [`MULTIPART_FILE_FIELD`].
///
/// Parts without a filename are not files and are skipped.
async fn extract_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> MatrixResult<Upload> {
    let mut multipart =
        multipart.map_err(|e| MatrixError::FileExtraction(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MatrixError::FileExtraction(e.body_text()))?
    {
        if field.name() != Some(MULTIPART_FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| MatrixError::FileExtraction(e.body_text()))?;

        return Ok(Upload::new(file_name, bytes.to_vec()));
    }

    Err(MatrixError::FileExtraction("no such file".into()))
}
