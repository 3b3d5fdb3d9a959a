//! # HTTP Ingress
//!
//! The network surface the producer UI talks to. It accepts message
//! submissions, serves the embedded input page, and carries the kill
//! request. Everything funnels into the shared [`Relay`]; the ingress holds
//! no state of its own.
//!
//! The UI may be served from a different origin than the relay (an editor
//! webview, a file:// page), so every response carries permissive
//! cross-origin headers and preflight requests are answered on any path.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::IngressSettings;
use crate::relay::Relay;
use crate::utils::error::RelayResult;

/// Delay between acknowledging a kill request and process exit, long enough
/// for the response to reach the client.
pub const KILL_GRACE: Duration = Duration::from_millis(100);

/// The embedded producer page.
static INDEX_PAGE: &str = include_str!("page.html");

/// Shared handler state.
#[derive(Debug, Clone)]
struct IngressState {
    relay: Arc<Relay>,
    /// Kill requests push here; the host process listens and exits after
    /// [`KILL_GRACE`]. Capacity 1; repeat kills are dropped and answered
    /// with the same acknowledgement.
    shutdown: mpsc::Sender<()>,
}

/// Body of a `POST /message` submission.
#[derive(Debug, Deserialize)]
struct SubmitBody {
    content: String,
    /// Optional data-URL image pasted into the producer UI.
    #[serde(default)]
    image: Option<String>,
}

impl SubmitBody {
    /// Collapses content and optional image into the single opaque payload
    /// the relay transports.
    fn into_message(self) -> String {
        match self.image {
            Some(image) if !image.is_empty() => {
                format!("{}\n\n[IMAGE]\n{}", self.content, image)
            }
            _ => self.content,
        }
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn submit_message(
    State(state): State<IngressState>,
    body: Result<Json<SubmitBody>, JsonRejection>,
) -> impl IntoResponse {
    match body {
        Ok(Json(body)) => {
            state.relay.submit(body.into_message()).await;
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(rejection) => {
            // Malformed submissions never touch relay state.
            warn!("rejected submission: {}", rejection.body_text());
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
        }
    }
}

async fn kill(State(state): State<IngressState>) -> impl IntoResponse {
    info!("kill requested");
    let _ = state.shutdown.try_send(());
    (StatusCode::OK, Json(json!({ "success": true })))
}

/// Unmatched routes: preflight still succeeds, everything else is 404.
async fn fallback(method: Method) -> StatusCode {
    if method == Method::OPTIONS {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Builds the ingress router around a shared relay and a shutdown signal.
pub fn router(relay: Arc<Relay>, shutdown: mpsc::Sender<()>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // The same fallback hangs off every method router, so a wrong method on
    // a known path behaves like an unknown path: preflight 200, rest 404.
    Router::new()
        .route("/", get(index).fallback(fallback))
        .route("/index.html", get(index).fallback(fallback))
        .route("/message", post(submit_message).fallback(fallback))
        .route("/kill", post(kill).fallback(fallback))
        .fallback(fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(IngressState { relay, shutdown })
}

/// Binds the listener and serves until the process exits.
///
/// A bind failure is returned rather than escalated: the caller logs it and
/// the process stays up with the tool endpoint reachable. Every subsequent
/// `receive()` will then suspend forever, since no submission path exists.
pub async fn serve(
    relay: Arc<Relay>,
    shutdown: mpsc::Sender<()>,
    settings: &IngressSettings,
) -> RelayResult<()> {
    let addr = SocketAddr::new(settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web UI: http://{}", addr);
    axum::serve(listener, router(relay, shutdown)).await?;
    Ok(())
}
