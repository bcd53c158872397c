//! HTTP surface for the assistant bridge: the `/travel-assistant` endpoint
//! with the same wire contract, permissive CORS, and error envelope as the
//! web client expects.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::core::session::FALLBACK_REPLY;
use crate::error::Result;
use crate::services::assistant::{AssistantBridge, PROCESSING_APOLOGY};
use crate::types::wire::{AssistantRequest, AssistantResponse};

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// Assistant endpoint path.
pub const ASSISTANT_PATH: &str = "/travel-assistant";

#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<AssistantBridge>,
}

impl AppState {
    pub fn new(bridge: AssistantBridge) -> Self {
        Self {
            bridge: Arc::new(bridge),
        }
    }
}

/// Build the service router. CORS is wildcard-origin with the fixed header
/// allow-list the browser client sends; the layer also answers preflight
/// OPTIONS requests.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ASSISTANT_PATH, post(travel_assistant))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "lagoon::http", %addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn travel_assistant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AssistantRequest>,
) -> (StatusCode, Json<AssistantResponse>) {
    let (message, context) = request.into_parts();
    info!(
        target: "lagoon::http",
        itinerary_count = context.itinerary_count(),
        trip_data = context.trip_data.is_some(),
        selected_day = context.selected_day,
        "travel assistant request"
    );

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start_matches("Bearer ").to_string());

    match state.bridge.ask(&message, &context).await {
        Ok(answer) => {
            let text = answer
                .response
                .unwrap_or_else(|| FALLBACK_REPLY.to_string());
            state
                .bridge
                .record_interaction(bearer, message, text.clone(), &context);
            (StatusCode::OK, Json(AssistantResponse::ok(text)))
        }
        Err(err) => {
            error!(
                target: "lagoon::http",
                code = err.error_code(),
                "travel assistant failed: {err}"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AssistantResponse::failed(err.to_string(), PROCESSING_APOLOGY)),
            )
        }
    }
}
