use crate::exchange::{ ExchangeOutcome, ExchangeService };
use crate::models::exchange::ExchangeRequest;
use axum::{
    body::Bytes,
    routing::{ get, post },
    Router,
    Json,
    extract::State,
    response::IntoResponse,
    http::{ header, Method, StatusCode },
};
use tower_http::cors::{ Any, CorsLayer };
use log::warn;

#[derive(Clone)]
struct AppState {
    exchange: ExchangeService,
    strict_status: bool,
}

/// Routes of the exchange server. Every `POST /api/content` answers `{"response": ...}`,
/// bad bodies included. With `strict_status` failures answer 502 instead of 200.
pub fn router(exchange: ExchangeService, strict_status: bool) -> Router {
    let app_state = AppState {
        exchange,
        strict_status,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/content", post(content_handler))
        .layer(cors)
        .with_state(app_state)
}

async fn root_handler() -> &'static str {
    "hello world"
}

async fn content_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    // Parsed by hand so a missing content type or odd body still gets a JSON reply.
    let outcome = match serde_json::from_slice::<ExchangeRequest>(&body) {
        Ok(req) => state.exchange.exchange(&req.prompt).await,
        Err(e) => {
            warn!("Rejecting request body: {}", e);
            ExchangeOutcome::Failed(format!("Error: invalid request body: {}", e))
        }
    };

    let code = if outcome.is_failure() && state.strict_status {
        warn!("Answering failed exchange with 502");
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (code, Json(outcome.into_response()))
}
