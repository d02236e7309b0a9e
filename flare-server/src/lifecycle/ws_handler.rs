use crate::auth::ClaimsValidator;
use crate::directory::RoomDirectory;
use crate::lifecycle::connection::handle_socket;
use axum::Router;
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use flare_core::{Claim, SignalError};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn RoomDirectory>,
    pub validator: Arc<dyn ClaimsValidator>,
    pub ping_interval: Duration,
    pub idle_timeout: Option<Duration>,
}

/// Single upgrade endpoint at `/`. Origin checks are deliberately open;
/// the bearer token is the only gate.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
) -> Response {
    let claim = match authenticate(&params, state.validator.as_ref()) {
        Ok(claim) => claim,
        Err(e) => {
            warn!(error = %e, "rejecting upgrade");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, claim, state))
}

/// The upgrade request must carry exactly one `token` query parameter;
/// zero or several is a hard rejection before any session exists.
fn authenticate(
    params: &[(String, String)],
    validator: &dyn ClaimsValidator,
) -> Result<Claim, SignalError> {
    let mut tokens = params.iter().filter(|(k, _)| k == "token").map(|(_, v)| v);
    let token = tokens
        .next()
        .ok_or_else(|| SignalError::Auth("missing token parameter".into()))?;
    if tokens.next().is_some() {
        return Err(SignalError::Auth(
            "token parameter supplied more than once".into(),
        ));
    }
    validator.validate(token)
}
