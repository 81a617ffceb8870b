use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{
    common::app_state::AppState,
    health::{
        check::run_health_check,
        db::Connector,
        models::{DatabaseStatus, HealthResult},
    },
};

pub fn health_routes<C: Connector>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/database", get(health_database::<C>))
        .route("/detailed", get(health_detailed::<C>))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    "OK".into_response()
}

async fn check<C: Connector>(state: &AppState<C>) -> HealthResult {
    run_health_check(state.get_connector(), state.get_database_url()).await
}

async fn health_database<C: Connector>(
    State(state): State<Arc<AppState<C>>>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(check(&state).await))
}

async fn health_detailed<C: Connector>(
    State(state): State<Arc<AppState<C>>>,
) -> impl IntoResponse {
    let result = check(&state).await;
    let status = result.status();

    let code = match status {
        DatabaseStatus::Connected => StatusCode::OK,
        DatabaseStatus::Error => StatusCode::SERVICE_UNAVAILABLE,
    };

    let json = json!({
        "platform": true,
        "database": status,
        "checkedAt": result.checked_at,
    });

    (code, Json(json))
}
