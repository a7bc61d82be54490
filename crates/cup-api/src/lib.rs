pub mod calendar;
pub mod cors;
pub mod error;
pub mod service;
pub mod state;
pub mod teams;

use axum::{Json, Router, middleware, routing::get, routing::post};

use cup_types::api::HealthResponse;

use crate::state::AppState;

/// JSON API under `/api` plus `/health`, with CORS applied.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/team", post(teams::create_team).get(teams::get_team))
        .route(
            "/team/user",
            post(teams::add_to_team).delete(teams::remove_from_team),
        )
        .route("/holidays", get(calendar::get_holidays))
        .route("/namedays", get(calendar::get_namedays));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(middleware::from_fn(cors::cors))
        .with_state(state)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}
