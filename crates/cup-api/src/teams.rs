use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::de::DeserializeOwned;
use tracing::info;

use cup_types::api::{
    AddToTeamRequest, AddToTeamResponse, CreateTeamRequest, CreateTeamResponse, EmptyResponse,
    GetTeamResponse, RemoveFromTeamQuery, TeamQuery,
};

use crate::error::{ApiError, run_blocking};
use crate::state::AppState;

/// POST /api/team — create a team, returns its generated id.
pub async fn create_team(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateTeamResponse>, ApiError> {
    let req: CreateTeamRequest = parse_body(&body)?;

    if req.name.is_empty() {
        return Err(ApiError::bad_request("Team name is required"));
    }

    info!("[POST /api/team] name={}", req.name);

    let id = run_blocking("Failed to create team", move || {
        state.teams.create_team(&req.name)
    })
    .await?;

    Ok(Json(CreateTeamResponse { id }))
}

/// GET /api/team?team_id= — the team and its members in creation order.
pub async fn get_team(
    State(state): State<AppState>,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> Result<Json<GetTeamResponse>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let team_id = required(query.team_id, "team_id parameter is required")?;

    info!("[GET /api/team] team_id={}", team_id);

    let team = run_blocking("Failed to get team", move || state.teams.get_team(&team_id)).await?;

    Ok(Json(GetTeamResponse { team }))
}

/// POST /api/team/user — create or update a member of a team.
pub async fn add_to_team(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddToTeamResponse>, ApiError> {
    let req: AddToTeamRequest = parse_body(&body)?;

    if req.team_id.is_empty() {
        return Err(ApiError::bad_request("team_id is required"));
    }
    if req.user.id.is_empty() {
        return Err(ApiError::bad_request("user.id is required"));
    }
    if req.user.first_name.is_empty() {
        return Err(ApiError::bad_request("user.first_name is required"));
    }

    info!("[POST /api/team/user] team_id={} user_id={}", req.team_id, req.user.id);

    let user = run_blocking("Failed to add user to team", move || {
        state.teams.add_user(&req.team_id, req.user)
    })
    .await?;

    Ok(Json(AddToTeamResponse { user }))
}

/// DELETE /api/team/user?team_id=&user_id= — remove a member from its team.
pub async fn remove_from_team(
    State(state): State<AppState>,
    query: Result<Query<RemoveFromTeamQuery>, QueryRejection>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let team_id = required(query.team_id, "team_id parameter is required")?;
    let user_id = required(query.user_id, "user_id parameter is required")?;

    info!("[DELETE /api/team/user] team_id={} user_id={}", team_id, user_id);

    run_blocking("Failed to remove user from team", move || {
        state.teams.remove_user(&team_id, &user_id)
    })
    .await?;

    Ok(Json(EmptyResponse::default()))
}

pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

/// Decodes a JSON body regardless of its Content-Type header.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        info!("Rejected request body: {}", e);
        ApiError::bad_request("Invalid JSON body")
    })
}

pub(crate) fn invalid_query(rejection: QueryRejection) -> ApiError {
    info!("Rejected query string: {}", rejection.body_text());
    ApiError::bad_request("Invalid query parameters")
}
