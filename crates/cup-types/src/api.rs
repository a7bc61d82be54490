use serde::{Deserialize, Serialize};

use crate::models::{Team, User};

// -- Teams --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTeamResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub team_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTeamResponse {
    pub team: Team,
}

// -- Members --

#[derive(Debug, Serialize, Deserialize)]
pub struct AddToTeamRequest {
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddToTeamResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromTeamQuery {
    pub team_id: Option<String>,
    pub user_id: Option<String>,
}

// -- Calendar --

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NamedayResponse {
    pub date: String,
    pub names: String,
}

// -- Misc --

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
