use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use cup_types::api::{DateQuery, NamedayResponse};
use cup_types::calendar::{DayHolidays, Ddmm};

use crate::error::ApiError;
use crate::state::AppState;
use crate::teams::{invalid_query, required};

fn parse_day(query: Result<Query<DateQuery>, QueryRejection>) -> Result<Ddmm, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    required(query.date, "date parameter is required")?
        .parse()
        .map_err(|_| ApiError::bad_request("date must be a DDMM day key"))
}

/// GET /api/holidays?date=DDMM
pub async fn get_holidays(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<DayHolidays>, ApiError> {
    let day = parse_day(query)?;

    state
        .calendar
        .holidays_on(day)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No holidays on {}", day)))
}

/// GET /api/namedays?date=DDMM
pub async fn get_namedays(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<NamedayResponse>, ApiError> {
    let day = parse_day(query)?;

    let names = state
        .calendar
        .names_on(day)
        .ok_or_else(|| ApiError::NotFound(format!("No name days on {}", day)))?;

    Ok(Json(NamedayResponse {
        date: day.to_string(),
        names: names.to_string(),
    }))
}
