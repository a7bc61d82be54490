use crate::Database;
use crate::models::{TeamRow, UserRow};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use cup_types::models::CountryCode;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

const USER_COLUMNS: &str =
    "id, team_id, first_name, initials, parent_names, grandparent_names, country, created_at";

impl Database {
    // -- Teams --

    pub fn create_team(&self, team: &TeamRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO teams (id, name, created_at) VALUES (?1, ?2, ?3)",
                params![team.id, team.name, encode_timestamp(team.created_at)],
            )
            .context("failed to create team")?;
            Ok(())
        })
    }

    /// A missing team is `Ok(None)`, not an error.
    pub fn get_team(&self, id: &str) -> Result<Option<TeamRow>> {
        self.with_conn(|conn| query_team(conn, id))
    }

    // -- Users --

    pub fn create_user(&self, user: &UserRow) -> Result<()> {
        let parent_names =
            serde_json::to_string(&user.parent_names).context("failed to encode parent_names")?;
        let grandparent_names = serde_json::to_string(&user.grandparent_names)
            .context("failed to encode grandparent_names")?;

        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, team_id, first_name, initials, parent_names, grandparent_names, country, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    user.id,
                    user.team_id,
                    user.first_name,
                    user.initials,
                    parent_names,
                    grandparent_names,
                    encode_country(user.country),
                    encode_timestamp(user.created_at),
                ],
            )
            .context("failed to create user")?;
            Ok(())
        })
    }

    pub fn get_user(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    /// Overwrites every mutable column of the user, including `team_id`.
    /// `created_at` is left as stored.
    pub fn update_user(&self, user: &UserRow) -> Result<()> {
        let parent_names =
            serde_json::to_string(&user.parent_names).context("failed to encode parent_names")?;
        let grandparent_names = serde_json::to_string(&user.grandparent_names)
            .context("failed to encode grandparent_names")?;

        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE users
                 SET team_id = ?1, first_name = ?2, initials = ?3, parent_names = ?4, grandparent_names = ?5, country = ?6
                 WHERE id = ?7",
                params![
                    user.team_id,
                    user.first_name,
                    user.initials,
                    parent_names,
                    grandparent_names,
                    encode_country(user.country),
                    user.id,
                ],
            )
            .context("failed to update user")?;
            Ok(())
        })
    }

    /// Deletes the user only if it belongs to `team_id`.
    /// Returns false when no row matched both.
    pub fn delete_user(&self, team_id: &str, user_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let affected = conn
                .execute(
                    "DELETE FROM users WHERE id = ?1 AND team_id = ?2",
                    params![user_id, team_id],
                )
                .context("failed to delete user")?;
            Ok(affected > 0)
        })
    }

    /// Members of a team in the order they were first created.
    pub fn get_team_users(&self, team_id: &str) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| query_team_users(conn, team_id))
    }
}

fn query_team(conn: &Connection, id: &str) -> Result<Option<TeamRow>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM teams WHERE id = ?1")?;

    let row = stmt
        .query_row([id], |row| {
            Ok(TeamRow {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: decode_timestamp(row, 2)?,
            })
        })
        .optional()
        .context("failed to get team")?;

    Ok(row)
}

fn query_user(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;

    let row = stmt
        .query_row([id], user_from_row)
        .optional()
        .context("failed to get user")?;

    Ok(row)
}

fn query_team_users(conn: &Connection, team_id: &str) -> Result<Vec<UserRow>> {
    // rowid breaks ties between users created within the same instant
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE team_id = ?1
         ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt
        .query_map([team_id], user_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to get team users")?;

    Ok(rows)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        team_id: row.get(1)?,
        first_name: row.get(2)?,
        initials: row.get(3)?,
        parent_names: decode_names(row, 4)?,
        grandparent_names: decode_names(row, 5)?,
        country: decode_country(row, 6)?,
        created_at: decode_timestamp(row, 7)?,
    })
}

// -- Column codecs --

/// Fixed nanosecond precision keeps lexical order equal to time order.
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn encode_country(country: Option<CountryCode>) -> &'static str {
    country.map(CountryCode::as_str).unwrap_or("")
}

fn decode_country(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<CountryCode>> {
    let raw: String = row.get(idx)?;
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Name lists are JSON arrays; a stored `null` reads as an empty list.
fn decode_names(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str::<Option<Vec<String>>>(&raw)
        .map(Option::unwrap_or_default)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
