//! Row types mapping directly to SQLite rows. Distinct from the
//! cup-types API models so the storage layer carries `team_id` and
//! `created_at`, which clients never see.

use chrono::{DateTime, Utc};
use cup_types::models::{CountryCode, User};

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: String,
    pub team_id: String,
    pub first_name: String,
    pub initials: String,
    pub parent_names: Vec<String>,
    pub grandparent_names: Vec<String>,
    pub country: Option<CountryCode>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn from_user(team_id: &str, user: User, created_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id,
            team_id: team_id.to_string(),
            first_name: user.first_name,
            initials: user.initials,
            parent_names: user.parent_names,
            grandparent_names: user.grandparent_names,
            country: user.country,
            created_at,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            first_name: row.first_name,
            initials: row.initials,
            parent_names: row.parent_names,
            grandparent_names: row.grandparent_names,
            country: row.country,
        }
    }
}
