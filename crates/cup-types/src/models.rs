use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Parent names are expected to hold at most this many entries.
pub const MAX_PARENT_NAMES: usize = 2;
/// Grandparent names are expected to hold at most this many entries.
pub const MAX_GRANDPARENT_NAMES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    Ru,
    Us,
    Ww,
    Uk,
    De,
    Fr,
    It,
    Es,
    Pt,
    Nl,
    Be,
    Ch,
}

impl CountryCode {
    pub const ALL: [CountryCode; 12] = [
        Self::Ru,
        Self::Us,
        Self::Ww,
        Self::Uk,
        Self::De,
        Self::Fr,
        Self::It,
        Self::Es,
        Self::Pt,
        Self::Nl,
        Self::Be,
        Self::Ch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "RU",
            Self::Us => "US",
            Self::Ww => "WW",
            Self::Uk => "UK",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::It => "IT",
            Self::Es => "ES",
            Self::Pt => "PT",
            Self::Nl => "NL",
            Self::Be => "BE",
            Self::Ch => "CH",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown country code: {0:?}")]
pub struct UnknownCountry(pub String);

impl FromStr for CountryCode {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownCountry(s.to_string()))
    }
}

/// Serde adapter for an optional country: `""`, `null` and a missing field
/// all mean "no country", and `None` is written back as `""`.
pub mod optional_country {
    use super::CountryCode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<CountryCode>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.map(CountryCode::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CountryCode>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

/// A team member as seen by API clients. The owning team is implied by
/// the request, so `team_id` is not part of this projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_names: Vec<String>,
    #[serde(default, rename = "grandparents_names", deserialize_with = "null_as_empty")]
    pub grandparent_names: Vec<String>,
    #[serde(default, with = "optional_country")]
    pub country: Option<CountryCode>,
}

impl User {
    pub fn within_lineage_conventions(&self) -> bool {
        self.parent_names.len() <= MAX_PARENT_NAMES
            && self.grandparent_names.len() <= MAX_GRANDPARENT_NAMES
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub users: Vec<User>,
}
