use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::CountryCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    National,
    International,
    Historical,
    Interesting,
}

/// Gameplay stats attached to a holiday card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub damage: i32,
    pub crit_chance: f32,
    pub evasion_chance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: HolidayType,
    pub countries: Vec<CountryCode>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHolidays {
    /// DDMM
    pub date: String,
    pub dates: Vec<Holiday>,
}

/// DDMM -> holidays on that day.
pub type Holidays = HashMap<String, DayHolidays>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nameday {
    /// DDMM
    pub date: String,
    pub names: Vec<String>,
}

/// DDMM -> comma separated names.
pub type Namedays = HashMap<String, String>;

const DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A day of the year without the year, written as four digits: day then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ddmm {
    day: u8,
    month: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid DDMM day key: {0:?}")]
pub struct InvalidDdmm(pub String);

impl Ddmm {
    pub fn new(day: u8, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > DAYS_IN_MONTH[usize::from(month - 1)] {
            return None;
        }
        Some(Self { day, month })
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn month(self) -> u8 {
        self.month
    }
}

impl FromStr for Ddmm {
    type Err = InvalidDdmm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDdmm(s.to_string());
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let day: u8 = s[..2].parse().map_err(|_| invalid())?;
        let month: u8 = s[2..].parse().map_err(|_| invalid())?;
        Self::new(day, month).ok_or_else(invalid)
    }
}

impl fmt::Display for Ddmm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.day, self.month)
    }
}
