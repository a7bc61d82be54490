//! Static calendar data bundled into the binary: holidays and name days,
//! both keyed by a DDMM day string.

pub mod holidays;
pub mod namedays;

use anyhow::Result;
use cup_types::calendar::{Ddmm, DayHolidays, Holidays, Namedays};
use tracing::info;

/// Read-only calendar loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    pub holidays: Holidays,
    pub namedays: Namedays,
}

impl Calendar {
    pub fn load() -> Result<Self> {
        let holidays = holidays::load_holidays_ru_12()?;
        let namedays = namedays::load_namedays_ru()?;

        info!(
            "Calendar loaded: {} holiday days, {} name days",
            holidays.len(),
            namedays.len()
        );
        Ok(Self { holidays, namedays })
    }

    pub fn holidays_on(&self, day: Ddmm) -> Option<&DayHolidays> {
        self.holidays.get(&day.to_string())
    }

    pub fn names_on(&self, day: Ddmm) -> Option<&str> {
        self.namedays.get(&day.to_string()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_by_day() {
        let calendar = Calendar::load().unwrap();

        let dec31: Ddmm = "3112".parse().unwrap();
        let day = calendar.holidays_on(dec31).unwrap();
        assert_eq!(day.date, "3112");
        assert!(!day.dates.is_empty());

        let dec13: Ddmm = "1312".parse().unwrap();
        assert_eq!(calendar.names_on(dec13), Some("Andrey"));

        let jan15: Ddmm = "1501".parse().unwrap();
        assert!(calendar.holidays_on(jan15).is_none());
        assert!(calendar.names_on(jan15).is_none());
    }
}
