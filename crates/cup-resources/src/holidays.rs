use anyhow::{Context, Result};
use cup_types::calendar::{DayHolidays, Holidays};

const HOLIDAYS_RU_12: &str = include_str!("../data/holidays_ru_12.json");

/// December holidays, indexed by DDMM.
pub fn load_holidays_ru_12() -> Result<Holidays> {
    parse_holidays(HOLIDAYS_RU_12).context("failed to parse bundled December holidays")
}

fn parse_holidays(raw: &str) -> Result<Holidays> {
    let days: Vec<DayHolidays> = serde_json::from_str(raw)?;
    Ok(days
        .into_iter()
        .map(|day| (day.date.clone(), day))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cup_types::calendar::Ddmm;

    #[test]
    fn bundled_holidays_load() {
        let holidays = load_holidays_ru_12().unwrap();
        assert!(!holidays.is_empty());

        for (key, day) in &holidays {
            assert_eq!(key, &day.date);
            let ddmm: Ddmm = key.parse().unwrap();
            assert_eq!(ddmm.month(), 12);
        }
    }

    #[test]
    fn malformed_data_is_an_error() {
        assert!(parse_holidays("{\"date\": \"0101\"}").is_err());
    }
}
