use anyhow::{Context, Result};
use cup_types::calendar::{Nameday, Namedays};

const NAMEDAYS_RU: &str = include_str!("../data/namedays_ru.json");

/// Name days with the names of each day joined by ", ".
pub fn load_namedays_ru() -> Result<Namedays> {
    parse_namedays(NAMEDAYS_RU).context("failed to parse bundled name days")
}

fn parse_namedays(raw: &str) -> Result<Namedays> {
    let days: Vec<Nameday> = serde_json::from_str(raw)?;
    Ok(days
        .into_iter()
        .map(|day| (day.date, day.names.join(", ")))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_namedays_load() {
        let namedays = load_namedays_ru().unwrap();
        assert!(!namedays.is_empty());
        assert_eq!(namedays.get("1012").map(String::as_str), Some("Vsevolod, Gavriil, Yakov"));
    }

    #[test]
    fn names_are_joined() {
        let namedays = parse_namedays(r#"[{"date": "0101", "names": ["A", "B"]}]"#).unwrap();
        assert_eq!(namedays["0101"], "A, B");
    }
}
