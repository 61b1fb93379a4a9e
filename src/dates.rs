use chrono::{Local, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

// Article pages carry dates like "10/05/2025 14h30" or "10/05/2025 14:30";
// the time part is optional.
static RE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2})/(\d{2})/(\d{4})(?:\s+(\d{2})[h:](\d{2}))?").unwrap());

/// Parse a `DD/MM/YYYY [HHhMM|HH:MM]` date found anywhere in `text` into
/// local-time epoch milliseconds. Returns 0 when nothing parseable is
/// found; callers fall back to the file's mtime on 0.
pub fn parse_timestamp(text: &str) -> i64 {
    let Some(caps) = RE_DATE.captures(text) else {
        return 0;
    };

    let day: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let year: i32 = caps[3].parse().unwrap_or(0);
    let hour: u32 = caps.get(4).map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let minute: u32 = caps.get(5).map_or(0, |m| m.as_str().parse().unwrap_or(0));

    // Calendar-invalid components (e.g. 31/02) are treated the same as no
    // match at all.
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn local_millis(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn parses_date_with_h_separator() {
        assert_eq!(
            parse_timestamp("10/05/2025 14h30"),
            local_millis(2025, 5, 10, 14, 30)
        );
    }

    #[test]
    fn parses_date_with_colon_separator() {
        assert_eq!(
            parse_timestamp("01/12/2024 09:05"),
            local_millis(2024, 12, 1, 9, 5)
        );
    }

    #[test]
    fn time_defaults_to_midnight() {
        assert_eq!(parse_timestamp("27/02/2026"), local_millis(2026, 2, 27, 0, 0));
    }

    #[test]
    fn matches_anywhere_in_the_string() {
        assert_eq!(
            parse_timestamp("Publicado em 10/05/2025 14h30 por Redação"),
            local_millis(2025, 5, 10, 14, 30)
        );
    }

    #[test]
    fn components_round_trip() {
        let ts = parse_timestamp("03/07/2023 18h45");
        let dt = Local.timestamp_millis_opt(ts).unwrap();
        assert_eq!(
            (dt.day(), dt.month(), dt.year(), dt.hour(), dt.minute()),
            (3, 7, 2023, 18, 45)
        );
    }

    #[test]
    fn unparseable_returns_sentinel() {
        assert_eq!(parse_timestamp(""), 0);
        assert_eq!(parse_timestamp("Recente"), 0);
        assert_eq!(parse_timestamp("2025-05-10"), 0);
        assert_eq!(parse_timestamp("5/5/2025"), 0);
    }

    #[test]
    fn invalid_calendar_date_returns_sentinel() {
        assert_eq!(parse_timestamp("31/02/2025"), 0);
        assert_eq!(parse_timestamp("10/13/2025"), 0);
    }
}
