use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Formats the admin form and the spreadsheet have been seen to hand back
/// for a date cell that carries no offset.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a timestamp the way the spreadsheet stores it: RFC 3339 when the
/// sheet converted the cell to a date, otherwise the raw `datetime-local`
/// string typed into the admin form (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Serde adapter for timestamps stored as spreadsheet cells.
pub(crate) mod timestamp {
    use super::*;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("unrecognized date: {raw}")))
    }
}

/// Serde adapter for identifier cells, which the sheet returns as a number
/// when the value looks numeric and as a string otherwise.
pub(crate) mod lenient_id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Int(i64),
        Float(f64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Cell::deserialize(d)? {
            Cell::Text(s) => s,
            Cell::Int(n) => n.to_string(),
            Cell::Float(f) => f.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_and_form_values() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-14T18:30:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-14T20:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-14T18:30"), Some(expected));
        assert_eq!(parse_timestamp(" 2025-03-14 18:30:00 "), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("next friday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
