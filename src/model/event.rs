use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use super::common::timestamp;

/// A community event as stored in the `Events` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub name: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prize: String,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Event {
    pub fn is_live(&self) -> bool {
        self.status == EventStatus::Live
    }
}

/// Whether an event is running right now or still ahead.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    #[default]
    #[serde(alias = "Upcoming", alias = "UPCOMING")]
    Upcoming,
    #[serde(alias = "Live", alias = "LIVE")]
    Live,
}

/// Pick the identifier for a newly created event: one past the largest
/// identifier currently known, or `1` when there are none. `None` once the
/// largest identifier is `u32::MAX`.
pub fn next_event_id(events: &[Event]) -> Option<u32> {
    match events.iter().map(|e| e.id).max() {
        None => Some(1),
        Some(max) => max.checked_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn event(id: u32) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            date: Utc::now(),
            description: String::new(),
            prize: String::new(),
            status: EventStatus::Upcoming,
            tag: None,
        }
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let events = vec![event(3), event(1), event(2)];
        assert_eq!(next_event_id(&events), Some(4));
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_event_id(&[]), Some(1));
    }

    #[test]
    fn next_id_does_not_wrap() {
        let events = vec![event(7), event(u32::MAX)];
        assert_eq!(next_event_id(&events), None);
    }

    #[test]
    fn status_round_trips_through_strum() {
        assert_eq!(EventStatus::from_str("live").unwrap(), EventStatus::Live);
        assert_eq!(EventStatus::Upcoming.to_string(), "upcoming");
        assert!(EventStatus::from_str("finished").is_err());
    }

    #[test]
    fn decodes_sheet_row() {
        let json = r#"{
            "id": 7,
            "name": "Friday Brawl",
            "date": "2025-06-06T19:00",
            "description": "Free for all",
            "prize": "500 gold",
            "status": "live"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, 7);
        assert!(event.is_live());
        assert_eq!(event.tag, None);
        assert_eq!(event.date.to_rfc3339(), "2025-06-06T19:00:00+00:00");
    }
}
