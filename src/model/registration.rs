use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::timestamp;
use super::event::Event;

/// A participant's sign-up, appended to the `Registrations` sheet.
///
/// `event` holds the event's *name*, not its id. Renaming an event leaves its
/// earlier registrations pointing at the old name, and they stop showing up
/// under the renamed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub username: String,
    #[serde(with = "timestamp")]
    pub event_date: DateTime<Utc>,
}

impl Registration {
    pub fn for_event(event: &Event, username: &str, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            event: event.name.clone(),
            username: username.to_string(),
            event_date: event.date,
        }
    }

    pub fn belongs_to(&self, event: &Event) -> bool {
        self.event == event.name
    }
}
