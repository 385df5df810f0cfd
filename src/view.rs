use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

/// Page containers the renderer writes into. `Display` gives the element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "camelCase")]
pub enum Target {
    EventsGrid,
    EventDetailsContent,
    EnterEventInfo,
    LeaderboardBody,
    LeaderboardFilters,
    EventsList,
    PlayersList,
    SelectedEventName,
    LeaderboardAdminList,
    TotalEvents,
    ActiveEvents,
    TotalRegistrations,
}

/// Receives generated markup for a container, replacing what was there.
pub trait Sink: Send + Sync {
    fn write(&self, target: Target, markup: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast or alert shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Keeps the latest markup per container, plus how many times each was
/// written.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<HashMap<Target, (String, usize)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self, target: Target) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&target)
            .map(|(markup, _)| markup.clone())
    }

    pub fn writes(&self, target: Target) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&target)
            .map_or(0, |(_, count)| *count)
    }
}

impl Sink for MemorySink {
    fn write(&self, target: Target, markup: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = state.entry(target).or_default();
        entry.0 = markup.to_string();
        entry.1 += 1;
    }
}

/// Sends notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => info!(message = %notice.message, "notice"),
            NoticeKind::Error => warn!(message = %notice.message, "notice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_display_as_element_ids() {
        assert_eq!(Target::EventsGrid.to_string(), "eventsGrid");
        assert_eq!(Target::TotalRegistrations.to_string(), "totalRegistrations");
    }

    #[test]
    fn memory_sink_keeps_latest_and_counts() {
        let sink = MemorySink::new();
        sink.write(Target::TotalEvents, "1");
        sink.write(Target::TotalEvents, "2");
        assert_eq!(sink.markup(Target::TotalEvents).as_deref(), Some("2"));
        assert_eq!(sink.writes(Target::TotalEvents), 2);
        assert_eq!(sink.writes(Target::ActiveEvents), 0);
    }
}
