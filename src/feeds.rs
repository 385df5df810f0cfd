//! The lists the site keeps in sync with the spreadsheet.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use crate::client::RemoteStore;
use crate::error::Result;
use crate::i18n::Language;
use crate::mirror::{Applied, LoadMode, View};
use crate::model::{Event, LeaderboardPlayer};
use crate::render::{self, leaderboard::LeaderboardFilter};
use crate::sync::{Feed, Synchronizer};
use crate::view::Target;

/// Event cards on the public events page.
pub struct PublicEvents<S> {
    store: Arc<S>,
}

impl<S> PublicEvents<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: RemoteStore> Feed for PublicEvents<S> {
    type Record = Event;
    const NAME: &'static str = "public-events";

    async fn fetch(&self) -> Result<Vec<Event>> {
        self.store.list_events().await
    }

    fn render(&self, view: View<'_, Event>, lang: Language) -> Vec<(Target, String)> {
        vec![(Target::EventsGrid, render::events::events_grid(view, lang))]
    }

    fn announce(&self, added: usize) -> String {
        match added {
            1 => "A new event was just announced!".to_string(),
            n => format!("{n} new events were just announced!"),
        }
    }
}

/// Event list and counters on the admin panel.
pub struct AdminEvents<S> {
    store: Arc<S>,
    selected: Mutex<Option<u32>>,
}

impl<S> AdminEvents<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            selected: Mutex::new(None),
        }
    }

    pub fn selected(&self) -> Option<u32> {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_selected(&self, event_id: Option<u32>) {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = event_id;
    }
}

#[async_trait]
impl<S: RemoteStore> Feed for AdminEvents<S> {
    type Record = Event;
    const NAME: &'static str = "admin-events";

    async fn fetch(&self) -> Result<Vec<Event>> {
        self.store.list_events().await
    }

    fn render(&self, view: View<'_, Event>, _lang: Language) -> Vec<(Target, String)> {
        let (total, live) = match view {
            View::Ready(events) => (
                Some(events.len()),
                Some(events.iter().filter(|e| e.is_live()).count()),
            ),
            _ => (None, None),
        };
        vec![
            (
                Target::EventsList,
                render::admin::events_list(view, self.selected()),
            ),
            (Target::TotalEvents, render::admin::counter(total)),
            (Target::ActiveEvents, render::admin::counter(live)),
        ]
    }

    fn announce(&self, added: usize) -> String {
        format!("{added} new event(s) in the sheet")
    }
}

/// Standings table on the public leaderboard page.
pub struct Leaderboard<S> {
    store: Arc<S>,
    filter: Mutex<LeaderboardFilter>,
}

impl<S> Leaderboard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            filter: Mutex::new(LeaderboardFilter::default()),
        }
    }

    pub fn filter(&self) -> LeaderboardFilter {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<S: RemoteStore> Feed for Leaderboard<S> {
    type Record = LeaderboardPlayer;
    const NAME: &'static str = "leaderboard";

    async fn fetch(&self) -> Result<Vec<LeaderboardPlayer>> {
        self.store.list_leaderboard().await
    }

    fn render(&self, view: View<'_, LeaderboardPlayer>, lang: Language) -> Vec<(Target, String)> {
        vec![
            (
                Target::LeaderboardFilters,
                render::leaderboard::filter_buttons(self.filter(), lang),
            ),
            (
                Target::LeaderboardBody,
                render::leaderboard::leaderboard_rows(view),
            ),
        ]
    }

    fn announce(&self, added: usize) -> String {
        match added {
            1 => "A new player joined the leaderboard!".to_string(),
            n => format!("{n} new players joined the leaderboard!"),
        }
    }
}

impl<S: RemoteStore> Synchronizer<Leaderboard<S>> {
    /// Mark `filter` active and reload the standings.
    pub async fn select_filter(&self, filter: LeaderboardFilter) -> Result<Applied> {
        *self
            .feed()
            .filter
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = filter;
        info!(%filter, "leaderboard filter selected");
        self.refresh(LoadMode::Manual).await
    }
}

/// Player list on the admin panel.
pub struct AdminPlayers<S> {
    store: Arc<S>,
}

impl<S> AdminPlayers<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: RemoteStore> Feed for AdminPlayers<S> {
    type Record = LeaderboardPlayer;
    const NAME: &'static str = "admin-players";

    async fn fetch(&self) -> Result<Vec<LeaderboardPlayer>> {
        self.store.list_leaderboard().await
    }

    fn render(&self, view: View<'_, LeaderboardPlayer>, _lang: Language) -> Vec<(Target, String)> {
        vec![(
            Target::LeaderboardAdminList,
            render::admin::players_list(view),
        )]
    }

    fn announce(&self, added: usize) -> String {
        format!("{added} new player(s) in the sheet")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use scraper::{Html, Selector};

    use super::*;
    use crate::client::tests::FakeStore;
    use crate::model::EventStatus;
    use crate::sync::tests::RecordingNotifier;
    use crate::view::{MemorySink, NoticeKind};

    fn event(id: u32, status: EventStatus) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            date: Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap(),
            description: String::new(),
            prize: String::new(),
            status,
            tag: None,
        }
    }

    fn player(id: &str, points: i64) -> LeaderboardPlayer {
        LeaderboardPlayer {
            id: id.into(),
            name: format!("player {id}"),
            wins: 0,
            points,
        }
    }

    fn setup<F: Feed>(feed: F) -> (Synchronizer<F>, Arc<MemorySink>, Arc<RecordingNotifier>) {
        let sink = Arc::new(MemorySink::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let sync = Synchronizer::new(feed, sink.clone(), notifier.clone(), Language::En);
        (sync, sink, notifier)
    }

    #[tokio::test]
    async fn selecting_a_filter_reloads_and_marks_it_active() {
        let store = Arc::new(FakeStore::default());
        store.players.lock().unwrap().push(player("a", 10));
        let (sync, sink, _) = setup(Leaderboard::new(store.clone()));
        sync.refresh(LoadMode::Initial).await.unwrap();
        let calls = store.calls();

        let applied = sync.select_filter(LeaderboardFilter::ThisMonth).await.unwrap();

        assert!(applied.render);
        assert_eq!(store.calls(), calls + 1);
        assert_eq!(sync.feed().filter(), LeaderboardFilter::ThisMonth);
        assert_eq!(sink.writes(Target::LeaderboardBody), 2);

        let buttons = Html::parse_fragment(&sink.markup(Target::LeaderboardFilters).unwrap());
        let active = Selector::parse("button.active").unwrap();
        let active: Vec<_> = buttons
            .select(&active)
            .filter_map(|b| b.value().attr("data-filter"))
            .collect();
        assert_eq!(active, ["this-month"]);
    }

    #[tokio::test]
    async fn admin_counters_track_total_and_live() {
        let store = Arc::new(FakeStore::with_events(vec![
            event(1, EventStatus::Live),
            event(2, EventStatus::Upcoming),
            event(3, EventStatus::Live),
        ]));
        let (sync, sink, _) = setup(AdminEvents::new(store.clone()));
        sync.refresh(LoadMode::Initial).await.unwrap();
        assert_eq!(sink.markup(Target::TotalEvents).as_deref(), Some("3"));
        assert_eq!(sink.markup(Target::ActiveEvents).as_deref(), Some("2"));

        store.events.lock().unwrap()[0].status = EventStatus::Upcoming;
        sync.refresh(LoadMode::Silent).await.unwrap();
        assert_eq!(sink.markup(Target::ActiveEvents).as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn admin_counters_are_unknown_when_first_load_fails() {
        let store = Arc::new(FakeStore::default());
        store
            .fail_reads
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let (sync, sink, _) = setup(AdminEvents::new(store));
        assert!(sync.refresh(LoadMode::Initial).await.is_err());
        assert_eq!(sink.markup(Target::TotalEvents).as_deref(), Some("-"));
        assert_eq!(sink.markup(Target::ActiveEvents).as_deref(), Some("-"));
    }

    #[tokio::test]
    async fn public_events_announce_growth() {
        let store = Arc::new(FakeStore::with_events(vec![event(1, EventStatus::Upcoming)]));
        let (sync, _, notifier) = setup(PublicEvents::new(store.clone()));
        sync.refresh(LoadMode::Initial).await.unwrap();

        store.events.lock().unwrap().push(event(2, EventStatus::Upcoming));
        sync.refresh(LoadMode::Silent).await.unwrap();
        store.events.lock().unwrap().extend([
            event(3, EventStatus::Live),
            event(4, EventStatus::Upcoming),
        ]);
        sync.refresh(LoadMode::Silent).await.unwrap();

        assert_eq!(
            notifier.messages(NoticeKind::Success),
            [
                "A new event was just announced!",
                "2 new events were just announced!"
            ]
        );
    }

    #[tokio::test]
    async fn leaderboard_announces_new_players() {
        let store = Arc::new(FakeStore::default());
        store.players.lock().unwrap().push(player("a", 10));
        let (sync, _, notifier) = setup(Leaderboard::new(store.clone()));
        sync.refresh(LoadMode::Initial).await.unwrap();

        store.players.lock().unwrap().push(player("b", 5));
        sync.refresh(LoadMode::Silent).await.unwrap();
        store
            .players
            .lock()
            .unwrap()
            .extend([player("c", 1), player("d", 2)]);
        sync.refresh(LoadMode::Silent).await.unwrap();

        assert_eq!(
            notifier.messages(NoticeKind::Success),
            [
                "A new player joined the leaderboard!",
                "2 new players joined the leaderboard!"
            ]
        );
    }

    #[tokio::test]
    async fn admin_lists_announce_with_counts() {
        let store = Arc::new(FakeStore::default());
        let (events, _, event_notices) = setup(AdminEvents::new(store.clone()));
        let (players, sink, player_notices) = setup(AdminPlayers::new(store.clone()));
        events.refresh(LoadMode::Initial).await.unwrap();
        players.refresh(LoadMode::Initial).await.unwrap();

        store.events.lock().unwrap().push(event(1, EventStatus::Upcoming));
        store.players.lock().unwrap().push(player("a", 10));
        events.refresh(LoadMode::Silent).await.unwrap();
        players.refresh(LoadMode::Silent).await.unwrap();

        assert_eq!(
            event_notices.messages(NoticeKind::Success),
            ["1 new event(s) in the sheet"]
        );
        assert_eq!(
            player_notices.messages(NoticeKind::Success),
            ["1 new player(s) in the sheet"]
        );
        assert!(sink
            .markup(Target::LeaderboardAdminList)
            .unwrap()
            .contains("player a"));
    }
}
