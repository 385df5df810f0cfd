//! Admin panel: credential-gated create/edit/delete of events and players,
//! plus the registrations pane.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::client::RemoteStore;
use crate::clock::Clock;
use crate::error::{BoardError, Result};
use crate::feeds::{AdminEvents, AdminPlayers};
use crate::mirror::LoadMode;
use crate::model::*;
use crate::render;
use crate::session::Credential;
use crate::sheets::Accepted;
use crate::sync::Synchronizer;
use crate::view::{Notice, Notifier, Sink, Target};

const EVENT_SAVED: &str =
    "Event saved successfully! It will appear on the events page automatically.";

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool + Send + Sync> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Sends the user to the login step when the session is gone.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Contents of the add/edit event dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub name: String,
    /// As typed into the `datetime-local` input.
    pub date: String,
    pub description: String,
    pub prize: String,
    pub status: EventStatus,
    pub tag: Option<String>,
}

impl From<&Event> for EventForm {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date.format("%Y-%m-%dT%H:%M").to_string(),
            description: event.description.clone(),
            prize: event.prize.clone(),
            status: event.status,
            tag: event.tag.clone(),
        }
    }
}

impl EventForm {
    fn into_event(self, id: u32) -> Result<Event> {
        if self.name.trim().is_empty() {
            return Err(BoardError::Validation { field: "name" });
        }
        let date = parse_timestamp(&self.date).ok_or(BoardError::Validation { field: "date" })?;
        Ok(Event {
            id,
            name: self.name.trim().to_string(),
            date,
            description: self.description,
            prize: self.prize,
            status: self.status,
            tag: self.tag.filter(|t| !t.trim().is_empty()),
        })
    }
}

/// Contents of the add/edit player dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub name: String,
    pub wins: u32,
    pub points: i64,
}

impl From<&LeaderboardPlayer> for PlayerForm {
    fn from(player: &LeaderboardPlayer) -> Self {
        Self {
            name: player.name.clone(),
            wins: player.wins,
            points: player.points,
        }
    }
}

impl PlayerForm {
    fn into_player(self, id: String) -> Result<LeaderboardPlayer> {
        if self.name.trim().is_empty() {
            return Err(BoardError::Validation { field: "name" });
        }
        Ok(LeaderboardPlayer {
            id,
            name: self.name.trim().to_string(),
            wins: self.wins,
            points: self.points,
        })
    }
}

/// Admin page controller.
///
/// Every write takes the session credential explicitly. Without one the
/// flow stops before touching the network and sends the user to log in.
/// After an accepted write the flow waits `settle_delay` for the sheet to
/// catch up, then forces a reload of the affected list.
pub struct AdminPanel<S: RemoteStore> {
    store: Arc<S>,
    events: Arc<Synchronizer<AdminEvents<S>>>,
    players: Arc<Synchronizer<AdminPlayers<S>>>,
    sink: Arc<dyn Sink>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    settle_delay: Duration,
}

impl<S: RemoteStore + 'static> AdminPanel<S> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<S>,
        events: Arc<Synchronizer<AdminEvents<S>>>,
        players: Arc<Synchronizer<AdminPlayers<S>>>,
        sink: Arc<dyn Sink>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            store,
            events,
            players,
            sink,
            notifier,
            navigator,
            clock,
            settle_delay,
        }
    }

    pub fn events(&self) -> &Arc<Synchronizer<AdminEvents<S>>> {
        &self.events
    }

    pub fn players(&self) -> &Arc<Synchronizer<AdminPlayers<S>>> {
        &self.players
    }

    /// Pre-filled form for editing, or `None` if the event is gone.
    pub fn edit_event_form(&self, event_id: u32) -> Option<EventForm> {
        self.events
            .with_records(|events| events.iter().find(|e| e.id == event_id).map(EventForm::from))
    }

    pub fn edit_player_form(&self, player_id: &str) -> Option<PlayerForm> {
        self.players.with_records(|players| {
            players
                .iter()
                .find(|p| p.id == player_id)
                .map(PlayerForm::from)
        })
    }

    #[instrument(skip(self, credential, form))]
    pub async fn create_event(
        &self,
        credential: Option<&Credential>,
        form: EventForm,
    ) -> Result<Accepted> {
        let credential = self.require_credential(credential)?;
        let Some(id) = self.events.with_records(next_event_id) else {
            error!("event ids exhausted");
            self.notifier
                .notify(Notice::error("Error saving event. Please try again."));
            return Err(BoardError::IdExhausted { entity: "event" });
        };
        let event = self.validated(form.into_event(id))?;
        let result = self.store.create_event(&event, &credential).await;
        self.finish_event_write(result, EVENT_SAVED).await
    }

    #[instrument(skip(self, credential, form))]
    pub async fn update_event(
        &self,
        credential: Option<&Credential>,
        event_id: u32,
        form: EventForm,
    ) -> Result<Accepted> {
        let credential = self.require_credential(credential)?;
        self.ensure_event_exists(event_id)?;
        let event = self.validated(form.into_event(event_id))?;
        let result = self.store.update_event(&event, &credential).await;
        self.finish_event_write(result, EVENT_SAVED).await
    }

    #[instrument(skip(self, credential, confirm))]
    pub async fn delete_event(
        &self,
        credential: Option<&Credential>,
        event_id: u32,
        confirm: &dyn Confirm,
    ) -> Result<Accepted> {
        let credential = self.require_credential(credential)?;
        self.ensure_event_exists(event_id)?;
        if !confirm.confirm("Are you sure you want to delete this event?") {
            info!(event_id, "delete cancelled");
            return Err(BoardError::Cancelled);
        }
        let result = self.store.delete_event(event_id, &credential).await;
        let accepted = self.finish_event_write(result, "Event deleted.").await?;
        if self.events.feed().selected() == Some(event_id) {
            self.events.feed().set_selected(None);
            self.sink.write(Target::PlayersList, &render::admin::no_selection());
            self.sink.write(Target::SelectedEventName, "");
        }
        Ok(accepted)
    }

    #[instrument(skip(self, credential, form))]
    pub async fn create_player(
        &self,
        credential: Option<&Credential>,
        form: PlayerForm,
    ) -> Result<Accepted> {
        let credential = self.require_credential(credential)?;
        let player = self.validated(form.into_player(next_player_id(self.clock.now())))?;
        let result = self.store.create_player(&player, &credential).await;
        self.finish_player_write(result, "Player saved successfully!").await
    }

    #[instrument(skip(self, credential, form))]
    pub async fn update_player(
        &self,
        credential: Option<&Credential>,
        player_id: &str,
        form: PlayerForm,
    ) -> Result<Accepted> {
        let credential = self.require_credential(credential)?;
        self.ensure_player_exists(player_id)?;
        let player = self.validated(form.into_player(player_id.to_string()))?;
        let result = self.store.update_player(&player, &credential).await;
        self.finish_player_write(result, "Player saved successfully!").await
    }

    #[instrument(skip(self, credential, confirm))]
    pub async fn delete_player(
        &self,
        credential: Option<&Credential>,
        player_id: &str,
        confirm: &dyn Confirm,
    ) -> Result<Accepted> {
        let credential = self.require_credential(credential)?;
        self.ensure_player_exists(player_id)?;
        if !confirm.confirm("Are you sure you want to delete this player?") {
            info!(player_id, "delete cancelled");
            return Err(BoardError::Cancelled);
        }
        let result = self.store.delete_player(player_id, &credential).await;
        self.finish_player_write(result, "Player deleted.").await
    }

    /// Highlight an event and show who registered for it. Registrations are
    /// matched on the event's current name.
    #[instrument(skip(self))]
    pub async fn select_event(&self, event_id: u32) -> Result<Vec<Registration>> {
        let event = self
            .events
            .with_records(|events| events.iter().find(|e| e.id == event_id).cloned())
            .ok_or_else(|| BoardError::NotFound {
                entity: "event",
                id: event_id.to_string(),
            })?;

        self.events.feed().set_selected(Some(event_id));
        self.events.rerender();
        self.sink
            .write(Target::SelectedEventName, &render::admin::selected_event_name(&event));
        self.sink
            .write(Target::PlayersList, &render::admin::registrations_loading());

        match self.store.list_registrations().await {
            Ok(all) => {
                let matching: Vec<&Registration> =
                    all.iter().filter(|r| r.belongs_to(&event)).collect();
                self.sink
                    .write(Target::PlayersList, &render::admin::registrations_list(&matching));
                self.sink.write(
                    Target::TotalRegistrations,
                    &render::admin::counter(Some(all.len())),
                );
                let matching = matching.into_iter().cloned().collect();
                Ok(matching)
            }
            Err(e) => {
                error!(error = %e, "failed to load registrations");
                self.sink
                    .write(Target::PlayersList, &render::admin::registrations_error());
                Err(e)
            }
        }
    }

    /// Refresh the total registrations counter; shows `-` when the sheet
    /// can't be read.
    #[instrument(skip(self))]
    pub async fn refresh_registration_count(&self) -> Option<usize> {
        let count = match self.store.list_registrations().await {
            Ok(all) => Some(all.len()),
            Err(e) => {
                warn!(error = %e, "failed to count registrations");
                None
            }
        };
        self.sink
            .write(Target::TotalRegistrations, &render::admin::counter(count));
        count
    }

    fn require_credential(&self, credential: Option<&Credential>) -> Result<Credential> {
        match credential {
            Some(credential) => Ok(credential.clone()),
            None => {
                warn!("admin write without a session");
                self.notifier
                    .notify(Notice::error("Your session has expired. Please log in again."));
                self.navigator.redirect_to_login();
                Err(BoardError::SessionExpired)
            }
        }
    }

    fn validated<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(BoardError::Validation { field }) = &result {
            self.notifier
                .notify(Notice::error(format!("Please fill in the {field} field.")));
        }
        result
    }

    fn ensure_event_exists(&self, event_id: u32) -> Result<()> {
        if self.events.with_records(|events| events.iter().any(|e| e.id == event_id)) {
            Ok(())
        } else {
            Err(BoardError::NotFound {
                entity: "event",
                id: event_id.to_string(),
            })
        }
    }

    fn ensure_player_exists(&self, player_id: &str) -> Result<()> {
        if self.players.with_records(|players| players.iter().any(|p| p.id == player_id)) {
            Ok(())
        } else {
            Err(BoardError::NotFound {
                entity: "player",
                id: player_id.to_string(),
            })
        }
    }

    async fn finish_event_write(
        &self,
        result: Result<Accepted>,
        confirmation: &str,
    ) -> Result<Accepted> {
        match result {
            Ok(accepted) => {
                tokio::time::sleep(self.settle_delay).await;
                let _ = self.events.refresh(LoadMode::Manual).await;
                self.refresh_registration_count().await;
                self.notifier.notify(Notice::success(confirmation));
                Ok(accepted)
            }
            Err(e) => {
                error!(error = %e, "event write failed");
                self.notifier
                    .notify(Notice::error("Error saving event. Please try again."));
                Err(e)
            }
        }
    }

    async fn finish_player_write(
        &self,
        result: Result<Accepted>,
        confirmation: &str,
    ) -> Result<Accepted> {
        match result {
            Ok(accepted) => {
                tokio::time::sleep(self.settle_delay).await;
                let _ = self.players.refresh(LoadMode::Manual).await;
                self.notifier.notify(Notice::success(confirmation));
                Ok(accepted)
            }
            Err(e) => {
                error!(error = %e, "player write failed");
                self.notifier
                    .notify(Notice::error("Error saving player. Please try again."));
                Err(e)
            }
        }
    }
}
