use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::client::RemoteStore;
use crate::clock::Clock;
use crate::error::{BoardError, Result};
use crate::feeds::PublicEvents;
use crate::model::{Event, Registration};
use crate::render;
use crate::sheets::Accepted;
use crate::sync::Synchronizer;
use crate::view::{Notice, Notifier, Sink, Target};

/// Public events page: the polled grid plus the details and sign-up
/// dialogs opened from its cards.
pub struct EventsPage<S: RemoteStore> {
    store: Arc<S>,
    events: Arc<Synchronizer<PublicEvents<S>>>,
    sink: Arc<dyn Sink>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl<S: RemoteStore + 'static> EventsPage<S> {
    pub fn new(
        store: Arc<S>,
        events: Arc<Synchronizer<PublicEvents<S>>>,
        sink: Arc<dyn Sink>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            events,
            sink,
            notifier,
            clock,
        }
    }

    pub fn events(&self) -> &Arc<Synchronizer<PublicEvents<S>>> {
        &self.events
    }

    fn find(&self, event_id: u32) -> Result<Event> {
        self.events
            .with_records(|events| events.iter().find(|e| e.id == event_id).cloned())
            .ok_or_else(|| BoardError::NotFound {
                entity: "event",
                id: event_id.to_string(),
            })
    }

    pub fn show_details(&self, event_id: u32) -> Result<()> {
        let event = self.find(event_id)?;
        let markup = render::events::event_details(&event, self.events.language());
        self.sink.write(Target::EventDetailsContent, &markup);
        Ok(())
    }

    pub fn show_enter(&self, event_id: u32) -> Result<()> {
        let event = self.find(event_id)?;
        let markup = render::events::enter_event_info(&event, self.events.language());
        self.sink.write(Target::EnterEventInfo, &markup);
        Ok(())
    }

    /// Sign `handle` up for the event. The row stores the event's name and
    /// date as they are right now.
    #[instrument(skip(self))]
    pub async fn register(&self, event_id: u32, handle: &str) -> Result<Accepted> {
        let event = self.find(event_id)?;
        let handle = handle.trim();
        if handle.is_empty() {
            self.notifier
                .notify(Notice::error("Please enter your Discord username."));
            return Err(BoardError::Validation { field: "username" });
        }

        let registration = Registration::for_event(&event, handle, self.clock.now());
        match self.store.record_registration(&registration).await {
            Ok(accepted) => {
                info!(event = %event.name, "registration submitted");
                self.notifier.notify(Notice::success(format!(
                    "Successfully registered for {}!",
                    event.name
                )));
                Ok(accepted)
            }
            Err(e) => {
                error!(error = %e, "registration failed");
                self.notifier.notify(Notice::error(
                    "Error submitting registration. Please try again.",
                ));
                Err(e)
            }
        }
    }
}
