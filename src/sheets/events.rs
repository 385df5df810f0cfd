use reqwest::Url;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::Event;
use crate::session::Credential;
use crate::sheets::{self, Accepted, ReadAction, WriteAction};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventWrite<'a> {
    action: WriteAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'a Event>,
    event_id: u32,
    admin_password: &'a str,
}

#[instrument(skip(client))]
pub(crate) async fn list_events(client: &reqwest::Client, endpoint: &Url) -> Result<Vec<Event>> {
    let events: Vec<Event> = sheets::get_collection(client, endpoint, ReadAction::GetEvents).await?;
    debug!(count = events.len(), "parsed events");
    Ok(events)
}

/// Create or update an event row; the script matches updates on `eventId`.
#[instrument(skip(client, event, credential), fields(event_id = event.id))]
pub(crate) async fn save_event(
    client: &reqwest::Client,
    endpoint: &Url,
    action: WriteAction,
    event: &Event,
    credential: &Credential,
) -> Result<Accepted> {
    let payload = EventWrite {
        action,
        event: Some(event),
        event_id: event.id,
        admin_password: credential.expose(),
    };
    sheets::post_json(client, endpoint, &payload).await
}

#[instrument(skip(client, credential))]
pub(crate) async fn delete_event(
    client: &reqwest::Client,
    endpoint: &Url,
    event_id: u32,
    credential: &Credential,
) -> Result<Accepted> {
    let payload = EventWrite {
        action: WriteAction::DeleteEvent,
        event: None,
        event_id,
        admin_password: credential.expose(),
    };
    sheets::post_json(client, endpoint, &payload).await
}
