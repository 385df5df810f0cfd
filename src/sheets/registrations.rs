use reqwest::Url;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::Registration;
use crate::sheets::{self, Accepted, ReadAction};

#[instrument(skip(client))]
pub(crate) async fn list_registrations(
    client: &reqwest::Client,
    endpoint: &Url,
) -> Result<Vec<Registration>> {
    let registrations: Vec<Registration> =
        sheets::get_collection(client, endpoint, ReadAction::GetRegistrations).await?;
    debug!(count = registrations.len(), "parsed registrations");
    Ok(registrations)
}

/// Registrations go up as the bare row; the script treats any POST without
/// an event/player action as a sign-up.
#[instrument(skip(client, registration), fields(event = %registration.event))]
pub(crate) async fn record_registration(
    client: &reqwest::Client,
    endpoint: &Url,
    registration: &Registration,
) -> Result<Accepted> {
    sheets::post_json(client, endpoint, registration).await
}
