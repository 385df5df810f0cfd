pub(crate) mod events;
pub(crate) mod leaderboard;
pub(crate) mod registrations;

use chrono::Utc;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BoardError, Result};

/// Marker returned by every write: the endpoint took the request, nothing
/// more. Whether the sheet was actually updated is only known after a
/// later read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted;

/// Read actions understood by the script's `doGet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub(crate) enum ReadAction {
    GetEvents,
    GetRegistrations,
    GetLeaderboard,
}

impl ReadAction {
    /// Name of the array holding the rows in a success envelope.
    pub(crate) fn collection(self) -> &'static str {
        match self {
            ReadAction::GetEvents => "events",
            ReadAction::GetRegistrations => "registrations",
            ReadAction::GetLeaderboard => "players",
        }
    }
}

/// Write actions understood by the script's `doPost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub(crate) enum WriteAction {
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    CreatePlayer,
    UpdatePlayer,
    DeletePlayer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: EnvelopeStatus,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

/// Build a read URL with the action and a cache-busting timestamp.
pub(crate) fn read_url(endpoint: &Url, action: ReadAction) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("action", action.as_ref())
        .append_pair("t", &Utc::now().timestamp_millis().to_string());
    url
}

/// Fetch one of the sheet collections and unwrap its envelope.
pub(crate) async fn get_collection<T: DeserializeOwned>(
    client: &reqwest::Client,
    endpoint: &Url,
    action: ReadAction,
) -> Result<Vec<T>> {
    let url = read_url(endpoint, action);
    debug!(%url, %action, "fetching collection");

    let response = client.get(url.clone()).send().await.map_err(|e| BoardError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BoardError::UnexpectedStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| BoardError::ResponseBody {
        url: url.to_string(),
        source: e,
    })?;

    decode_collection(url.as_str(), &body, action)
}

/// Turn a response body into rows, mapping `status: "error"` to
/// [`BoardError::Remote`]. A success envelope without the collection
/// counts as an empty sheet. Rows that don't decode are logged and
/// skipped; the rest of the sheet still comes through.
pub(crate) fn decode_collection<T: DeserializeOwned>(
    url: &str,
    body: &str,
    action: ReadAction,
) -> Result<Vec<T>> {
    let decode_err = |source| BoardError::Decode {
        url: url.to_owned(),
        source,
    };
    let mut envelope: Envelope = serde_json::from_str(body).map_err(decode_err)?;
    match envelope.status {
        EnvelopeStatus::Error => Err(BoardError::Remote {
            message: envelope
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        }),
        EnvelopeStatus::Success => match envelope.rest.remove(action.collection()) {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(serde_json::Value::Array(rows)) => Ok(decode_rows(action, rows)),
            Some(other) => serde_json::from_value(other).map_err(decode_err),
        },
    }
}

fn decode_rows<T: DeserializeOwned>(action: ReadAction, rows: Vec<serde_json::Value>) -> Vec<T> {
    let total = rows.len();
    let records: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(%action, row, error = %e, "skipping malformed row");
                None
            }
        })
        .collect();
    if records.len() < total {
        debug!(%action, kept = records.len(), total, "decoded with skipped rows");
    }
    records
}

/// POST a JSON payload without reading the response body.
pub(crate) async fn post_json<P: Serialize + ?Sized>(
    client: &reqwest::Client,
    endpoint: &Url,
    payload: &P,
) -> Result<Accepted> {
    let response = client
        .post(endpoint.clone())
        .json(payload)
        .send()
        .await
        .map_err(|e| BoardError::Http {
            url: endpoint.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BoardError::UnexpectedStatus {
            url: endpoint.to_string(),
            status,
        });
    }

    debug!(%status, "write accepted");
    Ok(Accepted)
}
