use async_trait::async_trait;
use reqwest::Url;
use tracing::instrument;

use crate::config::BoardConfig;
use crate::error::Result;
use crate::model::*;
use crate::session::Credential;
use crate::sheets::{self, Accepted, WriteAction};

/// Everything the pages need from the spreadsheet backend.
///
/// Reads are idempotent. Writes are fire-and-forget: [`Accepted`] only means
/// the request went out, and a caller that needs to see the effect has to
/// wait for the sheet to settle and read again.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn list_registrations(&self) -> Result<Vec<Registration>>;
    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardPlayer>>;

    async fn create_event(&self, event: &Event, credential: &Credential) -> Result<Accepted>;
    async fn update_event(&self, event: &Event, credential: &Credential) -> Result<Accepted>;
    async fn delete_event(&self, event_id: u32, credential: &Credential) -> Result<Accepted>;

    async fn create_player(&self, player: &LeaderboardPlayer, credential: &Credential)
        -> Result<Accepted>;
    async fn update_player(&self, player: &LeaderboardPlayer, credential: &Credential)
        -> Result<Accepted>;
    async fn delete_player(&self, player_id: &str, credential: &Credential) -> Result<Accepted>;

    async fn record_registration(&self, registration: &Registration) -> Result<Accepted>;
}

/// [`RemoteStore`] backed by the Apps Script web app.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> warnament_board::Result<()> {
/// use warnament_board::{RemoteStore, SheetsClient};
///
/// let endpoint = "https://script.google.com/macros/s/XXXX/exec".parse().unwrap();
/// let client = SheetsClient::new(endpoint);
/// let events = client.list_events().await?;
/// println!("Found {} events", events.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SheetsClient {
    /// Create a new client with default settings.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http: client,
            endpoint,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteStore for SheetsClient {
    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<Event>> {
        sheets::events::list_events(&self.http, &self.endpoint).await
    }

    #[instrument(skip(self))]
    async fn list_registrations(&self) -> Result<Vec<Registration>> {
        sheets::registrations::list_registrations(&self.http, &self.endpoint).await
    }

    #[instrument(skip(self))]
    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardPlayer>> {
        sheets::leaderboard::list_leaderboard(&self.http, &self.endpoint).await
    }

    async fn create_event(&self, event: &Event, credential: &Credential) -> Result<Accepted> {
        sheets::events::save_event(
            &self.http,
            &self.endpoint,
            WriteAction::CreateEvent,
            event,
            credential,
        )
        .await
    }

    async fn update_event(&self, event: &Event, credential: &Credential) -> Result<Accepted> {
        sheets::events::save_event(
            &self.http,
            &self.endpoint,
            WriteAction::UpdateEvent,
            event,
            credential,
        )
        .await
    }

    async fn delete_event(&self, event_id: u32, credential: &Credential) -> Result<Accepted> {
        sheets::events::delete_event(&self.http, &self.endpoint, event_id, credential).await
    }

    async fn create_player(
        &self,
        player: &LeaderboardPlayer,
        credential: &Credential,
    ) -> Result<Accepted> {
        sheets::leaderboard::save_player(
            &self.http,
            &self.endpoint,
            WriteAction::CreatePlayer,
            player,
            credential,
        )
        .await
    }

    async fn update_player(
        &self,
        player: &LeaderboardPlayer,
        credential: &Credential,
    ) -> Result<Accepted> {
        sheets::leaderboard::save_player(
            &self.http,
            &self.endpoint,
            WriteAction::UpdatePlayer,
            player,
            credential,
        )
        .await
    }

    async fn delete_player(&self, player_id: &str, credential: &Credential) -> Result<Accepted> {
        sheets::leaderboard::delete_player(&self.http, &self.endpoint, player_id, credential).await
    }

    async fn record_registration(&self, registration: &Registration) -> Result<Accepted> {
        sheets::registrations::record_registration(&self.http, &self.endpoint, registration).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::error::BoardError;

    /// In-memory sheet. Writes take effect immediately and every call is
    /// counted so tests can assert that nothing went over the wire.
    #[derive(Default)]
    pub(crate) struct FakeStore {
        pub(crate) events: Mutex<Vec<Event>>,
        pub(crate) registrations: Mutex<Vec<Registration>>,
        pub(crate) players: Mutex<Vec<LeaderboardPlayer>>,
        pub(crate) fail_writes: AtomicBool,
        pub(crate) fail_reads: AtomicBool,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeStore {
        pub(crate) fn with_events(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn read(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(BoardError::Remote {
                    message: "sheet unavailable".into(),
                });
            }
            Ok(())
        }

        fn write(&self) -> Result<Accepted> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(BoardError::Remote {
                    message: "write rejected".into(),
                });
            }
            Ok(Accepted)
        }
    }

    #[async_trait]
    impl RemoteStore for FakeStore {
        async fn list_events(&self) -> Result<Vec<Event>> {
            self.read()?;
            Ok(self.events.lock().unwrap().clone())
        }

        async fn list_registrations(&self) -> Result<Vec<Registration>> {
            self.read()?;
            Ok(self.registrations.lock().unwrap().clone())
        }

        async fn list_leaderboard(&self) -> Result<Vec<LeaderboardPlayer>> {
            self.read()?;
            Ok(self.players.lock().unwrap().clone())
        }

        async fn create_event(&self, event: &Event, _credential: &Credential) -> Result<Accepted> {
            let accepted = self.write()?;
            self.events.lock().unwrap().push(event.clone());
            Ok(accepted)
        }

        async fn update_event(&self, event: &Event, _credential: &Credential) -> Result<Accepted> {
            let accepted = self.write()?;
            let mut events = self.events.lock().unwrap();
            if let Some(existing) = events.iter_mut().find(|e| e.id == event.id) {
                *existing = event.clone();
            }
            Ok(accepted)
        }

        async fn delete_event(&self, event_id: u32, _credential: &Credential) -> Result<Accepted> {
            let accepted = self.write()?;
            self.events.lock().unwrap().retain(|e| e.id != event_id);
            Ok(accepted)
        }

        async fn create_player(
            &self,
            player: &LeaderboardPlayer,
            _credential: &Credential,
        ) -> Result<Accepted> {
            let accepted = self.write()?;
            self.players.lock().unwrap().push(player.clone());
            Ok(accepted)
        }

        async fn update_player(
            &self,
            player: &LeaderboardPlayer,
            _credential: &Credential,
        ) -> Result<Accepted> {
            let accepted = self.write()?;
            let mut players = self.players.lock().unwrap();
            if let Some(existing) = players.iter_mut().find(|p| p.id == player.id) {
                *existing = player.clone();
            }
            Ok(accepted)
        }

        async fn delete_player(&self, player_id: &str, _credential: &Credential) -> Result<Accepted> {
            let accepted = self.write()?;
            self.players.lock().unwrap().retain(|p| p.id != player_id);
            Ok(accepted)
        }

        async fn record_registration(&self, registration: &Registration) -> Result<Accepted> {
            let accepted = self.write()?;
            self.registrations.lock().unwrap().push(registration.clone());
            Ok(accepted)
        }
    }
}
