pub use admin::{AdminPanel, Confirm, EventForm, Navigator, PlayerForm};
pub use client::{RemoteStore, SheetsClient};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use feeds::{AdminEvents, AdminPlayers, Leaderboard, PublicEvents};
pub use i18n::{toggle_language, Language};
pub use mirror::{Applied, LoadMode, Mirror, View};
pub use poller::{PollHandle, Poller, PollerState};
pub use registration::EventsPage;
pub use session::{Credential, Session};
pub use sheets::Accepted;
pub use storage::{MemoryStorage, Storage};
pub use sync::{Feed, Synchronizer};
pub use view::{MemorySink, Notice, NoticeKind, Notifier, Sink, Target, TracingNotifier};

pub mod admin;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod feeds;
pub mod i18n;
pub mod mirror;
pub mod model;
pub mod poller;
pub mod registration;
pub mod render;
pub mod session;
pub(crate) mod sheets;
pub mod storage;
pub mod sync;
pub mod view;
