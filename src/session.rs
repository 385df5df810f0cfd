use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::storage::Storage;

/// Storage key holding the admin password for the current session.
pub const ADMIN_SESSION_KEY: &str = "adminPassword";

/// Opaque admin capability. The endpoint compares it as a plain string; it
/// is neither signed nor time-limited.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Reads and writes the admin credential in client storage.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn login(&self, password: &str) {
        self.storage.set(ADMIN_SESSION_KEY, password);
        info!("admin session started");
    }

    pub fn logout(&self) {
        self.storage.remove(ADMIN_SESSION_KEY);
        info!("admin session cleared");
    }

    /// The stored credential, if any. A blank value counts as logged out.
    pub fn credential(&self) -> Option<Credential> {
        self.storage
            .get(ADMIN_SESSION_KEY)
            .filter(|s| !s.trim().is_empty())
            .map(Credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn login_logout_cycle() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        assert!(session.credential().is_none());

        session.login("hunter2");
        assert_eq!(session.credential().unwrap().expose(), "hunter2");

        session.logout();
        assert!(session.credential().is_none());
    }

    #[test]
    fn blank_password_is_not_a_session() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        session.login("   ");
        assert!(session.credential().is_none());
    }

    #[test]
    fn debug_hides_secret() {
        let credential = Credential::new("hunter2");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
    }
}
