//! Process-local session store.
//!
//! Sessions live for the lifetime of the process; nothing is persisted and
//! nothing expires.

use async_trait::async_trait;
use dishmuse_application::{SessionGuard, SessionStore};
use dishmuse_domain::{Session, SessionKey};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory [`SessionStore`] with one lock per session key.
///
/// The outer map lock is only held while looking up or inserting a slot, so
/// a long turn on one key never blocks another key.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionKey, Arc<Mutex<Session>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lock(&self, key: &SessionKey) -> SessionGuard {
        let slot = {
            let mut sessions = self.sessions.lock().await;
            sessions
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(key.clone()))))
                .clone()
        };
        slot.lock_owned().await
    }

    fn generate_key(&self) -> SessionKey {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = rand::thread_rng().gen_range(0..10_000);
        SessionKey::generated(millis, suffix)
    }

    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
