//! Session store port

use async_trait::async_trait;
use dishmuse_domain::{Session, SessionKey};
use tokio::sync::OwnedMutexGuard;

/// Exclusive access to one session.
///
/// Holding the guard serialises turns for that key; other keys are not
/// affected.
pub type SessionGuard = OwnedMutexGuard<Session>;

/// Storage for conversation sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lock the session for `key`, creating an empty one if absent.
    ///
    /// Waits while another turn holds the same key.
    async fn lock(&self, key: &SessionKey) -> SessionGuard;

    /// A fresh key for a client that did not supply one.
    fn generate_key(&self) -> SessionKey;

    /// Number of sessions currently held.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
