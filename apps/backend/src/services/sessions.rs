//! In-memory study session store.
//!
//! Each learner holds an opaque token; the store maps it to the state of
//! their current session. Nothing here outlives the process.
//!
//! Every session sits behind its own lock. A request holds that lock for its
//! whole read, commit and store cycle, so requests on one token run one at a
//! time while other tokens proceed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;
use vocab_core::StudySession;

pub type SessionSlot = Arc<Mutex<StudySession>>;

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionSlot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lockable slot for `token`. The map lock is released before returning.
    pub async fn slot(&self, token: Uuid) -> Option<SessionSlot> {
        self.sessions.lock().await.get(&token).cloned()
    }

    /// Copy of the stored session, taken under its lock.
    pub async fn get(&self, token: Uuid) -> Option<StudySession> {
        let slot = self.slot(token).await?;
        let session = slot.lock().await;
        Some(session.clone())
    }

    pub async fn contains(&self, token: Uuid) -> bool {
        self.sessions.lock().await.contains_key(&token)
    }

    /// Store `session` under `token` in a fresh slot, replacing whatever was there.
    pub async fn set(&self, token: Uuid, session: StudySession) {
        self.sessions
            .lock()
            .await
            .insert(token, Arc::new(Mutex::new(session)));
    }

    /// Remove the session, waiting for any request still holding it.
    pub async fn clear(&self, token: Uuid) -> Option<StudySession> {
        let slot = self.sessions.lock().await.remove(&token)?;
        let session = slot.lock().await;
        Some(session.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vocab_core::{Direction, Method, Mode, StudyOptions};

    fn session() -> StudySession {
        let options = StudyOptions {
            direction: Direction::EnToAm,
            method: Method::Write,
            mode: Mode::Session,
        };
        StudySession::start(options, vec![], &mut StdRng::seed_from_u64(1)).unwrap()
    }

    #[tokio::test]
    async fn set_get_clear() {
        let store = SessionStore::new();
        let token = Uuid::new_v4();
        assert!(store.get(token).await.is_none());

        store.set(token, session()).await;
        assert!(store.contains(token).await);
        assert_eq!(store.get(token).await, Some(session()));

        assert!(store.clear(token).await.is_some());
        assert!(!store.contains(token).await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn set_replaces_previous_session() {
        let store = SessionStore::new();
        let token = Uuid::new_v4();
        store.set(token, session()).await;
        store.set(token, session()).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clear_waits_for_slot_holder() {
        let store = Arc::new(SessionStore::new());
        let token = Uuid::new_v4();
        store.set(token, session()).await;

        let slot = store.slot(token).await.unwrap();
        let guard = slot.lock().await;

        let clearing = {
            let store = store.clone();
            tokio::spawn(async move { store.clear(token).await })
        };
        tokio::task::yield_now().await;
        assert!(!clearing.is_finished());

        drop(guard);
        assert_eq!(clearing.await.unwrap(), Some(session()));
        assert!(store.slot(token).await.is_none());
    }
}
