use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::in_flight::InFlight;
use crate::session::notifications::NotificationQueue;
use crate::wizard::WizardSession;

/// One user's editing session: the wizard (document + draft), its toast queue,
/// and the busy markers for background work.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub wizard: WizardSession,
    pub notifications: NotificationQueue,
    pub in_flight: InFlight,
    pub created_at: DateTime<Utc>,
}

pub type SessionHandle = Arc<Mutex<Session>>;

struct Entry {
    created_at: DateTime<Utc>,
    handle: SessionHandle,
}

/// Process-local session registry. Bounded: opening a session past
/// `max_sessions` evicts the oldest one.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<Uuid, Entry>>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn create(&self, template_id: &str) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let handle = Arc::new(Mutex::new(Session {
            id,
            wizard: WizardSession::new(template_id),
            notifications: NotificationQueue::default(),
            in_flight: InFlight::default(),
            created_at,
        }));

        let mut entries = self.entries.write().await;
        while entries.len() >= self.max_sessions {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(id, _)| *id)
            else {
                break;
            };
            entries.remove(&oldest);
            info!(session_id = %oldest, "Evicted oldest session (store at capacity)");
        }
        entries.insert(
            id,
            Entry {
                created_at,
                handle: Arc::clone(&handle),
            },
        );
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.entries
            .read()
            .await
            .get(&id)
            .map(|e| Arc::clone(&e.handle))
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.entries.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
