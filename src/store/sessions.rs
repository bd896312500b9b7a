//! Session store
//!
//! Durable admin sessions keyed by token digest. The raw opaque token is
//! never persisted; callers hash it before it reaches this store. Sessions
//! are created on login and only ever mutated by setting `revoked_at`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Session;
use crate::utils::Clock;

use super::{EventLog, StoreResult};

/// One line in the sessions log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SessionRecord {
    Created {
        #[serde(flatten)]
        session: Session,
    },
    Revoked {
        #[serde(rename = "tokenHash")]
        token_hash: String,
        #[serde(rename = "revokedAt")]
        revoked_at: DateTime<Utc>,
    },
}

/// Durable session table keyed by token digest.
///
/// Sole writer of `sessions.jsonl`; the access guard only reads.
pub struct SessionStore {
    log: EventLog,
    clock: Arc<dyn Clock>,
    state: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Open the store, replaying the sessions log.
    pub fn open<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let log = EventLog::new(path);
        let records: Vec<SessionRecord> = log.load()?;

        let mut state: HashMap<String, Session> = HashMap::new();
        for record in records {
            match record {
                SessionRecord::Created { session } => {
                    state.insert(session.token_hash.clone(), session);
                }
                SessionRecord::Revoked {
                    token_hash,
                    revoked_at,
                } => {
                    if let Some(session) = state.get_mut(&token_hash) {
                        session.revoked_at.get_or_insert(revoked_at);
                    }
                }
            }
        }

        log::info!("session store ready: {} sessions on record", state.len());

        Ok(Self {
            log,
            clock,
            state: RwLock::new(state),
        })
    }

    /// Create a session for `admin_id` expiring `ttl` from now.
    pub fn create(&self, admin_id: Uuid, token_hash: String, ttl: Duration) -> StoreResult<Session> {
        let now = self.clock.now();
        let session = Session {
            admin_id,
            token_hash: token_hash.clone(),
            created_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        };

        let mut state = self.state.write();
        self.log.append(&SessionRecord::Created {
            session: session.clone(),
        })?;
        state.insert(token_hash, session.clone());
        Ok(session)
    }

    /// Look up a live session by token digest.
    ///
    /// Returns `None` for unknown, revoked and expired sessions alike.
    pub fn find_live(&self, token_hash: &str) -> Option<Session> {
        let now = self.clock.now();
        self.state
            .read()
            .get(token_hash)
            .filter(|session| session.is_live(now))
            .cloned()
    }

    /// Revoke the session matching `token_hash`, if any.
    ///
    /// Idempotent: revoking twice or revoking an unknown digest both succeed
    /// silently, and neither writes a second log record.
    pub fn revoke(&self, token_hash: &str) -> StoreResult<()> {
        let now = self.clock.now();
        let mut state = self.state.write();

        match state.get_mut(token_hash) {
            Some(session) if session.revoked_at.is_none() => {
                self.log.append(&SessionRecord::Revoked {
                    token_hash: token_hash.to_string(),
                    revoked_at: now,
                })?;
                session.revoked_at = Some(now);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
