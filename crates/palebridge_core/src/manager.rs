//! The live session set: admission, tick dispatch, and ordered shutdown.
//! Owns nothing about how bytes actually arrive — callers hand it the two
//! peer sinks for a connection and get back the mailbox to feed decoded
//! transport bytes into; everything past that point is the pipeline's job.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::warn;

use crate::config::ProxyConfig;
use crate::context::Context;
use crate::error::AdmissionError;
use crate::pipeline;
use crate::session::{Session, SessionId, SessionMessage};
use palebridge_protocol::version::{check_version, VersionCheck};

/// How long `shutdown` waits for in-flight sessions to drain before
/// abandoning whatever's left.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tick period the Design Notes specify: one game tick, 50ms.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Size of the per-session mailbox; this is the backpressure point a
/// saturated session eventually trips into a `backpressure` disconnect.
const MAILBOX_CAPACITY: usize = 256;

struct SessionHandle {
    mailbox: mpsc::Sender<SessionMessage>,
}

pub struct SessionManager {
    config: Arc<ProxyConfig>,
    sessions: Arc<DashMap<SessionId, SessionHandle>>,
}

impl SessionManager {
    pub fn new(config: ProxyConfig) -> Self {
        SessionManager {
            config: Arc::new(config),
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn live_session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Pre-session admission: version gate first, then the player cap. No
    /// `Session` is allocated for a rejected connection.
    pub fn admit(&self, bedrock_protocol_version: i32) -> Result<(), AdmissionError> {
        match check_version(bedrock_protocol_version) {
            VersionCheck::Accepted => {}
            VersionCheck::ClientOutdated => return Err(AdmissionError::ClientOutdated),
            VersionCheck::ServerOutdated => return Err(AdmissionError::ServerOutdated),
        }
        if self.sessions.len() >= self.config.max_players {
            return Err(AdmissionError::ServerFull);
        }
        Ok(())
    }

    /// Creates a session already admitted by [`Self::admit`], spawns its
    /// pipeline task, and returns the mailbox a transport read loop posts
    /// decoded bytes into. The session deregisters itself from the live set
    /// when its pipeline exits.
    pub fn spawn_session(
        &self,
        bedrock_sink: mpsc::Sender<Bytes>,
        java_sink: mpsc::Sender<Bytes>,
    ) -> (SessionId, mpsc::Sender<SessionMessage>) {
        let id = SessionId::next();
        let (mailbox_tx, mailbox_rx) = mpsc::channel(MAILBOX_CAPACITY);
        let ctx = Context::new(self.config.clone(), mailbox_tx.clone());

        let mut session = Session::new(id, self.config.default_locale.clone());
        session.attach_bedrock_sink(bedrock_sink);
        session.attach_java_sink(java_sink);

        self.sessions.insert(
            id,
            SessionHandle {
                mailbox: mailbox_tx.clone(),
            },
        );

        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            pipeline::run_session(ctx, session, mailbox_rx).await;
            sessions.remove(&id);
        });

        (id, mailbox_tx)
    }

    /// Posts the 50ms tick into every live session's mailbox. A session
    /// whose mailbox is saturated just misses this tick; `try_send` never
    /// blocks the scheduler itself on one slow session.
    pub fn tick_all(&self) {
        for entry in self.sessions.iter() {
            if entry.value().mailbox.try_send(SessionMessage::Tick).is_err() {
                warn!(session = %entry.key(), "dropped tick, mailbox saturated");
            }
        }
    }

    /// Runs [`Self::tick_all`] on the documented 50ms cadence until the
    /// returned future is dropped.
    pub async fn run_tick_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            self.tick_all();
        }
    }

    /// Orders every live session to disconnect, then waits up to
    /// [`SHUTDOWN_TIMEOUT`] for the live set to drain. Sessions still
    /// present after the deadline are abandoned, not force-killed: their
    /// tasks keep running and will deregister themselves whenever they
    /// finish.
    pub async fn shutdown(&self) {
        let ids: Vec<SessionId> = self.sessions.iter().map(|entry| *entry.key()).collect();
        for id in ids {
            if let Some(handle) = self.sessions.get(&id) {
                let _ = handle
                    .mailbox
                    .send(SessionMessage::Disconnect("server shutdown".into()))
                    .await;
            }
        }

        let deadline = tokio::time::Instant::now() + SHUTDOWN_TIMEOUT;
        while !self.sessions.is_empty() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(SHUTDOWN_POLL_INTERVAL).await;
        }

        if !self.sessions.is_empty() {
            warn!(remaining = self.sessions.len(), "shutdown timed out, abandoning remaining sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(max_players: usize) -> ProxyConfig {
        ProxyConfig {
            max_players,
            ..ProxyConfig::default()
        }
    }

    #[test]
    fn admit_rejects_an_outdated_client() {
        let manager = SessionManager::new(test_config(10));
        assert_eq!(manager.admit(1), Err(AdmissionError::ClientOutdated));
    }

    #[test]
    fn admit_rejects_at_the_player_cap() {
        let manager = SessionManager::new(test_config(0));
        let supported = palebridge_protocol::version::SUPPORTED_VERSIONS[0];
        assert_eq!(manager.admit(supported), Err(AdmissionError::ServerFull));
    }

    #[tokio::test]
    async fn spawned_session_is_tracked_until_it_disconnects() {
        let manager = SessionManager::new(test_config(10));
        let (bedrock_tx, _bedrock_rx) = mpsc::channel(8);
        let (java_tx, _java_rx) = mpsc::channel(8);

        let (_id, mailbox) = manager.spawn_session(bedrock_tx, java_tx);
        assert_eq!(manager.live_session_count(), 1);

        mailbox
            .send(SessionMessage::Disconnect("done".into()))
            .await
            .unwrap();
        drop(mailbox);

        // Give the spawned task a chance to run and deregister.
        for _ in 0..50 {
            if manager.live_session_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(manager.live_session_count(), 0);
    }
}
