//! The per-session mailbox consumer: the one task that owns a [`Session`]
//! and is the sole place decode-and-translate happens, giving the two read
//! loops their mutual-exclusion guarantee without a per-session mutex.

use std::time::Duration;

use palebridge_protocol::bedrock::ClientPacket;
use palebridge_protocol::java::ClientboundPacket;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn, Instrument};

use crate::context::Context;
use crate::registry;
use crate::session::{Session, SessionMessage, SessionState};

/// How long a `Disconnecting` session is given to flush its outbound buffers
/// before it's torn down regardless.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Drains `mailbox` until the channel closes or the session reaches `Dead`.
/// Each message is processed inside `spawn_blocking` with a `catch_unwind`
/// around the call into the registry, so a translator panic can't take the
/// whole session down silently — it's converted into an `internal_error`
/// disconnect and the session (and its queued outbound bytes) survive to be
/// drained normally.
pub async fn run_session(ctx: Context, session: Session, mailbox: mpsc::Receiver<SessionMessage>) {
    let span = tracing::info_span!("session", id = %session.id);
    run_session_inner(ctx, session, mailbox).instrument(span).await
}

async fn run_session_inner(ctx: Context, mut session: Session, mut mailbox: mpsc::Receiver<SessionMessage>) {
    loop {
        let Some(message) = mailbox.recv().await else {
            break;
        };

        if session.state().is_dead() {
            break;
        }

        session = apply(&ctx, session, message).await;

        if session.state() == SessionState::Disconnecting {
            session = drain_and_kill(session).await;
            break;
        }
    }

    info!(session = %session.id, "session pipeline exited");
}

async fn apply(ctx: &Context, session: Session, message: SessionMessage) -> Session {
    let ctx = ctx.clone();
    let handle = tokio::task::spawn_blocking(move || {
        let mut session = session;
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            dispatch_message(&ctx, &mut session, message);
        }));
        (session, outcome)
    });

    match handle.await {
        Ok((mut session, Ok(()))) => session,
        Ok((mut session, Err(_panic))) => {
            error!(session = %session.id, "translator panicked, disconnecting session");
            session.disconnect("internal_error");
            session
        }
        Err(join_error) => {
            // The closure itself aborted outside the catch_unwind (a true
            // process-level abort, not a Rust panic). Nothing to recover.
            panic!("session pipeline task was lost: {join_error}");
        }
    }
}

fn dispatch_message(ctx: &Context, session: &mut Session, message: SessionMessage) {
    match message {
        SessionMessage::BedrockBytes(bytes) => match palebridge_protocol::bedrock::decode_packet(bytes) {
            Ok((packet_id, body)) => match ClientPacket::decode(packet_id, body) {
                Ok(Some(packet)) => registry::dispatch_bedrock(ctx, session, packet),
                Ok(None) => debug!(session = %session.id, packet_id, "no decoder for bedrock packet id, dropping"),
                Err(e) => {
                    warn!(session = %session.id, error = %e, "malformed bedrock packet");
                    session.disconnect("protocol_error");
                }
            },
            Err(e) => {
                warn!(session = %session.id, error = %e, "malformed bedrock frame");
                session.disconnect("protocol_error");
            }
        },
        SessionMessage::JavaBytes(bytes) => match session.drain_java_packets(bytes) {
            Ok(packets) => {
                for packet in packets {
                    dispatch_one_java(ctx, session, packet);
                }
            }
            Err(e) => {
                warn!(session = %session.id, error = %e, "malformed java frame");
                session.disconnect("protocol_error");
            }
        },
        SessionMessage::Tick => session.advance_tick(),
        SessionMessage::Disconnect(reason) => session.disconnect(reason),
    }
}

fn dispatch_one_java(ctx: &Context, session: &mut Session, packet: ClientboundPacket) {
    registry::dispatch_java(ctx, session, packet);
}

/// Flushes any remaining outbound frames, gives the peer up to
/// [`DRAIN_TIMEOUT`] to actually receive them, then marks the session dead.
/// There's nothing left to await on an `mpsc::Sender` directly, so "flush"
/// here means: stop accepting new work and let the already-queued bytes sit
/// in the channel for the bounded window before the sinks are dropped.
async fn drain_and_kill(mut session: Session) -> Session {
    session.send_bedrock_disconnect(
        session
            .disconnect_reason()
            .unwrap_or("Disconnected")
            .to_string(),
    );
    tokio::time::sleep(DRAIN_TIMEOUT).await;
    session.mark_dead();
    session
}
