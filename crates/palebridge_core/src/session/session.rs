use bytes::Bytes;
use glam::DVec3;
use palebridge_protocol::bedrock;
use palebridge_protocol::java::{ClientboundPacket, PacketDecoder, PacketEncoder, ServerboundPacket};
use palebridge_protocol::CodecResult;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};
use uuid::Uuid;

use super::chunks::ChunkSet;
use super::entity::EntityTable;
use super::forms::FormCache;
use super::id::SessionId;
use super::machine::SessionState;
use super::windows::WindowTable;
use palebridge_mapping::{Dimension, GameMode};

/// Outbound sends that fail this many times in a row (buffer stays full)
/// trip a `backpressure` disconnect instead of retrying forever.
const MAX_BACKPRESSURE_FAILURES: u32 = 32;

type ScheduledTask = Box<dyn FnOnce(&mut Session) + Send>;

/// Per-connection mutable state: identity, entities, chunks, windows, forms,
/// ticks, and both peer sinks. Owned exclusively by the pipeline task that
/// drains this session's mailbox; translators borrow it for the duration of
/// one dispatch and never retain a reference across dispatches.
pub struct Session {
    pub id: SessionId,
    state: SessionState,

    pub display_name: String,
    pub player_uuid: Uuid,
    pub locale: String,

    pub dimension: Dimension,
    pub gamemode: GameMode,
    pub spawn_position: DVec3,
    pub view_distance: u8,

    pub entities: EntityTable,
    pub chunks: ChunkSet,
    pub windows: WindowTable,
    pub forms: FormCache,

    pub tick: u64,
    scheduled: Vec<(u64, ScheduledTask)>,

    bedrock_out: Option<mpsc::Sender<Bytes>>,
    java_out: Option<mpsc::Sender<Bytes>>,
    bedrock_backpressure: u32,
    java_backpressure: u32,

    java_encoder: PacketEncoder,
    java_decoder: PacketDecoder,
    /// Java login and play phases reuse small packet ids for different
    /// packets; this tracks which table to decode against.
    java_login_phase: bool,

    disconnect_reason: Option<String>,
    shutdown_notified: bool,
}

impl Session {
    pub fn new(id: SessionId, default_locale: String) -> Self {
        Session {
            id,
            state: SessionState::Unauthenticated,
            display_name: String::new(),
            player_uuid: Uuid::nil(),
            locale: default_locale,
            dimension: Dimension::Overworld,
            gamemode: GameMode::Survival,
            spawn_position: DVec3::ZERO,
            view_distance: 8,
            entities: EntityTable::new(),
            chunks: ChunkSet::new(),
            windows: WindowTable::new(),
            forms: FormCache::new(),
            tick: 0,
            scheduled: Vec::new(),
            bedrock_out: None,
            java_out: None,
            bedrock_backpressure: 0,
            java_backpressure: 0,
            java_encoder: PacketEncoder::new(),
            java_decoder: PacketDecoder::new(),
            java_login_phase: true,
            disconnect_reason: None,
            shutdown_notified: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn set_state(&mut self, state: SessionState) {
        debug!(session = %self.id, ?state, "session state transition");
        self.state = state;
    }

    pub fn attach_bedrock_sink(&mut self, tx: mpsc::Sender<Bytes>) {
        self.bedrock_out = Some(tx);
    }

    pub fn attach_java_sink(&mut self, tx: mpsc::Sender<Bytes>) {
        self.java_out = Some(tx);
    }

    pub fn has_java_sink(&self) -> bool {
        self.java_out.is_some()
    }

    pub fn set_java_compression(&mut self, threshold: Option<i32>) {
        self.java_encoder.set_compression(threshold.map(|t| t as u32));
        self.java_decoder.set_compression(threshold.is_some());
    }

    pub fn enable_java_encryption(&mut self, key: &[u8; 16]) {
        self.java_encoder.enable_encryption(key);
        self.java_decoder.enable_encryption(key);
    }

    pub fn enter_java_play_phase(&mut self) {
        self.java_login_phase = false;
    }

    /// Queues bytes read from the Java TCP stream and drains every complete
    /// frame currently buffered, decoding each against whichever packet
    /// table (login or play) the session is currently in.
    pub fn drain_java_packets(&mut self, bytes: Bytes) -> CodecResult<Vec<ClientboundPacket>> {
        let mut buf = bytes::BytesMut::with_capacity(bytes.len());
        buf.extend_from_slice(&bytes);
        self.java_decoder.queue_bytes(buf);

        let mut packets = Vec::new();
        while let Some((packet_id, body)) = self.java_decoder.try_next_packet()? {
            if let Some(packet) = ClientboundPacket::decode(self.java_login_phase, packet_id, body)? {
                packets.push(packet);
            } else {
                debug!(session = %self.id, packet_id, "no decoder for java packet id, dropping");
            }
        }
        Ok(packets)
    }

    /// Emits a packet to the Bedrock peer. A no-op on a `Dead` session and
    /// if no sink is attached yet (early phases).
    pub fn send_bedrock(&mut self, packet: palebridge_protocol::bedrock::ServerPacket) {
        if self.state.is_dead() {
            return;
        }
        let Some(tx) = self.bedrock_out.clone() else {
            return;
        };

        let (packet_id, body) = packet.encode();
        let bytes = bedrock::encode_packet(packet_id, &body);

        match tx.try_send(bytes) {
            Ok(()) => self.bedrock_backpressure = 0,
            Err(TrySendError::Full(_)) => self.note_bedrock_pressure(),
            Err(TrySendError::Closed(_)) => self.disconnect("transport_closed"),
        }
    }

    /// Emits a packet to the configured Java server. A no-op on a `Dead`
    /// session and before the outbound connection exists.
    pub fn send_java(&mut self, packet: ServerboundPacket) {
        if self.state.is_dead() {
            return;
        }
        let Some(tx) = self.java_out.clone() else {
            return;
        };

        let (packet_id, body) = packet.encode();
        if let Err(e) = self.java_encoder.append_packet(packet_id, &body) {
            warn!(session = %self.id, error = %e, "failed to frame outbound java packet");
            return;
        }
        let bytes = self.java_encoder.take().freeze();

        match tx.try_send(bytes) {
            Ok(()) => self.java_backpressure = 0,
            Err(TrySendError::Full(_)) => self.note_java_pressure(),
            Err(TrySendError::Closed(_)) => self.disconnect("transport_closed"),
        }
    }

    fn note_bedrock_pressure(&mut self) {
        self.bedrock_backpressure += 1;
        if self.bedrock_backpressure > MAX_BACKPRESSURE_FAILURES {
            self.disconnect("backpressure");
        }
    }

    fn note_java_pressure(&mut self) {
        self.java_backpressure += 1;
        if self.java_backpressure > MAX_BACKPRESSURE_FAILURES {
            self.disconnect("backpressure");
        }
    }

    /// Requests disconnection. Idempotent: the reason recorded is always the
    /// first one observed, and repeated calls after the first have no
    /// further effect on `disconnect_reason` or the state transition.
    pub fn disconnect(&mut self, reason: impl Into<String>) {
        if self.disconnect_reason.is_some() {
            return;
        }
        let reason = reason.into();
        debug!(session = %self.id, %reason, "session disconnect requested");
        self.disconnect_reason = Some(reason);
        if !self.state.is_dead() {
            self.state = SessionState::Disconnecting;
        }
    }

    pub fn disconnect_reason(&self) -> Option<&str> {
        self.disconnect_reason.as_deref()
    }

    /// Sends a disconnect frame to the Bedrock peer, at most once per
    /// session. A translator that already gave the player a specific reason
    /// (auth failure, kicked by the server) calls this directly; the
    /// pipeline calls it again as a catch-all before tearing the session
    /// down, and the flag makes that second call a no-op.
    pub fn send_bedrock_disconnect(&mut self, message: impl Into<String>) {
        if self.shutdown_notified {
            return;
        }
        self.shutdown_notified = true;
        self.send_bedrock(bedrock::ServerPacket::Disconnect(
            bedrock::packet::DisconnectS2c {
                message: message.into(),
            },
        ));
    }

    /// Finalizes the session after outbound draining: no further packet may
    /// be emitted on either leg from this point on.
    pub fn mark_dead(&mut self) {
        self.state = SessionState::Dead;
        self.forms.cancel_all();
    }

    pub fn schedule(&mut self, delay_ticks: u64, task: impl FnOnce(&mut Session) + Send + 'static) {
        self.scheduled.push((self.tick + delay_ticks, Box::new(task)));
    }

    /// Advances the tick counter, runs every scheduled task whose deadline
    /// has arrived, and expires any form slots past their deadline.
    pub fn advance_tick(&mut self) {
        self.tick += 1;

        let mut due = Vec::new();
        let mut remaining = Vec::new();
        for entry in self.scheduled.drain(..) {
            if entry.0 <= self.tick {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.scheduled = remaining;

        for (_, task) in due {
            task(self);
        }

        self.forms.expire_due(self.tick);
    }
}
