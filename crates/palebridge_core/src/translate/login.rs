//! Session bring-up: the Bedrock login handshake, the Java handshake/login
//! sequence it triggers, and the `JoinGame` -> `StartGame` handoff that moves
//! a session into `Spawned`.
//!
//! Bedrock version gating happens earlier, at admission
//! ([`crate::manager::SessionManager::admit`]), before a session or pipeline
//! exists at all. By the time a `Login` packet reaches this module the
//! protocol version has already been accepted.

use palebridge_mapping::{Dimension, GameMode};
use palebridge_protocol::bedrock::packet::{Login, PlayStatus, PlayStatusCode, StartGame};
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{
    DisconnectLogin, EncryptionRequest, Handshake, JoinGame, LoginStart, LoginSuccess, NextState,
    SetCompression,
};
use palebridge_protocol::java::ServerboundPacket;
use tracing::{debug, warn};

use crate::context::Context;
use crate::session::{Session, SessionState};

/// The Java edition protocol version this bridge speaks on the outbound leg.
/// Fixed at build time; there is exactly one wire dialect a given build of
/// the proxy understands toward the remote server.
pub const JAVA_PROTOCOL_VERSION: i32 = 340;

pub fn handle_bedrock_login(ctx: &Context, session: &mut Session, packet: Login) {
    if session.state() != SessionState::Unauthenticated {
        debug!(session = %session.id, "duplicate bedrock login, dropping");
        return;
    }

    session.display_name = packet.username.clone();
    session.player_uuid = packet.uuid;
    session.locale = packet.locale;
    session.view_distance = ctx.config.view_distance;
    session.set_state(SessionState::AwaitingJavaLogin);

    session.send_bedrock(ServerPacket::PlayStatus(PlayStatus {
        status: PlayStatusCode::LoginSuccess,
    }));

    session.send_java(ServerboundPacket::Handshake(Handshake {
        protocol_version: JAVA_PROTOCOL_VERSION,
        server_address: ctx.config.remote_address.clone(),
        server_port: ctx.config.remote_port,
        next_state: NextState::Login,
    }));
    session.send_java(ServerboundPacket::LoginStart(LoginStart {
        username: packet.username,
    }));
}

/// The proxy does not implement Mojang session authentication; an
/// online-mode remote server asking to encrypt the link is a configuration
/// the operator needs to fix, not a recoverable runtime condition.
pub fn handle_java_encryption_request(_ctx: &Context, session: &mut Session, _packet: EncryptionRequest) {
    warn!(session = %session.id, "java server requested encryption, which this proxy cannot satisfy");
    session.send_bedrock_disconnect(
        "Remote server requires online-mode authentication, which this proxy does not support",
    );
    session.disconnect("auth_failed: remote server is online-mode");
}

pub fn handle_java_set_compression(_ctx: &Context, session: &mut Session, packet: SetCompression) {
    let threshold = if packet.threshold >= 0 {
        Some(packet.threshold)
    } else {
        None
    };
    session.set_java_compression(threshold);
}

pub fn handle_java_login_success(_ctx: &Context, session: &mut Session, packet: LoginSuccess) {
    debug!(session = %session.id, uuid = %packet.uuid, "java login succeeded");
    session.enter_java_play_phase();
}

pub fn handle_java_disconnect_login(_ctx: &Context, session: &mut Session, packet: DisconnectLogin) {
    session.send_bedrock_disconnect(packet.reason_json.clone());
    session.disconnect(format!("auth_failed: {}", packet.reason_json));
}

pub fn handle_java_join_game(_ctx: &Context, session: &mut Session, packet: JoinGame) {
    session.dimension = Dimension::from_java(packet.dimension);
    session.gamemode = GameMode::from_java(packet.gamemode as i32);
    session.set_state(SessionState::Spawned);

    let spawn = session.spawn_position;
    session.send_bedrock(ServerPacket::StartGame(StartGame {
        runtime_entity_id: crate::session::PLAYER_RUNTIME_ID,
        dimension: session.dimension.to_bedrock(),
        gamemode: session.gamemode.to_bedrock(),
        spawn_x: spawn.x as f32,
        spawn_y: spawn.y as f32,
        spawn_z: spawn.z as f32,
        yaw: 0.0,
        pitch: 0.0,
    }));
    session.send_bedrock(ServerPacket::PlayStatus(PlayStatus {
        status: PlayStatusCode::PlayerSpawn,
    }));
}
