//! Movement translation: the Bedrock client's own position feeds the Java
//! serverbound movement packets, and Java's relative entity-movement packets
//! (fixed-point deltas against the last known absolute position) feed
//! Bedrock's absolute `MoveEntity`.

use glam::DVec3;
use palebridge_protocol::bedrock::packet::{MoveEntity, MovePlayer};
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{
    EntityPosition, EntityPositionAndRotation, EntityRotation, PlayerPositionAndRotation,
};
use palebridge_protocol::java::ServerboundPacket;

use super::coords;
use crate::context::Context;
use crate::session::Session;

/// Fixed-point scale Java's relative entity-movement packets use: a delta of
/// one full block is encoded as `4096` (`32 * 128`, the vanilla convention).
const POSITION_DELTA_SCALE: f64 = 4096.0;

fn apply_delta(base: DVec3, dx: i16, dy: i16, dz: i16) -> DVec3 {
    base + DVec3::new(dx as f64, dy as f64, dz as f64) / POSITION_DELTA_SCALE
}

pub fn handle_move_player(_ctx: &Context, session: &mut Session, packet: MovePlayer) {
    if !session.state().is_spawned() {
        return;
    }

    let bedrock_feet = DVec3::new(packet.x as f64, packet.y as f64, packet.z as f64);
    let mut java_position = coords::bedrock_to_java_position(bedrock_feet);
    java_position.y += coords::PLAYER_EYE_HEIGHT;

    session.send_java(ServerboundPacket::PlayerPositionAndRotation(
        PlayerPositionAndRotation {
            x: java_position.x,
            y: java_position.y,
            z: java_position.z,
            yaw: coords::bedrock_yaw_to_java(packet.yaw),
            pitch: packet.pitch,
            on_ground: packet.on_ground,
        },
    ));
}

pub fn handle_entity_position(_ctx: &Context, session: &mut Session, packet: EntityPosition) {
    let Some(record) = session.entities.get_by_java_id(packet.entity_id) else {
        tracing::debug!(java_id = packet.entity_id, "position update for unknown entity, dropping");
        return;
    };
    let bedrock_runtime_id = record.bedrock_runtime_id;
    let yaw = record.yaw;
    let pitch = record.pitch;
    let new_position = apply_delta(record.position, packet.dx, packet.dy, packet.dz);
    session.entities.update_position(packet.entity_id, new_position);

    let bedrock_position = coords::java_to_bedrock_position(new_position);
    session.send_bedrock(ServerPacket::MoveEntity(MoveEntity {
        runtime_entity_id: bedrock_runtime_id,
        x: bedrock_position.x as f32,
        y: bedrock_position.y as f32,
        z: bedrock_position.z as f32,
        yaw,
        pitch,
        head_yaw: yaw,
        on_ground: packet.on_ground,
    }));
}

pub fn handle_entity_position_and_rotation(
    _ctx: &Context,
    session: &mut Session,
    packet: EntityPositionAndRotation,
) {
    let Some(record) = session.entities.get_by_java_id(packet.entity_id) else {
        tracing::debug!(java_id = packet.entity_id, "movement update for unknown entity, dropping");
        return;
    };
    let bedrock_runtime_id = record.bedrock_runtime_id;
    let new_position = apply_delta(record.position, packet.dx, packet.dy, packet.dz);
    let yaw = coords::java_yaw_to_bedrock(packet.yaw.to_degrees());
    let pitch = packet.pitch.to_degrees();

    session.entities.update_position(packet.entity_id, new_position);
    session.entities.update_rotation(packet.entity_id, yaw, pitch);

    let bedrock_position = coords::java_to_bedrock_position(new_position);
    session.send_bedrock(ServerPacket::MoveEntity(MoveEntity {
        runtime_entity_id: bedrock_runtime_id,
        x: bedrock_position.x as f32,
        y: bedrock_position.y as f32,
        z: bedrock_position.z as f32,
        yaw,
        pitch,
        head_yaw: yaw,
        on_ground: packet.on_ground,
    }));
}

pub fn handle_entity_rotation(_ctx: &Context, session: &mut Session, packet: EntityRotation) {
    let Some(record) = session.entities.get_by_java_id(packet.entity_id) else {
        tracing::debug!(java_id = packet.entity_id, "rotation update for unknown entity, dropping");
        return;
    };
    let bedrock_runtime_id = record.bedrock_runtime_id;
    let position = record.position;
    let yaw = coords::java_yaw_to_bedrock(packet.yaw.to_degrees());
    let pitch = packet.pitch.to_degrees();
    session.entities.update_rotation(packet.entity_id, yaw, pitch);

    let bedrock_position = coords::java_to_bedrock_position(position);
    session.send_bedrock(ServerPacket::MoveEntity(MoveEntity {
        runtime_entity_id: bedrock_runtime_id,
        x: bedrock_position.x as f32,
        y: bedrock_position.y as f32,
        z: bedrock_position.z as f32,
        yaw,
        pitch,
        head_yaw: yaw,
        on_ground: packet.on_ground,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::session::SessionId;
    use palebridge_protocol::ByteAngle;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn new_ctx() -> Context {
        let (tx, _rx) = mpsc::channel(8);
        Context::new(Arc::new(ProxyConfig::default()), tx)
    }

    fn new_session() -> Session {
        Session::new(SessionId::next(), "en_US".into())
    }

    #[test]
    fn move_player_before_spawn_is_ignored() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_java_sink(tx);

        handle_move_player(
            &ctx,
            &mut session,
            MovePlayer {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                pitch: 0.0,
                yaw: 0.0,
                head_yaw: 0.0,
                on_ground: true,
            },
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn move_player_applies_eye_height_and_yaw_wrap() {
        let ctx = new_ctx();
        let mut session = new_session();
        session.set_state(crate::session::SessionState::Spawned);
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_java_sink(tx);

        handle_move_player(
            &ctx,
            &mut session,
            MovePlayer {
                x: 0.0,
                y: 64.0,
                z: 0.0,
                pitch: 0.0,
                yaw: -90.0,
                head_yaw: -90.0,
                on_ground: true,
            },
        );
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn entity_position_update_for_unknown_entity_is_dropped_without_panicking() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_entity_position(
            &ctx,
            &mut session,
            EntityPosition {
                entity_id: 404,
                dx: 0,
                dy: 0,
                dz: 0,
                on_ground: true,
            },
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn entity_position_delta_advances_the_stored_position() {
        let ctx = new_ctx();
        let mut session = new_session();
        session
            .entities
            .register(7, 0, DVec3::new(0.0, 64.0, 0.0), 0.0, 0.0);
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_entity_position(
            &ctx,
            &mut session,
            EntityPosition {
                entity_id: 7,
                dx: 4096,
                dy: 0,
                dz: 0,
                on_ground: true,
            },
        );

        let updated = session.entities.get_by_java_id(7).unwrap();
        assert_eq!(updated.position, DVec3::new(1.0, 64.0, 0.0));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn entity_rotation_wraps_java_yaw_into_bedrock_range() {
        let ctx = new_ctx();
        let mut session = new_session();
        session
            .entities
            .register(9, 0, DVec3::ZERO, 0.0, 0.0);
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_entity_rotation(
            &ctx,
            &mut session,
            EntityRotation {
                entity_id: 9,
                yaw: ByteAngle::from_degrees(270.0),
                pitch: ByteAngle::from_degrees(0.0),
                on_ground: true,
            },
        );

        let updated = session.entities.get_by_java_id(9).unwrap();
        assert!(updated.yaw < 0.0);
        assert!(rx.try_recv().is_ok());
    }
}
