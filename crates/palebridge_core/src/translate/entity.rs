//! Entity lifecycle: spawns, despawns, and the Java-id <-> Bedrock-runtime-id
//! bookkeeping every other translator (movement, world events) relies on to
//! address an entity on the wire it's actually sending to.

use palebridge_protocol::bedrock::packet::{AddEntity, AddPlayer, RemoveEntity};
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{DestroyEntities, SpawnEntity, SpawnPlayer};

use crate::context::Context;
use crate::session::Session;

/// Java's entity-type registry id for the small subset of mobs this bridge
/// names explicitly; anything else resolves through the fallback NPC entry
/// in [`palebridge_mapping::EntityTable`].
fn java_entity_kind_identifier(kind: i32) -> &'static str {
    match kind {
        32 => "minecraft:zombie",
        51 => "minecraft:skeleton",
        55 => "minecraft:spider",
        81 => "minecraft:cow",
        93 => "minecraft:villager",
        _ => "minecraft:pig",
    }
}

pub fn handle_spawn_entity(ctx: &Context, session: &mut Session, packet: SpawnEntity) {
    let yaw = packet.yaw.to_degrees();
    let pitch = packet.pitch.to_degrees();
    let record = session
        .entities
        .register(packet.entity_id, packet.kind, packet.position, yaw, pitch);

    let java_identifier = java_entity_kind_identifier(packet.kind);
    let (bedrock_identifier, _network_id) = ctx.tables.entity().to_bedrock(java_identifier);

    session.send_bedrock(ServerPacket::AddEntity(AddEntity {
        runtime_entity_id: record.bedrock_runtime_id,
        entity_type: bedrock_identifier.to_string(),
        x: packet.position.x as f32,
        y: packet.position.y as f32,
        z: packet.position.z as f32,
        yaw: packet.yaw.to_degrees(),
        pitch: packet.pitch.to_degrees(),
    }));
}

/// Other players on the server, as opposed to the one Bedrock client this
/// session belongs to (which uses [`crate::session::PLAYER_RUNTIME_ID`] and
/// never goes through the entity table).
pub fn handle_spawn_player(_ctx: &Context, session: &mut Session, packet: SpawnPlayer) {
    let yaw = packet.yaw.to_degrees();
    let pitch = packet.pitch.to_degrees();
    let record = session
        .entities
        .register(packet.entity_id, -1, packet.position, yaw, pitch);

    session.send_bedrock(ServerPacket::AddPlayer(AddPlayer {
        uuid: packet.uuid,
        username: String::new(),
        runtime_entity_id: record.bedrock_runtime_id,
        x: packet.position.x as f32,
        y: packet.position.y as f32,
        z: packet.position.z as f32,
        yaw: packet.yaw.to_degrees(),
        pitch: packet.pitch.to_degrees(),
    }));
}

pub fn handle_destroy_entities(_ctx: &Context, session: &mut Session, packet: DestroyEntities) {
    for java_id in packet.entity_ids {
        if let Some(record) = session.entities.unregister_by_java_id(java_id) {
            session.send_bedrock(ServerPacket::RemoveEntity(RemoveEntity {
                runtime_entity_id: record.bedrock_runtime_id,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::session::SessionId;
    use glam::DVec3;
    use palebridge_protocol::ByteAngle;
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn new_ctx() -> Context {
        let (tx, _rx) = mpsc::channel(8);
        Context::new(Arc::new(ProxyConfig::default()), tx)
    }

    fn new_session() -> Session {
        Session::new(SessionId::next(), "en_US".into())
    }

    #[test]
    fn spawn_entity_registers_and_emits_add_entity() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_spawn_entity(
            &ctx,
            &mut session,
            SpawnEntity {
                entity_id: 10,
                uuid: Uuid::nil(),
                kind: 32,
                position: DVec3::new(1.0, 2.0, 3.0),
                pitch: ByteAngle::from_degrees(0.0),
                yaw: ByteAngle::from_degrees(0.0),
            },
        );

        assert_eq!(session.entities.len(), 1);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn destroy_entities_removes_registered_ids_and_ignores_unknown_ones() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_spawn_entity(
            &ctx,
            &mut session,
            SpawnEntity {
                entity_id: 10,
                uuid: Uuid::nil(),
                kind: 32,
                position: DVec3::ZERO,
                pitch: ByteAngle::from_degrees(0.0),
                yaw: ByteAngle::from_degrees(0.0),
            },
        );
        rx.try_recv().unwrap();

        handle_destroy_entities(
            &ctx,
            &mut session,
            DestroyEntities {
                entity_ids: vec![10, 999],
            },
        );

        assert!(session.entities.is_empty());
        assert!(rx.try_recv().is_ok());
    }
}
