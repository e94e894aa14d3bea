//! End-to-end scenarios driven through the public registry dispatch
//! functions and the session manager, over `tokio::sync::mpsc` channels
//! standing in for both transports. No socket, no live peer.

use std::sync::Arc;

use palebridge_core::registry::{dispatch_bedrock, dispatch_java};
use palebridge_core::{Context, ProxyConfig, Session, SessionId, SessionManager};
use palebridge_mapping::{Dimension, GameMode};
use palebridge_protocol::bedrock::ClientPacket;
use palebridge_protocol::bedrock::packet::DisconnectC2s;
use palebridge_protocol::java::ClientboundPacket;
use palebridge_protocol::java::packet::{
    ChunkData, DisconnectPlay, GameStateChange, JavaChunkSection, JoinGame,
    GAME_EVENT_CHANGE_GAMEMODE, GAME_EVENT_START_RAIN, GAME_EVENT_RAIN_LEVEL_CHANGE,
};
use tokio::sync::mpsc;

fn new_ctx() -> Context {
    let (tx, _rx) = mpsc::channel(8);
    Context::new(Arc::new(ProxyConfig::default()), tx)
}

fn new_session() -> Session {
    Session::new(SessionId::next(), "en_US".into())
}

#[test]
fn scenario_join_flow_translates_dimension_and_gamemode() {
    let ctx = new_ctx();
    let mut session = new_session();
    let (bedrock_tx, mut bedrock_rx) = mpsc::channel(8);
    session.attach_bedrock_sink(bedrock_tx);

    dispatch_java(
        &ctx,
        &mut session,
        ClientboundPacket::JoinGame(JoinGame {
            entity_id: 42,
            gamemode: 1,
            dimension: 0,
        }),
    );

    assert_eq!(session.dimension, Dimension::Overworld);
    assert_eq!(session.gamemode, GameMode::Creative);
    // StartGame, then PlayStatus(PlayerSpawn).
    assert!(bedrock_rx.try_recv().is_ok());
    assert!(bedrock_rx.try_recv().is_ok());
}

#[test]
fn scenario_weather_start_then_intensity() {
    let ctx = new_ctx();
    let mut session = new_session();
    let (bedrock_tx, mut bedrock_rx) = mpsc::channel(8);
    session.attach_bedrock_sink(bedrock_tx);

    dispatch_java(
        &ctx,
        &mut session,
        ClientboundPacket::GameStateChange(GameStateChange {
            reason: GAME_EVENT_START_RAIN,
            value: 0.0,
        }),
    );
    assert!(bedrock_rx.try_recv().is_ok());

    dispatch_java(
        &ctx,
        &mut session,
        ClientboundPacket::GameStateChange(GameStateChange {
            reason: GAME_EVENT_RAIN_LEVEL_CHANGE,
            value: 0.5,
        }),
    );
    assert!(bedrock_rx.try_recv().is_ok());
}

#[test]
fn scenario_gamemode_change_emits_translated_set_player_game_type() {
    let ctx = new_ctx();
    let mut session = new_session();
    let (bedrock_tx, mut bedrock_rx) = mpsc::channel(8);
    session.attach_bedrock_sink(bedrock_tx);

    dispatch_java(
        &ctx,
        &mut session,
        ClientboundPacket::GameStateChange(GameStateChange {
            reason: GAME_EVENT_CHANGE_GAMEMODE,
            value: 2.0,
        }),
    );

    assert_eq!(session.gamemode, GameMode::Adventure);
    assert!(bedrock_rx.try_recv().is_ok());
}

#[test]
fn scenario_unmapped_block_falls_back_without_panicking() {
    let ctx = new_ctx();
    let mut session = new_session();
    let (bedrock_tx, mut bedrock_rx) = mpsc::channel(8);
    session.attach_bedrock_sink(bedrock_tx);

    dispatch_java(
        &ctx,
        &mut session,
        ClientboundPacket::ChunkData(ChunkData {
            chunk_x: 0,
            chunk_z: 0,
            sections: vec![JavaChunkSection {
                palette: vec!["minecraft:definitely_not_a_real_block".into()],
                blocks: vec![0; 4096],
                biomes: vec!["minecraft:definitely_not_a_real_biome".into()],
            }],
            heightmap: vec![64; 256],
            block_entities: Vec::new(),
        }),
    );

    assert!(bedrock_rx.try_recv().is_ok());
    assert!(session.chunks.contains(0, 0));
}

#[test]
fn scenario_disconnect_idempotence_across_both_legs() {
    let ctx = new_ctx();
    let mut session = new_session();
    let (bedrock_tx, mut bedrock_rx) = mpsc::channel(8);
    session.attach_bedrock_sink(bedrock_tx);

    dispatch_bedrock(
        &ctx,
        &mut session,
        ClientPacket::Disconnect(DisconnectC2s {
            message: Some("a".into()),
        }),
    );
    dispatch_java(
        &ctx,
        &mut session,
        ClientboundPacket::DisconnectPlay(DisconnectPlay {
            reason_json: "b".into(),
        }),
    );

    assert_eq!(session.disconnect_reason(), Some("a"));
    // Bedrock-origin disconnects never trigger a disconnect frame back to
    // the peer that just told us it's leaving; only the java-origin
    // `DisconnectPlay` path sends one, and it does so at most once.
    assert!(bedrock_rx.try_recv().is_ok());
    assert!(bedrock_rx.try_recv().is_err());
}

#[tokio::test]
async fn scenario_admission_and_shutdown_boundaries() {
    let config = ProxyConfig {
        max_players: 1,
        ..ProxyConfig::default()
    };
    let manager = SessionManager::new(config);

    let supported = palebridge_protocol::version::SUPPORTED_VERSIONS[0];
    assert!(manager.admit(supported).is_ok());

    let (bedrock_tx, _bedrock_rx) = mpsc::channel(8);
    let (java_tx, _java_rx) = mpsc::channel(8);
    let (_id, mailbox) = manager.spawn_session(bedrock_tx, java_tx);

    // At the configured cap, a second connection is refused without
    // touching the live set.
    assert_eq!(
        manager.admit(supported),
        Err(palebridge_core::AdmissionError::ServerFull)
    );
    assert_eq!(manager.live_session_count(), 1);

    drop(mailbox);
    manager.shutdown().await;
    assert_eq!(manager.live_session_count(), 0);
}
