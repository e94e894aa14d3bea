//! World-level events: gamemode changes and weather, both riding Java's
//! single `GameStateChange`/`NotifyClient` packet and fanning out to
//! Bedrock's `SetPlayerGameType` and `LevelEvent`.

use rand::Rng;

use palebridge_mapping::GameMode;
use palebridge_protocol::bedrock::packet::{
    LevelEvent, SetPlayerGameType, LEVEL_EVENT_START_RAIN, LEVEL_EVENT_START_THUNDER,
    LEVEL_EVENT_STOP_RAIN, LEVEL_EVENT_STOP_THUNDER,
};
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{
    GameStateChange, GAME_EVENT_CHANGE_GAMEMODE, GAME_EVENT_RAIN_LEVEL_CHANGE,
    GAME_EVENT_START_RAIN, GAME_EVENT_STOP_RAIN, GAME_EVENT_THUNDER_LEVEL_CHANGE,
};

use crate::context::Context;
use crate::session::Session;

/// The range Bedrock's rain-start `LevelEvent` data field is drawn from on a
/// bare start/stop toggle (no intensity given yet); vanilla treats this as a
/// ramp-up duration in ticks.
const RAIN_START_DATA_RANGE: std::ops::Range<i32> = 10_000..60_000;

/// `(strength.clamp(0, 1) * 65535).round()`, clamped into `u16` range. The
/// source this was distilled from multiplied after truncating to int, which
/// collapsed every strength below 1.0 to zero; this fixes the order of
/// operations.
fn weather_strength_to_level_event_data(strength: f32) -> i32 {
    let clamped = strength.clamp(0.0, 1.0);
    (clamped * 65535.0).round().clamp(0.0, 65535.0) as u16 as i32
}

pub fn handle_game_state_change(_ctx: &Context, session: &mut Session, packet: GameStateChange) {
    match packet.reason {
        GAME_EVENT_CHANGE_GAMEMODE => {
            let gamemode = GameMode::from_java(packet.value as i32);
            session.gamemode = gamemode;
            session.send_bedrock(ServerPacket::SetPlayerGameType(SetPlayerGameType {
                gamemode: gamemode.to_bedrock(),
            }));
        }
        GAME_EVENT_START_RAIN => {
            let data = rand::thread_rng().gen_range(RAIN_START_DATA_RANGE);
            session.send_bedrock(level_event(LEVEL_EVENT_START_RAIN, data));
        }
        GAME_EVENT_STOP_RAIN => {
            session.send_bedrock(level_event(LEVEL_EVENT_STOP_RAIN, 0));
        }
        GAME_EVENT_RAIN_LEVEL_CHANGE => {
            let data = weather_strength_to_level_event_data(packet.value);
            session.send_bedrock(level_event(LEVEL_EVENT_START_RAIN, data));
        }
        GAME_EVENT_THUNDER_LEVEL_CHANGE => {
            if packet.value <= 0.0 {
                session.send_bedrock(level_event(LEVEL_EVENT_STOP_THUNDER, 0));
            } else {
                let data = weather_strength_to_level_event_data(packet.value);
                session.send_bedrock(level_event(LEVEL_EVENT_START_THUNDER, data));
            }
        }
        other => {
            tracing::debug!(session = %session.id, reason = other, "unhandled game state change, ignoring");
        }
    }
}

fn level_event(event: i32, data: i32) -> ServerPacket {
    ServerPacket::LevelEvent(LevelEvent {
        event,
        data,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    })
}
