//! Translator dispatch: a closed match over each wire format's packet enum,
//! one arm per variant, each calling into [`crate::translate`]. No registry
//! state, no reflection — the packet type itself is the dispatch key, which
//! the compiler checks is exhaustive every time a variant is added.

use palebridge_protocol::bedrock::packet::KeepAliveC2s;
use palebridge_protocol::bedrock::ClientPacket;
use palebridge_protocol::java::packet::ServerboundPacket;
use palebridge_protocol::java::ClientboundPacket;

use crate::context::Context;
use crate::session::Session;
use crate::translate::{chat, chunk, entity, form, inventory, login, movement, world_event};

/// Packets a Bedrock client can send that this proxy knows how to act on.
pub fn dispatch_bedrock(ctx: &Context, session: &mut Session, packet: ClientPacket) {
    match packet {
        ClientPacket::RequestNetworkSettings(_) => {
            tracing::debug!(session = %session.id, "dropping post-admission network settings request");
        }
        ClientPacket::Login(p) => login::handle_bedrock_login(ctx, session, p),
        ClientPacket::MovePlayer(p) => movement::handle_move_player(ctx, session, p),
        ClientPacket::Text(p) => chat::handle_bedrock_text(ctx, session, p.message),
        ClientPacket::ModalFormResponse(p) => form::handle_modal_form_response(ctx, session, p),
        ClientPacket::Disconnect(p) => {
            session.disconnect(p.message.unwrap_or_else(|| "peer requested disconnect".into()));
        }
    }
}

/// Packets the configured Java server can send that this proxy translates.
pub fn dispatch_java(ctx: &Context, session: &mut Session, packet: ClientboundPacket) {
    match packet {
        ClientboundPacket::DisconnectLogin(p) => login::handle_java_disconnect_login(ctx, session, p),
        ClientboundPacket::EncryptionRequest(p) => login::handle_java_encryption_request(ctx, session, p),
        ClientboundPacket::LoginSuccess(p) => login::handle_java_login_success(ctx, session, p),
        ClientboundPacket::SetCompression(p) => login::handle_java_set_compression(ctx, session, p),
        ClientboundPacket::JoinGame(p) => login::handle_java_join_game(ctx, session, p),
        ClientboundPacket::ChunkData(p) => chunk::handle_chunk_data(ctx, session, p),
        ClientboundPacket::UnloadChunk(p) => chunk::handle_unload_chunk(ctx, session, p),
        ClientboundPacket::SpawnEntity(p) => entity::handle_spawn_entity(ctx, session, p),
        ClientboundPacket::SpawnPlayer(p) => entity::handle_spawn_player(ctx, session, p),
        ClientboundPacket::DestroyEntities(p) => entity::handle_destroy_entities(ctx, session, p),
        ClientboundPacket::EntityPosition(p) => movement::handle_entity_position(ctx, session, p),
        ClientboundPacket::EntityPositionAndRotation(p) => {
            movement::handle_entity_position_and_rotation(ctx, session, p)
        }
        ClientboundPacket::EntityRotation(p) => movement::handle_entity_rotation(ctx, session, p),
        ClientboundPacket::GameStateChange(p) => world_event::handle_game_state_change(ctx, session, p),
        ClientboundPacket::KeepAlive(p) => {
            session.send_java(ServerboundPacket::KeepAlive(KeepAliveC2s { id: p.id }));
        }
        ClientboundPacket::ChatMessage(p) => chat::handle_java_chat_message(ctx, session, p),
        ClientboundPacket::OpenScreen(p) => inventory::handle_open_screen(ctx, session, p),
        ClientboundPacket::SetSlot(p) => inventory::handle_set_slot(ctx, session, p),
        ClientboundPacket::CloseWindow(p) => inventory::handle_close_window(ctx, session, p),
        ClientboundPacket::DisconnectPlay(p) => {
            session.send_bedrock_disconnect(p.reason_json.clone());
            session.disconnect(format!("peer closed: {}", p.reason_json));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::session::SessionId;
    use palebridge_protocol::bedrock::packet::DisconnectC2s;
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
    fn bedrock_disconnect_packet_triggers_session_disconnect() {
        let ctx = new_ctx();
        let mut session = new_session();
        dispatch_bedrock(
            &ctx,
            &mut session,
            ClientPacket::Disconnect(DisconnectC2s {
                message: Some("bye".into()),
            }),
        );
        assert_eq!(session.disconnect_reason(), Some("bye"));
    }

    #[test]
    fn java_keepalive_is_echoed_back() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_java_sink(tx);

        dispatch_java(
            &ctx,
            &mut session,
            ClientboundPacket::KeepAlive(palebridge_protocol::java::packet::KeepAliveS2c { id: 7 }),
        );
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn java_disconnect_play_tears_down_both_legs() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (bedrock_tx, mut bedrock_rx) = mpsc::channel(8);
        session.attach_bedrock_sink(bedrock_tx);

        dispatch_java(
            &ctx,
            &mut session,
            ClientboundPacket::DisconnectPlay(palebridge_protocol::java::packet::DisconnectPlay {
                reason_json: "kicked".into(),
            }),
        );

        assert!(session.disconnect_reason().is_some());
        assert!(bedrock_rx.try_recv().is_ok());
    }
}
