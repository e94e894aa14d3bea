//! Chat: Java carries a JSON chat component, Bedrock a plain sender name and
//! message body. Extraction of the plain text out of the component is best
//! effort — an unrecognized component shape falls back to the raw JSON
//! string rather than dropping the message.

use palebridge_protocol::bedrock::packet::TextS2c;
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{ChatMessageC2s, ChatMessageS2c};
use palebridge_protocol::java::ServerboundPacket;

use crate::context::Context;
use crate::session::Session;

/// Ordinary player chat arrives as `{"translate":"chat.type.text","with":[sender, message]}`
/// (or `chat.type.announcement` for `/say`); both carry the sender and the
/// message body as the first two `with` entries, each itself a component.
const TRANSLATE_KEYS_WITH_SENDER: [&str; 2] = ["chat.type.text", "chat.type.announcement"];

/// A chat component's sender name and message body, extracted best effort.
pub struct ChatText {
    pub sender_name: String,
    pub message: String,
}

/// Pulls the `"text"` field out of a component, recursing into `with[0]` for
/// a `translate` component (vanilla chat wraps the literal text one level
/// down). Falls back to the raw JSON string for anything else.
fn component_text(component: &serde_json::Value) -> Option<String> {
    match component {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("text")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .or_else(|| {
                map.get("translate")
                    .and_then(|v| v.as_str())
                    .map(str::to_owned)
            }),
        _ => None,
    }
}

/// Splits a chat component JSON string into a sender name and message body.
/// Recognizes the standard `chat.type.text`/`chat.type.announcement` shape
/// (`with: [sender, message]`); anything else yields an empty sender and the
/// best-effort plain text of the whole component, falling back to the raw
/// JSON for shapes `component_text` can't unwrap at all.
fn extract_chat_text(json: &str) -> ChatText {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
        return ChatText { sender_name: String::new(), message: json.to_owned() };
    };

    if let serde_json::Value::Object(map) = &value {
        let is_chat_with_sender = map
            .get("translate")
            .and_then(|v| v.as_str())
            .is_some_and(|t| TRANSLATE_KEYS_WITH_SENDER.contains(&t));

        if is_chat_with_sender {
            if let Some(serde_json::Value::Array(with)) = map.get("with") {
                let sender_name = with.first().and_then(component_text).unwrap_or_default();
                let message = with.get(1).and_then(component_text).unwrap_or_default();
                return ChatText { sender_name, message };
            }
        }
    }

    ChatText {
        sender_name: String::new(),
        message: component_text(&value).unwrap_or(json.to_owned()),
    }
}

pub fn handle_java_chat_message(_ctx: &Context, session: &mut Session, packet: ChatMessageS2c) {
    let ChatText { sender_name, message } = extract_chat_text(&packet.json);
    session.send_bedrock(ServerPacket::Text(TextS2c { sender_name, message }));
}

pub fn handle_bedrock_text(_ctx: &Context, session: &mut Session, message: String) {
    session.send_java(ServerboundPacket::ChatMessage(ChatMessageC2s { message }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::session::SessionId;
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
    fn extracts_plain_text_from_a_simple_component() {
        let text = extract_chat_text("{\"text\":\"hello\"}");
        assert_eq!(text.sender_name, "");
        assert_eq!(text.message, "hello");
    }

    #[test]
    fn extracts_sender_and_message_from_vanilla_chat_type_text() {
        let json = "{\"translate\":\"chat.type.text\",\"with\":[{\"text\":\"Alice\"},{\"text\":\"hi all\"}]}";
        let text = extract_chat_text(json);
        assert_eq!(text.sender_name, "Alice");
        assert_eq!(text.message, "hi all");
    }

    #[test]
    fn extracts_sender_and_message_from_chat_type_announcement() {
        let json = "{\"translate\":\"chat.type.announcement\",\"with\":[{\"text\":\"Server\"},{\"text\":\"hello\"}]}";
        let text = extract_chat_text(json);
        assert_eq!(text.sender_name, "Server");
        assert_eq!(text.message, "hello");
    }

    #[test]
    fn falls_back_to_raw_json_for_unrecognized_shapes() {
        let raw = "{\"score\":{\"name\":\"Alice\",\"objective\":\"obj\"}}";
        let text = extract_chat_text(raw);
        assert_eq!(text.sender_name, "");
        assert_eq!(text.message, raw);
    }

    #[test]
    fn java_chat_message_forwards_to_bedrock_text() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_java_chat_message(
            &ctx,
            &mut session,
            ChatMessageS2c {
                json: "{\"text\":\"hi\"}".into(),
                position: 0,
            },
        );
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn bedrock_text_forwards_to_java_chat_message() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_java_sink(tx);

        handle_bedrock_text(&ctx, &mut session, "hi".into());
        assert!(rx.try_recv().is_ok());
    }
}
