//! Typed packet values and wire codec for the Bedrock leg of a session.

pub mod codec;
pub mod packet;

pub use codec::{decode_packet, encode_packet};
pub use packet::{ClientPacket, ServerPacket};
