//! Typed packet values and wire codec for the Java-edition leg of a session.

pub mod codec;
pub mod packet;

pub use codec::{PacketDecoder, PacketEncoder, MAX_PACKET_SIZE};
pub use packet::{ClientboundPacket, NextState, ServerboundPacket};
