//! Typed packet values and codec adapters for both wire formats a session
//! speaks. Translators in `palebridge_core` consume the types in [`java`]
//! and [`bedrock`]; nothing in this crate knows about session state.

pub mod bedrock;
pub mod byte_angle;
pub mod error;
pub mod java;
pub mod varint;
pub mod version;

pub use byte_angle::ByteAngle;
pub use error::{CodecError, CodecResult};
pub use varint::VarInt;
