//! Per-connection state: identity, entities, chunks, windows, forms, and the
//! lifecycle state machine. See [`Session`].

mod chunks;
mod entity;
mod forms;
mod id;
mod machine;
mod messages;
mod session;
mod windows;

pub use chunks::ChunkSet;
pub use entity::{EntityRecord, EntityTable, PLAYER_RUNTIME_ID};
pub use forms::{FormCache, FormResponse};
pub use id::SessionId;
pub use machine::SessionState;
pub use messages::SessionMessage;
pub use session::Session;
pub use windows::{WindowDescriptor, WindowTable};
