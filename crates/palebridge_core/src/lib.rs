//! Per-session translation engine: the state machine, the translator
//! registry, and the mailbox pipeline that turns a live Bedrock client and
//! a live Java server connection into a single coherent session.
//!
//! This crate never touches a socket. It is handed already-decoded frames
//! (as [`bytes::Bytes`]) from whatever transport layer owns the RakNet and
//! TCP connections, and it hands back encoded frames the same way — see
//! [`Session::attach_bedrock_sink`] and [`Session::attach_java_sink`].

mod config;
mod context;
mod error;
mod manager;
mod pipeline;
pub mod registry;
mod session;
mod translate;

pub use config::ProxyConfig;
pub use context::Context;
pub use error::{AdmissionError, SessionError};
pub use manager::SessionManager;
pub use pipeline::run_session;
pub use session::{
    ChunkSet, EntityRecord, EntityTable, FormCache, FormResponse, Session, SessionId,
    SessionMessage, SessionState, WindowDescriptor, WindowTable, PLAYER_RUNTIME_ID,
};
