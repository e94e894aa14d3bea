use thiserror::Error;

/// The fixed, matchable disposition taxonomy a session can reach. Unlike
/// [`palebridge_protocol::CodecError`], these are session-level outcomes:
/// each one maps to exactly one row of the error-handling design.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("peer transport closed")]
    TransportClosed,
    #[error("malformed packet from peer: {0}")]
    DecodeError(String),
    #[error("outbound buffer saturated")]
    Backpressure,
    #[error("java login rejected: {0}")]
    AuthFailed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Pre-session rejection reasons: these never allocate a [`Session`][crate::session::Session].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("client protocol version is older than this proxy supports")]
    ClientOutdated,
    #[error("client protocol version is newer than this proxy supports")]
    ServerOutdated,
    #[error("server is at its configured player limit")]
    ServerFull,
}
