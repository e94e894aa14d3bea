use thiserror::Error;

/// Failure modes the codec adapter can report. These are always recoverable
/// from the caller's point of view — decoding a single malformed packet
/// never panics, it returns one of these.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("buffer underflow: needed at least {needed} more byte(s)")]
    Underflow { needed: usize },
    #[error("varint is wider than the 32-bit range allows")]
    VarIntTooWide,
    #[error("packet body is larger than the {max} byte maximum")]
    PacketTooLarge { max: usize },
    #[error("no decoder registered for packet id {0:#x} in this state")]
    UnknownPacketId(i32),
    #[error("malformed packet body: {0}")]
    Malformed(String),
    #[error("zlib (de)compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;
