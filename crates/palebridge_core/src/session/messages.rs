use bytes::Bytes;

/// Everything that can arrive in a session's mailbox. Both the Bedrock and
/// Java read loops are dumb forwarders that post into this one queue; all
/// decoding and translation happens on the single task that drains it, which
/// is what gives the two directions their mutual-exclusion guarantee.
#[derive(Debug)]
pub enum SessionMessage {
    /// One already-delineated packet's bytes from the Bedrock client.
    BedrockBytes(Bytes),
    /// A chunk of bytes read from the Java TCP stream; may contain zero,
    /// one, or several frames once queued into the session's decoder.
    JavaBytes(Bytes),
    /// The 50ms scheduler pulse.
    Tick,
    /// A disconnect request, from either peer closing or a translator
    /// calling `disconnect`.
    Disconnect(String),
}
