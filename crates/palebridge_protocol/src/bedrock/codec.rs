use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CodecError, CodecResult};
use crate::varint::VarInt;

/// Encodes one Bedrock packet as a varint id followed by its body.
///
/// Unlike the Java leg, RakNet has already delimited individual packets by
/// the time bytes reach this adapter (batching and datagram reassembly are
/// the transport's job, out of scope here), so there is no length-prefix
/// framing or streaming buffer to maintain — one call in, one packet's bytes
/// out.
pub fn encode_packet(packet_id: u32, body: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(VarInt(packet_id as i32).written_len() + body.len());
    VarInt(packet_id as i32).encode(&mut buf);
    buf.extend_from_slice(body);
    buf.freeze()
}

/// Splits a single already-delimited Bedrock packet into its id and body.
pub fn decode_packet(mut bytes: Bytes) -> CodecResult<(u32, Bytes)> {
    let packet_id = VarInt::decode(&mut bytes)?.0;
    if packet_id < 0 {
        return Err(CodecError::Malformed(format!("negative packet id {packet_id}")));
    }
    Ok((packet_id as u32, bytes))
}

pub(crate) fn write_string(buf: &mut impl BufMut, s: &str) {
    VarInt(s.len() as i32).encode(buf);
    buf.put_slice(s.as_bytes());
}

pub(crate) fn read_string(buf: &mut impl Buf, max_bytes: usize) -> CodecResult<String> {
    let len = VarInt::decode(buf)?.0;
    if len < 0 || len as usize > max_bytes {
        return Err(CodecError::Malformed(format!("string length {len} out of range")));
    }
    let len = len as usize;
    if buf.remaining() < len {
        return Err(CodecError::Underflow {
            needed: len - buf.remaining(),
        });
    }
    let mut bytes = vec![0u8; len];
    buf.copy_to_slice(&mut bytes);
    String::from_utf8(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
}
