use std::io::Read;

use aes::cipher::{AsyncStreamCipher, NewCipher};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use flate2::bufread::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use tracing::trace;

use crate::error::{CodecError, CodecResult};
use crate::varint::VarInt;

/// AES-128 in CFB-8 mode, the cipher the Java login sequence negotiates.
type Cipher = cfb8::Cfb8<aes::Aes128>;

/// Java packets larger than this are rejected rather than framed; guards
/// against a malicious or desynced peer claiming an enormous length prefix.
pub const MAX_PACKET_SIZE: usize = 2 * 1024 * 1024;

/// Frames typed packet bodies into the Java wire format: varint length
/// prefix, optional zlib compression above a threshold, optional AES-128/CFB8
/// encryption. Translators never touch this directly; they hand a packet id
/// and an already-serialized body to [`PacketEncoder::append_packet`].
#[derive(Default)]
pub struct PacketEncoder {
    buf: BytesMut,
    compression_threshold: Option<u32>,
    cipher: Option<Cipher>,
}

impl PacketEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_compression(&mut self, threshold: Option<u32>) {
        self.compression_threshold = threshold;
    }

    /// Enables encryption for every packet written from this point on,
    /// including any not yet [taken][Self::take].
    pub fn enable_encryption(&mut self, key: &[u8; 16]) {
        assert!(self.cipher.is_none(), "encryption is already enabled");
        self.cipher = Some(NewCipher::new(key.into(), key.into()));
    }

    pub fn append_packet(&mut self, packet_id: i32, body: &[u8]) -> CodecResult<()> {
        let mut data = BytesMut::with_capacity(VarInt(packet_id).written_len() + body.len());
        VarInt(packet_id).encode(&mut data);
        data.extend_from_slice(body);

        if data.len() > MAX_PACKET_SIZE {
            return Err(CodecError::PacketTooLarge {
                max: MAX_PACKET_SIZE,
            });
        }

        match self.compression_threshold {
            Some(threshold) if data.len() > threshold as usize => {
                let mut compressed = Vec::new();
                ZlibEncoder::new(&data[..], Compression::new(4))
                    .read_to_end(&mut compressed)
                    .map_err(CodecError::Compression)?;

                let frame_len = VarInt(data.len() as i32).written_len() + compressed.len();
                VarInt(frame_len as i32).encode(&mut self.buf);
                VarInt(data.len() as i32).encode(&mut self.buf);
                self.buf.extend_from_slice(&compressed);
            }
            Some(_) => {
                // Below threshold: still carries the data-length prefix, set to zero
                // to mean "not compressed", per the Java compressed-packet framing.
                let frame_len = VarInt(0).written_len() + data.len();
                VarInt(frame_len as i32).encode(&mut self.buf);
                VarInt(0).encode(&mut self.buf);
                self.buf.extend_from_slice(&data);
            }
            None => {
                VarInt(data.len() as i32).encode(&mut self.buf);
                self.buf.extend_from_slice(&data);
            }
        }

        Ok(())
    }

    /// Drains everything written so far, encrypting it if encryption is enabled.
    pub fn take(&mut self) -> BytesMut {
        if let Some(cipher) = &mut self.cipher {
            cipher.encrypt(&mut self.buf);
        }
        self.buf.split()
    }
}

/// The decode side of [`PacketEncoder`]. Bytes arriving from the transport are
/// queued with [`queue_bytes`][Self::queue_bytes]; [`try_next_packet`] pulls
/// one complete frame at a time, returning `Ok(None)` when the buffer holds
/// less than one full packet.
#[derive(Default)]
pub struct PacketDecoder {
    buf: BytesMut,
    cursor: usize,
    compression_enabled: bool,
    cipher: Option<Cipher>,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_compression(&mut self, enabled: bool) {
        self.compression_enabled = enabled;
    }

    pub fn enable_encryption(&mut self, key: &[u8; 16]) {
        assert!(self.cipher.is_none(), "encryption is already enabled");
        let mut cipher = Cipher::new(key.into(), key.into());
        cipher.decrypt(&mut self.buf[self.cursor..]);
        self.cipher = Some(cipher);
    }

    pub fn queue_bytes(&mut self, mut bytes: BytesMut) {
        if let Some(cipher) = &mut self.cipher {
            cipher.decrypt(&mut bytes);
        }
        self.buf.unsplit(bytes);
    }

    pub fn try_next_packet(&mut self) -> CodecResult<Option<(i32, Bytes)>> {
        self.buf.advance(self.cursor);
        self.cursor = 0;

        let mut r = &self.buf[..];
        let start_len = r.len();

        let frame_len = match VarInt::decode(&mut r) {
            Ok(v) => v.0,
            Err(CodecError::Underflow { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        if !(0..=MAX_PACKET_SIZE as i32).contains(&frame_len) {
            return Err(CodecError::PacketTooLarge {
                max: MAX_PACKET_SIZE,
            });
        }

        if r.len() < frame_len as usize {
            return Ok(None);
        }

        let prefix_len = start_len - r.len();
        r = &r[..frame_len as usize];

        let body = if self.compression_enabled {
            let data_len = VarInt::decode(&mut r)?.0;

            if data_len == 0 {
                Bytes::copy_from_slice(r)
            } else {
                let mut decompressed = Vec::with_capacity(data_len as usize);
                ZlibDecoder::new(r)
                    .take(data_len as u64)
                    .read_to_end(&mut decompressed)
                    .map_err(CodecError::Compression)?;
                Bytes::from(decompressed)
            }
        } else {
            Bytes::copy_from_slice(r)
        };

        self.cursor = prefix_len + frame_len as usize;

        let mut body_reader = &body[..];
        let packet_id = VarInt::decode(&mut body_reader)?.0;
        let remaining = body_reader.len();
        let body = body.slice(body.len() - remaining..);

        trace!(packet_id, len = body.len(), "decoded java frame");
        Ok(Some((packet_id, body)))
    }
}

pub(crate) fn write_uuid(buf: &mut impl BufMut, id: uuid::Uuid) {
    buf.put_u128(id.as_u128());
}

pub(crate) fn read_uuid(buf: &mut impl Buf) -> CodecResult<uuid::Uuid> {
    if buf.remaining() < 16 {
        return Err(CodecError::Underflow {
            needed: 16 - buf.remaining(),
        });
    }
    Ok(uuid::Uuid::from_u128(buf.get_u128()))
}

pub(crate) fn write_string(buf: &mut impl BufMut, s: &str) {
    VarInt(s.len() as i32).encode(buf);
    buf.put_slice(s.as_bytes());
}

pub(crate) fn read_string(buf: &mut impl Buf, max_chars: usize) -> CodecResult<String> {
    let len = VarInt::decode(buf)?.0;
    if len < 0 || len as usize > max_chars * 4 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_an_uncompressed_packet() {
        let mut enc = PacketEncoder::new();
        enc.append_packet(0x01, b"hello").unwrap();
        let bytes = enc.take();

        let mut dec = PacketDecoder::new();
        dec.queue_bytes(bytes);
        let (id, body) = dec.try_next_packet().unwrap().unwrap();
        assert_eq!(id, 0x01);
        assert_eq!(&body[..], b"hello");
        assert!(dec.try_next_packet().unwrap().is_none());
    }

    #[test]
    fn round_trips_a_compressed_packet() {
        let mut enc = PacketEncoder::new();
        enc.set_compression(Some(4));
        let body = vec![0xABu8; 512];
        enc.append_packet(0x02, &body).unwrap();
        let bytes = enc.take();

        let mut dec = PacketDecoder::new();
        dec.set_compression(true);
        dec.queue_bytes(bytes);
        let (id, decoded_body) = dec.try_next_packet().unwrap().unwrap();
        assert_eq!(id, 0x02);
        assert_eq!(&decoded_body[..], &body[..]);
    }

    #[test]
    fn round_trips_an_encrypted_packet() {
        let key = [7u8; 16];
        let mut enc = PacketEncoder::new();
        enc.append_packet(0x03, b"secret").unwrap();
        enc.enable_encryption(&key);
        let bytes = enc.take();

        let mut dec = PacketDecoder::new();
        dec.enable_encryption(&key);
        dec.queue_bytes(bytes);
        let (id, body) = dec.try_next_packet().unwrap().unwrap();
        assert_eq!(id, 0x03);
        assert_eq!(&body[..], b"secret");
    }

    #[test]
    fn partial_frame_yields_none() {
        let mut enc = PacketEncoder::new();
        enc.append_packet(0x01, b"hello world").unwrap();
        let mut bytes = enc.take();
        let split = bytes.split_to(2);

        let mut dec = PacketDecoder::new();
        dec.queue_bytes(split);
        assert!(dec.try_next_packet().unwrap().is_none());

        dec.queue_bytes(bytes);
        assert!(dec.try_next_packet().unwrap().is_some());
    }

    #[test]
    fn string_round_trips() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "hello proxy");
        let mut reader = &buf[..];
        assert_eq!(read_string(&mut reader, 32767).unwrap(), "hello proxy");
    }
}
