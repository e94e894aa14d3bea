use bytes::{Buf, BufMut};

use crate::error::{CodecError, CodecResult};

/// A signed 32-bit integer written 7 bits at a time, high bit set on every
/// byte but the last. Used by both wire formats for length prefixes and
/// packet ids, just with different maximum widths in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarInt(pub i32);

impl VarInt {
    pub const MAX_BYTES: usize = 5;

    pub fn written_len(self) -> usize {
        match self.0 as u32 {
            0 => 1,
            n => (31 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    pub fn encode(self, buf: &mut impl BufMut) {
        let mut value = self.0 as u32;
        loop {
            if value & !0x7f == 0 {
                buf.put_u8(value as u8);
                return;
            }
            buf.put_u8((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
    }

    pub fn decode(buf: &mut impl Buf) -> CodecResult<Self> {
        let mut value: i32 = 0;
        for i in 0..Self::MAX_BYTES {
            if !buf.has_remaining() {
                return Err(CodecError::Underflow { needed: 1 });
            }
            let byte = buf.get_u8();
            value |= ((byte & 0x7f) as i32) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(VarInt(value));
            }
        }
        Err(CodecError::VarIntTooWide)
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        VarInt(value)
    }
}

impl From<VarInt> for i32 {
    fn from(value: VarInt) -> Self {
        value.0
    }
}
