use std::fmt;

use bytes::{Buf, BufMut};

/// An angle packed into a single byte as 1/256th-of-a-turn steps, the way
/// Java's entity movement packets encode pitch/yaw/head-yaw on the wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteAngle(pub u8);

impl ByteAngle {
    pub fn from_degrees(degrees: f32) -> Self {
        ByteAngle((degrees.rem_euclid(360.0) / 360.0 * 256.0).round() as u8)
    }

    pub fn to_degrees(self) -> f32 {
        f32::from(self.0) / 256.0 * 360.0
    }

    pub fn encode(self, buf: &mut impl BufMut) {
        buf.put_u8(self.0);
    }

    pub fn decode(buf: &mut impl Buf) -> Self {
        ByteAngle(buf.get_u8())
    }
}

impl fmt::Debug for ByteAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}deg", self.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    #[test]
    fn round_trips_through_the_wire() {
        let angle = ByteAngle::from_degrees(123.4);
        let mut buf = BytesMut::new();
        angle.encode(&mut buf);

        let mut reader = &buf[..];
        assert_eq!(ByteAngle::decode(&mut reader), angle);
    }

    #[test]
    fn wraps_negative_and_large_degrees() {
        assert_eq!(ByteAngle::from_degrees(-10.0), ByteAngle::from_degrees(350.0));
        assert_eq!(ByteAngle::from_degrees(370.0), ByteAngle::from_degrees(10.0));
    }
}
