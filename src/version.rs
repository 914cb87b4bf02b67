// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! TLS protocol version numbers, encoded on the wire as `{major, minor}`.

use s2n_codec::{DecoderBuffer, DecoderBufferMut, DecoderError, Encoder, EncoderValue};

/// A TLS protocol version, `{major, minor}` as it appears on the wire.
///
/// `Ord` follows wire/protocol ordering: `TLS1_0 < TLS1_1 < TLS1_2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    pub const TLS1_0: Self = Self { major: 3, minor: 1 };
    pub const TLS1_1: Self = Self { major: 3, minor: 2 };
    pub const TLS1_2: Self = Self { major: 3, minor: 3 };

    #[inline]
    pub const fn as_u16(self) -> u16 {
        ((self.major as u16) << 8) | self.minor as u16
    }

    #[inline]
    pub const fn from_u16(value: u16) -> Self {
        Self {
            major: (value >> 8) as u8,
            minor: value as u8,
        }
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::TLS1_2
    }
}

impl<'a> s2n_codec::DecoderValue<'a> for ProtocolVersion {
    fn decode(buffer: DecoderBuffer<'a>) -> Result<(Self, DecoderBuffer<'a>), DecoderError> {
        let (value, buffer) = buffer.decode::<u16>()?;
        Ok((Self::from_u16(value), buffer))
    }
}

impl<'a> s2n_codec::DecoderValueMut<'a> for ProtocolVersion {
    fn decode_mut(
        buffer: DecoderBufferMut<'a>,
    ) -> Result<(Self, DecoderBufferMut<'a>), DecoderError> {
        let (value, buffer) = buffer.decode::<u16>()?;
        Ok((Self::from_u16(value), buffer))
    }
}

impl EncoderValue for ProtocolVersion {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        self.as_u16().encode(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(ProtocolVersion::TLS1_0 < ProtocolVersion::TLS1_1);
        assert!(ProtocolVersion::TLS1_1 < ProtocolVersion::TLS1_2);
    }

    #[test]
    fn round_trip() {
        assert_eq!(ProtocolVersion::from_u16(ProtocolVersion::TLS1_2.as_u16()), ProtocolVersion::TLS1_2);
    }
}
