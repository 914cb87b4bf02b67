// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Record-layer content types (RFC 5246 §6.2.1).

use crate::error::TlsError;
use s2n_codec::{DecoderBuffer, DecoderBufferMut, DecoderError, Encoder, EncoderValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    ChangeCipherSpec,
    Alert,
    Handshake,
    ApplicationData,
}

impl ContentType {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            ContentType::ChangeCipherSpec => 20,
            ContentType::Alert => 21,
            ContentType::Handshake => 22,
            ContentType::ApplicationData => 23,
        }
    }

    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            20 => Some(ContentType::ChangeCipherSpec),
            21 => Some(ContentType::Alert),
            22 => Some(ContentType::Handshake),
            23 => Some(ContentType::ApplicationData),
            _ => None,
        }
    }

    pub fn try_from_u8(value: u8) -> Result<Self, TlsError> {
        Self::from_u8(value).ok_or(TlsError::UnexpectedMessage)
    }
}

/// The `DecoderError::InvariantViolation` message an unrecognized
/// content-type byte raises. Named so [`crate::error`]'s `DecoderError`
/// conversion can match on it directly rather than collapsing it into a
/// generic alert (spec §4.1 step 1 mandates `unexpected_message` here).
pub(crate) const UNKNOWN_CONTENT_TYPE: &str = "unknown record content type";

impl<'a> s2n_codec::DecoderValue<'a> for ContentType {
    fn decode(buffer: DecoderBuffer<'a>) -> Result<(Self, DecoderBuffer<'a>), DecoderError> {
        let (value, buffer) = buffer.decode::<u8>()?;
        let value = ContentType::from_u8(value)
            .ok_or(DecoderError::InvariantViolation(UNKNOWN_CONTENT_TYPE))?;
        Ok((value, buffer))
    }
}

impl<'a> s2n_codec::DecoderValueMut<'a> for ContentType {
    fn decode_mut(
        buffer: DecoderBufferMut<'a>,
    ) -> Result<(Self, DecoderBufferMut<'a>), DecoderError> {
        let (value, buffer) = buffer.decode::<u8>()?;
        let value = ContentType::from_u8(value)
            .ok_or(DecoderError::InvariantViolation(UNKNOWN_CONTENT_TYPE))?;
        Ok((value, buffer))
    }
}

impl EncoderValue for ContentType {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        self.as_u8().encode(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_rejected() {
        let buf = [0x01u8];
        let err = DecoderBuffer::new(&buf)
            .decode::<ContentType>()
            .unwrap_err();
        assert_eq!(TlsError::from(err), TlsError::UnexpectedMessage);
    }
}
