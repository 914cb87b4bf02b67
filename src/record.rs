// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Record-layer envelope (RFC 5246 §6.2.1).

use crate::{content_type::ContentType, error::TlsError, version::ProtocolVersion};
use s2n_codec::{DecoderBuffer, DecoderBufferMut, DecoderError, Encoder, EncoderValue};

/// `2^14`: the maximum plaintext fragment length a single record may carry.
pub const MAX_FRAGMENT_LEN: usize = 1 << 14;

/// `2^14 + 2048`: the maximum *ciphertext* length, accounting for the worst
/// case CBC padding + MAC + IV expansion (spec §3).
pub const MAX_CIPHERTEXT_LEN: usize = MAX_FRAGMENT_LEN + 2048;

//= https://www.rfc-editor.org/rfc/rfc5246#section-6.2.1
//# struct {
//#     ContentType type;
//#     ProtocolVersion version;
//#     uint16 length;
//#     opaque fragment[TLSPlaintext.length];
//# } TLSPlaintext;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub content_type: ContentType,
    pub version: ProtocolVersion,
    pub length: u16,
}

/// The `DecoderError::InvariantViolation` message a declared length over
/// [`MAX_CIPHERTEXT_LEN`] raises. Named so [`crate::error`]'s `DecoderError`
/// conversion can match on it directly (spec mandates `record_overflow`
/// here, not a generic alert).
pub(crate) const RECORD_LENGTH_OVERFLOW: &str = "record length overflow";

impl RecordHeader {
    pub const LEN: usize = 5;

    pub fn new(content_type: ContentType, version: ProtocolVersion, length: u16) -> Self {
        Self {
            content_type,
            version,
            length,
        }
    }
}

impl<'a> s2n_codec::DecoderValue<'a> for RecordHeader {
    fn decode(buffer: DecoderBuffer<'a>) -> Result<(Self, DecoderBuffer<'a>), DecoderError> {
        let (content_type, buffer) = buffer.decode::<ContentType>()?;
        let (version, buffer) = buffer.decode::<ProtocolVersion>()?;
        let (length, buffer) = buffer.decode::<u16>()?;
        if length as usize > MAX_CIPHERTEXT_LEN {
            return Err(DecoderError::InvariantViolation(RECORD_LENGTH_OVERFLOW));
        }
        Ok((
            RecordHeader {
                content_type,
                version,
                length,
            },
            buffer,
        ))
    }
}

impl<'a> s2n_codec::DecoderValueMut<'a> for RecordHeader {
    fn decode_mut(
        buffer: DecoderBufferMut<'a>,
    ) -> Result<(Self, DecoderBufferMut<'a>), DecoderError> {
        let (content_type, buffer) = buffer.decode::<ContentType>()?;
        let (version, buffer) = buffer.decode::<ProtocolVersion>()?;
        let (length, buffer) = buffer.decode::<u16>()?;
        if length as usize > MAX_CIPHERTEXT_LEN {
            return Err(DecoderError::InvariantViolation(RECORD_LENGTH_OVERFLOW));
        }
        Ok((
            RecordHeader {
                content_type,
                version,
                length,
            },
            buffer,
        ))
    }
}

impl EncoderValue for RecordHeader {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.content_type);
        encoder.encode(&self.version);
        encoder.encode(&self.length);
    }
}

/// Validates a fully-reassembled record length against the wire cap,
/// producing the alert the parser should raise on overflow.
pub fn check_length(length: usize) -> Result<(), TlsError> {
    if length > MAX_CIPHERTEXT_LEN {
        Err(TlsError::RecordOverflow)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2n_codec::{DecoderBuffer, EncoderBuffer};

    #[test]
    fn round_trip() {
        let header = RecordHeader::new(ContentType::Handshake, ProtocolVersion::TLS1_2, 42);
        let mut buf = [0u8; RecordHeader::LEN];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&header);
        let (decoded, remaining) = DecoderBuffer::new(&buf).decode::<RecordHeader>().unwrap();
        assert!(remaining.is_empty());
        assert_eq!(decoded, header);
    }

    #[test]
    fn overflow_rejected() {
        let mut buf = [0u8; RecordHeader::LEN];
        buf[0] = ContentType::Handshake.as_u8();
        buf[1] = 3;
        buf[2] = 3;
        buf[3] = 0xff;
        buf[4] = 0xff;
        let err = DecoderBuffer::new(&buf)
            .decode::<RecordHeader>()
            .unwrap_err();
        assert_eq!(TlsError::from(err), TlsError::RecordOverflow);
    }
}
