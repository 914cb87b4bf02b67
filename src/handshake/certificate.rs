// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! `certificate` body (RFC 5246 §7.4.2): an outer 24-bit length followed by
//! a sequence of 24-bit-prefixed DER blobs.

use crate::error::TlsError;
use alloc::vec::Vec;
use s2n_codec::{u24, DecoderBuffer, Encoder, EncoderValue};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Certificate {
    /// Leaf-first chain, each entry a raw DER-encoded certificate.
    pub chain: Vec<Vec<u8>>,
}

pub(crate) fn decode(buffer: DecoderBuffer) -> Result<Certificate, TlsError> {
    let (outer_len, buffer) = buffer.decode::<u24>()?;
    let (mut cursor, trailer) = buffer.decode_slice(u32::from(outer_len) as usize)?;
    trailer.ensure_empty()?;

    let mut chain = Vec::new();
    while !cursor.is_empty() {
        let (len, next) = cursor.decode::<u24>()?;
        let (der, next) = next.decode_slice(u32::from(len) as usize)?;
        chain.push(der.into_less_safe_slice().to_vec());
        cursor = next;
    }
    Ok(Certificate { chain })
}

impl EncoderValue for Certificate {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        let total: usize = self.chain.iter().map(|der| 3 + der.len()).sum();
        encoder.encode(&u24::try_from(total as u32).expect("certificate chain too large"));
        for der in &self.chain {
            encoder.encode(&u24::try_from(der.len() as u32).expect("certificate too large"));
            encoder.write_slice(der);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2n_codec::EncoderBuffer;

    #[test]
    fn round_trip_single_der() {
        let cert = Certificate {
            chain: alloc::vec![b"hello".to_vec()],
        };
        let mut buf = [0u8; 64];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&cert);
        let len = encoder.len();
        let decoded = decode(DecoderBuffer::new(&buf[..len])).unwrap();
        assert_eq!(decoded.chain.len(), 1);
        assert_eq!(decoded.chain[0], b"hello");
    }
}
