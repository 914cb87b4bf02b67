// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! `certificate_request` body (RFC 5246 §7.4.4). Accepted on the wire for
//! both roles but client-certificate authentication itself is out of scope
//! (spec §1); the server-side transition table only ever records this
//! message without acting on it.

use super::decode_vec8;
use crate::error::TlsError;
use crate::version::ProtocolVersion;
use alloc::vec::Vec;
use s2n_codec::{DecoderBuffer, Encoder, EncoderValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureAndHashAlgorithm {
    pub hash: u8,
    pub sign: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CertificateRequest {
    pub certificate_types: Vec<u8>,
    pub signature_algorithms: Vec<SignatureAndHashAlgorithm>,
    pub certificate_authorities: Vec<Vec<u8>>,
}

pub(crate) fn decode(
    version: ProtocolVersion,
    buffer: DecoderBuffer,
) -> Result<CertificateRequest, TlsError> {
    let (types, buffer) = decode_vec8(buffer, 1, 255)?;
    let certificate_types = types.into_less_safe_slice().to_vec();

    let (signature_algorithms, buffer) = if version >= ProtocolVersion::TLS1_2 {
        let (len, buffer) = buffer.decode::<u16>()?;
        let len = len as usize;
        if len < 2 || len > (1 << 16) - 2 || len % 2 != 0 {
            return Err(TlsError::DecodeError);
        }
        let (mut cursor, buffer) = buffer.decode_slice(len)?;
        let mut algorithms = Vec::with_capacity(len / 2);
        while !cursor.is_empty() {
            let (hash, next) = cursor.decode::<u8>()?;
            let (sign, next) = next.decode::<u8>()?;
            algorithms.push(SignatureAndHashAlgorithm { hash, sign });
            cursor = next;
        }
        (algorithms, buffer)
    } else {
        (Vec::new(), buffer)
    };

    let (authorities_len, buffer) = buffer.decode::<u16>()?;
    let (mut cursor, trailer) = buffer.decode_slice(authorities_len as usize)?;
    trailer.ensure_empty()?;
    let mut certificate_authorities = Vec::new();
    while !cursor.is_empty() {
        let (len, next) = cursor.decode::<u16>()?;
        let len = len as usize;
        if len == 0 {
            return Err(TlsError::DecodeError);
        }
        let (name, next) = next.decode_slice(len)?;
        certificate_authorities.push(name.into_less_safe_slice().to_vec());
        cursor = next;
    }

    Ok(CertificateRequest {
        certificate_types,
        signature_algorithms,
        certificate_authorities,
    })
}

impl CertificateRequest {
    pub fn encode<E: Encoder>(&self, version: ProtocolVersion, encoder: &mut E) {
        encoder.encode(&(self.certificate_types.len() as u8));
        encoder.write_slice(&self.certificate_types);

        if version >= ProtocolVersion::TLS1_2 {
            encoder.encode(&((self.signature_algorithms.len() * 2) as u16));
            for algo in &self.signature_algorithms {
                encoder.encode(&algo.hash);
                encoder.encode(&algo.sign);
            }
        }

        let authorities_len: usize = self
            .certificate_authorities
            .iter()
            .map(|a| 2 + a.len())
            .sum();
        encoder.encode(&(authorities_len as u16));
        for authority in &self.certificate_authorities {
            encoder.encode(&(authority.len() as u16));
            encoder.write_slice(authority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2n_codec::EncoderBuffer;

    #[test]
    fn round_trip_tls12() {
        let req = CertificateRequest {
            certificate_types: alloc::vec![1],
            signature_algorithms: alloc::vec![SignatureAndHashAlgorithm { hash: 2, sign: 1 }],
            certificate_authorities: alloc::vec![b"der".to_vec()],
        };
        let mut buf = [0u8; 128];
        let mut encoder = EncoderBuffer::new(&mut buf);
        req.encode(ProtocolVersion::TLS1_2, &mut encoder);
        let len = encoder.len();
        let decoded = decode(ProtocolVersion::TLS1_2, DecoderBuffer::new(&buf[..len])).unwrap();
        assert_eq!(decoded, req);
    }
}
