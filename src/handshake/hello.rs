// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! `client_hello` and `server_hello` bodies (RFC 5246 §7.4.1.2/§7.4.1.3).

use super::{decode_vec16, decode_vec8, extensions::Extensions};
use crate::error::TlsError;
use crate::suite::CipherSuite;
use crate::version::ProtocolVersion;
use alloc::vec::Vec;
use s2n_codec::{DecoderBuffer, Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.4.1.2
//# struct {
//#     uint32 gmt_unix_time;
//#     opaque random_bytes[28];
//# } Random;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Random {
    pub time: u32,
    pub bytes: [u8; 28],
}

impl Random {
    pub const LEN: usize = 32;

    pub fn decode(buffer: DecoderBuffer) -> Result<(Self, DecoderBuffer), TlsError> {
        let (time, buffer) = buffer.decode::<u32>()?;
        let (slice, buffer) = buffer.decode_slice(28)?;
        let mut bytes = [0u8; 28];
        bytes.copy_from_slice(slice.into_less_safe_slice());
        Ok((Random { time, bytes }, buffer))
    }
}

impl EncoderValue for Random {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.time);
        encoder.write_slice(&self.bytes);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionMethod {
    Null,
    Deflate,
}

impl CompressionMethod {
    pub const fn as_u8(self) -> u8 {
        match self {
            CompressionMethod::Null => 0,
            CompressionMethod::Deflate => 1,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CompressionMethod::Null),
            1 => Some(CompressionMethod::Deflate),
            _ => None,
        }
    }
}

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.4.1.2
//# struct {
//#     ProtocolVersion client_version;
//#     Random random;
//#     SessionID session_id;
//#     CipherSuite cipher_suites<2..2^16-2>;
//#     CompressionMethod compression_methods<1..2^8-1>;
//#     select (extensions_present) {
//#         case false: struct {};
//#         case true: Extension extensions<0..2^16-1>;
//#     };
//# } ClientHello;
#[derive(Clone, Debug, PartialEq)]
pub struct ClientHello {
    pub version: ProtocolVersion,
    pub random: Random,
    pub session_id: Vec<u8>,
    /// Raw 16-bit suite codes, including any this core doesn't recognize —
    /// the parser must not fail on an unknown suite the peer merely offers.
    pub cipher_suites: Vec<u16>,
    pub compression_methods: Vec<u8>,
    pub extensions: Extensions,
}

impl ClientHello {
    /// Suites from `cipher_suites` that this registry recognizes.
    pub fn known_cipher_suites(&self) -> impl Iterator<Item = CipherSuite> + '_ {
        self.cipher_suites.iter().filter_map(|&code| CipherSuite::from_u16(code))
    }

    pub fn has_session(&self) -> bool {
        !self.session_id.is_empty()
    }
}

pub(crate) fn decode_client_hello(buffer: DecoderBuffer) -> Result<ClientHello, TlsError> {
    let (version, buffer) = buffer.decode::<ProtocolVersion>()?;
    let (random, buffer) = Random::decode(buffer)?;
    let (session_id, buffer) = decode_vec8(buffer, 0, 32)?;
    let (suites, buffer) = decode_vec16(buffer, 2, (1 << 16) - 2)?;
    if suites.len() % 2 != 0 {
        return Err(TlsError::DecodeError);
    }
    let cipher_suites = decode_u16_list(suites)?;
    let (compression, buffer) = decode_vec8(buffer, 1, 255)?;
    let compression_methods = compression.into_less_safe_slice().to_vec();
    let extensions = Extensions::decode(buffer)?;

    Ok(ClientHello {
        version,
        random,
        session_id: session_id.into_less_safe_slice().to_vec(),
        cipher_suites,
        compression_methods,
        extensions,
    })
}

impl EncoderValue for ClientHello {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.version);
        encoder.encode(&self.random);
        encoder.encode(&(self.session_id.len() as u8));
        encoder.write_slice(&self.session_id);
        encoder.encode(&((self.cipher_suites.len() * 2) as u16));
        for suite in &self.cipher_suites {
            encoder.encode(suite);
        }
        encoder.encode(&(self.compression_methods.len() as u8));
        encoder.write_slice(&self.compression_methods);
        encoder.encode(&self.extensions);
    }
}

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.4.1.3
//# struct {
//#     ProtocolVersion server_version;
//#     Random random;
//#     SessionID session_id;
//#     CipherSuite cipher_suite;
//#     CompressionMethod compression_method;
//#     select (extensions_present) {
//#         case false: struct {};
//#         case true: Extension extensions<0..2^16-1>;
//#     };
//# } ServerHello;
#[derive(Clone, Debug, PartialEq)]
pub struct ServerHello {
    pub version: ProtocolVersion,
    pub random: Random,
    pub session_id: Vec<u8>,
    pub cipher_suite: u16,
    pub compression_method: u8,
    pub extensions: Extensions,
}

pub(crate) fn decode_server_hello(buffer: DecoderBuffer) -> Result<ServerHello, TlsError> {
    let (version, buffer) = buffer.decode::<ProtocolVersion>()?;
    let (random, buffer) = Random::decode(buffer)?;
    let (session_id, buffer) = decode_vec8(buffer, 0, 32)?;
    let (cipher_suite, buffer) = buffer.decode::<u16>()?;
    let (compression_method, buffer) = buffer.decode::<u8>()?;
    let extensions = Extensions::decode(buffer)?;

    Ok(ServerHello {
        version,
        random,
        session_id: session_id.into_less_safe_slice().to_vec(),
        cipher_suite,
        compression_method,
        extensions,
    })
}

impl EncoderValue for ServerHello {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.version);
        encoder.encode(&self.random);
        encoder.encode(&(self.session_id.len() as u8));
        encoder.write_slice(&self.session_id);
        encoder.encode(&self.cipher_suite);
        encoder.encode(&self.compression_method);
        encoder.encode(&self.extensions);
    }
}

fn decode_u16_list(mut buffer: DecoderBuffer) -> Result<Vec<u16>, TlsError> {
    let mut out = Vec::with_capacity(buffer.len() / 2);
    while !buffer.is_empty() {
        let (value, next) = buffer.decode::<u16>()?;
        out.push(value);
        buffer = next;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2n_codec::EncoderBuffer;

    #[test]
    fn client_hello_round_trip() {
        let hello = ClientHello {
            version: ProtocolVersion::TLS1_2,
            random: Random { time: 12345, bytes: [7u8; 28] },
            session_id: Vec::new(),
            cipher_suites: alloc::vec![CipherSuite::TlsEcdhAnonWithAes256CbcSha.as_u16()],
            compression_methods: alloc::vec![
                CompressionMethod::Null.as_u8(),
                CompressionMethod::Deflate.as_u8(),
            ],
            extensions: Extensions::default(),
        };
        let mut buf = [0u8; 256];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&hello);
        let len = encoder.len();
        let decoded = decode_client_hello(DecoderBuffer::new(&buf[..len])).unwrap();
        assert_eq!(decoded, hello);
        assert!(!decoded.has_session());
        assert_eq!(decoded.cipher_suites.len(), 1);
        assert_eq!(decoded.compression_methods, alloc::vec![0, 1]);
    }

    #[test]
    fn server_hello_round_trip() {
        let hello = ServerHello {
            version: ProtocolVersion::TLS1_2,
            random: Random { time: 1, bytes: [1u8; 28] },
            session_id: alloc::vec![1, 2, 3],
            cipher_suite: CipherSuite::TlsRsaWithAes128CbcSha.as_u16(),
            compression_method: CompressionMethod::Null.as_u8(),
            extensions: Extensions::default(),
        };
        let mut buf = [0u8; 256];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&hello);
        let len = encoder.len();
        let decoded = decode_server_hello(DecoderBuffer::new(&buf[..len])).unwrap();
        assert_eq!(decoded, hello);
    }
}
