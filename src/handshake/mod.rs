// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Handshake message header and per-type body parsing/serialization
//! (spec §3 "Handshake message", §4.1 "Per-handshake body parsing").

pub mod cert_request;
pub mod certificate;
pub mod extensions;
pub mod finished;
pub mod hello;
pub mod key_exchange;

pub use cert_request::CertificateRequest;
pub use certificate::Certificate;
pub use finished::Finished;
pub use hello::{ClientHello, Random, ServerHello};
pub use key_exchange::{ClientKeyExchange, EcdheServerKeyExchange, ServerKeyExchange};

use crate::error::TlsError;
use s2n_codec::{u24, DecoderBuffer, Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.4
//# enum {
//#     hello_request(0), client_hello(1), server_hello(2),
//#     certificate(11), server_key_exchange (12),
//#     certificate_request(13), server_hello_done(14),
//#     certificate_verify(15), client_key_exchange(16),
//#     finished(20), (255)
//# } HandshakeType;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeType {
    HelloRequest,
    ClientHello,
    ServerHello,
    Certificate,
    ServerKeyExchange,
    CertificateRequest,
    ServerHelloDone,
    CertificateVerify,
    ClientKeyExchange,
    Finished,
}

impl HandshakeType {
    pub const fn as_u8(self) -> u8 {
        match self {
            HandshakeType::HelloRequest => 0,
            HandshakeType::ClientHello => 1,
            HandshakeType::ServerHello => 2,
            HandshakeType::Certificate => 11,
            HandshakeType::ServerKeyExchange => 12,
            HandshakeType::CertificateRequest => 13,
            HandshakeType::ServerHelloDone => 14,
            HandshakeType::CertificateVerify => 15,
            HandshakeType::ClientKeyExchange => 16,
            HandshakeType::Finished => 20,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(HandshakeType::HelloRequest),
            1 => Some(HandshakeType::ClientHello),
            2 => Some(HandshakeType::ServerHello),
            11 => Some(HandshakeType::Certificate),
            12 => Some(HandshakeType::ServerKeyExchange),
            13 => Some(HandshakeType::CertificateRequest),
            14 => Some(HandshakeType::ServerHelloDone),
            15 => Some(HandshakeType::CertificateVerify),
            16 => Some(HandshakeType::ClientKeyExchange),
            20 => Some(HandshakeType::Finished),
            _ => None,
        }
    }
}

/// The 4-byte handshake message header: 1-byte type, 3-byte length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    pub handshake_type: HandshakeType,
    pub length: u32,
}

impl MessageHeader {
    pub const LEN: usize = 4;

    pub fn decode(buffer: DecoderBuffer) -> Result<(Self, DecoderBuffer), TlsError> {
        let (raw_type, buffer) = buffer.decode::<u8>()?;
        let handshake_type =
            HandshakeType::from_u8(raw_type).ok_or(TlsError::UnexpectedMessage)?;
        let (length, buffer) = buffer.decode::<u24>()?;
        Ok((
            MessageHeader {
                handshake_type,
                length: u32::from(length),
            },
            buffer,
        ))
    }
}

impl EncoderValue for MessageHeader {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.handshake_type.as_u8());
        let length: u24 = u24::try_from(self.length).expect("handshake message too large");
        encoder.encode(&length);
    }
}

/// A fully decoded handshake message body, tagged by its `HandshakeType`.
///
/// `HelloRequest` and `ServerHelloDone` carry no body.
#[derive(Clone, Debug, PartialEq)]
pub enum HandshakeBody {
    HelloRequest,
    ClientHello(ClientHello),
    ServerHello(ServerHello),
    Certificate(Certificate),
    ServerKeyExchange(ServerKeyExchange),
    CertificateRequest(CertificateRequest),
    ServerHelloDone,
    ClientKeyExchange(ClientKeyExchange),
    Finished(Finished),
}

impl HandshakeBody {
    pub fn handshake_type(&self) -> HandshakeType {
        match self {
            HandshakeBody::HelloRequest => HandshakeType::HelloRequest,
            HandshakeBody::ClientHello(_) => HandshakeType::ClientHello,
            HandshakeBody::ServerHello(_) => HandshakeType::ServerHello,
            HandshakeBody::Certificate(_) => HandshakeType::Certificate,
            HandshakeBody::ServerKeyExchange(_) => HandshakeType::ServerKeyExchange,
            HandshakeBody::CertificateRequest(_) => HandshakeType::CertificateRequest,
            HandshakeBody::ServerHelloDone => HandshakeType::ServerHelloDone,
            HandshakeBody::ClientKeyExchange(_) => HandshakeType::ClientKeyExchange,
            HandshakeBody::Finished(_) => HandshakeType::Finished,
        }
    }
}

/// Decodes a handshake message body given its type, the negotiated version
/// (needed by `certificate_request`'s optional `signature_algorithms`), and
/// the suite's verify-data length (needed by `finished`).
///
/// `client_key_exchange` and `server_key_exchange` bodies are suite-shaped
/// (RSA vs ECDHE), so those two variants are parsed to raw halves here and
/// the caller (the state machine, which knows the negotiated suite)
/// finishes decoding with [`key_exchange::decode_client_key_exchange`] /
/// [`key_exchange::decode_ecdhe_server_key_exchange`].
pub fn decode_body(
    handshake_type: HandshakeType,
    version: crate::version::ProtocolVersion,
    verify_len: usize,
    buffer: DecoderBuffer,
) -> Result<HandshakeBody, TlsError> {
    use HandshakeType::*;
    let body = match handshake_type {
        HelloRequest => {
            buffer.ensure_empty()?;
            HandshakeBody::HelloRequest
        }
        ClientHello => HandshakeBody::ClientHello(hello::decode_client_hello(buffer)?),
        ServerHello => HandshakeBody::ServerHello(hello::decode_server_hello(buffer)?),
        Certificate => HandshakeBody::Certificate(certificate::decode(buffer)?),
        CertificateRequest => {
            HandshakeBody::CertificateRequest(cert_request::decode(version, buffer)?)
        }
        ServerHelloDone => {
            buffer.ensure_empty()?;
            HandshakeBody::ServerHelloDone
        }
        Finished => HandshakeBody::Finished(finished::decode(verify_len, buffer)?),
        ServerKeyExchange | ClientKeyExchange | CertificateVerify => {
            return Err(TlsError::UnexpectedMessage)
        }
    };
    Ok(body)
}

/// Reads a `vec<min..max, u8>`-style length-prefixed opaque vector with an
/// 8-bit length prefix, enforcing the inclusive bounds from the RFC's
/// `<floor..ceiling>` vector syntax.
pub(crate) fn decode_vec8<'a>(
    buffer: DecoderBuffer<'a>,
    min: usize,
    max: usize,
) -> Result<(DecoderBuffer<'a>, DecoderBuffer<'a>), TlsError> {
    let (len, buffer) = buffer.decode::<u8>()?;
    let len = len as usize;
    if len < min || len > max {
        return Err(TlsError::DecodeError);
    }
    let (slice, buffer) = buffer.decode_slice(len)?;
    Ok((slice, buffer))
}

/// Reads a `vec<min..max, u16>`-style length-prefixed opaque vector with a
/// 16-bit length prefix.
pub(crate) fn decode_vec16<'a>(
    buffer: DecoderBuffer<'a>,
    min: usize,
    max: usize,
) -> Result<(DecoderBuffer<'a>, DecoderBuffer<'a>), TlsError> {
    let (len, buffer) = buffer.decode::<u16>()?;
    let len = len as usize;
    if len < min || len > max {
        return Err(TlsError::DecodeError);
    }
    let (slice, buffer) = buffer.decode_slice(len)?;
    Ok((slice, buffer))
}
