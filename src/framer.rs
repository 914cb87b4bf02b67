// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Typed-command record encoder (spec §4.2): one method per message this
//! core ever sends. Each method serializes its payload, encrypts it
//! through [`crate::record_crypt`] when the session's write side has
//! switched, and appends the finished record to an output buffer the
//! caller drains with [`Framer::take_output`].

use crate::content_type::ContentType;
use crate::error::{AlertDescription, AlertLevel, TlsError};
use crate::handshake::key_exchange::{ClientKeyExchange, ServerKeyExchange};
use crate::handshake::{HandshakeBody, MessageHeader};
use crate::record::{MAX_CIPHERTEXT_LEN, RecordHeader};
use crate::session::Session;
use crate::version::ProtocolVersion;
use alloc::vec;
use alloc::vec::Vec;
use s2n_codec::{Encoder, EncoderBuffer, EncoderValue};

const SCRATCH_LEN: usize = MAX_CIPHERTEXT_LEN + 256;

#[derive(Default)]
pub struct Framer {
    output: Vec<u8>,
}

impl Framer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains everything framed so far, ready to hand to the transport.
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.output)
    }

    fn write_record(
        &mut self,
        session: &mut Session,
        content_type: ContentType,
        version: ProtocolVersion,
        fragment: &[u8],
    ) -> Result<(), TlsError> {
        let ciphertext = if session.should_encrypt() {
            crate::record_crypt::encrypt(session, content_type, version, fragment)?
        } else {
            fragment.to_vec()
        };
        if ciphertext.len() > MAX_CIPHERTEXT_LEN {
            return Err(TlsError::RecordOverflow);
        }

        let header = RecordHeader::new(content_type, version, ciphertext.len() as u16);
        let mut buf = [0u8; RecordHeader::LEN];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&header);
        self.output.extend_from_slice(&buf);
        self.output.extend_from_slice(&ciphertext);
        Ok(())
    }

    pub fn change_cipher_spec(&mut self, session: &mut Session) -> Result<(), TlsError> {
        self.write_record(session, ContentType::ChangeCipherSpec, ProtocolVersion::TLS1_2, &[0x01])
    }

    pub fn alert(
        &mut self,
        session: &mut Session,
        level: AlertLevel,
        description: AlertDescription,
    ) -> Result<(), TlsError> {
        self.write_record(
            session,
            ContentType::Alert,
            ProtocolVersion::TLS1_2,
            &[level.as_u8(), description.as_u8()],
        )
    }

    pub fn application_data(
        &mut self,
        session: &mut Session,
        version: ProtocolVersion,
        data: &[u8],
    ) -> Result<(), TlsError> {
        self.write_record(session, ContentType::ApplicationData, version, data)
    }

    /// Frames any self-describing handshake body (everything except
    /// `client_key_exchange`/`server_key_exchange`, which are suite-shaped;
    /// see [`Framer::client_key_exchange`]/[`Framer::server_key_exchange`]).
    /// Returns the raw `[type || length || body]` bytes for the caller to
    /// feed into `Session::record_transcript`.
    pub fn handshake(
        &mut self,
        session: &mut Session,
        version: ProtocolVersion,
        body: &HandshakeBody,
    ) -> Result<Vec<u8>, TlsError> {
        let mut scratch = vec![0u8; SCRATCH_LEN];
        let body_len = {
            let mut encoder = EncoderBuffer::new(&mut scratch);
            encode_body(&mut encoder, body, version);
            encoder.len()
        };
        self.finish_handshake_message(session, version, body.handshake_type(), &scratch[..body_len])
    }

    pub fn client_key_exchange(
        &mut self,
        session: &mut Session,
        version: ProtocolVersion,
        cke: &ClientKeyExchange,
    ) -> Result<Vec<u8>, TlsError> {
        let mut scratch = vec![0u8; SCRATCH_LEN];
        let body_len = {
            let mut encoder = EncoderBuffer::new(&mut scratch);
            encoder.encode(cke);
            encoder.len()
        };
        self.finish_handshake_message(
            session,
            version,
            crate::handshake::HandshakeType::ClientKeyExchange,
            &scratch[..body_len],
        )
    }

    pub fn server_key_exchange(
        &mut self,
        session: &mut Session,
        version: ProtocolVersion,
        ske: &ServerKeyExchange,
    ) -> Result<Vec<u8>, TlsError> {
        let mut scratch = vec![0u8; SCRATCH_LEN];
        let body_len = {
            let mut encoder = EncoderBuffer::new(&mut scratch);
            encoder.encode(ske);
            encoder.len()
        };
        self.finish_handshake_message(
            session,
            version,
            crate::handshake::HandshakeType::ServerKeyExchange,
            &scratch[..body_len],
        )
    }

    fn finish_handshake_message(
        &mut self,
        session: &mut Session,
        version: ProtocolVersion,
        handshake_type: crate::handshake::HandshakeType,
        body: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        let header = MessageHeader {
            handshake_type,
            length: body.len() as u32,
        };
        let mut raw = Vec::with_capacity(MessageHeader::LEN + body.len());
        let mut header_buf = [0u8; MessageHeader::LEN];
        let mut encoder = EncoderBuffer::new(&mut header_buf);
        encoder.encode(&header);
        raw.extend_from_slice(&header_buf);
        raw.extend_from_slice(body);

        self.write_record(session, ContentType::Handshake, version, &raw)?;
        Ok(raw)
    }
}

fn encode_body<E: Encoder>(encoder: &mut E, body: &HandshakeBody, version: ProtocolVersion) {
    match body {
        HandshakeBody::HelloRequest | HandshakeBody::ServerHelloDone => {}
        HandshakeBody::ClientHello(hello) => encoder.encode(hello),
        HandshakeBody::ServerHello(hello) => encoder.encode(hello),
        HandshakeBody::Certificate(cert) => encoder.encode(cert),
        HandshakeBody::ServerKeyExchange(_) | HandshakeBody::ClientKeyExchange(_) => {
            unreachable!("suite-shaped bodies go through their dedicated Framer methods")
        }
        HandshakeBody::CertificateRequest(req) => req.encode(version, encoder),
        HandshakeBody::Finished(finished) => encoder.encode(finished),
    }
}
