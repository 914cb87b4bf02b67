// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Incremental record/handshake decoder (spec §4.1).
//!
//! Consumes arbitrary-sized chunks of the peer's byte stream via [`Parser::push`]
//! and produces a lazy, in-order sequence of [`ReceivedFrame`]s via
//! [`Parser::poll`]. Backpressure-aware: if nothing calls `poll`, pushed
//! bytes simply accumulate.

use crate::content_type::ContentType;
use crate::error::{AlertDescription, AlertLevel, TlsError};
use crate::frame::{Frame, ReceivedFrame};
use crate::handshake::{self, HandshakeType, MessageHeader};
use crate::record::{self, RecordHeader};
use crate::session::Session;
use crate::version::ProtocolVersion;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use s2n_codec::DecoderBuffer;

/// Context the parser needs but doesn't own: the negotiated version (for
/// `certificate_request`'s version-gated fields) and the suite's
/// verify-data length (for `finished`). Supplied by the state machine,
/// which is the only component that tracks negotiation state.
#[derive(Clone, Copy, Debug)]
pub struct ParserContext {
    pub version: ProtocolVersion,
    pub verify_len: usize,
}

impl Default for ParserContext {
    fn default() -> Self {
        Self {
            version: ProtocolVersion::TLS1_2,
            verify_len: 12,
        }
    }
}

#[derive(Default)]
pub struct Parser {
    input: Vec<u8>,
    handshake_reassembly: Vec<u8>,
    queue: VecDeque<ReceivedFrame>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers bytes read from the peer. Does not parse eagerly.
    pub fn push(&mut self, bytes: &[u8]) {
        self.input.extend_from_slice(bytes);
    }

    /// Returns the next fully-reassembled frame, or `Ok(None)` if the
    /// buffered bytes don't yet contain one.
    pub fn poll(
        &mut self,
        session: &mut Session,
        ctx: &ParserContext,
    ) -> Result<Option<ReceivedFrame>, TlsError> {
        loop {
            if let Some(frame) = self.queue.pop_front() {
                return Ok(Some(frame));
            }
            if !self.consume_one_record(session, ctx)? {
                return Ok(None);
            }
        }
    }

    /// Tries to consume exactly one complete record from `input`, appending
    /// any frames it produces to `queue`. Returns `false` if `input` does
    /// not yet hold a complete record.
    fn consume_one_record(
        &mut self,
        session: &mut Session,
        ctx: &ParserContext,
    ) -> Result<bool, TlsError> {
        if self.input.len() < RecordHeader::LEN {
            return Ok(false);
        }
        let (header, _) = DecoderBuffer::new(&self.input).decode::<RecordHeader>()?;
        let total_len = RecordHeader::LEN + header.length as usize;
        if self.input.len() < total_len {
            return Ok(false);
        }

        let record_bytes: Vec<u8> = self.input.drain(..total_len).collect();
        let ciphertext = &record_bytes[RecordHeader::LEN..];

        let plaintext = if session.should_decrypt() {
            crate::record_crypt::decrypt(session, header.content_type, header.version, ciphertext)?
        } else {
            ciphertext.to_vec()
        };
        record::check_length(plaintext.len())?;

        self.dispatch(header, plaintext, ctx)
    }

    fn dispatch(
        &mut self,
        header: RecordHeader,
        plaintext: Vec<u8>,
        ctx: &ParserContext,
    ) -> Result<bool, TlsError> {
        match header.content_type {
            ContentType::ChangeCipherSpec => {
                if plaintext.len() != 1 || plaintext[0] != 0x01 {
                    return Err(TlsError::UnexpectedMessage);
                }
                self.queue.push_back(ReceivedFrame {
                    frame: Frame::ChangeCipherSpec,
                    record_version: header.version,
                });
            }
            ContentType::Alert => {
                if plaintext.len() != 2 {
                    return Err(TlsError::DecodeError);
                }
                let level = AlertLevel::from_u8(plaintext[0]).ok_or(TlsError::DecodeError)?;
                let description = alert_description_from_u8(plaintext[1])?;
                self.queue.push_back(ReceivedFrame {
                    frame: Frame::Alert { level, description },
                    record_version: header.version,
                });
            }
            ContentType::Handshake => {
                self.handshake_reassembly.extend_from_slice(&plaintext);
                self.drain_handshake_messages(header.version, ctx)?;
            }
            ContentType::ApplicationData => {
                self.queue.push_back(ReceivedFrame {
                    frame: Frame::ApplicationData(plaintext),
                    record_version: header.version,
                });
            }
        }
        Ok(true)
    }

    fn drain_handshake_messages(
        &mut self,
        record_version: ProtocolVersion,
        ctx: &ParserContext,
    ) -> Result<(), TlsError> {
        loop {
            if self.handshake_reassembly.len() < MessageHeader::LEN {
                return Ok(());
            }
            let (msg_header, _) =
                MessageHeader::decode(DecoderBuffer::new(&self.handshake_reassembly))?;
            let total = MessageHeader::LEN + msg_header.length as usize;
            if self.handshake_reassembly.len() < total {
                return Ok(());
            }

            let raw_body: Vec<u8> = self.handshake_reassembly.drain(..total).collect();
            let body_bytes = &raw_body[MessageHeader::LEN..];

            if msg_header.handshake_type == HandshakeType::HelloRequest {
                // Excluded from the transcript (spec §3) and otherwise
                // inert unless a connection supports renegotiation, which
                // this core does not (spec §9).
                continue;
            }

            let frame = match msg_header.handshake_type {
                HandshakeType::ClientKeyExchange
                | HandshakeType::ServerKeyExchange
                | HandshakeType::CertificateVerify => Frame::KeyExchangeRaw {
                    handshake_type: msg_header.handshake_type,
                    body: body_bytes.to_vec(),
                    raw_body: raw_body.clone(),
                },
                _ => {
                    let body = handshake::decode_body(
                        msg_header.handshake_type,
                        ctx.version,
                        ctx.verify_len,
                        DecoderBuffer::new(body_bytes),
                    )?;
                    Frame::Handshake {
                        body,
                        raw_body: raw_body.clone(),
                    }
                }
            };

            self.queue.push_back(ReceivedFrame {
                frame,
                record_version,
            });
        }
    }
}

fn alert_description_from_u8(value: u8) -> Result<AlertDescription, TlsError> {
    use AlertDescription::*;
    let description = match value {
        0 => CloseNotify,
        10 => UnexpectedMessage,
        20 => BadRecordMac,
        22 => RecordOverflow,
        30 => DecompressionFailure,
        40 => HandshakeFailure,
        42 => BadCertificate,
        43 => UnsupportedCertificate,
        44 => CertificateRevoked,
        45 => CertificateExpired,
        46 => CertificateUnknown,
        47 => IllegalParameter,
        48 => UnknownCa,
        49 => AccessDenied,
        50 => DecodeError,
        51 => DecryptError,
        70 => ProtocolVersion,
        71 => InsufficientSecurity,
        80 => InternalError,
        90 => UserCanceled,
        100 => NoRenegotiation,
        _ => return Err(TlsError::DecodeError),
    };
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::Framer;

    #[test]
    fn change_cipher_spec_round_trip() {
        let mut framer = Framer::new();
        let mut session = Session::null();
        framer.change_cipher_spec(&mut session).unwrap();

        let mut parser = Parser::new();
        parser.push(&framer.take_output());
        let ctx = ParserContext::default();
        let frame = parser.poll(&mut session, &ctx).unwrap().unwrap();
        assert_eq!(frame.frame, Frame::ChangeCipherSpec);
    }

    #[test]
    fn alert_round_trip() {
        let mut framer = Framer::new();
        let mut session = Session::null();
        framer
            .alert(&mut session, AlertLevel::Fatal, AlertDescription::IllegalParameter)
            .unwrap();

        let mut parser = Parser::new();
        parser.push(&framer.take_output());
        let ctx = ParserContext::default();
        let frame = parser.poll(&mut session, &ctx).unwrap().unwrap();
        assert_eq!(
            frame.frame,
            Frame::Alert {
                level: AlertLevel::Fatal,
                description: AlertDescription::IllegalParameter,
            }
        );
    }
}
