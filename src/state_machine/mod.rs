// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The role-parameterized handshake orchestrator (spec §4.4): drives
//! `parser`/`framer`/`session` through the client or server transition
//! table and emits the typed event stream ([`crate::events::Event`]).
//!
//! The original callback-driven "proceed or skip" signal (SPEC_FULL.md §9
//! REDESIGN FLAGS) is replaced here with an explicit [`Outcome`], so a
//! frame the table tolerates out of strict sequence can be told apart from
//! one that genuinely advances the handshake, without a sentinel return
//! value standing in for both.

mod client;
mod server;

use crate::config::Config;
use crate::crypto_provider::{CryptoProvider, EcdhePrivateKey};
use crate::error::{AlertDescription, AlertLevel, TlsError};
use crate::events::{ConnectionState, Event};
use crate::frame::{Frame, ReceivedFrame};
use crate::framer::Framer;
use crate::handshake::key_exchange::{ClientKeyExchange, ServerKeyExchange};
use crate::handshake::{Certificate, Finished, HandshakeBody};
use crate::parser::{Parser, ParserContext};
use crate::role::Role;
use crate::session::Session;
use crate::version::ProtocolVersion;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// The handshake message this endpoint is waiting for next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wait {
    ClientHello,
    ServerHello,
    Certificate,
    ServerKeyExchange,
    ServerHelloDone,
    ClientKeyExchange,
    ChangeCipherSpec,
    Finished,
    Established,
}

/// The result of evaluating one inbound frame against the transition table.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The frame was the one expected; the state machine has already acted
    /// on it.
    Accepted,
    Reject(TlsError),
}

/// Drives one side of a TLS 1.0-1.2 handshake to completion and then
/// carries the resulting session.
pub struct Handshake {
    pub role: Role,
    config: Config,
    pub session: Session,
    parser: Parser,
    framer: Framer,
    parser_ctx: ParserContext,
    wait: Wait,
    negotiated_version: Option<ProtocolVersion>,
    pub(crate) peer_certificate: Option<Certificate>,
    pub(crate) ecdhe_private: Option<Box<dyn EcdhePrivateKey>>,
    /// The peer's ECDHE curve and public point from `ServerKeyExchange`,
    /// held until the client builds its own `ClientKeyExchange`.
    pub(crate) peer_ecdhe_public: Option<(u16, Vec<u8>)>,
    closed: bool,
}

impl Handshake {
    pub fn new(role: Role, config: Config, provider: Box<dyn CryptoProvider>) -> Self {
        let wait = match role {
            Role::Client => Wait::ServerHello,
            Role::Server => Wait::ClientHello,
        };
        Self {
            role,
            config,
            session: Session::new(role, provider),
            parser: Parser::new(),
            framer: Framer::new(),
            parser_ctx: ParserContext::default(),
            wait,
            negotiated_version: None,
            peer_certificate: None,
            ecdhe_private: None,
            peer_ecdhe_public: None,
            closed: false,
        }
    }

    /// Kicks off the handshake. Only the client speaks first; a server
    /// returns no events and waits on [`Handshake::receive`].
    pub fn start(&mut self) -> Result<Vec<Event>, TlsError> {
        let mut events = Vec::new();
        if self.role.is_client() {
            if let Err(err) = client::send_client_hello(self, &mut events) {
                self.fail(err, &mut events);
                return Ok(events);
            }
        }
        self.flush_output(&mut events);
        Ok(events)
    }

    /// Feeds bytes read from the transport, processing every frame they
    /// complete and returning the events produced.
    pub fn receive(&mut self, bytes: &[u8]) -> Result<Vec<Event>, TlsError> {
        let mut events = Vec::new();
        self.parser.push(bytes);
        loop {
            if self.closed {
                break;
            }
            let frame = match self.parser.poll(&mut self.session, &self.parser_ctx) {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(err) => {
                    self.fail(err, &mut events);
                    break;
                }
            };
            if let Err(err) = self.handle_frame(frame, &mut events) {
                self.fail(err, &mut events);
                break;
            }
        }
        self.flush_output(&mut events);
        Ok(events)
    }

    /// Encodes and sends `application_data`, returning the framed bytes.
    /// Only valid once [`Handshake::is_secure`].
    pub fn send_application_data(&mut self, data: &[u8]) -> Result<Vec<u8>, TlsError> {
        if !self.is_secure() {
            return Err(TlsError::UnexpectedMessage);
        }
        let version = self.message_version();
        self.framer.application_data(&mut self.session, version, data)?;
        Ok(self.framer.take_output())
    }

    fn handle_frame(&mut self, frame: ReceivedFrame, events: &mut Vec<Event>) -> Result<(), TlsError> {
        if let Some(version) = self.negotiated_version {
            if frame.record_version != version {
                return Err(TlsError::ProtocolVersion);
            }
        }
        if let Frame::Alert { level, description } = frame.frame {
            return self.handle_alert(level, description, events);
        }
        if let Frame::ApplicationData(data) = frame.frame {
            if !self.is_secure() {
                return Err(TlsError::UnexpectedMessage);
            }
            events.push(Event::ApplicationData(data));
            return Ok(());
        }

        let outcome = match self.role {
            Role::Client => client::on_frame(self, frame, events)?,
            Role::Server => server::on_frame(self, frame, events)?,
        };
        match outcome {
            Outcome::Accepted => Ok(()),
            Outcome::Reject(err) => Err(err),
        }
    }

    /// `close_notify` closes gracefully; every other warning-level alert is
    /// logged and ignored (SPEC_FULL.md §3 "non-fatal alert handling").
    fn handle_alert(
        &mut self,
        level: AlertLevel,
        description: AlertDescription,
        events: &mut Vec<Event>,
    ) -> Result<(), TlsError> {
        if level == AlertLevel::Fatal {
            return Err(TlsError::from_alert(description));
        }
        if description == AlertDescription::CloseNotify {
            self.closed = true;
            events.push(Event::StateChange(ConnectionState::Closed));
        } else {
            tracing::warn!(?description, "ignoring non-fatal alert");
            events.push(Event::Warning(description));
        }
        Ok(())
    }

    fn fail(&mut self, err: TlsError, events: &mut Vec<Event>) {
        if !self.closed {
            let _ = self.framer.alert(&mut self.session, AlertLevel::Fatal, err.description());
            self.flush_output(events);
        }
        self.closed = true;
        events.push(Event::Error(err));
        events.push(Event::StateChange(ConnectionState::Closed));
    }

    fn flush_output(&mut self, events: &mut Vec<Event>) {
        let output = self.framer.take_output();
        if !output.is_empty() {
            events.push(Event::Output(output));
        }
    }

    pub fn is_secure(&self) -> bool {
        self.wait == Wait::Established
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn provider(&self) -> &dyn CryptoProvider {
        self.session.provider()
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn set_wait(&mut self, wait: Wait) {
        self.wait = wait;
    }

    pub(crate) fn wait(&self) -> Wait {
        self.wait
    }

    pub(crate) fn set_negotiated_version(&mut self, version: ProtocolVersion) {
        self.negotiated_version = Some(version);
        self.parser_ctx.version = version;
    }

    pub(crate) fn message_version(&self) -> ProtocolVersion {
        self.negotiated_version.unwrap_or(self.config.policy.max_version)
    }

    pub(crate) fn set_verify_len(&mut self, verify_len: usize) {
        self.parser_ctx.verify_len = verify_len;
    }

    /// Sends one self-describing handshake body, recording it in the
    /// transcript and the event stream.
    pub(crate) fn emit_handshake(
        &mut self,
        body: HandshakeBody,
        events: &mut Vec<Event>,
    ) -> Result<(), TlsError> {
        let version = self.message_version();
        let raw = self.framer.handshake(&mut self.session, version, &body)?;
        self.session.record_transcript(&raw);
        events.push(Event::HandshakeMessage(raw));
        Ok(())
    }

    pub(crate) fn emit_client_key_exchange(
        &mut self,
        cke: ClientKeyExchange,
        events: &mut Vec<Event>,
    ) -> Result<(), TlsError> {
        let version = self.message_version();
        let raw = self.framer.client_key_exchange(&mut self.session, version, &cke)?;
        self.session.record_transcript(&raw);
        events.push(Event::HandshakeMessage(raw));
        Ok(())
    }

    pub(crate) fn emit_server_key_exchange(
        &mut self,
        ske: ServerKeyExchange,
        events: &mut Vec<Event>,
    ) -> Result<(), TlsError> {
        let version = self.message_version();
        let raw = self.framer.server_key_exchange(&mut self.session, version, &ske)?;
        self.session.record_transcript(&raw);
        events.push(Event::HandshakeMessage(raw));
        Ok(())
    }

    pub(crate) fn emit_change_cipher_spec(&mut self) -> Result<(), TlsError> {
        self.framer.change_cipher_spec(&mut self.session)?;
        self.session.switch_write()
    }

    /// Computes and sends our own `finished`, using this role's PRF label.
    pub(crate) fn emit_finished(&mut self, events: &mut Vec<Event>) -> Result<(), TlsError> {
        let suite = self.session.suite.ok_or(TlsError::InternalError)?;
        let transcript_hash = self.session.transcript_hash()?;
        let verify_data = crate::prf::verify_data(
            self.session.provider(),
            suite.prf,
            &self.session.master_secret,
            self.role.finished_label(),
            &transcript_hash,
            suite.verify_len,
        )?;
        self.emit_handshake(HandshakeBody::Finished(Finished { verify_data }), events)
    }

    /// Verifies the peer's `finished` against the transcript as it stood
    /// just before this message arrived, using the peer role's PRF label.
    pub(crate) fn verify_peer_finished(&mut self, finished: &Finished) -> Result<(), TlsError> {
        let suite = self.session.suite.ok_or(TlsError::InternalError)?;
        let transcript_hash = self.session.transcript_hash()?;
        let expected = crate::prf::verify_data(
            self.session.provider(),
            suite.prf,
            &self.session.master_secret,
            self.role.peer().finished_label(),
            &transcript_hash,
            suite.verify_len,
        )?;
        use subtle::ConstantTimeEq;
        if expected.ct_eq(&finished.verify_data).unwrap_u8() != 1 {
            return Err(TlsError::DecryptError);
        }
        Ok(())
    }
}

/// Draws a fresh `Random` (RFC 5246 §7.4.1.2) from the provider. Real wall
/// clock time isn't available to this crate's `no_std` core, and filling
/// the `gmt_unix_time` field with more entropy is harmless interoperably.
pub(crate) fn fresh_random(
    provider: &dyn CryptoProvider,
) -> Result<crate::handshake::Random, TlsError> {
    let mut bytes32 = [0u8; 32];
    provider.random(&mut bytes32)?;
    let time = u32::from_be_bytes([bytes32[0], bytes32[1], bytes32[2], bytes32[3]]);
    let mut bytes = [0u8; 28];
    bytes.copy_from_slice(&bytes32[4..]);
    Ok(crate::handshake::Random { time, bytes })
}

pub(crate) fn random_to_array(random: &crate::handshake::Random) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[..4].copy_from_slice(&random.time.to_be_bytes());
    out[4..].copy_from_slice(&random.bytes);
    out
}
