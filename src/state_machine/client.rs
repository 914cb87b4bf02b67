// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Client-side transition table (RFC 5246 §7.3's full handshake flight
//! sequence, RSA and ECDHE/EcdhAnon key exchange only — spec §1 scope).

use super::{fresh_random, random_to_array, Handshake, Outcome, Wait};
use crate::certs;
use crate::error::TlsError;
use crate::events::{ConnectionState, Event};
use crate::frame::{Frame, ReceivedFrame};
use crate::handshake::key_exchange::{decode_ecdhe_server_key_exchange, ClientKeyExchange};
use crate::handshake::{HandshakeBody, ServerHello};
use crate::suite::{CipherSuite, KeyExchangeKind};
use alloc::vec::Vec;

/// Sends `client_hello`, offering every suite the policy allows.
pub(super) fn send_client_hello(hs: &mut Handshake, events: &mut Vec<Event>) -> Result<(), TlsError> {
    let random = fresh_random(hs.provider())?;
    hs.session.client_random = random_to_array(&random);

    let hello = crate::handshake::ClientHello {
        version: hs.config().policy.max_version,
        random,
        session_id: Vec::new(),
        cipher_suites: hs.config().policy.cipher_suites.iter().map(|s| s.as_u16()).collect(),
        compression_methods: alloc::vec![0],
        extensions: Default::default(),
    };
    hs.emit_handshake(HandshakeBody::ClientHello(hello), events)?;
    hs.set_wait(Wait::ServerHello);
    Ok(())
}

pub(super) fn on_frame(
    hs: &mut Handshake,
    frame: ReceivedFrame,
    events: &mut Vec<Event>,
) -> Result<Outcome, TlsError> {
    match hs.wait() {
        Wait::ServerHello => on_server_hello(hs, frame, events),
        Wait::Certificate => on_certificate(hs, frame, events),
        Wait::ServerKeyExchange => on_server_key_exchange(hs, frame, events),
        Wait::ServerHelloDone => on_server_hello_done(hs, frame, events),
        Wait::ChangeCipherSpec => on_change_cipher_spec(hs, frame),
        Wait::Finished => on_finished(hs, frame, events),
        Wait::ClientHello | Wait::ClientKeyExchange | Wait::Established => {
            Ok(Outcome::Reject(TlsError::UnexpectedMessage))
        }
    }
}

fn on_server_hello(hs: &mut Handshake, frame: ReceivedFrame, events: &mut Vec<Event>) -> Result<Outcome, TlsError> {
    let (hello, raw_body): (&ServerHello, &[u8]) = match &frame.frame {
        Frame::Handshake { body: HandshakeBody::ServerHello(hello), raw_body } => (hello, raw_body),
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };
    if !hs.config().policy.supports(hello.version) {
        return Ok(Outcome::Reject(TlsError::ProtocolVersion));
    }
    let suite = match CipherSuite::from_u16(hello.cipher_suite) {
        Some(suite) if hs.config().policy.cipher_suites.contains(&suite) => suite,
        _ => return Ok(Outcome::Reject(TlsError::HandshakeFailure)),
    };
    let info = suite.info();
    if info.min_version > hello.version {
        return Ok(Outcome::Reject(TlsError::HandshakeFailure));
    }

    hs.session.server_random = random_to_array(&hello.random);
    hs.session.suite = Some(info);
    hs.set_verify_len(info.verify_len);
    hs.set_negotiated_version(hello.version);
    hs.session.record_transcript(raw_body);

    hs.set_wait(Wait::Certificate);
    events.push(Event::StateChange(ConnectionState::HelloExchanged));
    Ok(Outcome::Accepted)
}

fn on_certificate(hs: &mut Handshake, frame: ReceivedFrame, events: &mut Vec<Event>) -> Result<Outcome, TlsError> {
    let (cert, raw_body) = match frame.frame {
        Frame::Handshake { body: HandshakeBody::Certificate(cert), raw_body } => (cert, raw_body),
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };
    hs.session.record_transcript(&raw_body);
    events.push(Event::PeerCertificate(cert.clone()));
    hs.peer_certificate = Some(cert);

    let kx = hs.session.suite.ok_or(TlsError::InternalError)?.kx;
    hs.set_wait(if kx == KeyExchangeKind::Rsa { Wait::ServerHelloDone } else { Wait::ServerKeyExchange });
    events.push(Event::StateChange(ConnectionState::KeyExchange));
    Ok(Outcome::Accepted)
}

fn on_server_key_exchange(
    hs: &mut Handshake,
    frame: ReceivedFrame,
    _events: &mut Vec<Event>,
) -> Result<Outcome, TlsError> {
    let (body, raw_body) = match frame.frame {
        Frame::KeyExchangeRaw { handshake_type: crate::handshake::HandshakeType::ServerKeyExchange, body, raw_body } => {
            (body, raw_body)
        }
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };
    let ske = decode_ecdhe_server_key_exchange(s2n_codec::DecoderBuffer::new(&body))?;

    let kx = hs.session.suite.ok_or(TlsError::InternalError)?.kx;
    if kx == KeyExchangeKind::Ecdhe {
        let cert = hs.peer_certificate.as_ref().ok_or(TlsError::HandshakeFailure)?;
        let leaf = certs::leaf(cert)?;
        let mut message = Vec::with_capacity(64 + ske.ecdhe.raw_params.len());
        message.extend_from_slice(&hs.session.client_random);
        message.extend_from_slice(&hs.session.server_random);
        message.extend_from_slice(&ske.ecdhe.raw_params);
        hs.provider().verify_signature(
            leaf,
            ske.signature.hash,
            ske.signature.sign,
            &message,
            &ske.signature.value,
        )?;
    }
    // `EcdhAnon`: no signature to verify, by definition (spec §1 suite table).

    hs.peer_ecdhe_public = Some((ske.ecdhe.named_curve, ske.ecdhe.public));
    hs.session.record_transcript(&raw_body);
    hs.set_wait(Wait::ServerHelloDone);
    Ok(Outcome::Accepted)
}

fn on_server_hello_done(
    hs: &mut Handshake,
    frame: ReceivedFrame,
    events: &mut Vec<Event>,
) -> Result<Outcome, TlsError> {
    match &frame.frame {
        Frame::Handshake { body: HandshakeBody::CertificateRequest(_), .. } => {
            // Client-certificate authentication is out of scope (spec §1);
            // a server that requires one can't be satisfied by this core.
            return Ok(Outcome::Reject(TlsError::NotImplemented("certificate_request")));
        }
        Frame::Handshake { body: HandshakeBody::ServerHelloDone, raw_body } => {
            hs.session.record_transcript(raw_body);
        }
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    }

    let kx = hs.session.suite.ok_or(TlsError::InternalError)?.kx;
    let pre_master_secret = match kx {
        KeyExchangeKind::Rsa => {
            let cert = hs.peer_certificate.as_ref().ok_or(TlsError::HandshakeFailure)?;
            let leaf = certs::leaf(cert)?;

            let mut premaster = [0u8; crate::handshake::key_exchange::PRE_MASTER_SECRET_LEN];
            premaster[0] = hs.config().policy.max_version.major;
            premaster[1] = hs.config().policy.max_version.minor;
            hs.provider().random(&mut premaster[2..])?;

            let ciphertext = hs.provider().rsa_encrypt(leaf, &premaster)?;
            hs.emit_client_key_exchange(ClientKeyExchange::Rsa(ciphertext), events)?;
            premaster.to_vec()
        }
        KeyExchangeKind::Ecdhe | KeyExchangeKind::EcdhAnon => {
            let (named_curve, peer_public) = hs.peer_ecdhe_public.take().ok_or(TlsError::HandshakeFailure)?;
            let ephemeral = hs.provider().generate_ecdhe(named_curve)?;
            let our_public = ephemeral.public_bytes();
            let shared = ephemeral.derive(&peer_public)?;
            hs.emit_client_key_exchange(ClientKeyExchange::Ecdhe(our_public), events)?;
            shared
        }
    };

    hs.session.set_pre_master_secret(pre_master_secret);
    hs.session.derive_keys()?;
    hs.emit_change_cipher_spec()?;
    hs.emit_finished(events)?;

    hs.set_wait(Wait::ChangeCipherSpec);
    events.push(Event::StateChange(ConnectionState::WaitFinished));
    Ok(Outcome::Accepted)
}

fn on_change_cipher_spec(hs: &mut Handshake, frame: ReceivedFrame) -> Result<Outcome, TlsError> {
    if frame.frame != Frame::ChangeCipherSpec {
        return Ok(Outcome::Reject(TlsError::UnexpectedMessage));
    }
    hs.session.switch_read()?;
    hs.set_wait(Wait::Finished);
    Ok(Outcome::Accepted)
}

fn on_finished(hs: &mut Handshake, frame: ReceivedFrame, events: &mut Vec<Event>) -> Result<Outcome, TlsError> {
    let (finished, raw_body) = match frame.frame {
        Frame::Handshake { body: HandshakeBody::Finished(finished), raw_body } => (finished, raw_body),
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };
    hs.verify_peer_finished(&finished)?;
    hs.session.record_transcript(&raw_body);
    hs.session.stop_recording();

    hs.set_wait(Wait::Established);
    events.push(Event::Secure);
    events.push(Event::StateChange(ConnectionState::Established));
    Ok(Outcome::Accepted)
}
