// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Server-side transition table: the mirror image of [`super::client`],
//! answering a `client_hello` with the rest of the flight and then waiting
//! for the client to finish the key exchange (RFC 5246 §7.3).

use super::{fresh_random, random_to_array, Handshake, Outcome, Wait};
use crate::error::TlsError;
use crate::events::{ConnectionState, Event};
use crate::frame::{Frame, ReceivedFrame};
use crate::handshake::key_exchange::{
    decode_client_key_exchange, ClientKeyExchange, EcdheServerKeyExchange, ServerKeyExchange, Signature,
    PRE_MASTER_SECRET_LEN,
};
use crate::handshake::{Certificate, ClientHello, HandshakeBody};
use crate::suite::{self, CipherSuite, KeyExchangeKind};
use alloc::vec::Vec;
use s2n_codec::{Encoder, EncoderBuffer};

/// secp256r1, the only named curve this core's default provider generates.
const NAMED_CURVE_SECP256R1: u16 = 23;
/// `signature_algorithms` codes for `rsa_pkcs1_sha256` (RFC 5246 §7.4.1.4.1).
const HASH_SHA256: u8 = 4;
const SIGN_RSA: u8 = 1;

pub(super) fn on_frame(
    hs: &mut Handshake,
    frame: ReceivedFrame,
    events: &mut Vec<Event>,
) -> Result<Outcome, TlsError> {
    match hs.wait() {
        Wait::ClientHello => on_client_hello(hs, frame, events),
        Wait::ClientKeyExchange => on_client_key_exchange(hs, frame),
        Wait::ChangeCipherSpec => on_change_cipher_spec(hs, frame),
        Wait::Finished => on_finished(hs, frame, events),
        Wait::ServerHello | Wait::Certificate | Wait::ServerKeyExchange | Wait::ServerHelloDone | Wait::Established => {
            Ok(Outcome::Reject(TlsError::UnexpectedMessage))
        }
    }
}

fn on_client_hello(hs: &mut Handshake, frame: ReceivedFrame, events: &mut Vec<Event>) -> Result<Outcome, TlsError> {
    let (hello, raw_body): (&ClientHello, &[u8]) = match &frame.frame {
        Frame::Handshake { body: HandshakeBody::ClientHello(hello), raw_body } => (hello, raw_body),
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };
    hs.session.record_transcript(raw_body);
    hs.session.client_random = random_to_array(&hello.random);

    let policy = &hs.config().policy;
    let version = core::cmp::min(hello.version, policy.max_version);
    if version < policy.min_version {
        return Ok(Outcome::Reject(TlsError::ProtocolVersion));
    }
    if !hello.compression_methods.contains(&0) {
        return Ok(Outcome::Reject(TlsError::HandshakeFailure));
    }
    let offered: Vec<CipherSuite> = hello.known_cipher_suites().collect();
    let suite = suite::select(&policy.cipher_suites, &offered, version)?;
    let info = suite.info();

    hs.session.suite = Some(info);
    hs.set_verify_len(info.verify_len);
    hs.set_negotiated_version(version);

    let credential = hs
        .config()
        .credential
        .clone()
        .ok_or(TlsError::InternalError)?;

    let server_random = fresh_random(hs.provider())?;
    hs.session.server_random = random_to_array(&server_random);
    let server_hello = crate::handshake::ServerHello {
        version,
        random: server_random,
        session_id: Vec::new(),
        cipher_suite: suite.as_u16(),
        compression_method: 0,
        extensions: Default::default(),
    };
    hs.emit_handshake(HandshakeBody::ServerHello(server_hello), events)?;
    hs.emit_handshake(
        HandshakeBody::Certificate(Certificate { chain: credential.certificate_chain.clone() }),
        events,
    )?;

    if info.kx != KeyExchangeKind::Rsa {
        send_server_key_exchange(hs, info.kx, &credential, events)?;
    }
    hs.emit_handshake(HandshakeBody::ServerHelloDone, events)?;

    hs.set_wait(Wait::ClientKeyExchange);
    events.push(Event::StateChange(ConnectionState::KeyExchange));
    Ok(Outcome::Accepted)
}

fn send_server_key_exchange(
    hs: &mut Handshake,
    kx: KeyExchangeKind,
    credential: &crate::config::Credential,
    events: &mut Vec<Event>,
) -> Result<(), TlsError> {
    let ephemeral = hs.provider().generate_ecdhe(NAMED_CURVE_SECP256R1)?;
    let public = ephemeral.public_bytes();
    let unsigned = EcdheServerKeyExchange {
        curve_type: 3,
        named_curve: NAMED_CURVE_SECP256R1,
        public,
        raw_params: Vec::new(),
    };
    let mut scratch = [0u8; 256];
    let params_len = {
        let mut encoder = EncoderBuffer::new(&mut scratch);
        unsigned.encode_params(&mut encoder);
        encoder.len()
    };
    let raw_params = scratch[..params_len].to_vec();
    let ecdhe = EcdheServerKeyExchange { raw_params: raw_params.clone(), ..unsigned };

    let signature = if kx == KeyExchangeKind::Ecdhe {
        let mut message = Vec::with_capacity(64 + raw_params.len());
        message.extend_from_slice(&hs.session.client_random);
        message.extend_from_slice(&hs.session.server_random);
        message.extend_from_slice(&raw_params);
        let value = hs.provider().sign(&credential.private_key_der, HASH_SHA256, SIGN_RSA, &message)?;
        Signature { hash: HASH_SHA256, sign: SIGN_RSA, value }
    } else {
        // Anonymous ECDH carries no signature (spec §1 suite table).
        Signature { hash: 0, sign: 0, value: Vec::new() }
    };

    hs.ecdhe_private = Some(ephemeral);
    hs.emit_server_key_exchange(ServerKeyExchange { ecdhe, signature }, events)
}

fn on_client_key_exchange(hs: &mut Handshake, frame: ReceivedFrame) -> Result<Outcome, TlsError> {
    let (body, raw_body) = match frame.frame {
        Frame::KeyExchangeRaw { handshake_type: crate::handshake::HandshakeType::ClientKeyExchange, body, raw_body } => {
            (body, raw_body)
        }
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };
    let kx = hs.session.suite.ok_or(TlsError::InternalError)?.kx;
    let cke = decode_client_key_exchange(kx, s2n_codec::DecoderBuffer::new(&body))?;

    let pre_master_secret = match (kx, cke) {
        (KeyExchangeKind::Rsa, ClientKeyExchange::Rsa(ciphertext)) => {
            let credential = hs.config().credential.clone().ok_or(TlsError::InternalError)?;
            // Bleichenbacher countermeasure (spec §4.4): on any decrypt
            // failure or malformed plaintext, substitute random bytes and
            // carry on rather than rejecting early, so a `finished`
            // mismatch is the only observable outcome of a bad guess.
            let mut premaster = [0u8; PRE_MASTER_SECRET_LEN];
            hs.provider().random(&mut premaster)?;
            if let Ok(candidate) = hs.provider().rsa_decrypt(&credential.private_key_der, &ciphertext) {
                if candidate.len() == PRE_MASTER_SECRET_LEN {
                    premaster.copy_from_slice(&candidate);
                }
            }
            premaster.to_vec()
        }
        (KeyExchangeKind::Ecdhe, ClientKeyExchange::Ecdhe(peer_public))
        | (KeyExchangeKind::EcdhAnon, ClientKeyExchange::Ecdhe(peer_public)) => {
            let ephemeral = hs.ecdhe_private.take().ok_or(TlsError::InternalError)?;
            ephemeral.derive(&peer_public)?
        }
        _ => return Ok(Outcome::Reject(TlsError::UnexpectedMessage)),
    };

    hs.session.record_transcript(&raw_body);
    hs.session.set_pre_master_secret(pre_master_secret);
    hs.session.derive_keys()?;

    hs.set_wait(Wait::ChangeCipherSpec);
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

    hs.emit_change_cipher_spec()?;
    hs.emit_finished(events)?;
    hs.session.stop_recording();

    hs.set_wait(Wait::Established);
    events.push(Event::Secure);
    events.push(Event::StateChange(ConnectionState::Established));
    Ok(Outcome::Accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handshake::hello::Random;
    use crate::role::Role;
    use crate::testing::NullProvider;
    use crate::version::ProtocolVersion;
    use alloc::boxed::Box;

    fn client_hello_frame(compression_methods: Vec<u8>) -> ReceivedFrame {
        let hello = ClientHello {
            version: ProtocolVersion::TLS1_2,
            random: Random { time: 0, bytes: [0u8; 28] },
            session_id: Vec::new(),
            cipher_suites: alloc::vec![CipherSuite::TlsRsaWithAes128CbcSha.as_u16()],
            compression_methods,
            extensions: Default::default(),
        };
        ReceivedFrame {
            frame: Frame::Handshake {
                body: HandshakeBody::ClientHello(hello),
                raw_body: Vec::new(),
            },
            record_version: ProtocolVersion::TLS1_2,
        }
    }

    #[test]
    fn deflate_only_offer_rejected() {
        let mut hs = Handshake::new(Role::Server, Config::default(), Box::new(NullProvider));
        let mut events = Vec::new();
        let outcome = on_client_hello(&mut hs, client_hello_frame(alloc::vec![1]), &mut events).unwrap();
        assert_eq!(outcome, Outcome::Reject(TlsError::HandshakeFailure));
    }

    #[test]
    fn null_offer_accepted_past_compression_check() {
        let mut hs = Handshake::new(
            Role::Server,
            Config {
                credential: Some(crate::config::Credential {
                    certificate_chain: alloc::vec![alloc::vec![0u8; 1]],
                    private_key_der: Vec::new(),
                }),
                ..Config::default()
            },
            Box::new(NullProvider),
        );
        let mut events = Vec::new();
        let err = on_client_hello(&mut hs, client_hello_frame(alloc::vec![1, 0]), &mut events).unwrap_err();
        assert_ne!(err, TlsError::HandshakeFailure);
    }
}
