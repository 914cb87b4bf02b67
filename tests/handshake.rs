// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end handshake tests: two `Handshake` instances, a `testing::Pipe`
//! standing in for the transport, driven to `Established` and then
//! exchanging `application_data` in both directions.

#![cfg(feature = "default-provider")]

use classic_tls_core::config::{Config, Credential, Policy};
use classic_tls_core::default_provider::DefaultProvider;
use classic_tls_core::events::Event;
use classic_tls_core::role::Role;
use classic_tls_core::state_machine::Handshake;
use classic_tls_core::suite::CipherSuite;
use classic_tls_core::testing::Pipe;
use classic_tls_core::version::ProtocolVersion;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::RsaPrivateKey;

fn rsa_credential() -> Credential {
    let private_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 2048).expect("key generation");
    let public_key = private_key.to_public_key();
    Credential {
        certificate_chain: vec![public_key
            .to_public_key_der()
            .expect("encode public key")
            .as_bytes()
            .to_vec()],
        private_key_der: private_key.to_pkcs8_der().expect("encode private key").as_bytes().to_vec(),
    }
}

/// Drives both sides to `Established`, returning the events each produced.
fn run_handshake(suite: CipherSuite) -> (Handshake, Handshake) {
    let credential = rsa_credential();
    let policy = Policy {
        min_version: ProtocolVersion::TLS1_2,
        max_version: ProtocolVersion::TLS1_2,
        cipher_suites: vec![suite],
    };

    let mut client = Handshake::new(
        Role::Client,
        Config { policy: policy.clone(), credential: None },
        Box::new(DefaultProvider),
    );
    let mut server = Handshake::new(
        Role::Server,
        Config { policy, credential: Some(credential) },
        Box::new(DefaultProvider),
    );

    let (client_end, server_end) = Pipe::pair();

    for event in client.start().expect("client start") {
        if let Event::Output(bytes) = event {
            client_end.send(&bytes);
        }
    }

    // Ping-pong bytes between the two pipe ends until both sides report
    // `Established`, or nothing is left to exchange.
    loop {
        let mut progressed = false;

        let inbound = server_end.recv_all();
        if !inbound.is_empty() {
            progressed = true;
            for event in server.receive(&inbound).expect("server receive") {
                if let Event::Output(bytes) = event {
                    server_end.send(&bytes);
                }
            }
        }

        let inbound = client_end.recv_all();
        if !inbound.is_empty() {
            progressed = true;
            for event in client.receive(&inbound).expect("client receive") {
                if let Event::Output(bytes) = event {
                    client_end.send(&bytes);
                }
            }
        }

        if client.is_secure() && server.is_secure() {
            break;
        }
        assert!(progressed, "handshake stalled before both sides reached Established");
    }

    (client, server)
}

#[test]
fn rsa_handshake_establishes_matching_session() {
    let (client, server) = run_handshake(CipherSuite::TlsRsaWithAes128CbcSha256);
    assert!(client.is_secure());
    assert!(server.is_secure());
    assert_eq!(client.session.master_secret, server.session.master_secret);
}

#[test]
fn ecdhe_handshake_establishes_matching_session() {
    let (client, server) = run_handshake(CipherSuite::TlsEcdheRsaWithAes256CbcSha384);
    assert!(client.is_secure());
    assert!(server.is_secure());
    assert_eq!(client.session.master_secret, server.session.master_secret);
}

#[test]
fn application_data_round_trips_after_established() {
    let (mut client, mut server) = run_handshake(CipherSuite::TlsRsaWithAes128CbcSha256);
    let (client_end, server_end) = Pipe::pair();

    let outbound = client.send_application_data(b"hello from the client").expect("encode app data");
    client_end.send(&outbound);
    let inbound = server_end.recv_all();
    let events = server.receive(&inbound).expect("server decode app data");
    let received: Vec<u8> = events
        .into_iter()
        .find_map(|event| match event {
            Event::ApplicationData(data) => Some(data),
            _ => None,
        })
        .expect("server observed application data");
    assert_eq!(received, b"hello from the client");
}
