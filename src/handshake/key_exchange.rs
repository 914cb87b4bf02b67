// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! `client_key_exchange` / `server_key_exchange` bodies (RFC 5246 §7.4.3,
//! §7.4.7.1, and RFC 4492 §5.4 for the ECDHE variants this core supports).
//!
//! Unlike the other handshake bodies these are suite-shaped rather than
//! self-describing, so decoding them takes the negotiated
//! [`crate::suite::KeyExchangeKind`] as a parameter (spec §4.1: "Dispatch
//! to a per-handshake-type sub-parser").

use crate::error::TlsError;
use crate::suite::KeyExchangeKind;
use alloc::vec::Vec;
use s2n_codec::{DecoderBuffer, Encoder, EncoderValue};

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.4.7.1
//# struct {
//#     ProtocolVersion client_version;
//#     opaque random[46];
//# } PreMasterSecret;
pub const PRE_MASTER_SECRET_LEN: usize = 48;

/// `client_key_exchange` body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientKeyExchange {
    /// RSA: `EncryptedPreMasterSecret`, a `<0..2^16-1>`-prefixed opaque
    /// blob holding the RSA-PKCS1v1.5-encrypted `PreMasterSecret`.
    Rsa(Vec<u8>),
    /// ECDHE: the client's public EC point, `<1..255>`-prefixed.
    Ecdhe(Vec<u8>),
}

pub fn decode_client_key_exchange(
    kx: KeyExchangeKind,
    buffer: DecoderBuffer,
) -> Result<ClientKeyExchange, TlsError> {
    match kx {
        KeyExchangeKind::Rsa => {
            let (len, buffer) = buffer.decode::<u16>()?;
            let (data, trailer) = buffer.decode_slice(len as usize)?;
            trailer.ensure_empty()?;
            Ok(ClientKeyExchange::Rsa(data.into_less_safe_slice().to_vec()))
        }
        KeyExchangeKind::Ecdhe | KeyExchangeKind::EcdhAnon => {
            let (len, buffer) = buffer.decode::<u8>()?;
            if len == 0 {
                return Err(TlsError::DecodeError);
            }
            let (data, trailer) = buffer.decode_slice(len as usize)?;
            trailer.ensure_empty()?;
            Ok(ClientKeyExchange::Ecdhe(data.into_less_safe_slice().to_vec()))
        }
    }
}

impl EncoderValue for ClientKeyExchange {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        match self {
            ClientKeyExchange::Rsa(data) => {
                encoder.encode(&(data.len() as u16));
                encoder.write_slice(data);
            }
            ClientKeyExchange::Ecdhe(data) => {
                encoder.encode(&(data.len() as u8));
                encoder.write_slice(data);
            }
        }
    }
}

//= https://www.rfc-editor.org/rfc/rfc4492#section-5.4
//# struct {
//#     ECParameters    curve_params;
//#     ECPoint         public;
//# } ServerECDHParams;
//#
//# struct {
//#     ServerECDHParams    params;
//#     Signature           signed_params;
//# } ServerKeyExchange;
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcdheServerKeyExchange {
    pub curve_type: u8,
    pub named_curve: u16,
    pub public: Vec<u8>,
    /// The exact `ServerECDHParams` bytes, needed to verify `signed_params`
    /// over `clientRandom || serverRandom || rawParams` (spec §4.4).
    pub raw_params: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub hash: u8,
    pub sign: u8,
    pub value: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerKeyExchange {
    pub ecdhe: EcdheServerKeyExchange,
    pub signature: Signature,
}

pub fn decode_ecdhe_server_key_exchange(
    buffer: DecoderBuffer,
) -> Result<ServerKeyExchange, TlsError> {
    let full = buffer.into_less_safe_slice();

    let (curve_type, buffer) = buffer.decode::<u8>()?;
    const NAMED_CURVE: u8 = 3;
    if curve_type != NAMED_CURVE {
        return Err(TlsError::HandshakeFailure);
    }
    let (named_curve, buffer) = buffer.decode::<u16>()?;
    let (pub_len, buffer) = buffer.decode::<u8>()?;
    if pub_len == 0 {
        return Err(TlsError::DecodeError);
    }
    let (public, buffer) = buffer.decode_slice(pub_len as usize)?;

    let params_len = full.len() - buffer.len();
    let raw_params = full[..params_len].to_vec();

    let (hash, buffer) = buffer.decode::<u8>()?;
    let (sign, buffer) = buffer.decode::<u8>()?;
    let (sig_len, buffer) = buffer.decode::<u16>()?;
    let (sig, trailer) = buffer.decode_slice(sig_len as usize)?;
    trailer.ensure_empty()?;

    Ok(ServerKeyExchange {
        ecdhe: EcdheServerKeyExchange {
            curve_type,
            named_curve,
            public: public.into_less_safe_slice().to_vec(),
            raw_params,
        },
        signature: Signature {
            hash,
            sign,
            value: sig.into_less_safe_slice().to_vec(),
        },
    })
}

impl EcdheServerKeyExchange {
    /// Serializes `ServerECDHParams` (curve_type || named_curve || public),
    /// the exact bytes the signature in a `ServerKeyExchange` covers.
    pub fn encode_params<E: Encoder>(&self, encoder: &mut E) {
        encoder.encode(&self.curve_type);
        encoder.encode(&self.named_curve);
        encoder.encode(&(self.public.len() as u8));
        encoder.write_slice(&self.public);
    }
}

impl EncoderValue for ServerKeyExchange {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        self.ecdhe.encode_params(encoder);
        encoder.encode(&self.signature.hash);
        encoder.encode(&self.signature.sign);
        encoder.encode(&(self.signature.value.len() as u16));
        encoder.write_slice(&self.signature.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2n_codec::EncoderBuffer;

    #[test]
    fn client_key_exchange_rsa_round_trip() {
        let cke = ClientKeyExchange::Rsa(alloc::vec![1u8; PRE_MASTER_SECRET_LEN]);
        let mut buf = [0u8; 64];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&cke);
        let len = encoder.len();
        let decoded =
            decode_client_key_exchange(KeyExchangeKind::Rsa, DecoderBuffer::new(&buf[..len]))
                .unwrap();
        assert_eq!(decoded, cke);
    }

    #[test]
    fn server_key_exchange_round_trip() {
        let ske = ServerKeyExchange {
            ecdhe: EcdheServerKeyExchange {
                curve_type: 3,
                named_curve: 23,
                public: alloc::vec![9u8; 65],
                raw_params: Vec::new(),
            },
            signature: Signature {
                hash: 4,
                sign: 1,
                value: alloc::vec![5u8; 256],
            },
        };
        let mut buf = [0u8; 512];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&ske);
        let len = encoder.len();
        let decoded = decode_ecdhe_server_key_exchange(DecoderBuffer::new(&buf[..len])).unwrap();
        assert_eq!(decoded.ecdhe.curve_type, 3);
        assert_eq!(decoded.ecdhe.named_curve, 23);
        assert_eq!(decoded.ecdhe.public, ske.ecdhe.public);
        assert_eq!(decoded.signature.value, ske.signature.value);
    }
}
