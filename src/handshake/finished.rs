// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! `finished` body (RFC 5246 §7.4.9): the raw `verify_data`, whose length
//! is suite-defined (12 bytes for every suite in this registry).

use crate::error::TlsError;
use alloc::vec::Vec;
use s2n_codec::{DecoderBuffer, Encoder, EncoderValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finished {
    pub verify_data: Vec<u8>,
}

pub(crate) fn decode(verify_len: usize, buffer: DecoderBuffer) -> Result<Finished, TlsError> {
    let (data, trailer) = buffer.decode_slice(verify_len)?;
    trailer.ensure_empty()?;
    Ok(Finished {
        verify_data: data.into_less_safe_slice().to_vec(),
    })
}

impl EncoderValue for Finished {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        encoder.write_slice(&self.verify_data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2n_codec::EncoderBuffer;

    #[test]
    fn round_trip() {
        let finished = Finished {
            verify_data: b"hello".to_vec(),
        };
        let mut buf = [0u8; 16];
        let mut encoder = EncoderBuffer::new(&mut buf);
        encoder.encode(&finished);
        let len = encoder.len();
        let decoded = decode(5, DecoderBuffer::new(&buf[..len])).unwrap();
        assert_eq!(decoded, finished);
    }
}
