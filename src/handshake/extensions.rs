// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Hello extensions, parsed opaquely.
//!
//! This core's scope doesn't require understanding any particular
//! extension's contents (server_name, signature_algorithms negotiation for
//! the selected suite, etc. are all handled outside extensions here), so
//! extensions are decoded as a flat `(type, data)` list and re-encoded
//! byte-for-byte. Spec §4.1: "Extensions are parsed if the remaining body
//! is non-empty."

use crate::error::TlsError;
use alloc::vec::Vec;
use s2n_codec::{DecoderBuffer, Encoder, EncoderValue};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Extensions {
    pub entries: Vec<(u16, Vec<u8>)>,
}

impl Extensions {
    pub fn decode(buffer: DecoderBuffer) -> Result<Self, TlsError> {
        if buffer.is_empty() {
            return Ok(Self::default());
        }
        let (len, buffer) = buffer.decode::<u16>()?;
        let (mut cursor, trailer) = buffer.decode_slice(len as usize)?;
        trailer.ensure_empty()?;

        let mut entries = Vec::new();
        while !cursor.is_empty() {
            let (ext_type, next) = cursor.decode::<u16>()?;
            let (ext_len, next) = next.decode::<u16>()?;
            let (data, next) = next.decode_slice(ext_len as usize)?;
            entries.push((ext_type, data.into_less_safe_slice().to_vec()));
            cursor = next;
        }
        Ok(Self { entries })
    }
}

impl EncoderValue for Extensions {
    fn encode<E: Encoder>(&self, encoder: &mut E) {
        if self.entries.is_empty() {
            return;
        }
        let body_len: usize = self
            .entries
            .iter()
            .map(|(_, data)| 2 + 2 + data.len())
            .sum();
        encoder.encode(&(body_len as u16));
        for (ext_type, data) in &self.entries {
            encoder.encode(ext_type);
            encoder.encode(&(data.len() as u16));
            encoder.write_slice(data);
        }
    }
}
