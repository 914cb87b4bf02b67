// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! AES-CBC and RC4 bulk ciphers (RFC 5246 §6.2.3).
//!
//! Every CBC record gets a fresh random explicit IV, the TLS 1.1+ scheme;
//! this provider does not implement TLS 1.0's implicit chained-IV mode
//! (using the previous record's last ciphertext block as the next IV),
//! which is a strict subset of explicit IV's security and a documented
//! simplification (see `DESIGN.md`). `iv` as handed in by [`Session`] is
//! therefore unused for CBC and only read for stream ciphers, which carry
//! none at all (`BulkCipherSpec::iv_len == 0` for RC4).
//!
//! [`Session`]: crate::session::Session

use crate::crypto_provider::{Decrypt, Encrypt};
use crate::error::TlsError;
use crate::suite::{BulkCipherKind, BulkCipherSpec};
use alloc::boxed::Box;
use alloc::vec::Vec;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use rc4::{KeyInit as Rc4KeyInit, StreamCipher};

pub fn new_encrypt(spec: BulkCipherSpec, key: &[u8], _iv: &[u8]) -> Result<Box<dyn Encrypt>, TlsError> {
    match spec.kind {
        BulkCipherKind::Cbc => Ok(Box::new(CbcEncrypt {
            key: key.to_vec(),
            block_size: spec.block_size,
        })),
        BulkCipherKind::Stream => Ok(Box::new(Rc4Stream::new(key)?)),
    }
}

pub fn new_decrypt(spec: BulkCipherSpec, key: &[u8], _iv: &[u8]) -> Result<Box<dyn Decrypt>, TlsError> {
    match spec.kind {
        BulkCipherKind::Cbc => Ok(Box::new(CbcDecrypt {
            key: key.to_vec(),
            block_size: spec.block_size,
        })),
        BulkCipherKind::Stream => Ok(Box::new(Rc4Stream::new(key)?)),
    }
}

struct CbcEncrypt {
    key: Vec<u8>,
    block_size: usize,
}

impl Encrypt for CbcEncrypt {
    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TlsError> {
        if input.len() % self.block_size != 0 || output.len() < self.block_size + input.len() {
            return Err(TlsError::InternalError);
        }
        let mut iv = [0u8; 16];
        rand::rngs::OsRng.fill_bytes(&mut iv[..self.block_size]);

        let (iv_out, rest) = output.split_at_mut(self.block_size);
        iv_out.copy_from_slice(&iv[..self.block_size]);
        let ciphertext = &mut rest[..input.len()];
        ciphertext.copy_from_slice(input);

        match self.key.len() {
            16 => cbc::Encryptor::<aes::Aes128>::new_from_slices(&self.key, &iv[..self.block_size])
                .map_err(|_| TlsError::InternalError)?
                .encrypt_padded_mut::<NoPadding>(ciphertext, input.len())
                .map_err(|_| TlsError::InternalError)?,
            32 => cbc::Encryptor::<aes::Aes256>::new_from_slices(&self.key, &iv[..self.block_size])
                .map_err(|_| TlsError::InternalError)?
                .encrypt_padded_mut::<NoPadding>(ciphertext, input.len())
                .map_err(|_| TlsError::InternalError)?,
            _ => return Err(TlsError::InternalError),
        };
        Ok(self.block_size + input.len())
    }
}

struct CbcDecrypt {
    key: Vec<u8>,
    block_size: usize,
}

impl Decrypt for CbcDecrypt {
    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TlsError> {
        if input.len() < self.block_size
            || (input.len() - self.block_size) % self.block_size != 0
            || output.len() < input.len() - self.block_size
        {
            return Err(TlsError::BadRecordMac);
        }
        let (iv, ciphertext) = input.split_at(self.block_size);
        let buf = &mut output[..ciphertext.len()];
        buf.copy_from_slice(ciphertext);

        match self.key.len() {
            16 => cbc::Decryptor::<aes::Aes128>::new_from_slices(&self.key, iv)
                .map_err(|_| TlsError::BadRecordMac)?
                .decrypt_padded_mut::<NoPadding>(buf)
                .map_err(|_| TlsError::BadRecordMac)?,
            32 => cbc::Decryptor::<aes::Aes256>::new_from_slices(&self.key, iv)
                .map_err(|_| TlsError::BadRecordMac)?
                .decrypt_padded_mut::<NoPadding>(buf)
                .map_err(|_| TlsError::BadRecordMac)?,
            _ => return Err(TlsError::BadRecordMac),
        };
        Ok(ciphertext.len())
    }
}

/// RC4 is a symmetric keystream: the same state advances encryption in one
/// direction, decryption in the other.
struct Rc4Stream(rc4::Rc4<rc4::consts::U16>);

impl Rc4Stream {
    fn new(key: &[u8]) -> Result<Self, TlsError> {
        Ok(Self(
            rc4::Rc4::new_from_slice(key).map_err(|_| TlsError::InternalError)?,
        ))
    }
}

impl Encrypt for Rc4Stream {
    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TlsError> {
        if output.len() < input.len() {
            return Err(TlsError::InternalError);
        }
        output[..input.len()].copy_from_slice(input);
        self.0.apply_keystream(&mut output[..input.len()]);
        Ok(input.len())
    }
}

impl Decrypt for Rc4Stream {
    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TlsError> {
        if output.len() < input.len() {
            return Err(TlsError::BadRecordMac);
        }
        output[..input.len()].copy_from_slice(input);
        self.0.apply_keystream(&mut output[..input.len()]);
        Ok(input.len())
    }
}
