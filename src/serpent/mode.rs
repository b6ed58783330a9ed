//! File-level cipher mode: PKCS#7 padding and independent per-block
//! encryption, ciphertext blocks concatenated in order. No chaining, no IV.

use std::io::{Read, Write};

use log::debug;

use super::{Serpent, BLOCK_SIZE};
use crate::error::{Error, Result};

impl Serpent {
    /// Pad a buffer to the block boundary and encrypt it block by block.
    /// Output length is always `((len / 16) + 1) * 16`.
    pub fn encrypt_bytes(&self, plain: &[u8]) -> Vec<u8> {
        let pad = BLOCK_SIZE - plain.len() % BLOCK_SIZE;
        let mut padded = Vec::with_capacity(plain.len() + pad);
        padded.extend_from_slice(plain);
        padded.resize(plain.len() + pad, pad as u8);

        let mut cipher = Vec::with_capacity(padded.len());
        for chunk in padded.chunks_exact(BLOCK_SIZE) {
            let block = self.encrypt_block(unpack_block(chunk));
            pack_block(block, &mut cipher);
        }
        debug!(
            "encrypted {} plaintext bytes into {} ciphertext bytes ({} padding)",
            plain.len(),
            cipher.len(),
            pad
        );
        cipher
    }

    /// Decrypt a buffer produced by [`Serpent::encrypt_bytes`] and strip the
    /// padding. Nothing is returned unless the whole buffer decrypts and the
    /// padding validates.
    pub fn decrypt_bytes(&self, cipher: &[u8]) -> Result<Vec<u8>> {
        if cipher.is_empty() || cipher.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidCiphertext { len: cipher.len() });
        }

        let mut plain = Vec::with_capacity(cipher.len());
        for chunk in cipher.chunks_exact(BLOCK_SIZE) {
            let block = self.decrypt_block(unpack_block(chunk));
            pack_block(block, &mut plain);
        }

        let pad = plain[plain.len() - 1] as usize;
        if pad == 0 || pad > BLOCK_SIZE || pad > plain.len() {
            return Err(Error::InvalidPadding);
        }
        plain.truncate(plain.len() - pad);
        debug!(
            "decrypted {} ciphertext bytes into {} plaintext bytes",
            cipher.len(),
            plain.len()
        );
        Ok(plain)
    }

    /// Encrypt everything from `input` into `output`. Returns the number of
    /// ciphertext bytes written.
    pub fn encrypt_stream<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<u64> {
        let mut plain = Vec::new();
        input.read_to_end(&mut plain)?;
        let cipher = self.encrypt_bytes(&plain);
        output.write_all(&cipher)?;
        Ok(cipher.len() as u64)
    }

    /// Decrypt everything from `input` into `output`. The plaintext is
    /// buffered and written only after the padding check passes, so a failed
    /// decryption leaves `output` untouched.
    pub fn decrypt_stream<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<u64> {
        let mut cipher = Vec::new();
        input.read_to_end(&mut cipher)?;
        let plain = self.decrypt_bytes(&cipher)?;
        output.write_all(&plain)?;
        Ok(plain.len() as u64)
    }
}

fn unpack_block(bytes: &[u8]) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

fn pack_block(words: [u32; 4], out: &mut Vec<u8>) {
    for word in words {
        out.extend_from_slice(&word.to_le_bytes());
    }
}
