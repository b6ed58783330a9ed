//! Serpent block cipher in its bitsliced form.
//!
//! A 256-bit seed is expanded once into 33 round keys; blocks of 16 bytes
//! are transposed into the bitsliced layout, run through 32 substitution-
//! permutation rounds, and transposed back. The file mode adds PKCS#7
//! padding and ECB-style block concatenation on top.
//!
//! The key schedule's S-box offsets and the packed-subkey convention follow
//! the sealed-file format this tool reads and writes; interoperability with
//! standard Serpent test vectors is a non-goal.

mod schedule;
mod tables;
mod transforms;

mod mode;

use num_bigint::BigUint;
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 16;
/// Key material size in bytes after normalization.
pub const KEY_SIZE: usize = 32;

const ROUNDS: usize = 32;

/// A keyed Serpent instance. Owns its subkey table exclusively; the table
/// is wiped when the value is dropped.
pub struct Serpent {
    subkeys: [[u32; 4]; ROUNDS + 1],
}

impl Serpent {
    /// Key the cipher from exactly 32 bytes of key material.
    pub fn new(key: &[u8]) -> Result<Serpent> {
        let key: &[u8; KEY_SIZE] = key.try_into().map_err(|_| {
            Error::InvalidArgument(format!(
                "Serpent key material must be {KEY_SIZE} bytes, got {}",
                key.len()
            ))
        })?;
        Ok(Serpent {
            subkeys: schedule::derive_subkeys(key),
        })
    }

    /// Key the cipher from a session-key integer, normalized to 32 bytes:
    /// little-endian byte export, zero-padded on the left, and truncated to
    /// the trailing 32 bytes when longer.
    pub fn from_session_key(session_key: &BigUint) -> Serpent {
        let key = normalize_session_key(session_key);
        Serpent {
            subkeys: schedule::derive_subkeys(&key),
        }
    }

    /// Encrypt one block of four little-endian words.
    pub fn encrypt_block(&self, block: [u32; 4]) -> [u32; 4] {
        let mut x = block;
        transforms::transpose(&mut x);
        for r in 0..ROUNDS {
            xor_subkey(&mut x, &self.subkeys[r]);
            transforms::apply_sbox(r % 8, &mut x);
            if r < ROUNDS - 1 {
                transforms::linear_transform(&mut x);
            } else {
                xor_subkey(&mut x, &self.subkeys[ROUNDS]);
            }
        }
        transforms::inverse_transpose(&mut x);
        x
    }

    /// Decrypt one block of four little-endian words.
    pub fn decrypt_block(&self, block: [u32; 4]) -> [u32; 4] {
        let mut x = block;
        transforms::transpose(&mut x);
        xor_subkey(&mut x, &self.subkeys[ROUNDS]);
        for r in (0..ROUNDS).rev() {
            if r < ROUNDS - 1 {
                transforms::inverse_linear_transform(&mut x);
            }
            transforms::apply_inverse_sbox(r % 8, &mut x);
            xor_subkey(&mut x, &self.subkeys[r]);
        }
        transforms::inverse_transpose(&mut x);
        x
    }
}

impl Drop for Serpent {
    fn drop(&mut self) {
        self.subkeys.zeroize();
    }
}

#[inline]
fn xor_subkey(x: &mut [u32; 4], subkey: &[u32; 4]) {
    for (word, k) in x.iter_mut().zip(subkey) {
        *word ^= k;
    }
}

fn normalize_session_key(session_key: &BigUint) -> [u8; KEY_SIZE] {
    let raw = session_key.to_bytes_le();
    let mut key = [0u8; KEY_SIZE];
    if raw.len() >= KEY_SIZE {
        key.copy_from_slice(&raw[raw.len() - KEY_SIZE..]);
    } else {
        key[KEY_SIZE - raw.len()..].copy_from_slice(&raw);
    }
    key
}

/// Component diagnostic: checks that the transpose pair, the linear layer,
/// and all eight S-box pairs each compose to the identity.
pub fn self_test() -> Result<()> {
    let reference = [0x1122_3344u32, 0x5566_7788, 0x99AA_BBCC, 0xDDEE_FF00];

    let mut x = reference;
    transforms::transpose(&mut x);
    transforms::inverse_transpose(&mut x);
    if x != reference {
        return Err(Error::Internal(
            "transpose does not invert cleanly".to_string(),
        ));
    }

    let mut x = reference;
    transforms::linear_transform(&mut x);
    transforms::inverse_linear_transform(&mut x);
    if x != reference {
        return Err(Error::Internal(
            "linear transform does not invert cleanly".to_string(),
        ));
    }

    for which in 0..8 {
        let mut x = reference;
        transforms::apply_sbox(which, &mut x);
        transforms::apply_inverse_sbox(which, &mut x);
        if x != reference {
            return Err(Error::Internal(format!(
                "S-box {which} does not invert cleanly"
            )));
        }
    }

    Ok(())
}
