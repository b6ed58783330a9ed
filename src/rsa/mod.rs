// RSA module - textbook RSA over the bigint adapter
// Key records, keygen, encrypt/decrypt, and the n/e/d key file format

pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use decrypt::decrypt;
pub use encrypt::encrypt;
pub use keygen::keygen;

use std::io::{Read, Write};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bigint;
use crate::error::{Error, Result};

/// Public portion of a key: modulus and public exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

/// Private portion of a key: modulus and private exponent. The exponent is
/// cleared when the value is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: BigUint,
    pub d: BigUint,
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.set_zero();
    }
}

/// A full key record `(n, e, d)` as produced by [`keygen`]. Never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
}

impl RsaKeyPair {
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub fn private_key(&self) -> RsaPrivateKey {
        RsaPrivateKey {
            n: self.n.clone(),
            d: self.d.clone(),
        }
    }

    /// Bit length of the modulus.
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Write the key as three ASCII decimal integers, one per line, in the
    /// order `n`, `e`, `d`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", self.n)?;
        writeln!(writer, "{}", self.e)?;
        writeln!(writer, "{}", self.d)?;
        Ok(())
    }

    /// Read a key written by [`RsaKeyPair::write_to`]. Any whitespace
    /// between the three integers is accepted.
    pub fn read_from<R: Read>(mut reader: R) -> Result<RsaKeyPair> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace();
        let mut field = |name: &str| match tokens.next() {
            Some(token) => bigint::parse_decimal(token),
            None => Err(Error::InvalidArgument(format!(
                "key file is missing the {name} field"
            ))),
        };
        let n = field("n")?;
        let e = field("e")?;
        let d = field("d")?;
        Ok(RsaKeyPair { n, e, d })
    }
}

impl Drop for RsaKeyPair {
    fn drop(&mut self) {
        self.d.set_zero();
    }
}
