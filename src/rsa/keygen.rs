// RSA key generation
// Two probable primes of half the requested width, e = 65537 with a random
// odd fallback, d by modular inversion

use log::{debug, info};
use num_bigint::BigUint;
use num_traits::One;

use super::RsaKeyPair;
use crate::bigint;
use crate::error::{Error, Result};

/// Default public exponent.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Generate an RSA key pair with a modulus of roughly `bits` bits.
///
/// Prime search can take tens to hundreds of milliseconds; this is a
/// foreground operation by design.
pub fn keygen(bits: u64) -> Result<RsaKeyPair> {
    if bits < 256 {
        return Err(Error::InvalidArgument(format!(
            "modulus of {bits} bits is too small, need at least 256"
        )));
    }

    let half = bits / 2;
    debug!("searching for primes of {half} and {} bits", bits - half);
    let p = bigint::next_prime(&bigint::random_bits(half));
    let mut q = bigint::next_prime(&bigint::random_bits(bits - half));
    while p == q {
        q = bigint::next_prime(&bigint::random_bits(bits - half));
    }

    let n = &p * &q;
    let phi = (&p - 1u8) * (&q - 1u8);

    let mut e = BigUint::from(PUBLIC_EXPONENT);
    if !bigint::gcd(&e, &phi).is_one() {
        // 65537 divides phi for this draw; fall back to random odd exponents
        debug!("default exponent not coprime with phi, resampling");
        loop {
            e = bigint::random_range(&BigUint::from(3u8), &phi) | BigUint::one();
            if bigint::gcd(&e, &phi).is_one() {
                break;
            }
        }
    }

    let d = bigint::invert(&e, &phi).ok_or_else(|| {
        Error::Internal("modular inverse of e mod phi(n) does not exist".to_string())
    })?;

    info!("generated RSA key pair with a {}-bit modulus", n.bits());
    Ok(RsaKeyPair { n, e, d })
}
