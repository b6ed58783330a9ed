// Big integer operations for the RSA primitive
// Thin adapter around num-bigint plus the process-wide seedable PRNG

use std::sync::{Mutex, OnceLock};

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Miller-Rabin witness count used for primality checks.
const PRIMALITY_ROUNDS: u32 = 20;

static RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();

fn rng() -> &'static Mutex<StdRng> {
    RNG.get_or_init(|| Mutex::new(StdRng::from_entropy()))
}

/// Replace the process PRNG with a deterministic one. Intended for tests
/// that need reproducible key material.
pub fn reseed(seed: u64) {
    *rng().lock().expect("PRNG lock poisoned") = StdRng::seed_from_u64(seed);
}

/// Uniform random integer of exactly `bits` bits: the top bit is forced to 1
/// so the result lies in `[2^(bits-1), 2^bits)`. Zero bits yields zero.
pub fn random_bits(bits: u64) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }
    let mut x = rng().lock().expect("PRNG lock poisoned").gen_biguint(bits);
    x |= BigUint::one() << (bits - 1);
    x
}

/// Uniform random integer in `[low, high)`.
pub fn random_range(low: &BigUint, high: &BigUint) -> BigUint {
    rng()
        .lock()
        .expect("PRNG lock poisoned")
        .gen_biguint_range(low, high)
}

/// Modular exponentiation: `base^exp mod modulus`. The modulus must be
/// positive.
pub fn powm(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Greatest common divisor.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Modular inverse: `x` with `a * x ≡ 1 (mod m)`, or `None` when `a` and
/// `m` are not coprime.
pub fn invert(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());
    let ext = a.extended_gcd(&m);
    if !ext.gcd.is_one() {
        return None;
    }
    ext.x.mod_floor(&m).to_biguint()
}

/// Miller-Rabin probabilistic primality test. Witnesses come from the
/// process PRNG so a reseed fixes the whole key-generation sequence.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u8);
    let three = BigUint::from(3u8);
    if *n < two {
        return false;
    }
    if *n == two || *n == three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd.
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let n_minus_two = n - 2u8;
    for _ in 0..PRIMALITY_ROUNDS {
        let a = random_range(&two, &n_minus_two);
        let mut x = powm(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        let mut witnessed = true;
        for _ in 1..s {
            x = powm(&x, &two, n);
            if x == n_minus_one {
                witnessed = false;
                break;
            }
        }
        if witnessed {
            return false;
        }
    }
    true
}

/// Smallest probable prime strictly greater than `x`.
pub fn next_prime(x: &BigUint) -> BigUint {
    let two = BigUint::from(2u8);
    if *x < two {
        return two;
    }
    let mut candidate = x + 1u8;
    if candidate.is_even() {
        candidate += 1u8;
    }
    while !is_probable_prime(&candidate) {
        candidate += 2u8;
    }
    candidate
}

/// Parse an ASCII decimal integer. Anything but digits is rejected.
pub fn parse_decimal(s: &str) -> Result<BigUint> {
    s.parse::<BigUint>()
        .map_err(|_| Error::InvalidArgument(format!("not a decimal integer: {s:?}")))
}
