// RSA decryption: m = c^d mod n

use num_bigint::BigUint;

use super::RsaPrivateKey;
use crate::bigint;
use crate::error::{Error, Result};

/// Decrypt the integer `c` under the private key. `c` must be smaller than
/// the modulus.
pub fn decrypt(c: &BigUint, key: &RsaPrivateKey) -> Result<BigUint> {
    if *c >= key.n {
        return Err(Error::InvalidArgument(
            "ciphertext must be smaller than the modulus".to_string(),
        ));
    }
    Ok(bigint::powm(c, &key.d, &key.n))
}
