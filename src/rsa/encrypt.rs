// RSA encryption: c = m^e mod n
// Textbook, no padding: the caller must only seal uniformly random
// integers such as session keys

use num_bigint::BigUint;

use super::RsaPublicKey;
use crate::bigint;
use crate::error::{Error, Result};

/// Encrypt the integer `m` under the public key. `m` must be smaller than
/// the modulus.
pub fn encrypt(m: &BigUint, key: &RsaPublicKey) -> Result<BigUint> {
    if *m >= key.n {
        return Err(Error::InvalidArgument(
            "message must be smaller than the modulus".to_string(),
        ));
    }
    Ok(bigint::powm(m, &key.e, &key.n))
}
