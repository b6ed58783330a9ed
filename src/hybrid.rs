//! Hybrid workflow: RSA seals a fresh 256-bit session key, Serpent carries
//! the bulk bytes, and SHA-256 digests the plaintext on both sides.

use std::io::{Read, Write};

use log::{debug, info};
use num_bigint::BigUint;

use crate::error::Result;
use crate::rsa::{self, RsaPrivateKey, RsaPublicKey};
use crate::serpent::Serpent;
use crate::{bigint, sha256};

/// Session keys are 256-bit integers, matching Serpent's key width.
pub const SESSION_KEY_BITS: u64 = 256;

/// Draw a fresh random session key.
pub fn generate_session_key() -> BigUint {
    bigint::random_bits(SESSION_KEY_BITS)
}

/// Seal a session key under an RSA public key. The token is the ASCII
/// decimal form of the RSA ciphertext, with no surrounding whitespace.
pub fn seal_session_key(session_key: &BigUint, key: &RsaPublicKey) -> Result<String> {
    Ok(rsa::encrypt(session_key, key)?.to_string())
}

/// Recover a session key from a sealed token.
pub fn open_session_key(token: &str, key: &RsaPrivateKey) -> Result<BigUint> {
    let sealed = bigint::parse_decimal(token.trim())?;
    rsa::decrypt(&sealed, key)
}

/// What an encryption hands back besides the ciphertext stream: the sealed
/// session key for the receiver and the digest of the plaintext.
pub struct Envelope {
    pub sealed_key: String,
    pub digest: [u8; 32],
}

/// Encrypt `input` into `output`: generate a session key, seal it for the
/// holder of `key`, and run the Serpent file mode under it.
pub fn encrypt<R: Read, W: Write>(mut input: R, mut output: W, key: &RsaPublicKey) -> Result<Envelope> {
    let mut plain = Vec::new();
    input.read_to_end(&mut plain)?;
    let digest = sha256::digest(&plain);

    let session_key = generate_session_key();
    let sealed_key = seal_session_key(&session_key, key)?;
    debug!("sealed a fresh {SESSION_KEY_BITS}-bit session key");

    let cipher = Serpent::from_session_key(&session_key);
    output.write_all(&cipher.encrypt_bytes(&plain))?;
    info!("encrypted {} bytes", plain.len());

    Ok(Envelope { sealed_key, digest })
}

/// Decrypt `input` into `output` with the session key recovered from
/// `token`. Plaintext is written only after the padding check passes;
/// returns its digest for comparison against the sender's.
pub fn decrypt<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    token: &str,
    key: &RsaPrivateKey,
) -> Result<[u8; 32]> {
    let session_key = open_session_key(token, key)?;
    let cipher = Serpent::from_session_key(&session_key);

    let mut sealed = Vec::new();
    input.read_to_end(&mut sealed)?;
    let plain = cipher.decrypt_bytes(&sealed)?;
    output.write_all(&plain)?;
    info!("decrypted {} bytes", plain.len());

    Ok(sha256::digest(&plain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_session_key_seal_round_trip() {
        let pair = rsa::keygen(1024).unwrap();
        let session_key = generate_session_key();
        assert_eq!(session_key.bits(), SESSION_KEY_BITS);

        let token = seal_session_key(&session_key, &pair.public_key()).unwrap();
        assert!(token.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(
            open_session_key(&token, &pair.private_key()).unwrap(),
            session_key
        );
    }

    #[test]
    fn test_open_tolerates_surrounding_whitespace() {
        let pair = rsa::keygen(512).unwrap();
        let session_key = BigUint::from(0xfeed_beefu32);
        let token = seal_session_key(&session_key, &pair.public_key()).unwrap();
        let decorated = format!("  {token}\n");
        assert_eq!(
            open_session_key(&decorated, &pair.private_key()).unwrap(),
            session_key
        );
    }

    #[test]
    fn test_full_round_trip() {
        let pair = rsa::keygen(1024).unwrap();
        let plain = b"the sender and receiver share a process".to_vec();

        let mut sealed_file = Vec::new();
        let envelope = encrypt(Cursor::new(&plain), &mut sealed_file, &pair.public_key()).unwrap();
        assert_eq!(envelope.digest, sha256::digest(&plain));
        assert_ne!(sealed_file, plain);

        let mut recovered = Vec::new();
        let digest = decrypt(
            Cursor::new(&sealed_file),
            &mut recovered,
            &envelope.sealed_key,
            &pair.private_key(),
        )
        .unwrap();
        assert_eq!(recovered, plain);
        assert_eq!(digest, envelope.digest);
    }

    #[test]
    fn test_wrong_key_does_not_recover_plaintext() {
        let sender = rsa::keygen(512).unwrap();
        let stranger = rsa::keygen(512).unwrap();
        let plain = b"not for you".to_vec();

        let mut sealed_file = Vec::new();
        let envelope =
            encrypt(Cursor::new(&plain), &mut sealed_file, &sender.public_key()).unwrap();

        let mut recovered = Vec::new();
        let result = decrypt(
            Cursor::new(&sealed_file),
            &mut recovered,
            &envelope.sealed_key,
            &stranger.private_key(),
        );
        match result {
            Err(_) => assert!(recovered.is_empty()),
            Ok(_) => assert_ne!(recovered, plain),
        }
    }
}
