//! Property-based coverage of the cipher, RSA, and hybrid round trips.

use std::io::Cursor;

use num_bigint::{BigUint, RandBigInt};
use proptest::collection::vec;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use serpentseal::serpent::BLOCK_SIZE;
use serpentseal::{hybrid, rsa, sha256, Serpent};

proptest! {
    #[test]
    fn block_round_trip(key in any::<[u8; 32]>(), block in any::<[u32; 4]>()) {
        let cipher = Serpent::new(&key).unwrap();
        prop_assert_eq!(cipher.decrypt_block(cipher.encrypt_block(block)), block);
    }

    #[test]
    fn file_round_trip(key in any::<[u8; 32]>(), plain in vec(any::<u8>(), 0..200)) {
        let cipher = Serpent::new(&key).unwrap();
        let ct = cipher.encrypt_bytes(&plain);
        prop_assert_eq!(cipher.decrypt_bytes(&ct).unwrap(), plain);
    }

    #[test]
    fn ciphertext_length_is_padded_plaintext_length(
        key in any::<[u8; 32]>(),
        plain in vec(any::<u8>(), 0..200),
    ) {
        let cipher = Serpent::new(&key).unwrap();
        let ct = cipher.encrypt_bytes(&plain);
        prop_assert_eq!(ct.len(), (plain.len() / BLOCK_SIZE + 1) * BLOCK_SIZE);
    }

    #[test]
    fn block_multiple_plaintexts_round_trip(key in any::<[u8; 32]>(), blocks in 1usize..6) {
        // Lengths already on the 16-byte boundary still gain and shed a
        // whole padding block.
        let cipher = Serpent::new(&key).unwrap();
        let plain = vec![0x7fu8; blocks * BLOCK_SIZE];
        let ct = cipher.encrypt_bytes(&plain);
        prop_assert_eq!(ct.len(), plain.len() + BLOCK_SIZE);
        prop_assert_eq!(cipher.decrypt_bytes(&ct).unwrap(), plain);
    }

    #[test]
    fn digest_is_stable_and_input_sensitive(data in vec(any::<u8>(), 0..300)) {
        let d = sha256::digest(&data);
        prop_assert_eq!(d, sha256::digest(&data));
        let mut tweaked = data.clone();
        tweaked.push(0x00);
        prop_assert_ne!(d, sha256::digest(&tweaked));
    }
}

#[test]
fn rsa_round_trip_over_random_messages() {
    let pair = rsa::keygen(512).unwrap();
    let public = pair.public_key();
    let private = pair.private_key();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..16 {
        let m = rng.gen_biguint_below(&pair.n);
        let c = rsa::encrypt(&m, &public).unwrap();
        assert_eq!(rsa::decrypt(&c, &private).unwrap(), m);
    }
}

#[test]
fn rsa_round_trip_at_the_modulus_edges() {
    use num_traits::{One, Zero};
    let pair = rsa::keygen(512).unwrap();
    for m in [BigUint::zero(), BigUint::one(), &pair.n - 1u8] {
        let c = rsa::encrypt(&m, &pair.public_key()).unwrap();
        assert_eq!(rsa::decrypt(&c, &pair.private_key()).unwrap(), m);
    }
}

#[test]
fn hybrid_round_trip_over_random_buffers() {
    let pair = rsa::keygen(1024).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    for len in [0usize, 1, 16, 31, 257] {
        let plain: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        let mut sealed_file = Vec::new();
        let envelope =
            hybrid::encrypt(Cursor::new(&plain), &mut sealed_file, &pair.public_key()).unwrap();
        assert_eq!(sealed_file.len(), (plain.len() / BLOCK_SIZE + 1) * BLOCK_SIZE);

        let mut recovered = Vec::new();
        let digest = hybrid::decrypt(
            Cursor::new(&sealed_file),
            &mut recovered,
            &envelope.sealed_key,
            &pair.private_key(),
        )
        .unwrap();
        assert_eq!(recovered, plain);
        assert_eq!(digest, envelope.digest);
        assert_eq!(digest, sha256::digest(&plain));
    }
}
