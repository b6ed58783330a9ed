//! Key schedule: a 256-bit seed expands into 140 prekey words and then 33
//! round keys of four words each.

use super::transforms::apply_sbox;
use super::{KEY_SIZE, ROUNDS};

const PHI: u32 = 0x9e37_79b9;

/// Expand 32 key bytes into the full subkey table. The words `w[0..8]` are
/// read little-endian from the key; the rest follow the golden-ratio
/// recurrence. Each subkey quadruple passes through S-box `(8 + 3 - i) % 8`
/// on the packed words; the table is consumed without a further transpose.
pub(crate) fn derive_subkeys(key: &[u8; KEY_SIZE]) -> [[u32; 4]; ROUNDS + 1] {
    let mut w = [0u32; 140];
    for (i, chunk) in key.chunks_exact(4).enumerate() {
        w[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for i in 8..140 {
        w[i] = (w[i - 8] ^ w[i - 5] ^ w[i - 3] ^ w[i - 1] ^ PHI ^ (i as u32 - 8)).rotate_left(11);
    }

    let mut subkeys = [[0u32; 4]; ROUNDS + 1];
    for (i, subkey) in subkeys.iter_mut().enumerate() {
        let mut quad = [w[4 * i + 8], w[4 * i + 9], w[4 * i + 10], w[4 * i + 11]];
        apply_sbox((8 + 3 - i % 8) % 8, &mut quad);
        *subkey = quad;
    }
    subkeys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_deterministic() {
        let key = [0x5au8; 32];
        assert_eq!(derive_subkeys(&key), derive_subkeys(&key));
    }

    #[test]
    fn zero_key_still_produces_mixed_subkeys() {
        // The recurrence folds PHI and the index in, so even an all-zero
        // seed cannot yield an all-zero table.
        let subkeys = derive_subkeys(&[0u8; 32]);
        assert!(subkeys.iter().flatten().any(|&word| word != 0));
    }

    #[test]
    fn distinct_keys_produce_distinct_tables() {
        let mut other = [0u8; 32];
        other[0] = 1;
        assert_ne!(derive_subkeys(&[0u8; 32]), derive_subkeys(&other));
    }
}
