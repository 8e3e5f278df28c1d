//! Conversion between packed bit-vectors (little-endian 64-bit words, word
//! order ascending by position) and the serialized byte layouts.

/// Writes the low `bytes.len()` bytes of `v`, little-endian within each word.
pub(crate) fn vect_to_bytes(bytes: &mut [u8], v: &[u64]) {
    let full = bytes.len() / 8;
    for (i, word) in v.iter().enumerate().take(full) {
        bytes[8 * i..8 * i + 8].copy_from_slice(&word.to_le_bytes());
    }
    let rem = bytes.len() - 8 * full;
    if rem > 0 {
        bytes[8 * full..].copy_from_slice(&v[full].to_le_bytes()[..rem]);
    }
}


/// Fills `v` from bytes; a trailing partial word is zero-extended.
pub(crate) fn vect_from_bytes(v: &mut [u64], bytes: &[u8]) {
    let full = bytes.len() / 8;
    for (i, word) in v.iter_mut().enumerate().take(full) {
        *word = u64::from_le_bytes(bytes[8 * i..8 * i + 8].try_into().unwrap());
    }
    let rem = bytes.len() - 8 * full;
    if rem > 0 {
        let mut last = [0u8; 8];
        last[..rem].copy_from_slice(&bytes[8 * full..]);
        v[full] = u64::from_le_bytes(last);
    }
}


#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec;
    use alloc::vec::Vec;

    use rand::{Rng, SeedableRng};

    use super::{vect_from_bytes, vect_to_bytes};

    #[test]
    fn roundtrip_with_partial_tail_word() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        for bytes_len in [8usize, 16, 21, 2208, 2209] {
            let words = (bytes_len + 7) / 8;
            let bytes1: Vec<u8> = (0..bytes_len).map(|_| rng.gen()).collect();
            let mut v = vec![0u64; words];
            vect_from_bytes(&mut v, &bytes1);
            let mut bytes2 = vec![0u8; bytes_len];
            vect_to_bytes(&mut bytes2, &v);
            assert_eq!(bytes1, bytes2);
        }
    }

    #[test]
    fn words_are_little_endian() {
        let mut v = [0u64; 2];
        vect_from_bytes(&mut v, &[0x01, 0, 0, 0, 0, 0, 0, 0x80, 0xff]);
        assert_eq!(v[0], 0x8000_0000_0000_0001);
        assert_eq!(v[1], 0xff);
    }
}
