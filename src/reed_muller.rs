//! The inner code: RM(1, 7) first-order Reed-Muller codewords of 128 bits,
//! duplicated `multiplicity` times to fill each n2-bit block.
//!
//! Encoding expands one GF(2^8) symbol into the linear combination selected
//! by its bits (bit 7 complements the whole word). Decoding sums the bits of
//! the duplicated copies per position, runs a fast Walsh-Hadamard transform
//! over the 128 counters and takes the coefficient of largest magnitude: its
//! index recovers bits 0..6 and its sign bit 7. The peak scan is branchless
//! and ties resolve to the lowest index.

use crate::params::Params;

fn bit0mask(bit: u32) -> u32 { 0u32.wrapping_sub(bit & 1) }

// One 128-bit RM(1,7) codeword for one message byte.
fn encode_block(message: u8) -> [u64; 2] {
    let m = u32::from(message);
    let mut first = bit0mask(m >> 7);
    first ^= bit0mask(m) & 0xaaaa_aaaa;
    first ^= bit0mask(m >> 1) & 0xcccc_cccc;
    first ^= bit0mask(m >> 2) & 0xf0f0_f0f0;
    first ^= bit0mask(m >> 3) & 0xff00_ff00;
    first ^= bit0mask(m >> 4) & 0xffff_0000;
    let word0 = first;
    let word1 = first ^ bit0mask(m >> 5);
    let word3 = word1 ^ bit0mask(m >> 6);
    let word2 = word3 ^ bit0mask(m >> 5);
    [u64::from(word0) | u64::from(word1) << 32, u64::from(word2) | u64::from(word3) << 32]
}


// Per-position bit counts across the duplicated copies.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn expand_and_sum(dst: &mut [i32; 128], src: &[u64], multiplicity: usize) {
    for counter in dst.iter_mut() {
        *counter = 0;
    }
    for copy in 0..multiplicity {
        for part in 0..2 {
            let word = src[2 * copy + part];
            for bit in 0..64 {
                dst[64 * part + bit] += (word >> bit & 1) as i32;
            }
        }
    }
}


// Seven butterfly passes alternating between the two buffers; the transform
// ends up in `b`.
fn hadamard(a: &mut [i32; 128], b: &mut [i32; 128]) {
    let (mut src, mut dst) = (a, b);
    for _pass in 0..7 {
        for i in 0..64 {
            dst[i] = src[2 * i] + src[2 * i + 1];
            dst[i + 64] = src[2 * i] - src[2 * i + 1];
        }
        core::mem::swap(&mut src, &mut dst);
    }
}


// Branchless scan for the transform coefficient of largest magnitude.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn find_peaks(transform: &[i32; 128]) -> u8 {
    let mut peak_abs = -1i32;
    let mut peak = 0i32;
    let mut pos = 0i32;
    for (i, &t) in transform.iter().enumerate() {
        let sign = t >> 31;
        let absolute = (t ^ sign) - sign;
        let bigger = 0i32.wrapping_sub(((peak_abs - absolute) >> 31) & 1);
        peak ^= bigger & (peak ^ t);
        pos ^= bigger & (pos ^ i as i32);
        peak_abs ^= bigger & (peak_abs ^ absolute);
    }
    // a positive peak means the complemented codeword is the nearer one
    pos |= 128 & (((peak >> 31) & 1) - 1);
    pos as u8
}


fn decode_block(src: &[u64], multiplicity: usize) -> u8 {
    let mut counters = [0i32; 128];
    let mut scratch = [0i32; 128];
    expand_and_sum(&mut counters, src, multiplicity);
    hadamard(&mut counters, &mut scratch);
    // remove the expand bias so coefficients are centered
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    {
        scratch[0] -= 64 * multiplicity as i32;
    }
    find_peaks(&scratch)
}


/// Encodes the n1 symbols of `msg` into consecutive n2-bit blocks of `cdw`.
pub(crate) fn reed_muller_encode(cdw: &mut [u64], msg: &[u8], p: &Params) {
    let block_words = p.n2 / 64;
    for (i, &byte) in msg.iter().enumerate().take(p.n1) {
        let codeword = encode_block(byte);
        let base = i * block_words;
        for copy in 0..p.multiplicity {
            cdw[base + 2 * copy] = codeword[0];
            cdw[base + 2 * copy + 1] = codeword[1];
        }
    }
}


/// Decodes each n2-bit block of `cdw` back into one symbol of `msg`.
pub(crate) fn reed_muller_decode(msg: &mut [u8], cdw: &[u64], p: &Params) {
    let block_words = p.n2 / 64;
    for (i, byte) in msg.iter_mut().enumerate().take(p.n1) {
        let base = i * block_words;
        *byte = decode_block(&cdw[base..base + block_words], p.multiplicity);
    }
}


#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::{decode_block, encode_block};
    use crate::params::{HQC_128, HQC_192};

    #[test]
    fn every_byte_round_trips() {
        for multiplicity in [3usize, 5] {
            for value in 0..=255u8 {
                let codeword = encode_block(value);
                let mut block = [0u64; 10];
                for copy in 0..multiplicity {
                    block[2 * copy] = codeword[0];
                    block[2 * copy + 1] = codeword[1];
                }
                assert_eq!(decode_block(&block[..2 * multiplicity], multiplicity), value);
            }
        }
    }

    #[test]
    fn codewords_are_linear_in_the_message() {
        // c(a ^ b) = c(a) ^ c(b): RM(1,7) is a linear code
        for (a, b) in [(0x13u8, 0x8fu8), (0xff, 0x01), (0x55, 0xaa)] {
            let (ca, cb, cab) = (encode_block(a), encode_block(b), encode_block(a ^ b));
            assert_eq!([ca[0] ^ cb[0], ca[1] ^ cb[1]], cab);
        }
    }

    #[test]
    fn equidistant_blocks_resolve_to_the_lowest_candidate() {
        // Move codeword(0x01) halfway toward codeword(0x02): the received
        // block ties between several codewords and the branchless peak scan
        // must keep the first candidate it sees.
        let multiplicity = 3;
        let (a, b) = (encode_block(0x01), encode_block(0x02));
        let halfway = 0x2222_2222_2222_2222u64;
        let mixed = [a[0] ^ ((a[0] ^ b[0]) & halfway), a[1] ^ ((a[1] ^ b[1]) & halfway)];
        let mut block = [0u64; 6];
        for copy in 0..multiplicity {
            block[2 * copy] = mixed[0];
            block[2 * copy + 1] = mixed[1];
        }

        let dist = |target: [u64; 2]| -> u32 {
            (mixed[0] ^ target[0]).count_ones() + (mixed[1] ^ target[1]).count_ones()
        };
        let mut nearest = 0u8;
        let mut nearest_dist = u32::MAX;
        let mut ties = 0;
        for cand in 0..=255u8 {
            let d = dist(encode_block(cand));
            if d < nearest_dist {
                nearest = cand;
                nearest_dist = d;
                ties = 1;
            } else if d == nearest_dist {
                ties += 1;
            }
        }
        assert!(ties > 1, "construction must be ambiguous");
        assert_eq!(decode_block(&block, multiplicity), nearest);
    }

    #[test]
    fn decodes_under_bounded_noise() {
        // duplicated minimum distance is 64 * multiplicity, so anything below
        // 32 * multiplicity flipped bits per block must decode
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        for p in [&HQC_128, &HQC_192] {
            let multiplicity = p.multiplicity;
            for _trial in 0..200 {
                let value: u8 = rng.gen();
                let codeword = encode_block(value);
                let mut block = [0u64; 10];
                for copy in 0..multiplicity {
                    block[2 * copy] = codeword[0];
                    block[2 * copy + 1] = codeword[1];
                }
                let flips = rng.gen_range(0..32 * multiplicity);
                for _ in 0..flips {
                    let bit = rng.gen_range(0..p.n2);
                    block[bit / 64] ^= 1u64 << (bit % 64);
                }
                assert_eq!(decode_block(&block[..2 * multiplicity], multiplicity), value);
            }
        }
    }
}
