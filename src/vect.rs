//! Vector sampling and utilities: uniform dense vectors, fixed-weight sparse
//! vectors by rejection sampling, XOR addition, resizing and the constant-time
//! comparison used by decapsulation.

use subtle::{Choice, ConstantTimeEq};

use crate::byte_fns::vect_from_bytes;
use crate::params::{Params, VEC_N_BYTES, WEIGHT_MAX};
use crate::shake_prng::SeedExpander;


/// Samples `coords.len()` distinct positions in `[0, n)`, uniformly, storing
/// the vector by coordinates.
///
/// Each candidate is a 24-bit draw from the seed expander, rejected when it
/// reaches `rejection_threshold` = floor(2^24/n)*n so that the residue mod n
/// is unbiased. A candidate equal to an already-accepted position leaves the
/// slot open for the next draw; the duplicate scan never short-circuits.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn vect_set_random_fixed_weight_by_coordinates(
    ctx: &mut SeedExpander, coords: &mut [u32], p: &Params,
) {
    let weight = coords.len();
    let batch = 3 * weight;
    let mut rand_bytes = [0u8; 3 * WEIGHT_MAX];
    let mut j = batch; // forces the initial refill
    let mut i = 0;
    while i < weight {
        let mut r;
        loop {
            if j == batch {
                ctx.expand(&mut rand_bytes[..batch]);
                j = 0;
            }
            r = u32::from(rand_bytes[j]) << 16
                | u32::from(rand_bytes[j + 1]) << 8
                | u32::from(rand_bytes[j + 2]);
            j += 3;
            if r < p.rejection_threshold {
                break;
            }
        }
        coords[i] = (r as usize % p.n) as u32;
        let mut inc = 1;
        for &prev in &coords[..i] {
            if prev == coords[i] {
                inc = 0;
            }
        }
        i += inc;
    }
}


/// Samples a dense vector of Hamming weight `weight`; draws the coordinate
/// form and scatters it, consuming exactly the expander bytes the coordinate
/// sampler does.
pub(crate) fn vect_set_random_fixed_weight(
    ctx: &mut SeedExpander, v: &mut [u64], weight: usize, p: &Params,
) {
    let mut tmp = [0u32; WEIGHT_MAX];
    vect_set_random_fixed_weight_by_coordinates(ctx, &mut tmp[..weight], p);
    for word in v.iter_mut() {
        *word = 0;
    }
    for &c in &tmp[..weight] {
        v[(c >> 6) as usize] |= 1u64 << (c & 63);
    }
}


/// Draws a uniform n-bit dense vector and applies the top-word mask.
pub(crate) fn vect_set_random(ctx: &mut SeedExpander, v: &mut [u64], p: &Params) {
    let mut rand_bytes = [0u8; VEC_N_BYTES];
    ctx.expand(&mut rand_bytes[..p.n_bytes]);
    vect_from_bytes(&mut v[..p.n_64], &rand_bytes[..p.n_bytes]);
    v[p.n_64 - 1] &= p.red_mask;
}


/// o = a + b over GF(2), component-wise.
pub(crate) fn vect_add(o: &mut [u64], a: &[u64], b: &[u64]) {
    for (o_i, (a_i, b_i)) in o.iter_mut().zip(a.iter().zip(b.iter())) {
        *o_i = a_i ^ b_i;
    }
}


/// Constant-time equality of two packed vectors.
pub(crate) fn vect_compare(a: &[u64], b: &[u64]) -> Choice { a.ct_eq(b) }


/// Re-bit-lengths `v` (of `size_v` bits) into `o` (of `size_o` bits), masking
/// unused high bits when truncating and zero-extending otherwise.
pub(crate) fn vect_resize(o: &mut [u64], size_o: usize, v: &[u64], size_v: usize) {
    for word in o.iter_mut() {
        *word = 0;
    }
    let bits = core::cmp::min(size_o, size_v);
    let words = (bits + 63) / 64;
    o[..words].copy_from_slice(&v[..words]);
    if size_o < size_v && size_o % 64 != 0 {
        o[words - 1] &= (1u64 << (size_o % 64)) - 1;
    }
}
