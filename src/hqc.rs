//! The HQC public-key encryption primitive wrapped by the KEM.
//!
//! Key generation expands the secret seed into the sparse pair (x, y) and the
//! public seed of the dense h, publishing s = x + h*y. Encryption hides the
//! encoded message under s*r2 + e; decryption strips u*y and hands the noisy
//! codeword to the concatenated decoder. The u*y product runs through the
//! masked multiplier, with the ciphertext contribution held in shared form
//! until just before decoding.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::byte_fns::{vect_from_bytes, vect_to_bytes};
use crate::code::{code_decode, code_encode};
use crate::gf2x::{safe_mul, vect_mul};
use crate::params::{Params, SEED_BYTES, SIGMA_BYTES, VEC_N_64, WEIGHT_MAX};
use crate::shake_prng::{G_FCT_DOMAIN, SEEDEXPANDER_DOMAIN, SeedExpander};
use crate::shares::Shares;
use crate::vect::{
    vect_add, vect_resize, vect_set_random, vect_set_random_fixed_weight,
    vect_set_random_fixed_weight_by_coordinates,
};
use crate::MASKS;

/// Generates a keypair into the serialized buffers `pk` and `sk`.
///
/// The secret seed determines x, y and the h-seed; sigma feeds the implicit
/// rejection of the KEM layer and rides along in the secret key.
#[allow(clippy::many_single_char_names)]
pub(crate) fn hqc_pke_keygen(
    rng: &mut impl CryptoRngCore, pk: &mut [u8], sk: &mut [u8], p: &Params,
) -> Result<(), &'static str> {
    let mut sk_seed = [0u8; SEED_BYTES];
    rng.try_fill_bytes(&mut sk_seed)
        .map_err(|_| "keygen: random number generator failed for the secret seed")?;
    let mut sigma = [0u8; SIGMA_BYTES];
    rng.try_fill_bytes(&mut sigma)
        .map_err(|_| "keygen: random number generator failed for sigma")?;

    let mut sk_expander = SeedExpander::new(&sk_seed, SEEDEXPANDER_DOMAIN);
    let mut x = [0u64; VEC_N_64];
    vect_set_random_fixed_weight(&mut sk_expander, &mut x[..p.n_64], usize::from(p.omega), p);
    let mut y = [0u32; WEIGHT_MAX];
    vect_set_random_fixed_weight_by_coordinates(&mut sk_expander, &mut y[..usize::from(p.omega)], p);
    let mut h_seed = [0u8; SEED_BYTES];
    sk_expander.expand(&mut h_seed);

    let mut pk_expander = SeedExpander::new(&h_seed, SEEDEXPANDER_DOMAIN);
    let mut h = [0u64; VEC_N_64];
    vect_set_random(&mut pk_expander, &mut h[..p.n_64], p);

    // s = x + h * y
    let mut hy = [0u64; VEC_N_64];
    vect_mul(&mut hy[..p.n_64], &y[..usize::from(p.omega)], &h[..p.n_64], &mut sk_expander, p);
    let mut s = [0u64; VEC_N_64];
    vect_add(&mut s[..p.n_64], &x[..p.n_64], &hy[..p.n_64]);

    pk[..SEED_BYTES].copy_from_slice(&h_seed);
    vect_to_bytes(&mut pk[SEED_BYTES..], &s[..p.n_64]);
    sk[..SEED_BYTES].copy_from_slice(&sk_seed);
    sk[SEED_BYTES..SEED_BYTES + SIGMA_BYTES].copy_from_slice(&sigma);
    sk[SEED_BYTES + SIGMA_BYTES..].copy_from_slice(&pk[..p.public_key_bytes]);

    sk_seed.zeroize();
    sigma.zeroize();
    x.zeroize();
    y.zeroize();
    hy.zeroize();
    Ok(())
}


/// Encrypts `m` under `pk` into (u, v), fully determined by `theta`.
///
/// The theta expander supplies r1, r2 and e and then the multiplication
/// schedules, so identical theta yields identical ciphertext bytes whatever
/// the compiled share count.
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub(crate) fn hqc_pke_encrypt(
    u: &mut [u64], v: &mut [u64], m: &[u8], theta: &[u8; 64], pk: &[u8], p: &Params,
) {
    let mut vec_expander = SeedExpander::new(theta, G_FCT_DOMAIN);

    let mut pk_expander = SeedExpander::new(&pk[..SEED_BYTES], SEEDEXPANDER_DOMAIN);
    let mut h = [0u64; VEC_N_64];
    vect_set_random(&mut pk_expander, &mut h[..p.n_64], p);
    let mut s = [0u64; VEC_N_64];
    vect_from_bytes(&mut s[..p.n_64], &pk[SEED_BYTES..]);
    s[p.n_64 - 1] &= p.red_mask;

    let mut r1 = [0u64; VEC_N_64];
    vect_set_random_fixed_weight(&mut vec_expander, &mut r1[..p.n_64], usize::from(p.omega_r), p);
    let mut r2 = [0u32; WEIGHT_MAX];
    vect_set_random_fixed_weight_by_coordinates(
        &mut vec_expander,
        &mut r2[..usize::from(p.omega_r)],
        p,
    );
    let mut e = [0u64; VEC_N_64];
    vect_set_random_fixed_weight(&mut vec_expander, &mut e[..p.n_64], usize::from(p.omega_e), p);

    // u = r1 + h * r2
    let mut tmp = [0u64; VEC_N_64];
    vect_mul(&mut tmp[..p.n_64], &r2[..usize::from(p.omega_r)], &h[..p.n_64], &mut vec_expander, p);
    vect_add(u, &r1[..p.n_64], &tmp[..p.n_64]);

    // v = truncate(encode(m) + s * r2 + e)
    let mut t = [0u64; VEC_N_64];
    code_encode(&mut t[..p.n_64], m, p);
    vect_mul(&mut tmp[..p.n_64], &r2[..usize::from(p.omega_r)], &s[..p.n_64], &mut vec_expander, p);
    for ((t_i, tmp_i), e_i) in t.iter_mut().zip(tmp.iter()).zip(e.iter()).take(p.n_64) {
        *t_i ^= tmp_i ^ e_i;
    }
    vect_resize(v, p.n1 * p.n2, &t[..p.n_64], p.n);

    r1.zeroize();
    r2.zeroize();
    e.zeroize();
    tmp.zeroize();
}


/// Decrypts (u, v) with the secret key, writing the k-byte message.
///
/// y is re-derived by replaying the secret-seed stream. The rng feeds only
/// the masking and schedule randomness; the recovered message does not depend
/// on it.
#[allow(clippy::many_single_char_names)]
pub(crate) fn hqc_pke_decrypt(
    m: &mut [u8], u: &[u64], v: &[u64], sk: &[u8], rng: &mut impl CryptoRngCore, p: &Params,
) -> Result<(), &'static str> {
    let mut sk_expander = SeedExpander::new(&sk[..SEED_BYTES], SEEDEXPANDER_DOMAIN);
    let mut x = [0u64; VEC_N_64];
    vect_set_random_fixed_weight(&mut sk_expander, &mut x[..p.n_64], usize::from(p.omega), p);
    let mut y = [0u32; WEIGHT_MAX];
    vect_set_random_fixed_weight_by_coordinates(&mut sk_expander, &mut y[..usize::from(p.omega)], p);

    let mut sched_seed = [0u8; SEED_BYTES];
    rng.try_fill_bytes(&mut sched_seed)
        .map_err(|_| "decrypt: random number generator failed for the masking schedule")?;
    let mut sched_expander = SeedExpander::new(&sched_seed, SEEDEXPANDER_DOMAIN);

    let mut uy = Shares::<MASKS>::new();
    safe_mul(&mut uy, &y[..usize::from(p.omega)], u, &mut sched_expander, p);

    // keep v shared while adding u * y, recombine only for the decoder
    let mut v_full = [0u64; VEC_N_64];
    vect_resize(&mut v_full[..p.n_64], p.n, v, p.n1 * p.n2);
    let mut masked = Shares::<MASKS>::from_dense(&v_full[..p.n_64]);
    masked.xor_assign(&uy);
    let mut noisy = [0u64; VEC_N_64];
    masked.combine(&mut noisy[..p.n_64]);

    code_decode(m, &noisy[..p.n_64], p);

    x.zeroize();
    y.zeroize();
    noisy.zeroize();
    sched_seed.zeroize();
    Ok(())
}


#[cfg(test)]
mod tests {
    use rand_core::SeedableRng;

    use super::{hqc_pke_decrypt, hqc_pke_encrypt, hqc_pke_keygen};
    use crate::params::{HQC_128, K_MAX, VEC_N_64};
    use crate::shake_prng::{H_FCT_DOMAIN, shake256_512_ds};

    #[test]
    fn encrypt_decrypt_round_trip() {
        let p = &HQC_128;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        let mut pk = [0u8; 2249];
        let mut sk = [0u8; 2353];
        hqc_pke_keygen(&mut rng, &mut pk, &mut sk, p).unwrap();

        let m = [0x5au8; 16];
        let theta = shake256_512_ds(H_FCT_DOMAIN, &[&m]);
        let mut u = [0u64; VEC_N_64];
        let mut v = [0u64; VEC_N_64];
        hqc_pke_encrypt(&mut u[..p.n_64], &mut v[..p.n1n2_64], &m, &theta, &pk, p);

        let mut decrypted = [0u8; K_MAX];
        hqc_pke_decrypt(&mut decrypted[..p.k], &u[..p.n_64], &v[..p.n1n2_64], &sk, &mut rng, p)
            .unwrap();
        assert_eq!(decrypted[..p.k], m);
    }

    #[test]
    fn ciphertext_is_deterministic_in_theta() {
        let p = &HQC_128;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(45);
        let mut pk = [0u8; 2249];
        let mut sk = [0u8; 2353];
        hqc_pke_keygen(&mut rng, &mut pk, &mut sk, p).unwrap();

        let m = [7u8; 16];
        let theta = shake256_512_ds(H_FCT_DOMAIN, &[&m, &[1u8]]);
        let mut u1 = [0u64; VEC_N_64];
        let mut v1 = [0u64; VEC_N_64];
        let mut u2 = [0u64; VEC_N_64];
        let mut v2 = [0u64; VEC_N_64];
        hqc_pke_encrypt(&mut u1[..p.n_64], &mut v1[..p.n1n2_64], &m, &theta, &pk, p);
        hqc_pke_encrypt(&mut u2[..p.n_64], &mut v2[..p.n1n2_64], &m, &theta, &pk, p);
        assert_eq!(u1, u2);
        assert_eq!(v1, v2);
    }
}
