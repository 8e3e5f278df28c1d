//! The IND-CCA2 encapsulation mechanism over the PKE: domain-separated theta
//! derivation, re-encryption check and branchless selection between the
//! candidate and the sigma-derived fallback secret.

use rand_core::CryptoRngCore;
use subtle::ConditionallySelectable;
use zeroize::Zeroize;

use crate::byte_fns::{vect_from_bytes, vect_to_bytes};
use crate::hqc::{hqc_pke_decrypt, hqc_pke_encrypt, hqc_pke_keygen};
use crate::params::{K_MAX, Params, SALT_BYTES, SEED_BYTES, SIGMA_BYTES, VEC_N_64};
use crate::shake_prng::{H_FCT_DOMAIN, K_FCT_DOMAIN, shake256_512_ds};
use crate::vect::vect_compare;
use crate::SharedSecret;

pub(crate) fn crypto_kem_keypair(
    rng: &mut impl CryptoRngCore, pk: &mut [u8], sk: &mut [u8], p: &Params,
) -> Result<(), &'static str> {
    hqc_pke_keygen(rng, pk, sk, p)
}


/// Draws a fresh message and salt, encrypts under theta = H(pk, salt, m) and
/// derives the shared secret as K(m, ct).
pub(crate) fn crypto_kem_enc(
    rng: &mut impl CryptoRngCore, ct: &mut [u8], pk: &[u8], p: &Params,
) -> Result<SharedSecret, &'static str> {
    let mut m = [0u8; K_MAX];
    rng.try_fill_bytes(&mut m[..p.k])
        .map_err(|_| "encaps: random number generator failed for the message")?;
    let mut salt = [0u8; SALT_BYTES];
    rng.try_fill_bytes(&mut salt)
        .map_err(|_| "encaps: random number generator failed for the salt")?;

    let theta = shake256_512_ds(H_FCT_DOMAIN, &[pk, &salt, &m[..p.k]]);

    let mut u = [0u64; VEC_N_64];
    let mut v = [0u64; VEC_N_64];
    hqc_pke_encrypt(&mut u[..p.n_64], &mut v[..p.n1n2_64], &m[..p.k], &theta, pk, p);

    vect_to_bytes(&mut ct[..p.n_bytes], &u[..p.n_64]);
    vect_to_bytes(&mut ct[p.n_bytes..p.n_bytes + p.n1n2_bytes], &v[..p.n1n2_64]);
    ct[p.n_bytes + p.n1n2_bytes..].copy_from_slice(&salt);

    let ss = SharedSecret(shake256_512_ds(K_FCT_DOMAIN, &[&m[..p.k], ct]));
    m.zeroize();
    Ok(ss)
}


/// Decrypts, re-encrypts with the re-derived theta and selects between
/// K(m', ct) and the fallback K(sigma, ct) without branching on the outcome.
/// Decoding failures are invisible: the call still succeeds and returns the
/// fallback-derived secret.
#[allow(clippy::similar_names)]
pub(crate) fn crypto_kem_dec(
    rng: &mut impl CryptoRngCore, ct: &[u8], sk: &[u8], p: &Params,
) -> Result<SharedSecret, &'static str> {
    let sigma = &sk[SEED_BYTES..SEED_BYTES + SIGMA_BYTES];
    let pk = &sk[SEED_BYTES + SIGMA_BYTES..];
    let salt = &ct[p.n_bytes + p.n1n2_bytes..];

    // stray bits above n (or n1*n2) are zero on read
    let mut u = [0u64; VEC_N_64];
    vect_from_bytes(&mut u[..p.n_64], &ct[..p.n_bytes]);
    u[p.n_64 - 1] &= p.red_mask;
    let mut v = [0u64; VEC_N_64];
    vect_from_bytes(&mut v[..p.n1n2_64], &ct[p.n_bytes..p.n_bytes + p.n1n2_bytes]);

    let mut m_prime = [0u8; K_MAX];
    hqc_pke_decrypt(&mut m_prime[..p.k], &u[..p.n_64], &v[..p.n1n2_64], sk, rng, p)?;

    let theta_prime = shake256_512_ds(H_FCT_DOMAIN, &[pk, salt, &m_prime[..p.k]]);
    let mut u2 = [0u64; VEC_N_64];
    let mut v2 = [0u64; VEC_N_64];
    hqc_pke_encrypt(&mut u2[..p.n_64], &mut v2[..p.n1n2_64], &m_prime[..p.k], &theta_prime, pk, p);

    let valid = vect_compare(&u[..p.n_64], &u2[..p.n_64])
        & vect_compare(&v[..p.n1n2_64], &v2[..p.n1n2_64]);

    let candidate = shake256_512_ds(K_FCT_DOMAIN, &[&m_prime[..p.k], ct]);
    let fallback = shake256_512_ds(K_FCT_DOMAIN, &[sigma, ct]);
    let mut ss = fallback;
    ss.conditional_assign(&candidate, valid);

    m_prime.zeroize();
    Ok(SharedSecret(ss))
}
