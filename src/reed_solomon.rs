//! Systematic Reed-Solomon (n1, k, delta) code over GF(2^8).
//!
//! The generator polynomial has the consecutive roots alpha^1 .. alpha^{2
//! delta}. Decoding runs syndromes, a masked Berlekamp-Massey, an exhaustive
//! locator-root scan over all n1 positions and Forney's value formula; every
//! loop runs its full static trip count and corrections are applied under
//! masks, so the work done does not depend on the error pattern. Beyond delta
//! symbol errors the result is a best-effort codeword that the re-encryption
//! check upstream rejects.

use crate::gf256::{alpha_pow, gf_inverse, gf_mul, nonzero_mask};
use crate::params::{DELTA_MAX, Params};

/// Systematic encode: parity in the 2*delta low positions, message above.
pub(crate) fn reed_solomon_encode(cdw: &mut [u8], msg: &[u8], p: &Params) {
    let parity_len = 2 * p.delta;
    let mut gen = [0u8; 2 * DELTA_MAX + 1];
    compute_generator_poly(&mut gen[..=parity_len]);

    for byte in cdw.iter_mut() {
        *byte = 0;
    }
    // LFSR division of msg * X^{2 delta} by the generator
    for i in (0..p.k).rev() {
        let gate_value = msg[i] ^ cdw[parity_len - 1];
        for k in (1..parity_len).rev() {
            cdw[k] = cdw[k - 1] ^ gf_mul(gate_value, gen[k]);
        }
        cdw[0] = gf_mul(gate_value, gen[0]);
    }
    cdw[parity_len..parity_len + p.k].copy_from_slice(msg);
}


// gen(X) = product of (X + alpha^i) for i = 1 .. gen.len() - 1
fn compute_generator_poly(gen: &mut [u8]) {
    gen[0] = 1;
    let mut root = 1u8;
    for i in 1..gen.len() {
        root = gf_mul(root, 2);
        gen[i] = 1;
        for j in (1..i).rev() {
            gen[j] = gen[j - 1] ^ gf_mul(root, gen[j]);
        }
        gen[0] = gf_mul(root, gen[0]);
    }
}


// syndromes[i] = received(alpha^{i+1}), Horner from the top coefficient
#[allow(clippy::cast_possible_truncation)]
fn compute_syndromes(syndromes: &mut [u8], cdw: &[u8]) {
    for (i, syndrome) in syndromes.iter_mut().enumerate() {
        let x = alpha_pow(i as u16 + 1);
        let mut acc = 0u8;
        for &c in cdw.iter().rev() {
            acc = gf_mul(acc, x) ^ c;
        }
        *syndrome = acc;
    }
}


/// Berlekamp-Massey, branchless: each round computes the candidate update
/// unconditionally and commits the length change under a mask. `sigma` ends
/// as the error locator with roots at the inverse error positions.
#[allow(clippy::cast_possible_truncation)]
fn compute_elp(sigma: &mut [u8], syndromes: &[u8], delta: usize) {
    for coeff in sigma.iter_mut() {
        *coeff = 0;
    }
    sigma[0] = 1;
    let mut deg_sigma = 0u8;
    let mut x_sigma_p = [0u8; DELTA_MAX + 2]; // X^{mu - rho} * previous sigma
    x_sigma_p[1] = 1;
    let mut sigma_copy = [0u8; DELTA_MAX + 1];
    let mut d_p = 1u8; // discrepancy at the last length change

    for mu in 0..2 * delta {
        // discrepancy for this round
        let mut d = syndromes[mu];
        for i in 1..=core::cmp::min(mu, delta) {
            d ^= gf_mul(sigma[i], syndromes[mu - i]);
        }

        sigma_copy[..=delta].copy_from_slice(&sigma[..=delta]);
        let dd = gf_mul(d, gf_inverse(d_p));
        for i in 1..=delta {
            sigma[i] ^= gf_mul(dd, x_sigma_p[i]);
        }

        // commit a length change when d != 0 and 2*deg <= mu
        let t = u16::from(2 * deg_sigma).wrapping_sub(mu as u16).wrapping_sub(1);
        let le_mask = ((t >> 15) as u8).wrapping_neg();
        let update = nonzero_mask(d) & le_mask;
        deg_sigma = (update & (mu as u8 + 1 - deg_sigma)) | (!update & deg_sigma);
        d_p = (update & d) | (!update & d_p);
        for i in (1..=delta + 1).rev() {
            x_sigma_p[i] = (update & sigma_copy[i - 1]) | (!update & x_sigma_p[i - 1]);
        }
        x_sigma_p[0] = 0;
    }
}


// errata evaluator omega = S(x) * sigma(x) mod x^delta
fn compute_error_evaluator(omega: &mut [u8], sigma: &[u8], syndromes: &[u8], delta: usize) {
    for (i, coeff) in omega.iter_mut().enumerate().take(delta) {
        let mut acc = 0u8;
        for l in 0..=core::cmp::min(i, delta) {
            acc ^= gf_mul(sigma[l], syndromes[i - l]);
        }
        *coeff = acc;
    }
}


/// Scans every position j: a root of sigma at alpha^{-j} marks an error, and
/// Forney's formula omega(alpha^{-j}) / sigma'(alpha^{-j}) yields its value.
#[allow(clippy::cast_possible_truncation)]
fn correct_errors(cdw: &mut [u8], sigma: &[u8], omega: &[u8], p: &Params) {
    let delta = p.delta;
    for (j, byte) in cdw.iter_mut().enumerate().take(p.n1) {
        let x_inv = alpha_pow(255 - j as u16);

        let mut sigma_eval = 0u8;
        for &c in sigma[..=delta].iter().rev() {
            sigma_eval = gf_mul(sigma_eval, x_inv) ^ c;
        }
        let root_mask = !nonzero_mask(sigma_eval);

        let mut omega_eval = 0u8;
        for &c in omega[..delta].iter().rev() {
            omega_eval = gf_mul(omega_eval, x_inv) ^ c;
        }

        // formal derivative in characteristic 2: odd-degree terms only
        let x_inv_sq = gf_mul(x_inv, x_inv);
        let mut deriv = 0u8;
        let mut power = 1u8;
        for i in (1..=delta).step_by(2) {
            deriv ^= gf_mul(sigma[i], power);
            power = gf_mul(power, x_inv_sq);
        }

        *byte ^= root_mask & gf_mul(omega_eval, gf_inverse(deriv));
    }
}


/// Corrects up to delta symbol errors in `cdw` and extracts the message.
pub(crate) fn reed_solomon_decode(msg: &mut [u8], cdw: &mut [u8], p: &Params) {
    let mut syndromes = [0u8; 2 * DELTA_MAX];
    compute_syndromes(&mut syndromes[..2 * p.delta], &cdw[..p.n1]);

    let mut sigma = [0u8; DELTA_MAX + 1];
    compute_elp(&mut sigma[..=p.delta], &syndromes[..2 * p.delta], p.delta);

    let mut omega = [0u8; DELTA_MAX];
    compute_error_evaluator(&mut omega[..p.delta], &sigma[..=p.delta], &syndromes[..2 * p.delta], p.delta);

    correct_errors(cdw, &sigma[..=p.delta], &omega[..p.delta], p);

    msg.copy_from_slice(&cdw[2 * p.delta..2 * p.delta + p.k]);
}
