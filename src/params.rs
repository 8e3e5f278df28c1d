/// Seed length (in bytes) for the secret key and the public `h` expansion.
pub(crate) const SEED_BYTES: usize = 40;

/// Salt length (in bytes) mixed into the theta derivation at encapsulation.
pub(crate) const SALT_BYTES: usize = 16;

/// Length (in bytes) of the implicit-rejection value stored in the secret key.
pub(crate) const SIGMA_BYTES: usize = 64;

/// Largest message length (in bytes) across the parameter sets.
pub(crate) const K_MAX: usize = 32;

/// Largest outer-code length (in symbols) across the parameter sets.
pub(crate) const N1_MAX: usize = 90;

/// Largest Reed-Solomon correction capacity across the parameter sets.
pub(crate) const DELTA_MAX: usize = 29;

/// Largest sparse-vector weight across the parameter sets.
pub(crate) const WEIGHT_MAX: usize = 149;


/// One HQC security profile. All sizes are fixed at compile time; the three
/// profiles share a single implementation that receives one of these records.
pub(crate) struct Params {
    /// Ring degree: prime length (in bits) of the ambient cyclic code.
    pub(crate) n: usize,
    /// Message length in bytes.
    pub(crate) k: usize,
    /// Outer Reed-Solomon code length in GF(2^8) symbols.
    pub(crate) n1: usize,
    /// Inner block length in bits (a multiple of the 128-bit RM(1,7) length).
    pub(crate) n2: usize,
    /// Number of duplicated RM(1,7) codewords per inner block.
    pub(crate) multiplicity: usize,
    /// Hamming weight of the secret vectors x and y.
    pub(crate) omega: u16,
    /// Hamming weight of the error vector e.
    pub(crate) omega_e: u16,
    /// Hamming weight of the randomness vectors r1 and r2.
    pub(crate) omega_r: u16,
    /// Reed-Solomon correction capacity in symbols.
    pub(crate) delta: usize,
    /// Number of 64-bit words holding an n-bit vector.
    pub(crate) n_64: usize,
    /// Number of bytes holding an n-bit vector.
    pub(crate) n_bytes: usize,
    /// Number of 64-bit words holding an n1*n2-bit vector.
    pub(crate) n1n2_64: usize,
    /// Number of bytes holding an n1*n2-bit vector.
    pub(crate) n1n2_bytes: usize,
    /// Mask clearing the unused high bits of the top word of an n-bit vector.
    pub(crate) red_mask: u64,
    /// Acceptance bound for the 24-bit rejection sampler: floor(2^24/n)*n.
    pub(crate) rejection_threshold: u32,
    /// Serialized public key length: seed plus packed s.
    pub(crate) public_key_bytes: usize,
    /// Serialized secret key length: seed, sigma, then the public key.
    pub(crate) secret_key_bytes: usize,
    /// Serialized ciphertext length: packed u, packed v, then the salt.
    pub(crate) ciphertext_bytes: usize,
}

#[allow(clippy::cast_possible_truncation)]
const fn profile(
    n: usize, k: usize, n1: usize, n2: usize, multiplicity: usize, omega: u16, omega_e: u16,
    omega_r: u16, delta: usize,
) -> Params {
    let n_64 = (n + 63) / 64;
    let n_bytes = (n + 7) / 8;
    let n1n2 = n1 * n2;
    let public_key_bytes = SEED_BYTES + n_bytes;
    Params {
        n,
        k,
        n1,
        n2,
        multiplicity,
        omega,
        omega_e,
        omega_r,
        delta,
        n_64,
        n_bytes,
        n1n2_64: (n1n2 + 63) / 64,
        n1n2_bytes: (n1n2 + 7) / 8,
        red_mask: (1u64 << (n % 64)) - 1,
        rejection_threshold: (((1 << 24) / n) * n) as u32,
        public_key_bytes,
        secret_key_bytes: SEED_BYTES + SIGMA_BYTES + public_key_bytes,
        ciphertext_bytes: n_bytes + (n1n2 + 7) / 8 + SALT_BYTES,
    }
}

/// HQC-128: NIST security category 1.
pub(crate) const HQC_128: Params = profile(17669, 16, 46, 384, 3, 66, 75, 75, 15);

/// HQC-192: NIST security category 3.
pub(crate) const HQC_192: Params = profile(35851, 24, 56, 640, 5, 100, 114, 114, 16);

/// HQC-256: NIST security category 5.
pub(crate) const HQC_256: Params = profile(57637, 32, 90, 640, 5, 131, 149, 149, 29);


// Scratch vectors are sized for the largest parameter set compiled in, so a
// single implementation serves every enabled security level.
#[cfg(feature = "hqc-256")]
pub(crate) const VEC_N_64: usize = HQC_256.n_64;
#[cfg(all(feature = "hqc-192", not(feature = "hqc-256")))]
pub(crate) const VEC_N_64: usize = HQC_192.n_64;
#[cfg(all(feature = "hqc-128", not(any(feature = "hqc-192", feature = "hqc-256"))))]
pub(crate) const VEC_N_64: usize = HQC_128.n_64;

pub(crate) const VEC_N_BYTES: usize = VEC_N_64 * 8;


#[cfg(test)]
mod tests {
    use super::{HQC_128, HQC_192, HQC_256, Params};

    fn check(p: &Params, pk: usize, sk: usize, ct: usize) {
        assert_eq!(p.public_key_bytes, pk);
        assert_eq!(p.secret_key_bytes, sk);
        assert_eq!(p.ciphertext_bytes, ct);
        assert_eq!(p.n1 * p.n2, p.n1n2_64 * 64, "inner code must be word aligned");
        assert!(p.n1n2_64 < p.n_64);
        assert_eq!(p.n2, 128 * p.multiplicity);
        assert_eq!(p.n1 - p.k, 2 * p.delta);
        assert_eq!(u64::from(p.rejection_threshold), (1u64 << 24) / p.n as u64 * p.n as u64);
    }

    #[test]
    fn derived_sizes() {
        check(&HQC_128, 2249, 2353, 4433);
        check(&HQC_192, 4522, 4626, 8978);
        check(&HQC_256, 7245, 7349, 14421);
    }

    #[test]
    fn reduction_masks() {
        assert_eq!(HQC_128.red_mask, (1 << 5) - 1);
        assert_eq!(HQC_192.red_mask, (1 << 11) - 1);
        assert_eq!(HQC_256.red_mask, (1 << 37) - 1);
    }
}
