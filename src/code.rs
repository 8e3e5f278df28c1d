//! Concatenated code: outer Reed-Solomon over GF(2^8), inner duplicated
//! RM(1,7). The inner code absorbs the high per-bit noise of the cyclic
//! product terms; the outer code clears the residual symbol errors.

use crate::params::{N1_MAX, Params};
use crate::reed_muller::{reed_muller_decode, reed_muller_encode};
use crate::reed_solomon::{reed_solomon_decode, reed_solomon_encode};

/// Encodes `message` (k bytes) into an n-bit codeword: RS to n1 symbols, RM
/// each symbol to an n2-bit block, zero padding above n1*n2.
pub(crate) fn code_encode(codeword: &mut [u64], message: &[u8], p: &Params) {
    let mut rs_cdw = [0u8; N1_MAX];
    reed_solomon_encode(&mut rs_cdw[..p.n1], message, p);
    for word in codeword.iter_mut() {
        *word = 0;
    }
    reed_muller_encode(&mut codeword[..p.n1n2_64], &rs_cdw[..p.n1], p);
}


/// Decodes the noisy `vector` back into `message` (k bytes).
pub(crate) fn code_decode(message: &mut [u8], vector: &[u64], p: &Params) {
    let mut rs_cdw = [0u8; N1_MAX];
    reed_muller_decode(&mut rs_cdw[..p.n1], &vector[..p.n1n2_64], p);
    reed_solomon_decode(message, &mut rs_cdw[..p.n1], p);
}


#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::{code_decode, code_encode};
    use crate::params::{HQC_128, K_MAX, Params, VEC_N_64};

    fn round_trips_with_noise(p: &Params, seed: u64) {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        for trial in 0..20 {
            let mut msg = [0u8; K_MAX];
            rng.fill(&mut msg[..p.k]);
            let mut codeword = [0u64; VEC_N_64];
            code_encode(&mut codeword[..p.n_64], &msg[..p.k], p);
            assert!(codeword[p.n1n2_64..p.n_64].iter().all(|&word| word == 0));

            // corrupt a delta-bounded number of inner blocks beyond repair and
            // sprinkle recoverable noise over the rest
            let bad_blocks = trial % (p.delta + 1);
            for block in 0..p.n1 {
                let base = block * p.n2 / 64;
                if block < bad_blocks {
                    for word in &mut codeword[base..base + p.n2 / 64] {
                        *word ^= rng.gen::<u64>();
                    }
                } else {
                    for _ in 0..p.multiplicity * 8 {
                        let bit = rng.gen_range(0..p.n2);
                        codeword[base + bit / 64] ^= 1u64 << (bit % 64);
                    }
                }
            }

            let mut decoded = [0u8; K_MAX];
            code_decode(&mut decoded[..p.k], &codeword[..p.n_64], p);
            assert_eq!(decoded[..p.k], msg[..p.k], "trial {trial} failed");
        }
    }

    #[test]
    fn concatenated_round_trip_all_profiles() {
        round_trips_with_noise(&HQC_128, 5);
        #[cfg(any(feature = "hqc-192", feature = "hqc-256"))]
        round_trips_with_noise(&crate::params::HQC_192, 6);
        #[cfg(feature = "hqc-256")]
        round_trips_with_noise(&crate::params::HQC_256, 7);
    }
}
