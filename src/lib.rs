#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]


///
/// Implements the HQC (Hamming Quasi-Cyclic) code-based key-encapsulation
/// mechanism with a masked, schedule-randomized multiplication core.
//
// Supports automatically clearing sensitive data on drop
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::SerDes;

// Functionality map
//
// Parameter profiles and derived sizes          --> params.rs
// SHAKE-256 PRNG, seed expander, G/H/K hashes   --> shake_prng.rs
// Packed word <-> byte conversions              --> byte_fns.rs
// Dense/fixed-weight sampling, xor, resize      --> vect.rs
// Multiplication mod X^n - 1, plain and masked  --> gf2x.rs
// Additive masking container                    --> shares.rs
// GF(2^8) arithmetic                            --> gf256.rs
// Reed-Solomon outer code                       --> reed_solomon.rs
// RM(1,7) inner code                            --> reed_muller.rs
// Concatenated encoder/decoder                  --> code.rs
// PKE keygen/encrypt/decrypt                    --> hqc.rs
// KEM keypair/encaps/decaps                     --> kem.rs
//
// The three parameter sets are modules in this file with injected macro code
// that connects them into the functionality in kem.rs.

mod byte_fns;
mod code;
mod gf256;
mod gf2x;
mod hqc;
mod kem;
mod params;
mod reed_muller;
mod reed_solomon;
mod shares;
mod vect;

/// The seeded SHAKE-256 stream usable wherever the API accepts a random number generator.
pub mod shake_prng;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

#[cfg(not(any(feature = "hqc-128", feature = "hqc-192", feature = "hqc-256")))]
compile_error!("enable at least one of the hqc-128, hqc-192 or hqc-256 features");

// Share count used by the masked multiplication on the decryption path; the
// highest enabled masks-* feature wins, none means the unmasked M = 1 build.
#[cfg(feature = "masks-6")]
pub(crate) const MASKS: usize = 6;
#[cfg(all(feature = "masks-5", not(feature = "masks-6")))]
pub(crate) const MASKS: usize = 5;
#[cfg(all(feature = "masks-4", not(any(feature = "masks-5", feature = "masks-6"))))]
pub(crate) const MASKS: usize = 4;
#[cfg(all(
    feature = "masks-3",
    not(any(feature = "masks-4", feature = "masks-5", feature = "masks-6"))
))]
pub(crate) const MASKS: usize = 3;
#[cfg(all(
    feature = "masks-2",
    not(any(feature = "masks-3", feature = "masks-4", feature = "masks-5", feature = "masks-6"))
))]
pub(crate) const MASKS: usize = 2;
#[cfg(not(any(
    feature = "masks-2",
    feature = "masks-3",
    feature = "masks-4",
    feature = "masks-5",
    feature = "masks-6"
)))]
pub(crate) const MASKS: usize = 1;

/// Shared Secret Length for all HQC variants (in bytes)
pub const SHARED_SECRET_LEN: usize = 64;

/// The (opaque) shared secret that can be de/serialized by each party.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_LEN]);

impl SerDes for SharedSecret {
    type ByteArray = [u8; SHARED_SECRET_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ss: Self::ByteArray) -> Result<Self, &'static str> {
        // No opportunity for validation, but using a Result for a future possibility
        Ok(SharedSecret(ss))
    }
}


// Conservative (constant-time) paranoia...
impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        let mut result = true;
        for i in 0..self.0.len() {
            result &= self.0[i] == other.0[i];
        }
        result
    }
}


// This common functionality is injected into each parameter set module
macro_rules! functionality {
    () => {
        use crate::kem::{crypto_kem_dec, crypto_kem_enc, crypto_kem_keypair};
        use crate::params::{SEED_BYTES, SIGMA_BYTES};
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::SharedSecret;
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        /// Correctly sized encapsulation key specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct EncapsKey([u8; EK_LEN]);

        /// Correctly sized decapsulation key specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsKey([u8; DK_LEN]);

        /// Correctly sized ciphertext specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CipherText([u8; CT_LEN]);

        /// Key generation for this security parameter set. Accepts no input, utilizes
        /// randomness, and produces an encapsulation key and a decapsulation key. While the
        /// encapsulation key can be made public, the decapsulation key must remain private.
        pub struct KG();

        impl KeyGen for KG {
            type DecapsByteArray = [u8; DK_LEN];
            type DecapsKey = DecapsKey;
            type EncapsByteArray = [u8; EK_LEN];
            type EncapsKey = EncapsKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(EncapsKey, DecapsKey), &'static str> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                crypto_kem_keypair(rng, &mut ek, &mut dk, P)?;
                Ok((EncapsKey(ek), DecapsKey(dk)))
            }

            fn validate_keypair_vartime(ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray) -> bool {
                // the decapsulation key carries the public key behind seed and sigma
                dk[SEED_BYTES + SIGMA_BYTES..] == ek[..]
            }
        }

        impl Encaps for EncapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecret;

            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str> {
                let mut ct = [0u8; CT_LEN];
                let ssk = crypto_kem_enc(rng, &mut ct, &self.0, P)?;
                Ok((ssk, CipherText(ct)))
            }
        }

        impl Decaps for DecapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecret;

            fn try_decaps_with_rng(
                &self, rng: &mut impl CryptoRngCore, ct: &CipherText,
            ) -> Result<SharedSecret, &'static str> {
                crypto_kem_dec(rng, &ct.0, &self.0, P)
            }
        }

        impl SerDes for EncapsKey {
            type ByteArray = [u8; EK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ek: Self::ByteArray) -> Result<Self, &'static str> {
                // Accepting a byte array of fixed size addresses the length checks; the seed
                // and packed s admit no further structural validation.
                Ok(EncapsKey(ek))
            }
        }

        impl SerDes for DecapsKey {
            type ByteArray = [u8; DK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(dk: Self::ByteArray) -> Result<Self, &'static str> {
                // A Result is used here in case future opportunities for validation arise.
                Ok(DecapsKey(dk))
            }
        }

        impl SerDes for CipherText {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, &'static str> {
                // A Result is used here in case future opportunities for validation arise.
                Ok(CipherText(ct))
            }
        }
    };
}


/// Functionality for the HQC-128 security parameter set, which is claimed to be in security
/// category 1.
#[cfg(feature = "hqc-128")]
pub mod hqc_128 {
    //!
    //! Typical usage flow entails:
    //! 1. The originator runs `try_keygen()` to get an encaps key `encapsKey` and decaps key `decapsKey`.
    //! 2. The originator serializes the encaps key via `encapsKey.into_bytes()` and sends to the remote party.
    //! 3. The remote party deserializes the bytes via `try_from_bytes(<bytes>)` and runs `try_encaps()` to get the
    //!    shared secret `ssk` and ciphertext `cipherText`.
    //! 4. The remote party serializes the ciphertext via `cipherText.into_bytes()` and sends to the originator.
    //! 5. The originator deserializes the ciphertext via `try_from_bytes(<bytes>)` then
    //!    runs `decapsKey.try_decaps(cipherText)` to get the shared secret `ssk`.
    //! 6. Both the originator and remote party now have the same shared secret `ssk`.

    const P: &crate::params::Params = &crate::params::HQC_128;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = crate::params::HQC_128.public_key_bytes;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = crate::params::HQC_128.secret_key_bytes;
    /// Serialized Ciphertext Length (in bytes)
    pub const CT_LEN: usize = crate::params::HQC_128.ciphertext_bytes;

    functionality!();
}


/// Functionality for the HQC-192 security parameter set, which is claimed to be in security
/// category 3.
#[cfg(feature = "hqc-192")]
pub mod hqc_192 {
    //!
    //! The typical usage flow mirrors the `hqc_128` module documentation.

    const P: &crate::params::Params = &crate::params::HQC_192;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = crate::params::HQC_192.public_key_bytes;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = crate::params::HQC_192.secret_key_bytes;
    /// Serialized Ciphertext Length (in bytes)
    pub const CT_LEN: usize = crate::params::HQC_192.ciphertext_bytes;

    functionality!();
}


/// Functionality for the HQC-256 security parameter set, which is claimed to be in security
/// category 5.
#[cfg(feature = "hqc-256")]
pub mod hqc_256 {
    //!
    //! The typical usage flow mirrors the `hqc_128` module documentation.

    const P: &crate::params::Params = &crate::params::HQC_256;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = crate::params::HQC_256.public_key_bytes;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = crate::params::HQC_256.secret_key_bytes;
    /// Serialized Ciphertext Length (in bytes)
    pub const CT_LEN: usize = crate::params::HQC_256.ciphertext_bytes;

    functionality!();
}
