use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait is defined to allow trait objects.
pub trait KeyGen {
    /// The (public) encapsulation key sent from the originator to the remote party.
    type EncapsKey;
    /// The (private) decapsulation key used by the originator to generate the shared secret.
    type DecapsKey;
    /// A serialized (public) encapsulation key byte array of the correct length.
    type EncapsByteArray;
    /// A serialized (private) decapsulation key byte array of the correct length.
    type DecapsByteArray;


    /// Generates an encapsulation and decapsulation key pair specific to this security
    /// parameter set, using the OS default random number generator.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "hqc-128", feature = "default-rng"))] {
    /// use hqc::hqc_128; // Could also be hqc_192 or hqc_256.
    /// use hqc::traits::{Decaps, Encaps, KeyGen, SerDes};
    ///
    /// let (ek1, dk1) = hqc_128::KG::try_keygen()?; // Party 1 generates both encaps and decaps keys
    /// let ek1_bytes = ek1.into_bytes(); // Party 1 serializes the encaps key
    ///
    /// let ek2_bytes = ek1_bytes; // Party 1 sends encaps bytes to party 2
    ///
    /// let ek2 = hqc_128::EncapsKey::try_from_bytes(ek2_bytes)?; // Party 2 deserializes the encaps key
    /// let (ssk2, ct2) = ek2.try_encaps()?; // Party 2 generates shared secret and ciphertext
    /// let ct2_bytes = ct2.into_bytes(); // Party 2 serializes the ciphertext
    ///
    /// let ct1_bytes = ct2_bytes; // Party 2 sends the ciphertext to party 1
    ///
    /// let ct1 = hqc_128::CipherText::try_from_bytes(ct1_bytes)?; // Party 1 deserializes the ciphertext
    /// let ssk1 = dk1.try_decaps(&ct1)?; // Party 1 runs decaps to generate the shared secret
    ///
    /// assert_eq!(ssk1, ssk2); // Each party has the same shared secret
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::EncapsKey, Self::DecapsKey), &'static str> {
        Self::try_keygen_with_rng(&mut OsRng)
    }


    /// Generates an encapsulation and decapsulation key pair using a provided random number
    /// generator; a [`crate::shake_prng::ShakePrng`] instance makes key generation fully
    /// deterministic for test and known-answer scenarios.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "hqc-128")] {
    /// use hqc::hqc_128;
    /// use hqc::shake_prng::ShakePrng;
    /// use hqc::traits::{KeyGen, SerDes};
    ///
    /// let mut prng = ShakePrng::new(&[0u8; 48], b"kat-scenario-1");
    /// let (ek_a, _dk_a) = hqc_128::KG::try_keygen_with_rng(&mut prng)?;
    ///
    /// // the same seed material reproduces the same keypair, byte for byte
    /// let mut prng = ShakePrng::new(&[0u8; 48], b"kat-scenario-1");
    /// let (ek_b, _dk_b) = hqc_128::KG::try_keygen_with_rng(&mut prng)?;
    /// assert_eq!(ek_a.into_bytes(), ek_b.into_bytes());
    /// # }
    /// # Ok(())}
    /// ```
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), &'static str>;


    /// Performs validation between an encapsulation key and a decapsulation key (both as byte
    /// arrays), perhaps in the scenario where both have been serialized, stored to disk, and
    /// then retrieved. This function is not intended to operate in constant-time.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "hqc-128", feature = "default-rng"))] {
    /// use hqc::hqc_128; // Could also be hqc_192 or hqc_256.
    /// use hqc::traits::{KeyGen, SerDes};
    ///
    /// let (ek, dk) = hqc_128::KG::try_keygen()?;
    /// let ek_bytes = ek.into_bytes(); // Serialize and perhaps store-then-restore encaps key
    /// let dk_bytes = dk.into_bytes(); // Serialize and perhaps store-then-restore decaps key
    /// assert!(hqc_128::KG::validate_keypair_vartime(&ek_bytes, &dk_bytes));
    /// # }
    /// # Ok(())}
    /// ```
    fn validate_keypair_vartime(ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray) -> bool;
}


/// The `Encaps` trait defines methods for generating shared secrets and ciphertexts using
/// an encapsulation key.
pub trait Encaps {
    /// The shared secret key type generated during encapsulation
    type SharedSecretKey;
    /// The ciphertext type transmitted from the encapsulating party to the decapsulating party
    type CipherText;


    /// Generates a shared secret and ciphertext using the OS default random number generator.
    /// This function is intended to operate in constant time.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    #[cfg(feature = "default-rng")]
    fn try_encaps(&self) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str> {
        self.try_encaps_with_rng(&mut OsRng)
    }


    /// Generates a shared secret and ciphertext using the provided random number generator.
    /// This function is intended to operate in constant time.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "hqc-192", feature = "default-rng"))] {
    /// use hqc::hqc_192;
    /// use hqc::traits::{Decaps, Encaps, KeyGen};
    /// use rand_core::OsRng;
    ///
    /// let (ek, dk) = hqc_192::KG::try_keygen()?;
    /// let (ssk_remote, ct) = ek.try_encaps_with_rng(&mut OsRng)?;
    /// let ssk_local = dk.try_decaps_with_rng(&mut OsRng, &ct)?;
    /// assert_eq!(ssk_remote, ssk_local);
    /// # }
    /// # Ok(())}
    /// ```
    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str>;
}


/// The `Decaps` trait defines methods for recovering the shared secret using
/// a decapsulation key and ciphertext.
pub trait Decaps {
    /// The ciphertext type received from the encapsulating party
    type CipherText;
    /// The shared secret key type generated during decapsulation
    type SharedSecretKey;


    /// Generates a shared secret from a decapsulation key and ciphertext, drawing the masking
    /// schedule randomness from the OS default random number generator. The returned secret
    /// does not depend on that randomness; it only re-randomizes the internal computation.
    /// A malformed ciphertext is indistinguishable from a valid one: the call still succeeds
    /// and returns the implicit-rejection secret.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "hqc-256", feature = "default-rng"))] {
    /// use hqc::hqc_256;
    /// use hqc::traits::{Decaps, Encaps, KeyGen, SerDes};
    ///
    /// let (ek, dk) = hqc_256::KG::try_keygen()?;
    /// let (ssk_remote, ct) = ek.try_encaps()?;
    /// let ssk_local = dk.try_decaps(&ct)?;
    /// assert_eq!(ssk_remote, ssk_local);
    ///
    /// // a corrupted ciphertext still decapsulates, to an unrelated secret
    /// let mut ct_bytes = ct.into_bytes();
    /// ct_bytes[0] ^= 1;
    /// let forged = hqc_256::CipherText::try_from_bytes(ct_bytes)?;
    /// assert!(dk.try_decaps(&forged)? != ssk_remote);
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_decaps(&self, ct: &Self::CipherText) -> Result<Self::SharedSecretKey, &'static str> {
        self.try_decaps_with_rng(&mut OsRng, ct)
    }


    /// Generates a shared secret from a decapsulation key and ciphertext, drawing the masking
    /// schedule randomness from the provided random number generator.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    fn try_decaps_with_rng(
        &self, rng: &mut impl CryptoRngCore, ct: &Self::CipherText,
    ) -> Result<Self::SharedSecretKey, &'static str>;
}


/// The `SerDes` trait provides methods for serializing and deserializing cryptographic objects.
pub trait SerDes {
    /// The fixed-size byte array type used for serialization
    type ByteArray;


    /// Produces a byte array of fixed-size specific to the struct being serialized.
    fn into_bytes(self) -> Self::ByteArray;


    /// Consumes a byte array of fixed-size specific to the struct being deserialized.
    ///
    /// # Errors
    /// Returns an error on malformed input.
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, &'static str>
    where
        Self: Sized;
}
