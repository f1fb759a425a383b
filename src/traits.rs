use crate::types::Error;
use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait is defined to allow trait objects.
pub trait KeyGen {
    /// An encapsulation key specific to the chosen security parameter set, e.g., ml-kem-512,
    /// ml-kem-768 or ml-kem-1024
    type EncapsKey;
    /// A decapsulation (secret) key specific to the chosen security parameter set
    type DecapsKey;
    /// The serialized encapsulation key byte array of the correct length
    type EncapsByteArray;
    /// The serialized decapsulation key byte array of the correct length
    type DecapsByteArray;

    /// Generates an encapsulation and decapsulation key pair specific to this security
    /// parameter set. <br>
    /// This function utilizes the OS default random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_512; // Could also be ml_kem_768 or ml_kem_1024.
    /// use fips203::traits::{Decaps, Encaps, KeyGen};
    ///
    /// let (ek, dk) = ml_kem_512::KG::try_keygen()?; // Generate both keys
    /// let (ssk1, ct) = ek.try_encaps()?; // Encapsulate a fresh shared secret
    /// let ssk2 = dk.try_decaps(&ct)?; // Decapsulate the shared secret
    /// assert_eq!(ssk1, ssk2);
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::EncapsKey, Self::DecapsKey), Error> {
        Self::try_keygen_with_rng(&mut OsRng)
    }

    /// Generates an encapsulation and decapsulation key pair specific to this security
    /// parameter set. <br>
    /// This function utilizes a supplied random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_768; // Could also be ml_kem_512 or ml_kem_1024.
    /// use fips203::traits::{Decaps, Encaps, KeyGen};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    ///
    /// let (ek, dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng)?; // Generate both keys
    /// let (ssk1, ct) = ek.try_encaps_with_rng(&mut rng)?; // Encapsulate a fresh shared secret
    /// let ssk2 = dk.try_decaps(&ct)?; // Decapsulate the shared secret
    /// assert_eq!(ssk1, ssk2);
    /// # Ok(())}
    /// ```
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), Error>;

    /// Deterministically generates a key pair from the two 32-byte seeds `d` and `z`, as in
    /// `ML-KEM.KeyGen_internal(d, z)`. The same seeds always give the same key pair, so the
    /// 64 seed bytes may be stored in place of the decapsulation key.
    /// # Errors
    /// Propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_1024; // Could also be ml_kem_512 or ml_kem_768.
    /// use fips203::traits::{KeyGen, SerDes};
    ///
    /// let (ek1, dk1) = ml_kem_1024::KG::keygen_from_seed([1u8; 32], [2u8; 32])?;
    /// let (ek2, dk2) = ml_kem_1024::KG::keygen_from_seed([1u8; 32], [2u8; 32])?;
    /// assert_eq!(ek1.into_bytes(), ek2.into_bytes());
    /// assert_eq!(dk1.into_bytes(), dk2.into_bytes());
    /// # Ok(())}
    /// ```
    fn keygen_from_seed(
        d: [u8; 32], z: [u8; 32],
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), Error>;

    /// Performs the FIPS 203 section 7 checks on a serialized key pair: the encapsulation key
    /// modulus check, the decapsulation key hash check, that the decapsulation key embeds this
    /// encapsulation key, and a pair-wise encapsulate/decapsulate round trip using the supplied
    /// random number generator. This function operates in variable time.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_512; // Could also be ml_kem_768 or ml_kem_1024.
    /// use fips203::traits::{KeyGen, SerDes};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let (ek, dk) = ml_kem_512::KG::try_keygen_with_rng(&mut rng)?;
    /// let (ek_bytes, dk_bytes) = (ek.into_bytes(), dk.into_bytes());
    /// assert!(ml_kem_512::KG::validate_keypair_with_rng_vartime(&mut rng, &ek_bytes, &dk_bytes));
    /// # Ok(())}
    /// ```
    fn validate_keypair_with_rng_vartime(
        rng: &mut impl CryptoRngCore, ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray,
    ) -> bool;


    /// Checks that the seeds `d` and `z` regenerate exactly the serialized key pair `(ek, dk)`.
    /// This is the consistency check for a key pair stored alongside its seeds. This function
    /// operates in variable time.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_768; // Could also be ml_kem_512 or ml_kem_1024.
    /// use fips203::traits::{KeyGen, SerDes};
    ///
    /// let (d, z) = ([5u8; 32], [6u8; 32]);
    /// let (ek, dk) = ml_kem_768::KG::keygen_from_seed(d, z)?;
    /// let (ek_bytes, dk_bytes) = (ek.into_bytes(), dk.into_bytes());
    /// assert!(ml_kem_768::KG::validate_seed_vartime(d, z, &ek_bytes, &dk_bytes));
    /// assert!(!ml_kem_768::KG::validate_seed_vartime(d, [7u8; 32], &ek_bytes, &dk_bytes));
    /// # Ok(())}
    /// ```
    fn validate_seed_vartime(
        d: [u8; 32], z: [u8; 32], ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray,
    ) -> bool;
}


/// The `Encaps` trait is implemented for the `EncapsKey` struct on each of the security
/// parameter sets
pub trait Encaps {
    /// The shared secret key
    type SharedSecretKey;
    /// The ciphertext is specific to the chosen security parameter set, e.g., ml-kem-512,
    /// ml-kem-768 or ml-kem-1024
    type CipherText;

    /// Generates a shared secret and ciphertext from an encapsulation key specific to this
    /// security parameter set. This function utilizes the OS default random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_768; // Could also be ml_kem_512 or ml_kem_1024.
    /// use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
    ///
    /// let (ek1, dk) = ml_kem_768::KG::try_keygen()?; // Originator generates both keys
    /// let ek_bytes = ek1.into_bytes(); // Serialize the encapsulation key and send
    ///
    /// let ek2 = ml_kem_768::EncapsKey::try_from_bytes(ek_bytes)?; // Remote deserializes
    /// let (ssk1, ct) = ek2.try_encaps()?; // Remote encapsulates a shared secret
    ///
    /// let ssk2 = dk.try_decaps(&ct)?; // Originator decapsulates the same shared secret
    /// assert_eq!(ssk1, ssk2);
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_encaps(&self) -> Result<(Self::SharedSecretKey, Self::CipherText), Error> {
        self.try_encaps_with_rng(&mut OsRng)
    }

    /// Generates a shared secret and ciphertext from an encapsulation key specific to this
    /// security parameter set. This function utilizes a supplied random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_1024; // Could also be ml_kem_512 or ml_kem_768.
    /// use fips203::traits::{Decaps, Encaps, KeyGen};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    ///
    /// let (ek, dk) = ml_kem_1024::KG::try_keygen_with_rng(&mut rng)?;
    /// let (ssk1, ct) = ek.try_encaps_with_rng(&mut rng)?;
    /// let ssk2 = dk.try_decaps(&ct)?;
    /// assert_eq!(ssk1, ssk2);
    /// # Ok(())}
    /// ```
    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), Error>;

    /// Deterministically encapsulates with the supplied 32-byte message `m`, as in
    /// `ML-KEM.Encaps_internal(ek, m)`. Intended for testing against known answers; `m` must
    /// be fresh uniformly random bytes in any other use.
    /// # Errors
    /// Propagates internal errors.
    fn encaps_from_seed(
        &self, m: &[u8; 32],
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), Error>;
}


/// The `Decaps` trait is implemented for the `DecapsKey` struct on each of the security
/// parameter sets
pub trait Decaps {
    /// The ciphertext is specific to the chosen security parameter set, e.g., ml-kem-512,
    /// ml-kem-768 or ml-kem-1024
    type CipherText;
    /// The shared secret key
    type SharedSecretKey;

    /// Decapsulates a ciphertext with the decapsulation key to recover the shared secret. A
    /// ciphertext that was not produced for this key decapsulates to a pseudorandom value
    /// rather than an error (implicit rejection). This function operates in constant time with
    /// respect to the decapsulation key and the ciphertext content.
    /// # Errors
    /// Propagates internal errors; never reports an error based on ciphertext content.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_512; // Could also be ml_kem_768 or ml_kem_1024.
    /// use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
    ///
    /// let (ek, dk) = ml_kem_512::KG::try_keygen()?;
    /// let (ssk1, ct) = ek.try_encaps()?;
    ///
    /// let mut ct_bytes = ct.into_bytes();
    /// ct_bytes[0] ^= 0x01; // Tamper with the ciphertext
    /// let ct_bad = ml_kem_512::CipherText::try_from_bytes(ct_bytes)?;
    /// let ssk2 = dk.try_decaps(&ct_bad)?; // Still succeeds, with an unrelated secret
    /// assert_ne!(ssk1, ssk2);
    /// # Ok(())}
    /// ```
    fn try_decaps(&self, ct: &Self::CipherText) -> Result<Self::SharedSecretKey, Error>;
}


/// The `SerDes` trait provides for validated serialization and deserialization of fixed- and
/// correctly-sized elements. Deserializing an encapsulation key runs the FIPS 203 section 7.2
/// modulus check, and deserializing a decapsulation key runs the section 7.3 hash check.
pub trait SerDes {
    /// The fixed-size byte array to be serialized or deserialized
    type ByteArray;

    /// Produces a byte array of fixed-size specific to the struct being serialized.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_768; // Could also be ml_kem_512 or ml_kem_1024.
    /// use fips203::traits::{Encaps, KeyGen, SerDes};
    ///
    /// let (ek, dk) = ml_kem_768::KG::try_keygen()?;
    /// let (ssk, ct) = ek.try_encaps()?;
    /// let ek_bytes = ek.into_bytes(); // Serialize the encapsulation key
    /// let dk_bytes = dk.into_bytes(); // Serialize the decapsulation key
    /// let ct_bytes = ct.into_bytes(); // Serialize the ciphertext
    /// assert_eq!((ek_bytes.len(), dk_bytes.len(), ct_bytes.len()), (1184, 2400, 1088));
    /// # Ok(())}
    /// ```
    fn into_bytes(self) -> Self::ByteArray;

    /// Consumes a byte array of fixed-size specific to the struct being deserialized; performs
    /// validation.
    /// # Errors
    /// Returns an error on malformed input.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fips203::ml_kem_1024; // Could also be ml_kem_512 or ml_kem_768.
    /// use fips203::traits::{KeyGen, SerDes};
    ///
    /// let (ek, dk) = ml_kem_1024::KG::try_keygen()?;
    /// let ek_bytes = ek.into_bytes();
    /// let dk_bytes = dk.into_bytes();
    /// let ek2 = ml_kem_1024::EncapsKey::try_from_bytes(ek_bytes)?;
    /// let dk2 = ml_kem_1024::DecapsKey::try_from_bytes(dk_bytes)?;
    ///
    /// let mut bad_bytes = ek2.into_bytes();
    /// bad_bytes[0] = 0xFF; // The first coefficient becomes 4095, which is not less than q
    /// bad_bytes[1] |= 0x0F;
    /// assert!(ml_kem_1024::EncapsKey::try_from_bytes(bad_bytes).is_err());
    /// # Ok(())}
    /// ```
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, Error>
    where
        Self: Sized;
}
