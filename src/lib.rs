#![no_std]
#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Almost all of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, unused_results, variant_size_differences)]
//
#![doc = include_str!("../README.md")]


// Implements FIPS 203 Module-Lattice-Based Key-Encapsulation Mechanism Standard.
// See <https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.203.pdf>

// Functionality map per FIPS 203
//
// Algorithm 1 ForExample() on page 6                       --> not needed (illustrative)
// Algorithm 2 SHAKE128example(str1,...,strm,b1,...bl) p 9  --> hashing.rs as the Xof type-state
// Algorithm 3 BitsToBytes(b) on page 20                    --> byte_fns.rs
// Algorithm 4 BytesToBits(B) on page 20                    --> byte_fns.rs
// Algorithm 5 ByteEncode_d(F) on page 22                   --> byte_fns.rs
// Algorithm 6 ByteDecode_d(B) on page 22                   --> byte_fns.rs
// Algorithm 7 SampleNTT(B) on page 23                      --> sampling.rs
// Algorithm 8 SamplePolyCBD_η(B) on page 23                --> sampling.rs
// Algorithm 9 NTT(f) on page 26                            --> ntt.rs
// Algorithm 10 NTT^{−1}(f_hat) on page 26                  --> ntt.rs
// Algorithm 11 MultiplyNTTs(f_hat, g_hat) on page 27       --> ntt.rs
// Algorithm 12 BaseCaseMultiply(a0,a1,b0,b1,γ) on page 24  --> ntt.rs
// Algorithm 13 K-PKE.KeyGen(d) on page 29                  --> k_pke.rs
// Algorithm 14 K-PKE.Encrypt(ek_PKE,m,r) on page 30        --> k_pke.rs
// Algorithm 15 K-PKE.Decrypt(dk_PKE,c) on page 31          --> k_pke.rs
// Algorithm 16 ML-KEM.KeyGen_internal(d,z) on page 32      --> ml_kem.rs
// Algorithm 17 ML-KEM.Encaps_internal(ek,m) on page 33     --> ml_kem.rs
// Algorithm 18 ML-KEM.Decaps_internal(dk,c) on page 34     --> ml_kem.rs
// Algorithm 19 ML-KEM.KeyGen() on page 35                  --> from lib.rs/params.rs to ml_kem.rs
// Algorithm 20 ML-KEM.Encaps(ek) on page 37                --> from lib.rs/params.rs to ml_kem.rs
// Algorithm 21 ML-KEM.Decaps(dk,c) on page 38              --> from lib.rs/params.rs to ml_kem.rs
// Section 7.2 encapsulation key check                      --> ml_kem.rs
// Section 7.3 decapsulation key check                      --> ml_kem.rs
// Section 7.1 pair-wise consistency                        --> ml_kem.rs
// Types are in types.rs, traits are in traits.rs, parameter sets are in params.rs...

// Note that debug_assert! statements enforce correct program construction and are not involved
// in any operational dataflow (so are good fuzz targets). The ensure! statements implement
// conservative dataflow validation and do not panic. Separately, functions are only generic
// over security parameters that are directly involved in memory allocation (on the stack),
// which for ML-KEM is only `K`. Everything else (eta1, eta2, du, dv) is passed as a value.

/// The `rand_core` types are re-exported so that users of fips203 do not
/// have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, Error as RngError, RngCore};

mod byte_fns;
mod hashing;
mod helpers;
mod k_pke;
mod ml_kem;
mod ntt;
mod params;
mod sampling;
mod types;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;
pub use crate::params::ParameterSet;
pub use crate::types::{CipherText, DecapsKey, EncapsKey, Error, SharedSecretKey};

// Applies across all security parameter sets
const Q: u32 = 3329; // 2^8 * 13 + 1; page 10 section 2.4 and page 39 table 2
const ZETA: u32 = 17; // The primitive 256-th root of unity modulo q; page 24
const N: usize = 256; // Number of coefficients in each ring element


// This common functionality is injected into each security parameter set namespace, and is
// largely a lightweight wrapper into the ml_kem functions.
macro_rules! functionality {
    () => {
        use crate::ml_kem;
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::types::{Error, SharedSecretKey};
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        const K: usize = PARAMS.k();
        const ETA1: usize = PARAMS.eta1();
        const ETA2: usize = PARAMS.eta2();
        const DU: usize = PARAMS.du();
        const DV: usize = PARAMS.dv();

        /// Serialized encapsulation key length in bytes, `384·k + 32`.
        pub const EK_LEN: usize = PARAMS.ek_len();
        /// Serialized decapsulation key length in bytes, `768·k + 96`.
        pub const DK_LEN: usize = PARAMS.dk_len();
        /// Ciphertext length in bytes, `32·(du·k + dv)`.
        pub const CT_LEN: usize = PARAMS.ct_len();


        // ----- 'EXTERNAL' DATA TYPES -----

        /// Empty struct to enable `KeyGen` trait objects across security parameter
        /// sets. Implements the [`crate::traits::KeyGen`] trait.
        #[derive(Zeroize, ZeroizeOnDrop)]
        pub struct KG();


        /// Correctly sized encapsulation key specific to the target security parameter set.
        ///
        /// Implements the [`crate::traits::Encaps`] and [`crate::traits::SerDes`] traits.
        pub type EncapsKey = crate::types::EncapsKey<EK_LEN>;


        /// Correctly sized decapsulation key specific to the target security parameter set.
        ///
        /// Implements the [`crate::traits::Decaps`] and [`crate::traits::SerDes`] traits.
        // Note: #[derive(Zeroize, ZeroizeOnDrop)] is implemented on the underlying struct.
        pub type DecapsKey = crate::types::DecapsKey<DK_LEN>;


        /// Correctly sized ciphertext specific to the target security parameter set.
        ///
        /// Implements the [`crate::traits::SerDes`] trait.
        pub type CipherText = crate::types::CipherText<CT_LEN>;


        // ----- PRIMARY FUNCTIONS ---

        /// # Algorithm 19: `ML-KEM.KeyGen()` on page 35.
        /// Generates an encapsulation and decapsulation key pair specific to this security
        /// parameter set.
        ///
        /// This function utilizes the **default OS** random number generator.
        ///
        /// **Output**: Encapsulation key struct and decapsulation key struct.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        ///
        /// # Examples
        /// ```rust
        /// # use std::error::Error;
        /// # fn main() -> Result<(), Box<dyn Error>> {
        /// # #[cfg(all(feature = "ml-kem-512", feature = "default-rng"))] {
        /// use fips203::ml_kem_512; // Could also be ml_kem_768 or ml_kem_1024.
        /// use fips203::traits::{Decaps, Encaps};
        ///
        /// let (ek, dk) = ml_kem_512::try_keygen()?;  // Originator generates both keys
        /// let (ssk1, ct) = ek.try_encaps()?;  // Remote party encapsulates a shared secret
        /// let ssk2 = dk.try_decaps(&ct)?;  // Originator decapsulates the same shared secret
        /// assert_eq!(ssk1, ssk2);
        /// # }
        /// # Ok(())}
        /// ```
        #[cfg(feature = "default-rng")]
        pub fn try_keygen() -> Result<(EncapsKey, DecapsKey), Error> { KG::try_keygen() }


        /// # Algorithm 19: `ML-KEM.KeyGen()` on page 35.
        /// Generates an encapsulation and decapsulation key pair specific to this security
        /// parameter set.
        ///
        /// This function utilizes the **provided** random number generator.
        ///
        /// **Output**: Encapsulation key struct and decapsulation key struct.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        ///
        /// # Examples
        /// ```rust
        /// # use std::error::Error;
        /// # fn main() -> Result<(), Box<dyn Error>> {
        /// # #[cfg(feature = "ml-kem-768")] {
        /// use fips203::ml_kem_768; // Could also be ml_kem_512 or ml_kem_1024.
        /// use fips203::traits::{Decaps, Encaps};
        /// use rand_chacha::rand_core::SeedableRng;
        ///
        /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        ///
        /// let (ek, dk) = ml_kem_768::try_keygen_with_rng(&mut rng)?;
        /// let (ssk1, ct) = ek.try_encaps_with_rng(&mut rng)?;
        /// let ssk2 = dk.try_decaps(&ct)?;
        /// assert_eq!(ssk1, ssk2);
        /// # }
        /// # Ok(())}
        /// ```
        pub fn try_keygen_with_rng(
            rng: &mut impl CryptoRngCore,
        ) -> Result<(EncapsKey, DecapsKey), Error> {
            KG::try_keygen_with_rng(rng)
        }


        impl KeyGen for KG {
            type DecapsByteArray = [u8; DK_LEN];
            type DecapsKey = DecapsKey;
            type EncapsByteArray = [u8; EK_LEN];
            type EncapsKey = EncapsKey;


            /// # Algorithm 19 in `KeyGen` trait
            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(EncapsKey, DecapsKey), Error> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                ml_kem::ml_kem_key_gen::<K>(rng, ETA1, &mut ek, &mut dk)?;
                Ok((crate::types::EncapsKey(ek), crate::types::DecapsKey(dk)))
            }


            /// # Algorithm 16 in `KeyGen` trait
            fn keygen_from_seed(d: [u8; 32], z: [u8; 32]) -> Result<(EncapsKey, DecapsKey), Error> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                ml_kem::ml_kem_key_gen_internal::<K>(ETA1, &d, &z, &mut ek, &mut dk)?;
                Ok((crate::types::EncapsKey(ek), crate::types::DecapsKey(dk)))
            }


            // Documented in traits.rs
            fn validate_keypair_with_rng_vartime(
                rng: &mut impl CryptoRngCore, ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray,
            ) -> bool {
                ml_kem::validate_keypair::<K>(rng, DU, DV, ETA1, ETA2, ek, dk).is_ok()
            }


            // Documented in traits.rs
            fn validate_seed_vartime(
                d: [u8; 32], z: [u8; 32], ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray,
            ) -> bool {
                let (mut ek_act, mut dk_act) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                let same = ml_kem::ml_kem_key_gen_internal::<K>(ETA1, &d, &z, &mut ek_act, &mut dk_act)
                    .is_ok()
                    && ek_act == *ek
                    && dk_act == *dk;
                dk_act.zeroize();
                same
            }
        }


        impl Encaps for EncapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;


            /// # Algorithm 20: `ML-KEM.Encaps(ek)` on page 37.
            /// Generates a shared secret key and an associated ciphertext.
            ///
            /// **Input**:  Implemented on the encapsulation key struct. <br>
            /// **Output**: Shared secret key `K ∈ B^{32}` and ciphertext `c ∈ B^{32·(du·k+dv)}`.
            ///
            /// # Errors
            /// Returns an error when the random number generator fails.
            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(SharedSecretKey, CipherText), Error> {
                let mut ct = [0u8; CT_LEN];
                let ssk = ml_kem::ml_kem_encaps::<K>(rng, DU, DV, ETA1, ETA2, &self.0, &mut ct)?;
                Ok((ssk, crate::types::CipherText(ct)))
            }


            /// # Algorithm 17 in `Encaps` trait
            fn encaps_from_seed(&self, m: &[u8; 32]) -> Result<(SharedSecretKey, CipherText), Error> {
                let mut ct = [0u8; CT_LEN];
                let ssk =
                    ml_kem::ml_kem_encaps_internal::<K>(DU, DV, ETA1, ETA2, &self.0, m, &mut ct)?;
                Ok((ssk, crate::types::CipherText(ct)))
            }
        }


        impl Decaps for DecapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;


            /// # Algorithm 21: `ML-KEM.Decaps(dk, c)` on page 38.
            /// Produces the shared secret key from a ciphertext. A tampered ciphertext does
            /// not produce an error; it produces the implicit-rejection key `J(z || c)`.
            ///
            /// **Input**:  Implemented on the decapsulation key struct, ciphertext `c`. <br>
            /// **Output**: Shared secret key `K ∈ B^{32}`.
            ///
            /// # Errors
            /// Returns an error only on an internally inconsistent key; never on ciphertext content.
            fn try_decaps(&self, ct: &CipherText) -> Result<SharedSecretKey, Error> {
                ml_kem::ml_kem_decaps_internal::<K>(DU, DV, ETA1, ETA2, &self.0, &ct.0)
            }
        }


        // ----- SERIALIZATION AND DESERIALIZATION ---

        impl SerDes for EncapsKey {
            type ByteArray = [u8; EK_LEN];


            fn into_bytes(self) -> Self::ByteArray { self.0 }


            /// Runs the section 7.2 type and modulus checks.
            fn try_from_bytes(ek: Self::ByteArray) -> Result<Self, Error> {
                ml_kem::ek_modulus_check::<K>(&ek)?;
                Ok(crate::types::EncapsKey(ek))
            }
        }


        impl SerDes for DecapsKey {
            type ByteArray = [u8; DK_LEN];


            fn into_bytes(self) -> Self::ByteArray { self.0 }


            /// Runs the section 7.3 type and hash checks.
            fn try_from_bytes(dk: Self::ByteArray) -> Result<Self, Error> {
                ml_kem::dk_hash_check::<K>(&dk)?;
                Ok(crate::types::DecapsKey(dk))
            }
        }


        impl SerDes for CipherText {
            type ByteArray = [u8; CT_LEN];


            fn into_bytes(self) -> Self::ByteArray { self.0 }


            // Any bit pattern of the correct length is a well-formed ciphertext
            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, Error> {
                Ok(crate::types::CipherText(ct))
            }
        }


    };
}


/// # Functionality for the **ML-KEM-512** security parameter set.
///
/// This includes specific sizes for the encapsulation key, decapsulation key and ciphertext
/// along with the internal constants taken from [`ParameterSet::MlKem512`]. The ML-KEM-512
/// parameter set is claimed to be in security category 1.
///
/// **1)** The originator starts with the [`ml_kem_512::try_keygen`] function to generate both
/// [`ml_kem_512::EncapsKey`] and [`ml_kem_512::DecapsKey`] structs.
///
/// **2)** The `EncapsKey` is serialized with [`traits::SerDes::into_bytes()`] and sent to the
/// remote party, which deserializes it with [`traits::SerDes::try_from_bytes()`] (this runs the
/// encapsulation key check).
///
/// **3)** The remote party calls [`traits::Encaps::try_encaps()`] to obtain a shared secret and
/// a [`ml_kem_512::CipherText`], then sends the ciphertext back.
///
/// **4)** The originator calls [`traits::Decaps::try_decaps()`] on the ciphertext with its
/// `DecapsKey` to obtain the same shared secret.
///
/// See the top-level [crate] documentation for example code that implements the above flow.
#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512 {
    /// The parameter set value backing this namespace.
    pub const PARAMS: crate::ParameterSet = crate::ParameterSet::MlKem512;

    functionality!();
}


/// # Functionality for the **ML-KEM-768** security parameter set.
///
/// This includes specific sizes for the encapsulation key, decapsulation key and ciphertext
/// along with the internal constants taken from [`ParameterSet::MlKem768`]. The ML-KEM-768
/// parameter set is claimed to be in security category 3.
///
/// The usage flow is identical to that of [`ml_kem_512`]; see the top-level [crate]
/// documentation for example code.
#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768 {
    /// The parameter set value backing this namespace.
    pub const PARAMS: crate::ParameterSet = crate::ParameterSet::MlKem768;

    functionality!();
}


/// # Functionality for the **ML-KEM-1024** security parameter set.
///
/// This includes specific sizes for the encapsulation key, decapsulation key and ciphertext
/// along with the internal constants taken from [`ParameterSet::MlKem1024`]. The ML-KEM-1024
/// parameter set is claimed to be in security category 5.
///
/// The usage flow is identical to that of [`ml_kem_512`]; see the top-level [crate]
/// documentation for example code.
#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024 {
    /// The parameter set value backing this namespace.
    pub const PARAMS: crate::ParameterSet = crate::ParameterSet::MlKem1024;

    functionality!();
}
