// This file implements the FIPS 203 section 8 parameter sets as a runtime value, along with a
// slice-based API that dispatches to the same generic implementation as the typed modules.

use crate::helpers::ensure;
use crate::ml_kem;
use crate::types::{Error, SharedSecretKey};
use rand_core::CryptoRngCore;


/// The three approved ML-KEM parameter sets of FIPS 203 table 2 on page 39. Each variant fixes
/// the module rank `k`, the noise parameters `η1`, `η2` and the compression widths `du`, `dv`,
/// from which all byte lengths derive.
///
/// # Examples
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use fips203::ParameterSet;
/// use rand_chacha::rand_core::SeedableRng;
///
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
/// let params = ParameterSet::from_security_level(768)?;
///
/// let (mut ek, mut dk) = (vec![0u8; params.ek_len()], vec![0u8; params.dk_len()]);
/// params.key_gen(&mut rng, &mut ek, &mut dk)?;
///
/// let mut ct = vec![0u8; params.ct_len()];
/// let ssk1 = params.encaps(&mut rng, &ek, &mut ct)?;
/// let ssk2 = params.decaps(&dk, &ct)?;
/// assert_eq!(ssk1, ssk2);
/// # Ok(())}
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterSet {
    /// ML-KEM-512, security category 1
    MlKem512,
    /// ML-KEM-768, security category 3
    MlKem768,
    /// ML-KEM-1024, security category 5
    MlKem1024,
}


impl ParameterSet {
    /// Selects the parameter set by its nominal security level of 512, 768 or 1024.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for any other value.
    pub fn from_security_level(level: u16) -> Result<Self, Error> {
        match level {
            512 => Ok(Self::MlKem512),
            768 => Ok(Self::MlKem768),
            1024 => Ok(Self::MlKem1024),
            _ => Err(Error::InvalidParameter("security level must be 512, 768 or 1024")),
        }
    }

    /// The nominal security level: 512, 768 or 1024.
    #[must_use]
    pub const fn security_level(self) -> u16 {
        match self {
            Self::MlKem512 => 512,
            Self::MlKem768 => 768,
            Self::MlKem1024 => 1024,
        }
    }

    /// Module rank `k`.
    #[must_use]
    pub const fn k(self) -> usize {
        match self {
            Self::MlKem512 => 2,
            Self::MlKem768 => 3,
            Self::MlKem1024 => 4,
        }
    }

    /// Noise parameter `η1` for the secret and first error vectors.
    #[must_use]
    pub const fn eta1(self) -> usize {
        match self {
            Self::MlKem512 => 3,
            Self::MlKem768 | Self::MlKem1024 => 2,
        }
    }

    /// Noise parameter `η2` for the encryption error terms.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn eta2(self) -> usize { 2 }

    /// Compression width `du` for the `u` component of the ciphertext.
    #[must_use]
    pub const fn du(self) -> usize {
        match self {
            Self::MlKem512 | Self::MlKem768 => 10,
            Self::MlKem1024 => 11,
        }
    }

    /// Compression width `dv` for the `v` component of the ciphertext.
    #[must_use]
    pub const fn dv(self) -> usize {
        match self {
            Self::MlKem512 | Self::MlKem768 => 4,
            Self::MlKem1024 => 5,
        }
    }

    /// Encapsulation key length in bytes, `384·k + 32`.
    #[must_use]
    pub const fn ek_len(self) -> usize { 384 * self.k() + 32 }

    /// Decapsulation key length in bytes, `768·k + 96`.
    #[must_use]
    pub const fn dk_len(self) -> usize { 768 * self.k() + 96 }

    /// Ciphertext length in bytes, `32·(du·k + dv)`.
    #[must_use]
    pub const fn ct_len(self) -> usize { 32 * (self.du() * self.k() + self.dv()) }


    /// # Algorithm 16: `ML-KEM.KeyGen_internal(d, z)` on page 32.
    /// Deterministically derives a key pair from the seeds `d` and `z` into the supplied
    /// buffers.
    ///
    /// # Errors
    /// Returns `InvalidInputLength` if either buffer has the wrong length.
    pub fn key_gen_internal(
        self, d: &[u8; 32], z: &[u8; 32], ek: &mut [u8], dk: &mut [u8],
    ) -> Result<(), Error> {
        self.check_key_lengths(ek, dk)?;
        let eta1 = self.eta1();
        match self {
            Self::MlKem512 => ml_kem::ml_kem_key_gen_internal::<2>(eta1, d, z, ek, dk),
            Self::MlKem768 => ml_kem::ml_kem_key_gen_internal::<3>(eta1, d, z, ek, dk),
            Self::MlKem1024 => ml_kem::ml_kem_key_gen_internal::<4>(eta1, d, z, ek, dk),
        }
    }


    /// # Algorithm 19: `ML-KEM.KeyGen()` on page 35.
    /// Generates a key pair into the supplied buffers using the supplied random number
    /// generator.
    ///
    /// # Errors
    /// Returns `InvalidInputLength` if either buffer has the wrong length, or `RngFailure`.
    pub fn key_gen(
        self, rng: &mut impl CryptoRngCore, ek: &mut [u8], dk: &mut [u8],
    ) -> Result<(), Error> {
        self.check_key_lengths(ek, dk)?;
        let eta1 = self.eta1();
        match self {
            Self::MlKem512 => ml_kem::ml_kem_key_gen::<2>(rng, eta1, ek, dk),
            Self::MlKem768 => ml_kem::ml_kem_key_gen::<3>(rng, eta1, ek, dk),
            Self::MlKem1024 => ml_kem::ml_kem_key_gen::<4>(rng, eta1, ek, dk),
        }
    }


    /// # Algorithm 17: `ML-KEM.Encaps_internal(ek, m)` on page 33.
    /// Deterministically encapsulates with the message `m`, writing the ciphertext into `ct`.
    ///
    /// # Errors
    /// Returns `InvalidInputLength` on a wrong `ek` or `ct` length, or `RangeViolation` if the
    /// encapsulation key fails the modulus check.
    pub fn encaps_internal(
        self, ek: &[u8], m: &[u8; 32], ct: &mut [u8],
    ) -> Result<SharedSecretKey, Error> {
        self.check_encaps_lengths(ek, ct)?;
        let (du, dv, eta1, eta2) = (self.du(), self.dv(), self.eta1(), self.eta2());
        match self {
            Self::MlKem512 => ml_kem::ml_kem_encaps_internal::<2>(du, dv, eta1, eta2, ek, m, ct),
            Self::MlKem768 => ml_kem::ml_kem_encaps_internal::<3>(du, dv, eta1, eta2, ek, m, ct),
            Self::MlKem1024 => ml_kem::ml_kem_encaps_internal::<4>(du, dv, eta1, eta2, ek, m, ct),
        }
    }


    /// # Algorithm 20: `ML-KEM.Encaps(ek)` on page 37.
    /// Encapsulates a fresh shared secret, writing the ciphertext into `ct`.
    ///
    /// # Errors
    /// Returns `InvalidInputLength` on a wrong `ek` or `ct` length, `RangeViolation` if the
    /// encapsulation key fails the modulus check, or `RngFailure`.
    pub fn encaps(
        self, rng: &mut impl CryptoRngCore, ek: &[u8], ct: &mut [u8],
    ) -> Result<SharedSecretKey, Error> {
        self.check_encaps_lengths(ek, ct)?;
        let (du, dv, eta1, eta2) = (self.du(), self.dv(), self.eta1(), self.eta2());
        match self {
            Self::MlKem512 => ml_kem::ml_kem_encaps::<2>(rng, du, dv, eta1, eta2, ek, ct),
            Self::MlKem768 => ml_kem::ml_kem_encaps::<3>(rng, du, dv, eta1, eta2, ek, ct),
            Self::MlKem1024 => ml_kem::ml_kem_encaps::<4>(rng, du, dv, eta1, eta2, ek, ct),
        }
    }


    /// # Algorithm 21: `ML-KEM.Decaps(dk, c)` on page 38.
    /// Decapsulates the ciphertext. A ciphertext that was not produced for this key yields the
    /// implicit-rejection secret rather than an error.
    ///
    /// # Errors
    /// Returns `InvalidInputLength` on a wrong `dk` or `ct` length, or `KeyCheckFailure` if the
    /// decapsulation key fails its hash check.
    pub fn decaps(self, dk: &[u8], ct: &[u8]) -> Result<SharedSecretKey, Error> {
        ensure!(dk.len() == self.dk_len(), Error::InvalidInputLength("decaps: dk length"));
        ensure!(ct.len() == self.ct_len(), Error::InvalidInputLength("decaps: ct length"));
        let (du, dv, eta1, eta2) = (self.du(), self.dv(), self.eta1(), self.eta2());
        match self {
            Self::MlKem512 => ml_kem::ml_kem_decaps_internal::<2>(du, dv, eta1, eta2, dk, ct),
            Self::MlKem768 => ml_kem::ml_kem_decaps_internal::<3>(du, dv, eta1, eta2, dk, ct),
            Self::MlKem1024 => ml_kem::ml_kem_decaps_internal::<4>(du, dv, eta1, eta2, dk, ct),
        }
    }


    fn check_key_lengths(self, ek: &[u8], dk: &[u8]) -> Result<(), Error> {
        ensure!(ek.len() == self.ek_len(), Error::InvalidInputLength("key_gen: ek length"));
        ensure!(dk.len() == self.dk_len(), Error::InvalidInputLength("key_gen: dk length"));
        Ok(())
    }

    fn check_encaps_lengths(self, ek: &[u8], ct: &[u8]) -> Result<(), Error> {
        ensure!(ek.len() == self.ek_len(), Error::InvalidInputLength("encaps: ek length"));
        ensure!(ct.len() == self.ct_len(), Error::InvalidInputLength("encaps: ct length"));
        Ok(())
    }
}
