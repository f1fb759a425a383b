use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};


/// Errors reported by this crate. Every variant is detected before any secret-dependent
/// arithmetic begins, and decapsulation never reports an error for ciphertext content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A key, ciphertext, seed or output buffer does not have the exact required length.
    #[error("invalid input length: {0}")]
    InvalidInputLength(&'static str),

    /// A numeric parameter (bit width `d`, noise parameter `eta` or security level) is
    /// outside its permitted set.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// An input value is outside its permitted range, such as a coefficient that is not
    /// less than the modulus.
    #[error("range violation: {0}")]
    RangeViolation(&'static str),

    /// A decapsulation key failed its embedded hash check.
    #[error("key check failure: {0}")]
    KeyCheckFailure(&'static str),

    /// The random number generator could not supply the requested bytes.
    #[error("random number generator failure: {0}")]
    RngFailure(&'static str),
}


/// Correctly sized encapsulation key specific to the target security parameter set. <br>
/// Implements the [`crate::traits::Encaps`] and [`crate::traits::SerDes`] traits.
#[derive(Clone, Zeroize)]
pub struct EncapsKey<const EK_LEN: usize>(pub(crate) [u8; EK_LEN]);


/// Correctly sized decapsulation key specific to the target security parameter set. <br>
/// Implements the [`crate::traits::Decaps`] and [`crate::traits::SerDes`] traits.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecapsKey<const DK_LEN: usize>(pub(crate) [u8; DK_LEN]);


/// Correctly sized ciphertext specific to the target security parameter set. <br>
/// Implements the [`crate::traits::SerDes`] trait.
#[derive(Clone, Zeroize)]
pub struct CipherText<const CT_LEN: usize>(pub(crate) [u8; CT_LEN]);


/// The 32-byte shared secret agreed by encapsulation and decapsulation. <br>
/// Implements the [`crate::traits::SerDes`] trait. Equality is evaluated in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey(pub(crate) [u8; 32]);

impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool { bool::from(self.0.ct_eq(&other.0)) }
}

impl Eq for SharedSecretKey {}

// Content is never printed
impl core::fmt::Debug for SharedSecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecretKey(..)")
    }
}

impl crate::traits::SerDes for SharedSecretKey {
    type ByteArray = [u8; 32];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, Error> { Ok(SharedSecretKey(ssk)) }
}


// Internal polynomial types. Coefficients are always held fully reduced in [0, q).

/// A polynomial in `R_q`, the normal (coefficient) domain
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct R(pub(crate) [u16; 256]);

/// A polynomial in `T_q`, the NTT domain
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct T(pub(crate) [u16; 256]);

pub(crate) const R0: R = R([0u16; 256]);
pub(crate) const T0: T = T([0u16; 256]);
