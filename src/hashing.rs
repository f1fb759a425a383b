// This file implements functionality from FIPS 203 section 4.1 Cryptographic Functions

use crate::helpers::ensure;
use crate::types::Error;
use sha3::digest::{ExtendableOutput, FixedOutput, Update, XofReader};
use sha3::{Sha3_256, Sha3_512, Shake128, Shake128Reader, Shake256};


/// # Function H(s) of (4.4) on page 18.
/// Takes a reference to a list of byte-slice references and runs them through SHA3-256.
pub(crate) fn h(v: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::default();
    v.iter().for_each(|b| hasher.update(b));
    let mut result = [0u8; 32];
    result.copy_from_slice(&hasher.finalize_fixed());
    result
}


/// # Function J(s) of (4.4) on page 18.
/// Takes a reference to a list of byte-slice references and runs them through SHAKE256,
/// returning the first 32 bytes of output.
pub(crate) fn j(v: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    v.iter().for_each(|b| hasher.update(b));
    let mut reader = hasher.finalize_xof();
    let mut result = [0u8; 32];
    reader.read(&mut result);
    result
}


/// # Function G(c) of (4.5) on page 18.
/// Takes a reference to a list of byte-slice references and runs them through SHA3-512,
/// returning the two 32-byte halves of the digest.
pub(crate) fn g(v: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::default();
    v.iter().for_each(|b| hasher.update(b));
    let digest = hasher.finalize_fixed();
    let (mut a, mut b) = ([0u8; 32], [0u8; 32]);
    a.copy_from_slice(&digest[0..32]);
    b.copy_from_slice(&digest[32..64]);
    (a, b)
}


/// # Function `PRF_η(s, b)` of (4.3) on page 18.
/// Runs `s || b` through SHAKE256 and fills the output with exactly `64·η` bytes.
pub(crate) fn prf(eta: usize, s: &[u8; 32], b: u8, bytes_out: &mut [u8]) -> Result<(), Error> {
    ensure!((eta == 2) | (eta == 3), Error::InvalidParameter("PRF: eta must be 2 or 3"));
    ensure!(bytes_out.len() == 64 * eta, Error::InvalidInputLength("PRF: output length is not 64·eta"));
    let mut hasher = Shake256::default();
    hasher.update(s);
    hasher.update(&[b]);
    let mut reader = hasher.finalize_xof();
    reader.read(bytes_out);
    Ok(())
}


/// # Function XOF of (4.2) and Algorithm 2 on page 19, absorbing phase.
/// SHAKE128 as an explicit state value that moves from absorbing to squeezing. Once
/// `finalize` has consumed it, nothing further can be absorbed.
pub(crate) struct Xof(Shake128);

/// The squeezing phase of the XOF, obtained from [`Xof::finalize`].
pub(crate) struct XofSqueeze(Shake128Reader);

impl Xof {
    /// `ctx ← XOF.Init()`
    pub(crate) fn init() -> Self { Xof(Shake128::default()) }

    /// `ctx ← XOF.Absorb(ctx, str)`
    #[must_use]
    pub(crate) fn absorb(mut self, data: &[u8]) -> Self {
        self.0.update(data);
        self
    }

    /// Ends absorption
    pub(crate) fn finalize(self) -> XofSqueeze { XofSqueeze(self.0.finalize_xof()) }
}

impl XofSqueeze {
    /// `(ctx, B) ← XOF.Squeeze(ctx, L)`
    pub(crate) fn squeeze<const L: usize>(mut self) -> (Self, [u8; L]) {
        let mut out = [0u8; L];
        self.0.read(&mut out);
        (self, out)
    }
}
