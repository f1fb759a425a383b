// This file implements functionality from FIPS 203 sections 6/7: ML-KEM internal and external
// key generation, encapsulation and decapsulation, along with the section 7 input checks.

use crate::byte_fns::{byte_decode, byte_encode};
use crate::hashing::{g, h, j};
use crate::helpers::ensure;
use crate::k_pke::{k_pke_decrypt, k_pke_encrypt, k_pke_key_gen};
use crate::types::{Error, SharedSecretKey};
use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Largest ciphertext across all parameter sets (ML-KEM-1024)
const MAX_CT_LEN: usize = 1568;


/// # Algorithm 16: `ML-KEM.KeyGen_internal(d, z)` on page 32.
/// Uses randomness to generate an encapsulation key and a corresponding decapsulation key.
///
/// **Input**:  randomness `d ∈ B^{32}` <br>
/// **Input**:  randomness `z ∈ B^{32}` <br>
/// **Output**: encapsulation key `ek ∈ B^{384·k+32}` <br>
/// **Output**: decapsulation key `dk ∈ B^{768·k+96}`
pub(crate) fn ml_kem_key_gen_internal<const K: usize>(
    eta1: usize, d: &[u8; 32], z: &[u8; 32], ek: &mut [u8], dk: &mut [u8],
) -> Result<(), Error> {
    ensure!(ek.len() == 384 * K + 32, Error::InvalidInputLength("Alg 16: ek length"));
    ensure!(dk.len() == 768 * K + 96, Error::InvalidInputLength("Alg 16: dk length"));

    // 1: (ek_PKE, dk_PKE) ← K-PKE.KeyGen(d)    ▷ run key generation for K-PKE
    // 2: ek ← ek_PKE    ▷ KEM encaps key is just the PKE encryption key
    let (dk_pke, dk_rest) = dk.split_at_mut(384 * K);
    k_pke_key_gen::<K>(eta1, d, ek, dk_pke)?;

    // 3: dk ← (dk_PKE || ek || H(ek) || z)    ▷ KEM decaps key includes PKE decryption key
    let (dk_ek, dk_rest) = dk_rest.split_at_mut(384 * K + 32);
    dk_ek.copy_from_slice(ek);
    let (dk_h, dk_z) = dk_rest.split_at_mut(32);
    dk_h.copy_from_slice(&h(&[&ek[..]]));
    dk_z.copy_from_slice(z);

    Ok(()) // 4: return (ek, dk)
}


/// # Algorithm 19: `ML-KEM.KeyGen()` on page 35.
/// Generates an encapsulation key and a corresponding decapsulation key.
///
/// **Output**: encapsulation key `ek ∈ B^{384·k+32}` <br>
/// **Output**: decapsulation key `dk ∈ B^{768·k+96}`
///
/// # Errors
/// Returns an error when the random number generator fails or an output buffer is the wrong size.
pub(crate) fn ml_kem_key_gen<const K: usize>(
    rng: &mut impl CryptoRngCore, eta1: usize, ek: &mut [u8], dk: &mut [u8],
) -> Result<(), Error> {
    ensure!(ek.len() == 384 * K + 32, Error::InvalidInputLength("Alg 19: ek length"));
    ensure!(dk.len() == 768 * K + 96, Error::InvalidInputLength("Alg 19: dk length"));

    // 1: d ←$ B^{32}    ▷ d is 32 random bytes
    let mut d = [0u8; 32];
    rng.try_fill_bytes(&mut d).map_err(|_| Error::RngFailure("Alg 19: d"))?;

    // 2: z ←$ B^{32}    ▷ z is 32 random bytes
    let mut z = [0u8; 32];
    rng.try_fill_bytes(&mut z).map_err(|_| Error::RngFailure("Alg 19: z"))?;

    // 3: if d == NULL or z == NULL then
    // 4:   return ⊥    ▷ return an error indication if random bit generation failed
    // 5: end if
    // --> handled by the map_err above

    // 6: (ek, dk) ← ML-KEM.KeyGen_internal(d, z)    ▷ run internal key generation algorithm
    let result = ml_kem_key_gen_internal::<K>(eta1, &d, &z, ek, dk);
    d.zeroize();
    z.zeroize();

    result // 7: return (ek, dk)
}


/// # Algorithm 17: `ML-KEM.Encaps_internal(ek, m)` on page 33.
/// Uses the encapsulation key and randomness to generate a key and an associated ciphertext.
/// The encapsulation key first passes the section 7.2 modulus check.
///
/// **Input**:  encapsulation key `ek ∈ B^{384·k+32}` <br>
/// **Input**:  randomness `m ∈ B^{32}` <br>
/// **Output**: shared secret key `K ∈ B^{32}` <br>
/// **Output**: ciphertext `c ∈ B^{32·(du·k+dv)}`
#[allow(clippy::similar_names, clippy::too_many_arguments)]
pub(crate) fn ml_kem_encaps_internal<const K: usize>(
    du: usize, dv: usize, eta1: usize, eta2: usize, ek: &[u8], m: &[u8; 32], ct: &mut [u8],
) -> Result<SharedSecretKey, Error> {
    ensure!((1..12).contains(&du), Error::InvalidParameter("Alg 17: du out of range"));
    ensure!((1..12).contains(&dv), Error::InvalidParameter("Alg 17: dv out of range"));
    ensure!(ct.len() == 32 * (du * K + dv), Error::InvalidInputLength("Alg 17: ct length"));
    ek_modulus_check::<K>(ek)?;

    // 1: (K, r) ← G(m || H(ek))    ▷ derive shared secret key K and randomness r
    let (mut k, mut r) = g(&[m, &h(&[ek])]);

    // 2: c ← K-PKE.Encrypt(ek, m, r)    ▷ encrypt m using K-PKE with randomness r
    let result = k_pke_encrypt::<K>(du, dv, eta1, eta2, ek, m, &r, ct);
    r.zeroize();
    let ssk = result.map(|()| SharedSecretKey(k));
    k.zeroize();

    ssk // 3: return (K, c)
}


/// # Algorithm 20: `ML-KEM.Encaps(ek)` on page 37.
/// Uses the encapsulation key to generate a shared secret key and an associated ciphertext.
///
/// **Input**:  encapsulation key `ek ∈ B^{384·k+32}` <br>
/// **Output**: shared secret key `K ∈ B^{32}` <br>
/// **Output**: ciphertext `c ∈ B^{32·(du·k+dv)}`
///
/// # Errors
/// Returns an error when the random number generator fails or an input fails validation.
#[allow(clippy::too_many_arguments)]
pub(crate) fn ml_kem_encaps<const K: usize>(
    rng: &mut impl CryptoRngCore, du: usize, dv: usize, eta1: usize, eta2: usize, ek: &[u8],
    ct: &mut [u8],
) -> Result<SharedSecretKey, Error> {
    ensure!(ek.len() == 384 * K + 32, Error::InvalidInputLength("Alg 20: ek length"));
    ensure!(ct.len() == 32 * (du * K + dv), Error::InvalidInputLength("Alg 20: ct length"));

    // 1: m ←$ B^{32}    ▷ m is 32 random bytes
    let mut m = [0u8; 32];
    rng.try_fill_bytes(&mut m).map_err(|_| Error::RngFailure("Alg 20: m"))?;

    // 2: if m == NULL then
    // 3:   return ⊥    ▷ return an error indication if random bit generation failed
    // 4: end if
    // --> handled by the map_err above

    // 5: (K, c) ← ML-KEM.Encaps_internal(ek, m)    ▷ run internal encapsulation algorithm
    let result = ml_kem_encaps_internal::<K>(du, dv, eta1, eta2, ek, &m, ct);
    m.zeroize();

    result // 6: return (K, c)
}


/// # Algorithm 18: `ML-KEM.Decaps_internal(dk, c)` on page 34.
/// Uses the decapsulation key to produce a shared secret key from a ciphertext. The
/// decapsulation key first passes the section 7.3 hash check. A ciphertext that does not
/// re-encrypt identically yields the implicit-rejection key `J(z || c)`, selected in constant
/// time; this never results in an error.
///
/// **Input**:  decapsulation key `dk ∈ B^{768·k+96}` <br>
/// **Input**:  ciphertext `c ∈ B^{32·(du·k+dv)}` <br>
/// **Output**: shared secret key `K ∈ B^{32}`
#[allow(clippy::similar_names)]
pub(crate) fn ml_kem_decaps_internal<const K: usize>(
    du: usize, dv: usize, eta1: usize, eta2: usize, dk: &[u8], ct: &[u8],
) -> Result<SharedSecretKey, Error> {
    ensure!((1..12).contains(&du), Error::InvalidParameter("Alg 18: du out of range"));
    ensure!((1..12).contains(&dv), Error::InvalidParameter("Alg 18: dv out of range"));
    ensure!(ct.len() == 32 * (du * K + dv), Error::InvalidInputLength("Alg 18: ct length"));
    ensure!(ct.len() <= MAX_CT_LEN, Error::InvalidInputLength("Alg 18: ct too long"));
    dk_hash_check::<K>(dk)?;

    // 1: dk_PKE ← dk[0 : 384·k]    ▷ extract (from KEM decaps key) the PKE decryption key
    let dk_pke = &dk[0..384 * K];

    // 2: ek_PKE ← dk[384·k : 768·k + 32]    ▷ extract PKE encryption key
    let ek_pke = &dk[384 * K..768 * K + 32];

    // 3: h ← dk[768·k + 32 : 768·k + 64]    ▷ extract hash of PKE encryption key
    let h_ek = &dk[768 * K + 32..768 * K + 64];

    // 4: z ← dk[768·k + 64 : 768·k + 96]    ▷ extract implicit rejection value
    let z = &dk[768 * K + 64..768 * K + 96];

    // 5: m′ ← K-PKE.Decrypt(dk_PKE, c)    ▷ decrypt ciphertext
    let mut m_prime = k_pke_decrypt::<K>(du, dv, dk_pke, ct)?;

    // 6: (K′, r′) ← G(m′ || h)
    let (mut k_prime, mut r_prime) = g(&[&m_prime, h_ek]);

    // 7: K̄ ← J(z || c)
    let mut k_bar = j(&[z, ct]);

    // 8: c′ ← K-PKE.Encrypt(ek_PKE, m′, r′)    ▷ re-encrypt using the derived randomness r′
    let mut c_prime = [0u8; MAX_CT_LEN];
    let c_prime = &mut c_prime[0..ct.len()];
    let result = k_pke_encrypt::<K>(du, dv, eta1, eta2, ek_pke, &m_prime, &r_prime, c_prime);
    m_prime.zeroize();
    r_prime.zeroize();
    result?;

    // 9: if c ≠ c′ then
    // 10:   K′ ← K̄    ▷ if ciphertexts do not match, "implicitly reject"
    // 11: end if
    let mismatch = !ct.ct_eq(c_prime);
    for (kp, kb) in k_prime.iter_mut().zip(k_bar.iter()) {
        kp.conditional_assign(kb, mismatch);
    }
    k_bar.zeroize();

    let ssk = SharedSecretKey(k_prime);
    k_prime.zeroize();
    Ok(ssk) // 12: return K′
}


/// FIPS 203 section 7.2 encapsulation key check: the length is correct and re-encoding the
/// decoded `t_hat` reproduces the input, so every 12-bit coefficient is less than q.
pub(crate) fn ek_modulus_check<const K: usize>(ek: &[u8]) -> Result<(), Error> {
    ensure!(ek.len() == 384 * K + 32, Error::InvalidInputLength("ek type check: length"));
    let mut re_encoded = [0u8; 384];
    for chunk in ek[..384 * K].chunks(384) {
        byte_encode(12, &byte_decode(12, chunk)?, &mut re_encoded)?;
        ensure!(
            re_encoded[..] == chunk[..],
            Error::RangeViolation("ek modulus check: coefficient not less than q")
        );
    }
    Ok(())
}


/// FIPS 203 section 7.3 decapsulation key check: the length is correct and the embedded
/// hash matches `H` of the embedded encapsulation key.
pub(crate) fn dk_hash_check<const K: usize>(dk: &[u8]) -> Result<(), Error> {
    ensure!(dk.len() == 768 * K + 96, Error::InvalidInputLength("dk type check: length"));
    let h_ek = h(&[&dk[384 * K..768 * K + 32]]);
    ensure!(
        h_ek[..] == dk[768 * K + 32..768 * K + 64],
        Error::KeyCheckFailure("dk hash check: H(ek) does not match")
    );
    Ok(())
}


/// FIPS 203 section 7.1 pair-wise consistency check. Verifies both key checks, that the
/// decapsulation key embeds this exact encapsulation key, and that a fresh encapsulation
/// decapsulates to the same shared secret. Not constant time.
#[allow(clippy::too_many_arguments)]
pub(crate) fn validate_keypair<const K: usize>(
    rng: &mut impl CryptoRngCore, du: usize, dv: usize, eta1: usize, eta2: usize, ek: &[u8],
    dk: &[u8],
) -> Result<(), Error> {
    ek_modulus_check::<K>(ek)?;
    dk_hash_check::<K>(dk)?;
    ensure!(
        dk[384 * K..768 * K + 32] == ek[..],
        Error::KeyCheckFailure("pair-wise check: dk does not embed ek")
    );
    let mut ct = [0u8; MAX_CT_LEN];
    let ct = ct
        .get_mut(..32 * (du * K + dv))
        .ok_or(Error::InvalidParameter("pair-wise check: ct too long"))?;
    let ssk1 = ml_kem_encaps::<K>(rng, du, dv, eta1, eta2, ek, ct)?;
    let ssk2 = ml_kem_decaps_internal::<K>(du, dv, eta1, eta2, dk, ct)?;
    ensure!(ssk1 == ssk2, Error::KeyCheckFailure("pair-wise check: shared secrets differ"));
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    const EK_LEN: usize = 800;
    const DK_LEN: usize = 1632;
    const CT_LEN: usize = 768;

    fn keys(seed: u8) -> ([u8; EK_LEN], [u8; DK_LEN]) {
        let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
        ml_kem_key_gen_internal::<2>(3, &[seed; 32], &[seed ^ 0xFF; 32], &mut ek, &mut dk)
            .unwrap();
        (ek, dk)
    }

    #[test]
    fn test_dk_layout() {
        let (ek, dk) = keys(1);
        assert_eq!(&dk[768..1568], &ek[..]);
        assert_eq!(&dk[1568..1600], &h(&[&ek])[..]);
        assert_eq!(&dk[1600..1632], &[0xFEu8; 32][..]);
    }

    #[test]
    fn test_implicit_rejection() {
        let (ek, dk) = keys(2);
        let mut ct = [0u8; CT_LEN];
        let ssk1 = ml_kem_encaps_internal::<2>(10, 4, 3, 2, &ek, &[7u8; 32], &mut ct).unwrap();
        let ssk2 = ml_kem_decaps_internal::<2>(10, 4, 3, 2, &dk, &ct).unwrap();
        assert_eq!(ssk1, ssk2);

        // A tampered ciphertext decapsulates to J(z || c) rather than an error
        ct[100] ^= 0x01;
        let ssk3 = ml_kem_decaps_internal::<2>(10, 4, 3, 2, &dk, &ct).unwrap();
        assert_ne!(ssk1, ssk3);
        assert_eq!(ssk3.0, j(&[&dk[1600..1632], &ct]));
    }

    #[test]
    fn test_ek_modulus_check() {
        let (mut ek, _dk) = keys(3);
        assert!(ek_modulus_check::<2>(&ek).is_ok());
        // First coefficient set to 0xFFF = 4095, which is not less than q
        ek[0] = 0xFF;
        ek[1] |= 0x0F;
        assert!(matches!(ek_modulus_check::<2>(&ek), Err(Error::RangeViolation(_))));
        let mut ct = [0u8; CT_LEN];
        assert!(matches!(
            ml_kem_encaps_internal::<2>(10, 4, 3, 2, &ek, &[0u8; 32], &mut ct),
            Err(Error::RangeViolation(_))
        ));
        assert!(matches!(ek_modulus_check::<2>(&ek[1..]), Err(Error::InvalidInputLength(_))));
    }

    #[test]
    fn test_dk_hash_check() {
        let (_ek, mut dk) = keys(4);
        assert!(dk_hash_check::<2>(&dk).is_ok());
        dk[1570] ^= 0x80;
        assert!(matches!(dk_hash_check::<2>(&dk), Err(Error::KeyCheckFailure(_))));
        let ct = [0u8; CT_LEN];
        assert!(matches!(
            ml_kem_decaps_internal::<2>(10, 4, 3, 2, &dk, &ct),
            Err(Error::KeyCheckFailure(_))
        ));
        assert!(matches!(
            ml_kem_decaps_internal::<2>(10, 4, 3, 2, &dk[..1631], &ct),
            Err(Error::InvalidInputLength(_))
        ));
    }

    #[test]
    fn test_validate_keypair() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(5);
        let (ek, dk) = keys(5);
        assert!(validate_keypair::<2>(&mut rng, 10, 4, 3, 2, &ek, &dk).is_ok());
        let (ek_other, _) = keys(6);
        assert!(validate_keypair::<2>(&mut rng, 10, 4, 3, 2, &ek_other, &dk).is_err());
        let mut dk_bad = dk;
        dk_bad[0] ^= 0x01; // secret vector no longer matches ek
        assert!(validate_keypair::<2>(&mut rng, 10, 4, 3, 2, &ek, &dk_bad).is_err());
    }

    #[test]
    fn test_encaps_shared_key() {
        let (ek, _dk) = keys(5);
        let m = [9u8; 32];
        let mut ct = [0u8; CT_LEN];
        let ssk = ml_kem_encaps_internal::<2>(10, 4, 3, 2, &ek, &m, &mut ct).unwrap();
        assert_eq!(ssk.0, g(&[&m, &h(&[&ek])]).0);

        // A failing encryption returns no key
        assert!(matches!(
            ml_kem_encaps_internal::<2>(10, 4, 4, 2, &ek, &m, &mut ct),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_wrong_lengths() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(6);
        let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
        assert!(matches!(
            ml_kem_key_gen::<2>(&mut rng, 3, &mut ek[1..], &mut dk),
            Err(Error::InvalidInputLength(_))
        ));
        assert!(matches!(
            ml_kem_key_gen::<2>(&mut rng, 3, &mut ek, &mut dk[1..]),
            Err(Error::InvalidInputLength(_))
        ));
        ml_kem_key_gen::<2>(&mut rng, 3, &mut ek, &mut dk).unwrap();
        let mut ct = [0u8; CT_LEN + 1];
        assert!(matches!(
            ml_kem_encaps::<2>(&mut rng, 10, 4, 3, 2, &ek, &mut ct),
            Err(Error::InvalidInputLength(_))
        ));
        assert!(matches!(
            ml_kem_decaps_internal::<2>(10, 4, 3, 2, &dk, &ct),
            Err(Error::InvalidInputLength(_))
        ));
    }
}
