// This file implements functionality from FIPS 203 section 5 The K-PKE Component Scheme

use crate::byte_fns::{byte_decode, byte_encode, compress, decompress};
use crate::hashing::g;
use crate::helpers::{dot_t_prod, ensure, mat_t_vec_mul, mat_vec_mul, poly_add, poly_sub};
use crate::ntt::{ntt, ntt_inv};
use crate::sampling::{gen_a_hat, sample_cbd_vec};
use crate::types::{Error, R, R0, T, T0};
use zeroize::Zeroize;


/// # Algorithm 13: `K-PKE.KeyGen(d)` on page 29.
/// Uses randomness to generate an encryption key and a corresponding decryption key.
///
/// **Input**:  randomness `d ∈ B^{32}` <br>
/// **Output**: encryption key `ek_PKE ∈ B^{384·k+32}` <br>
/// **Output**: decryption key `dk_PKE ∈ B^{384·k}`
#[allow(clippy::cast_possible_truncation)] // K ≤ 4
pub(crate) fn k_pke_key_gen<const K: usize>(
    eta1: usize, d: &[u8; 32], ek_pke: &mut [u8], dk_pke: &mut [u8],
) -> Result<(), Error> {
    ensure!((eta1 == 2) | (eta1 == 3), Error::InvalidParameter("Alg 13: eta1 must be 2 or 3"));
    ensure!(ek_pke.len() == 384 * K + 32, Error::InvalidInputLength("Alg 13: ek_pke length"));
    ensure!(dk_pke.len() == 384 * K, Error::InvalidInputLength("Alg 13: dk_pke length"));

    // 1: (ρ, σ) ← G(d || k)    ▷ expand 32+1 bytes to two pseudorandom 32-byte seeds
    let (rho, mut sigma) = g(&[d, &[K as u8]]);

    // 2: N ← 0
    // The counter N runs over 0..K for s then K..2K for e

    // 3: for (i ← 0; i < k; i ++)    ▷ generate matrix A ∈ (Z^{256}_q)^{k×k}
    // 4:   for (j ← 0; j < k; j ++)
    // 5:     A_hat[i, j] ← SampleNTT(ρ || j || i)    ▷ j and i are bytes 33 and 34 of the input
    // 6:   end for
    // 7: end for
    let a_hat = gen_a_hat::<K>(&rho);

    // 8: for (i ← 0; i < k; i ++)    ▷ generate s ∈ (Z^{256}_q)^k
    // 9:   s[i] ← SamplePolyCBD_η1(PRF_η1(σ, N))    ▷ s[i] ∈ Z^{256}_q sampled from CBD
    // 10:  N ← N + 1
    // 11: end for
    let mut s: [R; K] = sample_cbd_vec::<K>(eta1, &sigma, 0)?;

    // 12: for (i ← 0; i < k; i ++)    ▷ generate e ∈ (Z^{256}_q)^k
    // 13:   e[i] ← SamplePolyCBD_η1(PRF_η1(σ, N))    ▷ e[i] ∈ Z^{256}_q sampled from CBD
    // 14:   N ← N + 1
    // 15: end for
    let mut e: [R; K] = sample_cbd_vec::<K>(eta1, &sigma, K as u8)?;
    sigma.zeroize();

    // 16: s_hat ← NTT(s)    ▷ NTT is run k times (once for each coordinate of s)
    let mut s_hat: [T; K] = ntt(&s);
    s.zeroize();

    // 17: e_hat ← NTT(e)    ▷ NTT is run k times
    let mut e_hat: [T; K] = ntt(&e);
    e.zeroize();

    // 18: t_hat ← A_hat ◦ s_hat + e_hat    ▷ noisy linear system in NTT domain
    let as_hat = mat_vec_mul(&a_hat, &s_hat);
    let t_hat: [T; K] = core::array::from_fn(|i| T(poly_add(&as_hat[i].0, &e_hat[i].0)));
    e_hat.zeroize();

    // 19: ek_PKE ← ByteEncode12(t_hat) || ρ    ▷ ByteEncode12 is run k times; include seed for A_hat
    for (i, chunk) in ek_pke.chunks_mut(384).take(K).enumerate() {
        byte_encode(12, &t_hat[i].0, chunk)?;
    }
    ek_pke[384 * K..].copy_from_slice(&rho);

    // 20: dk_PKE ← ByteEncode12(s_hat)    ▷ ByteEncode12 is run k times
    for (i, chunk) in dk_pke.chunks_mut(384).enumerate() {
        byte_encode(12, &s_hat[i].0, chunk)?;
    }
    s_hat.zeroize();

    Ok(()) // 21: return (ek_PKE, dk_PKE)
}


/// # Algorithm 14: `K-PKE.Encrypt(ek_PKE, m, r)` on page 30.
/// Uses the encryption key to encrypt a plaintext message using the randomness `r`.
///
/// **Input**:  encryption key `ek_PKE ∈ B^{384·k+32}` <br>
/// **Input**:  message `m ∈ B^{32}` <br>
/// **Input**:  randomness `r ∈ B^{32}` <br>
/// **Output**: ciphertext `c ∈ B^{32·(du·k+dv)}`
#[allow(clippy::cast_possible_truncation, clippy::too_many_arguments)] // K ≤ 4
pub(crate) fn k_pke_encrypt<const K: usize>(
    du: usize, dv: usize, eta1: usize, eta2: usize, ek_pke: &[u8], m: &[u8; 32], r: &[u8; 32],
    ct: &mut [u8],
) -> Result<(), Error> {
    ensure!((eta1 == 2) | (eta1 == 3), Error::InvalidParameter("Alg 14: eta1 must be 2 or 3"));
    ensure!((eta2 == 2) | (eta2 == 3), Error::InvalidParameter("Alg 14: eta2 must be 2 or 3"));
    ensure!((1..12).contains(&du), Error::InvalidParameter("Alg 14: du out of range"));
    ensure!((1..12).contains(&dv), Error::InvalidParameter("Alg 14: dv out of range"));
    ensure!(ek_pke.len() == 384 * K + 32, Error::InvalidInputLength("Alg 14: ek_pke length"));
    ensure!(ct.len() == 32 * (du * K + dv), Error::InvalidInputLength("Alg 14: ct length"));

    // 1: N ← 0
    // The counter N runs over 0..K for y, K..2K for e1, then 2K for e2

    // 2: t_hat ← ByteDecode12(ek_PKE[0 : 384·k])    ▷ run ByteDecode12 k times to decode t_hat
    let mut t_hat = [T0; K];
    for (i, chunk) in ek_pke[..384 * K].chunks(384).enumerate() {
        t_hat[i] = T(byte_decode(12, chunk)?);
    }

    // 3: ρ ← ek_PKE[384·k : 384·k + 32]    ▷ extract 32-byte seed from ek_PKE
    let rho: &[u8; 32] = ek_pke[384 * K..]
        .try_into()
        .map_err(|_| Error::InvalidInputLength("Alg 14: rho length"))?;

    // 4: for (i ← 0; i < k; i ++)    ▷ re-generate matrix A_hat ∈ (Z^{256}_q)^{k×k}
    // 5:   for (j ← 0; j < k; j ++)
    // 6:     A_hat[i, j] ← SampleNTT(ρ || j || i)
    // 7:   end for
    // 8: end for
    let a_hat = gen_a_hat::<K>(rho);

    // 9: for (i ← 0; i < k; i ++)    ▷ generate y ∈ (Z^{256}_q)^k
    // 10:  y[i] ← SamplePolyCBD_η1(PRF_η1(r, N))    ▷ y[i] ∈ Z^{256}_q sampled from CBD
    // 11:  N ← N + 1
    // 12: end for
    let mut y: [R; K] = sample_cbd_vec::<K>(eta1, r, 0)?;

    // 13: for (i ← 0; i < k; i ++)    ▷ generate e1 ∈ (Z^{256}_q)^k
    // 14:  e1[i] ← SamplePolyCBD_η2(PRF_η2(r, N))    ▷ e1[i] ∈ Z^{256}_q sampled from CBD
    // 15:  N ← N + 1
    // 16: end for
    let mut e1: [R; K] = sample_cbd_vec::<K>(eta2, r, K as u8)?;

    // 17: e2 ← SamplePolyCBD_η2(PRF_η2(r, N))    ▷ sample e2 ∈ Z^{256}_q from CBD
    let [mut e2] = sample_cbd_vec::<1>(eta2, r, 2 * K as u8)?;

    // 18: y_hat ← NTT(y)    ▷ NTT is run k times
    let mut y_hat: [T; K] = ntt(&y);
    y.zeroize();

    // 19: u ← NTT−1(A_hat^⊺ ◦ y_hat) + e1    ▷ NTT^{−1} is run k times
    let atyh = ntt_inv(&mat_t_vec_mul(&a_hat, &y_hat));
    let u: [R; K] = core::array::from_fn(|i| R(poly_add(&atyh[i].0, &e1[i].0)));
    e1.zeroize();

    // 20: μ ← Decompress1(ByteDecode1(m))
    let mu = decompress(1, &byte_decode(1, m)?)?;

    // 21: v ← NTT−1(t_hat^⊺ ◦ y_hat) + e2 + μ    ▷ encode plaintext m into polynomial v
    let [tyh] = ntt_inv(&[dot_t_prod(&t_hat, &y_hat)]);
    let v = R(poly_add(&poly_add(&tyh.0, &e2.0), &mu.0));
    y_hat.zeroize();
    e2.zeroize();

    // 22: c1 ← ByteEncode_du(Compress_du(u))    ▷ ByteEncode_du is run k times
    let (c1, c2) = ct.split_at_mut(32 * du * K);
    for (i, chunk) in c1.chunks_mut(32 * du).enumerate() {
        byte_encode(du, &compress(du, &u[i])?, chunk)?;
    }

    // 23: c2 ← ByteEncode_dv(Compress_dv(v))
    byte_encode(dv, &compress(dv, &v)?, c2)?;

    Ok(()) // 24: return c ← (c1 || c2)
}


/// # Algorithm 15: `K-PKE.Decrypt(dk_PKE, c)` on page 31.
/// Uses the decryption key to decrypt a ciphertext.
///
/// **Input**:  decryption key `dk_PKE ∈ B^{384·k}` <br>
/// **Input**:  ciphertext `c ∈ B^{32·(du·k+dv)}` <br>
/// **Output**: message `m ∈ B^{32}`
pub(crate) fn k_pke_decrypt<const K: usize>(
    du: usize, dv: usize, dk_pke: &[u8], ct: &[u8],
) -> Result<[u8; 32], Error> {
    ensure!((1..12).contains(&du), Error::InvalidParameter("Alg 15: du out of range"));
    ensure!((1..12).contains(&dv), Error::InvalidParameter("Alg 15: dv out of range"));
    ensure!(dk_pke.len() == 384 * K, Error::InvalidInputLength("Alg 15: dk_pke length"));
    ensure!(ct.len() == 32 * (du * K + dv), Error::InvalidInputLength("Alg 15: ct length"));

    // 1: c1 ← c[0 : 32·du·k]
    // 2: c2 ← c[32·du·k : 32·(du·k + dv)]
    let (c1, c2) = ct.split_at(32 * du * K);

    // 3: u′ ← Decompress_du(ByteDecode_du(c1))    ▷ run Decompress_du and ByteDecode_du k times
    let mut u = [R0; K];
    for (i, chunk) in c1.chunks(32 * du).enumerate() {
        u[i] = decompress(du, &byte_decode(du, chunk)?)?;
    }

    // 4: v′ ← Decompress_dv(ByteDecode_dv(c2))
    let v = decompress(dv, &byte_decode(dv, c2)?)?;

    // 5: s_hat ← ByteDecode12(dk_PKE)    ▷ run ByteDecode12 k times
    let mut s_hat = [T0; K];
    for (i, chunk) in dk_pke.chunks(384).enumerate() {
        s_hat[i] = T(byte_decode(12, chunk)?);
    }

    // 6: w ← v′ − NTT−1(s_hat^⊺ ◦ NTT(u′))    ▷ run NTT k times; run NTT^{−1} once
    let [su] = ntt_inv(&[dot_t_prod(&s_hat, &ntt(&u))]);
    let mut w = R(poly_sub(&v.0, &su.0));
    s_hat.zeroize();

    debug_assert!(w.0.iter().all(|&c| c < 3329), "Alg 15: w not reduced");

    // 7: m ← ByteEncode1(Compress1(w))    ▷ decode plaintext m from polynomial v
    let mut m = [0u8; 32];
    byte_encode(1, &compress(1, &w)?, &mut m)?;
    w.zeroize();

    Ok(m) // 8: return m
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn round_trip<const K: usize>(eta1: usize, du: usize, dv: usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(K as u64);
        let (mut ek, mut dk) = ([0u8; 384 * 4 + 32], [0u8; 384 * 4]);
        let (ek, dk) = (&mut ek[..384 * K + 32], &mut dk[..384 * K]);
        let mut ct = [0u8; 1568];
        let ct = &mut ct[..32 * (du * K + dv)];
        for _i in 0..20 {
            let (d, m, r): ([u8; 32], [u8; 32], [u8; 32]) = (rng.gen(), rng.gen(), rng.gen());
            k_pke_key_gen::<K>(eta1, &d, ek, dk).unwrap();
            k_pke_encrypt::<K>(du, dv, eta1, 2, ek, &m, &r, ct).unwrap();
            assert_eq!(k_pke_decrypt::<K>(du, dv, dk, ct).unwrap(), m);
        }
    }

    #[test]
    fn test_round_trip() {
        round_trip::<2>(3, 10, 4);
        round_trip::<3>(2, 10, 4);
        round_trip::<4>(2, 11, 5);
    }

    #[test]
    fn test_encrypt_is_deterministic() {
        let (mut ek, mut dk) = ([0u8; 384 * 2 + 32], [0u8; 384 * 2]);
        k_pke_key_gen::<2>(3, &[1u8; 32], &mut ek, &mut dk).unwrap();
        let (mut ct1, mut ct2) = ([0u8; 768], [0u8; 768]);
        k_pke_encrypt::<2>(10, 4, 3, 2, &ek, &[2u8; 32], &[3u8; 32], &mut ct1).unwrap();
        k_pke_encrypt::<2>(10, 4, 3, 2, &ek, &[2u8; 32], &[3u8; 32], &mut ct2).unwrap();
        assert_eq!(ct1, ct2);
        k_pke_encrypt::<2>(10, 4, 3, 2, &ek, &[2u8; 32], &[4u8; 32], &mut ct2).unwrap();
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn test_errors() {
        let (mut ek, mut dk) = ([0u8; 384 * 2 + 32], [0u8; 384 * 2]);
        let mut ct = [0u8; 768];
        assert!(matches!(
            k_pke_key_gen::<2>(4, &[0u8; 32], &mut ek, &mut dk),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            k_pke_key_gen::<2>(3, &[0u8; 32], &mut ek[1..], &mut dk),
            Err(Error::InvalidInputLength(_))
        ));
        assert!(matches!(
            k_pke_encrypt::<2>(10, 4, 3, 2, &ek, &[0u8; 32], &[0u8; 32], &mut ct[1..]),
            Err(Error::InvalidInputLength(_))
        ));
        assert!(matches!(
            k_pke_encrypt::<2>(12, 4, 3, 2, &ek, &[0u8; 32], &[0u8; 32], &mut ct),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(k_pke_decrypt::<2>(10, 4, &dk[1..], &ct), Err(Error::InvalidInputLength(_))));
    }
}
