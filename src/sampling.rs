// This file implements functionality from FIPS 203 section 4.2.2 Sampling Algorithms

use crate::byte_fns::bytes_to_bits;
use crate::hashing::{prf, Xof};
use crate::helpers::{ensure, reduce_q32};
use crate::types::{Error, R, R0, T, T0};
use crate::{N, Q};


/// # Algorithm 7: `SampleNTT(B)` on page 23.
/// If the input is a stream of uniformly random bytes, the output is a uniformly random
/// element of `T_q`. Rejection sampling consumes a data-dependent number of XOF bytes, which
/// only depends on public input.
///
/// **Input**:  byte array `B ∈ B^{34}` (a 32-byte seed along with two indices) <br>
/// **Output**: array `a_hat ∈ Z^{256}_q`  (the coefficients of the NTT of a polynomial)
pub(crate) fn sample_ntt(byte_b: &[u8; 34]) -> T {
    let mut array_a_hat = T0;

    // 1: ctx ← XOF.Init()
    // 2: ctx ← XOF.Absorb(ctx, B)
    let mut ctx = Xof::init().absorb(byte_b).finalize();

    // 3: j ← 0
    let mut j = 0usize;

    // 4: while j < 256 do
    while j < N {
        //
        // 5: (ctx, C) ← XOF.Squeeze(ctx, 3)    ▷ get a fresh 3-byte array C from XOF
        let (next_ctx, c) = ctx.squeeze::<3>();
        ctx = next_ctx;
        //
        // 6: d1 ← C[0] + 256 · (C[1] mod 16)    ▷ 0 ≤ d1 < 2^12
        let d1 = u16::from(c[0]) + 256 * (u16::from(c[1]) & 0x0F);
        //
        // 7: d2 ← ⌊C[1]/16⌋ + 16 · C[2]    ▷ 0 ≤ d2 < 2^12
        let d2 = (u16::from(c[1]) >> 4) + 16 * u16::from(c[2]);
        //
        // 8: if d1 < q then
        if u32::from(d1) < Q {
            //
            // 9: a_hat[j] ← d1    ▷ a_hat ∈ Z256
            array_a_hat.0[j] = d1;
            //
            // 10: j ← j + 1
            j += 1;
            //
        } // 11: end if
        //
        // 12: if d2 < q and j < 256 then
        if (u32::from(d2) < Q) & (j < N) {
            //
            // 13: a_hat[j] ← d2
            array_a_hat.0[j] = d2;
            //
            // 14: j ← j + 1
            j += 1;
            //
        } // 15: end if
    } // 16: end while

    array_a_hat // 17: return a_hat
}


/// Generates the public matrix `A_hat` from `ρ` per steps 3-7 of Algorithm 13 (and steps
/// 4-8 of Algorithm 14): `A_hat[i][j] ← SampleNTT(ρ || j || i)`.
#[allow(clippy::cast_possible_truncation)] // i and j < K ≤ 4
pub(crate) fn gen_a_hat<const K: usize>(rho: &[u8; 32]) -> [[T; K]; K] {
    let mut byte_b = [0u8; 34];
    byte_b[0..32].copy_from_slice(rho);
    core::array::from_fn(|i| {
        core::array::from_fn(|j| {
            byte_b[32] = j as u8;
            byte_b[33] = i as u8;
            sample_ntt(&byte_b)
        })
    })
}


/// # Algorithm 8: `SamplePolyCBD_η(B)` on page 23.
/// If the input is a stream of uniformly random bytes, outputs a sample from the
/// distribution `D_η(R_q)`. Constant time with respect to the input bytes.
///
/// **Input**:  byte array `B ∈ B^{64·η}` <br>
/// **Output**: array `f ∈ Z^{256}_q`
pub(crate) fn sample_poly_cbd(eta: usize, byte_b: &[u8]) -> Result<R, Error> {
    ensure!((eta == 2) | (eta == 3), Error::InvalidParameter("Alg 8: eta must be 2 or 3"));
    ensure!(byte_b.len() == 64 * eta, Error::InvalidInputLength("Alg 8: input length is not 64·eta"));

    // 1: b ← BytesToBits(B)
    let mut bit_array = [0u8; 64 * 3 * 8];
    bytes_to_bits(byte_b, &mut bit_array[..512 * eta])?;

    // 2: for (i ← 0; i < 256; i ++)
    let array_f = core::array::from_fn(|i| {
        //
        // 3: x ← ∑_{j=0}^{η-1} b[2iη + j]    ▷ 0 ≤ x ≤ η
        let x: u32 = (0..eta).map(|j| u32::from(bit_array[2 * i * eta + j])).sum();
        //
        // 4: y ← ∑_{j=0}^{η-1} b[2iη + η + j]    ▷ 0 ≤ y ≤ η
        let y: u32 = (0..eta).map(|j| u32::from(bit_array[2 * i * eta + eta + j])).sum();
        //
        // 5: f[i] ← x − y mod q    ▷ 0 ≤ f[i] < q
        reduce_q32(x + Q - y)
        //
    }); // 6: end for

    Ok(R(array_f)) // 7: return f
}


/// Samples `K` noise polynomials with `SamplePolyCBD_η(PRF_η(σ, N))`, where `N` runs from
/// `start` to `start + K - 1`. Callers assign counter ranges explicitly so that each step
/// of Algorithms 13 and 14 draws from its own disjoint range.
#[allow(clippy::cast_possible_truncation)] // i < K ≤ 4
pub(crate) fn sample_cbd_vec<const K: usize>(
    eta: usize, sigma: &[u8; 32], start: u8,
) -> Result<[R; K], Error> {
    debug_assert!(usize::from(start) + K <= 256, "CBD: PRF counter overflow");
    let mut prf_output = [0u8; 64 * 3];
    let mut result = [R0; K];
    for (i, poly) in result.iter_mut().enumerate() {
        let bytes = prf_output
            .get_mut(..64 * eta)
            .ok_or(Error::InvalidParameter("CBD: eta must be 2 or 3"))?;
        prf(eta, sigma, start + i as u8, bytes)?;
        *poly = sample_poly_cbd(eta, bytes)?;
    }
    Ok(result)
}
