// This file implements functionality from FIPS 203 section 4.3 The Number-Theoretic Transform

use crate::helpers::{add_mod, mul_mod, reduce_q32, sub_mod, GAMMA_TABLE, ZETA_TABLE};
use crate::types::{R, T};
use crate::{N, Q};


/// # Algorithm 9: `NTT(f)` on page 26.
/// Computes the NTT representation `f_hat` of the given polynomial `f ∈ R_q`. An outer loop
/// over the vector has been folded into this function, so it processes an array of elements.
///
/// **Input**:  array `f ∈ Z^{256}_q`    ▷ the coefficients of the input polynomial <br>
/// **Output**: array `f_hat ∈ Z^{256}_q`    ▷ the coefficients of the NTT of the input polynomial
pub(crate) fn ntt<const KL: usize>(array_f: &[R; KL]) -> [T; KL] {
    debug_assert!(
        array_f.iter().all(|f| f.0.iter().all(|&c| u32::from(c) < Q)),
        "Alg 9: input not reduced"
    );
    // 1: f_hat ← f    ▷ will compute NTT in-place on a copy of input array
    let mut f_hat: [T; KL] = core::array::from_fn(|x| T(array_f[x].0));

    for f_poly in &mut f_hat {
        //
        // 2: i ← 1
        let mut i = 1;

        // 3: for (len ← 128; len ≥ 2; len ← len/2)
        let mut len = 128;
        while len >= 2 {
            //
            // 4: for (start ← 0; start < 256; start ← start + 2 · len)
            for start in (0..N).step_by(2 * len) {
                //
                // 5: zeta ← ζ^{BitRev7(i)} mod q
                let zeta = ZETA_TABLE[i];

                // 6: i ← i + 1
                i += 1;

                // 7: for (j ← start; j < start + len; j ++)
                for j in start..(start + len) {
                    //
                    // 8: t ← zeta · f_hat[j + len]    ▷ steps 8-10 done modulo q
                    let t = mul_mod(zeta, f_poly.0[j + len]);

                    // 9: f_hat[j + len] ← f_hat[j] − t
                    f_poly.0[j + len] = sub_mod(f_poly.0[j], t);

                    // 10: f_hat[j] ← f_hat[j] + t
                    f_poly.0[j] = add_mod(f_poly.0[j], t);
                    //
                } // 11: end for
            } // 12: end for

            len /= 2;
        } // 13: end for
        debug_assert_eq!(i, 128, "Alg 9: zeta index");
    }

    f_hat // 14: return f_hat
}


/// # Algorithm 10: `NTT^{−1}(f_hat)` on page 26.
/// Computes the polynomial `f ∈ R_q` corresponding to the given NTT representation
/// `f_hat ∈ T_q`. An outer loop over the vector has been folded into this function.
///
/// **Input**:  array `f_hat ∈ Z^{256}`    ▷ the coefficients of input NTT representation <br>
/// **Output**: array `f ∈ Z^{256}`    ▷ the coefficients of the inverse NTT of the input
pub(crate) fn ntt_inv<const KL: usize>(f_hat: &[T; KL]) -> [R; KL] {
    //
    // 1: f ← f_hat    ▷ will compute in-place on a copy of input array
    let mut array_f: [R; KL] = core::array::from_fn(|x| R(f_hat[x].0));

    for f_poly in &mut array_f {
        //
        // 2: i ← 127
        let mut i = 127;

        // 3: for (len ← 2; len ≤ 128; len ← 2 · len)
        let mut len = 2;
        while len <= 128 {
            //
            // 4: for (start ← 0; start < 256; start ← start + 2 · len)
            for start in (0..N).step_by(2 * len) {
                //
                // 5: zeta ← ζ^{BitRev7(i)} mod q
                let zeta = ZETA_TABLE[i];

                // 6: i ← i − 1
                i -= 1;

                // 7: for (j ← start; j < start + len; j ++)
                for j in start..(start + len) {
                    //
                    // 8: t ← f[j]
                    let t = f_poly.0[j];

                    // 9: f[j] ← t + f[j + len]    ▷ steps 9-10 done modulo q
                    f_poly.0[j] = add_mod(t, f_poly.0[j + len]);

                    // 10: f[j + len] ← zeta · (f[j + len] − t)
                    f_poly.0[j + len] = mul_mod(zeta, sub_mod(f_poly.0[j + len], t));
                    //
                } // 11: end for
            } // 12: end for

            len *= 2;
        } // 13: end for

        // 14: f ← f · 3303 mod q    ▷ multiply every entry by 3303 ≡ 128^{−1} mod q
        f_poly.0.iter_mut().for_each(|c| *c = mul_mod(*c, 3303));
    }

    array_f // 15: return f
}


/// # Algorithm 11: `MultiplyNTTs(f_hat, g_hat)` on page 27.
/// Computes the product (in the ring `T_q`) of two NTT representations.
///
/// **Input**:  Two arrays `f_hat ∈ Z^{256}_q` and `g_hat ∈ Z^{256}_q`    ▷ the coefficients of
///             two NTT representations <br>
/// **Output**: An array `h_hat ∈ Z^{256}_q`    ▷ the coefficients of the product of the inputs
#[must_use]
pub(crate) fn multiply_ntts(f_hat: &T, g_hat: &T) -> T {
    let mut h_hat = [0u16; 256];

    // 1: for (i ← 0; i < 128; i ++)
    for i in 0..128 {
        //
        // 2: (h_hat[2i], h_hat[2i + 1]) ← BaseCaseMultiply(f_hat[2i], f_hat[2i + 1],
        //                                 g_hat[2i], g_hat[2i + 1], ζ^{2BitRev7(i) + 1})
        let (c0, c1) = base_case_multiply(
            f_hat.0[2 * i],
            f_hat.0[2 * i + 1],
            g_hat.0[2 * i],
            g_hat.0[2 * i + 1],
            GAMMA_TABLE[i],
        );
        h_hat[2 * i] = c0;
        h_hat[2 * i + 1] = c1;
        //
    } // 3: end for

    T(h_hat) // 4: return h_hat
}


/// # Algorithm 12: `BaseCaseMultiply(a0, a1, b0, b1, γ)` on page 24.
/// Computes the product of two degree-one polynomials with respect to a quadratic modulus.
///
/// **Input**:  `a0, a1, b0, b1 ∈ Z_q`    ▷ the coefficients of `a0 + a1·X` and `b0 + b1·X` <br>
/// **Input**:  `γ ∈ Z_q`    ▷ the modulus is `X^2 − γ` <br>
/// **Output**: `c0, c1 ∈ Z_q`    ▷ the coefficients of the product of the two polynomials
fn base_case_multiply(a0: u16, a1: u16, b0: u16, b1: u16, gamma: u16) -> (u16, u16) {
    // Each u32 sum below is less than 2·q^2, which does not overflow
    // 1: c0 ← a0 · b0 + a1 · b1 · γ    ▷ steps 1-2 done modulo q
    let c0 = reduce_q32(
        u32::from(a0) * u32::from(b0) + u32::from(mul_mod(a1, b1)) * u32::from(gamma),
    );

    // 2: c1 ← a0 · b1 + a1 · b0
    let c1 = reduce_q32(u32::from(a0) * u32::from(b1) + u32::from(a1) * u32::from(b0));

    (c0, c1) // 3: return c0, c1
}
