use crate::ntt::multiply_ntts;
use crate::types::{T, T0};
use crate::{Q, ZETA};


/// If the condition is not met, return the given error. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


#[allow(clippy::cast_lossless)]
const M: u64 = (1u64 << 32) / (Q as u64);

/// Barrett reduction of any `u32` to `[0, q)`
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation, clippy::cast_lossless)]
pub(crate) const fn reduce_q32(a: u32) -> u16 {
    let quot = ((a as u64 * M) >> 32) as u32;
    let res = a - quot * Q; // res is in [0, 2q)
    let sub = res.wrapping_sub(Q);
    let mask = 0u32.wrapping_sub(sub >> 31); // all ones when res < q
    ((res & mask) | (sub & !mask)) as u16
}


#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) fn add_mod(a: u16, b: u16) -> u16 { reduce_q32(u32::from(a) + u32::from(b)) }


#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) fn sub_mod(a: u16, b: u16) -> u16 { reduce_q32(u32::from(a) + Q - u32::from(b)) }


#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) fn mul_mod(a: u16, b: u16) -> u16 { reduce_q32(u32::from(a) * u32::from(b)) }


/// Coefficient-wise polynomial addition mod q; works in either domain
#[must_use]
pub(crate) fn poly_add(a: &[u16; 256], b: &[u16; 256]) -> [u16; 256] {
    core::array::from_fn(|i| add_mod(a[i], b[i]))
}


/// Coefficient-wise polynomial subtraction mod q; works in either domain
#[must_use]
pub(crate) fn poly_sub(a: &[u16; 256], b: &[u16; 256]) -> [u16; 256] {
    core::array::from_fn(|i| sub_mod(a[i], b[i]))
}


/// Matrix by vector multiplication in the NTT domain: `w_hat = A_hat ∘ u_hat`
#[must_use]
pub(crate) fn mat_vec_mul<const K: usize>(a_hat: &[[T; K]; K], u_hat: &[T; K]) -> [T; K] {
    let mut w_hat = [T0; K];
    for i in 0..K {
        for j in 0..K {
            let tmp = multiply_ntts(&a_hat[i][j], &u_hat[j]);
            w_hat[i] = T(poly_add(&w_hat[i].0, &tmp.0));
        }
    }
    w_hat
}


/// Transposed matrix by vector multiplication in the NTT domain: `w_hat = A_hat^T ∘ u_hat`
#[must_use]
pub(crate) fn mat_t_vec_mul<const K: usize>(a_hat: &[[T; K]; K], u_hat: &[T; K]) -> [T; K] {
    let mut w_hat = [T0; K];
    for i in 0..K {
        for j in 0..K {
            let tmp = multiply_ntts(&a_hat[j][i], &u_hat[j]);
            w_hat[i] = T(poly_add(&w_hat[i].0, &tmp.0));
        }
    }
    w_hat
}


/// Vector dot product in the NTT domain: `u_hat^T ∘ v_hat`
#[must_use]
pub(crate) fn dot_t_prod<const K: usize>(u_hat: &[T; K], v_hat: &[T; K]) -> T {
    let mut result = T0;
    for j in 0..K {
        let tmp = multiply_ntts(&u_hat[j], &v_hat[j]);
        result = T(poly_add(&result.0, &tmp.0));
    }
    result
}


/// HAC Algorithm 14.76 Right-to-left binary exponentiation mod Q.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
const fn pow_mod_q(g: u32, e: u8) -> u16 {
    let mut result = 1;
    let mut s = g;
    let mut e = e;
    while e != 0 {
        if e & 1 != 0 {
            result = (result * s) % Q;
        };
        e >>= 1;
        if e != 0 {
            s = (s * s) % Q;
        };
    }
    result as u16
}


/// `BitRev7(i)`: reverse the lowest seven bits of `i`
const fn bit_rev_7(i: u8) -> u8 { i.reverse_bits() >> 1 }


/// `ZETA_TABLE[i] = ζ^BitRev7(i) mod q`, used by the forward and inverse NTT
#[allow(clippy::cast_possible_truncation)]
const fn gen_zeta_table() -> [u16; 128] {
    let mut result = [0u16; 128];
    let mut i = 0;
    while i < 128 {
        result[i] = pow_mod_q(ZETA, bit_rev_7(i as u8));
        i += 1;
    }
    result
}


/// `GAMMA_TABLE[i] = ζ^(2·BitRev7(i) + 1) mod q`, used by `MultiplyNTTs`
#[allow(clippy::cast_possible_truncation)]
const fn gen_gamma_table() -> [u16; 128] {
    let mut result = [0u16; 128];
    let mut i = 0;
    while i < 128 {
        result[i] = pow_mod_q(ZETA, 2 * bit_rev_7(i as u8) + 1);
        i += 1;
    }
    result
}


pub(crate) static ZETA_TABLE: [u16; 128] = gen_zeta_table();
pub(crate) static GAMMA_TABLE: [u16; 128] = gen_gamma_table();


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reduce_q32() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for a in [0, 1, Q - 1, Q, Q + 1, 2 * Q - 1, 2 * Q, u32::MAX - 1, u32::MAX] {
            assert_eq!(u32::from(reduce_q32(a)), a % Q);
        }
        for _i in 0..100_000 {
            let a: u32 = rng.gen();
            assert_eq!(u32::from(reduce_q32(a)), a % Q);
        }
    }

    #[test]
    fn test_mod_arith() {
        assert_eq!(add_mod(3328, 1), 0);
        assert_eq!(sub_mod(0, 1), 3328);
        assert_eq!(mul_mod(3328, 3328), 1);
        assert_eq!(mul_mod(17, 17), 289);
    }

    #[test]
    fn test_tables() {
        // Known entries from FIPS 203 Appendix A
        assert_eq!(&ZETA_TABLE[0..8], &[1, 1729, 2580, 3289, 2642, 630, 1897, 848]);
        assert_eq!(ZETA_TABLE[127], 2154);
        assert_eq!(&GAMMA_TABLE[0..4], &[17, 3312, 2761, 568]);
        assert_eq!(GAMMA_TABLE[127], 1175);
        // Each gamma pairs with its negation
        for i in 0..64 {
            assert_eq!(add_mod(GAMMA_TABLE[2 * i], GAMMA_TABLE[2 * i + 1]), 0);
        }
    }
}
