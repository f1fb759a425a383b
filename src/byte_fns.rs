// This file implements functionality from FIPS 203 section 4.2.1 Conversion and Compression
// Algorithms, along with the `Compress_d` and `Decompress_d` functions on page 21.

use crate::helpers::{ensure, reduce_q32};
use crate::types::{Error, R};
use crate::{N, Q};


/// # Algorithm 3: `BitsToBytes(b)` on page 20.
/// Converts a bit array (of a length that is a multiple of eight) into an array of bytes.
///
/// **Input**:  bit array `b ∈ {0,1}^{8·ℓ}` <br>
/// **Output**: byte array `B ∈ B^ℓ`
pub(crate) fn bits_to_bytes(bits: &[u8], bytes_out: &mut [u8]) -> Result<(), Error> {
    ensure!(
        bits.len() == 8 * bytes_out.len(),
        Error::InvalidInputLength("Alg 3: bit array length is not 8 times byte array length")
    );
    ensure!(bits.iter().all(|&b| b <= 1), Error::RangeViolation("Alg 3: bit value is not 0 or 1"));

    // 1: B ← (0)^ℓ
    bytes_out.iter_mut().for_each(|b| *b = 0);

    // 2: for (i ← 0; i < 8ℓ; i ++)
    for (i, bit) in bits.iter().enumerate() {
        //
        // 3: B [⌊i/8⌋] ← B [⌊i/8⌋] + b[i] · 2^{i mod 8}
        bytes_out[i / 8] += bit << (i % 8);
        //
    } // 4: end for

    Ok(()) // 5: return B
}


/// # Algorithm 4: `BytesToBits(B)` on page 20.
/// Performs the inverse of `BitsToBytes`, converting a byte array into a bit array.
///
/// **Input**:  byte array `B ∈ B^ℓ` <br>
/// **Output**: bit array `b ∈ {0,1}^{8·ℓ}`
pub(crate) fn bytes_to_bits(bytes: &[u8], bits_out: &mut [u8]) -> Result<(), Error> {
    ensure!(
        bits_out.len() == 8 * bytes.len(),
        Error::InvalidInputLength("Alg 4: bit array length is not 8 times byte array length")
    );

    // 1: C ← B
    // 2: for (i ← 0; i < ℓ; i ++)
    for (i, byte) in bytes.iter().enumerate() {
        let mut c = *byte;
        //
        // 3: for (j ← 0; j < 8; j ++)
        for j in 0..8 {
            //
            // 4: b[8i + j] ← C[i] mod 2
            bits_out[8 * i + j] = c & 1;
            //
            // 5: C[i] ← ⌊C[i]/2⌋
            c >>= 1;
            //
        } // 6: end for
    } // 7: end for

    Ok(()) // 8: return b
}


/// # Algorithm 5: `ByteEncode_d(F)` on page 22.
/// Encodes an array of `d`-bit integers into a byte array, for `1 ≤ d ≤ 12`.
///
/// **Input**:  integer array `F ∈ Z^256_m`, where `m = 2^d if d < 12` and `m = q if d = 12` <br>
/// **Output**: byte array `B ∈ B^{32·d}`
pub(crate) fn byte_encode(d: usize, integers_f: &[u16; 256], bytes_b: &mut [u8]) -> Result<(), Error> {
    ensure!((1..=12).contains(&d), Error::InvalidParameter("Alg 5: d out of range"));
    ensure!(bytes_b.len() == 32 * d, Error::InvalidInputLength("Alg 5: output length is not 32·d"));
    let m = if d < 12 { 1 << d } else { Q };
    ensure!(
        integers_f.iter().all(|&f| u32::from(f) < m),
        Error::RangeViolation("Alg 5: integer out of range for d")
    );

    let mut bit_array = [0u8; N * 12];

    // 1: for (i ← 0; i < 256; i ++)
    for i in 0..N {
        //
        // 2: a ← F[i]      ▷ a ∈ Z_{2^d}
        let mut a = integers_f[i];
        //
        // 3: for (j ← 0; j < d; j ++)
        for j in 0..d {
            //
            // 4: b[i · d + j] ← a mod 2    ▷ b ∈ {0, 1}^{256·d}
            bit_array[i * d + j] = u8::from(a & 1 == 1);
            //
            // 5: a ← (a − b[i · d + j])/2    ▷ note a − b[i · d + j] is always even
            a >>= 1;
            //
        } // 6: end for
    } // 7: end for

    // 8: B ← BitsToBytes(b)
    bits_to_bytes(&bit_array[..N * d], bytes_b) // 9: return B
}


/// # Algorithm 6: `ByteDecode_d(B)` on page 22.
/// Decodes a byte array into an array of `d`-bit integers, for `1 ≤ d ≤ 12`. For `d = 12`
/// each integer is additionally reduced mod q.
///
/// **Input**:  byte array `B ∈ B^{32·d}` <br>
/// **Output**: integer array `F ∈ Z^256_m`, where `m = 2^d if d < 12` and `m = q if d = 12`
#[allow(clippy::cast_possible_truncation)] // integers fit in 12 bits
pub(crate) fn byte_decode(d: usize, bytes_b: &[u8]) -> Result<[u16; 256], Error> {
    ensure!((1..=12).contains(&d), Error::InvalidParameter("Alg 6: d out of range"));
    ensure!(bytes_b.len() == 32 * d, Error::InvalidInputLength("Alg 6: input length is not 32·d"));

    // 1: b ← BytesToBits(B)
    let mut bit_array = [0u8; N * 12];
    bytes_to_bits(bytes_b, &mut bit_array[..N * d])?;

    // 2: for (i ← 0; i < 256; i ++)
    let integers_f = core::array::from_fn(|i| {
        //
        // 3: F[i] ← ∑^{d-1}_{j=0} b[i · d + j] · 2^j mod m
        let sum = (0..d).fold(0u32, |acc, j| acc | (u32::from(bit_array[i * d + j]) << j));
        // sum < 2^12 < 2q, so d = 12 reduces with a single conditional subtraction
        if d < 12 {
            (sum & ((1 << d) - 1)) as u16
        } else {
            reduce_q32(sum)
        }
        //
    }); // 4: end for

    Ok(integers_f) // 5: return F
}


/// `Compress_d(x) = ⌈(2^d/q) · x⌋ mod 2^d` on page 21, applied to each coefficient.
/// Valid for `1 ≤ d < 12`.
#[allow(clippy::cast_possible_truncation)] // result is masked to d < 12 bits
pub(crate) fn compress(d: usize, inout: &R) -> Result<[u16; 256], Error> {
    ensure!((1..12).contains(&d), Error::InvalidParameter("Compress: d out of range"));
    debug_assert!(inout.0.iter().all(|&x| u32::from(x) < Q), "Compress: input not reduced");
    Ok(core::array::from_fn(|i| {
        // Q is a constant divisor, so no data-dependent division instruction is emitted
        let y = ((u32::from(inout.0[i]) << d) + Q / 2) / Q;
        (y & ((1 << d) - 1)) as u16
    }))
}


/// `Decompress_d(y) = ⌈(q/2^d) · y⌋` on page 21, applied to each coefficient.
/// Valid for `1 ≤ d < 12` and every `y < 2^d`.
#[allow(clippy::cast_possible_truncation)] // result is less than q
pub(crate) fn decompress(d: usize, inout: &[u16; 256]) -> Result<R, Error> {
    ensure!((1..12).contains(&d), Error::InvalidParameter("Decompress: d out of range"));
    ensure!(
        inout.iter().all(|&y| u32::from(y) < (1 << d)),
        Error::RangeViolation("Decompress: value out of range for d")
    );
    Ok(R(core::array::from_fn(|i| ((Q * u32::from(inout[i]) + (1 << (d - 1))) >> d) as u16)))
}
