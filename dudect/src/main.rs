use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use fips203::ml_kem_512; // Could also be ml_kem_768 or ml_kem_1024.
use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};


// Decapsulation must take the same time whether the ciphertext is honest or implicitly
// rejected, so the left class decapsulates valid ciphertexts and the right class tampered ones
fn decaps(runner: &mut CtRunner, mut _rng: &mut BenchRng) {
    const ITERATIONS_INNER: usize = 5;
    const ITERATIONS_OUTER: usize = 100_000;

    let (ek, dk) = ml_kem_512::KG::keygen_from_seed([1u8; 32], [2u8; 32]).unwrap();
    let (_ssk, ct) = ek.encaps_from_seed(&[3u8; 32]).unwrap();
    let ct_good = ct.into_bytes();
    let mut ct_bad = ct_good;
    ct_bad[0] ^= 0x01;

    let mut classes = [Class::Right; ITERATIONS_OUTER];
    let mut cts = vec![ct_bad; ITERATIONS_OUTER];

    // Interleave left and right
    for i in (0..ITERATIONS_OUTER).step_by(2) {
        classes[i] = Class::Left;
        cts[i] = ct_good; // <--- honest ciphertext
    }

    for (class, ct_bytes) in classes.into_iter().zip(cts.into_iter()) {
        let ct = ml_kem_512::CipherText::try_from_bytes(ct_bytes).unwrap();
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                let _ = dk.try_decaps(&ct).unwrap();
            }
        })
    }
}

ctbench_main!(decaps);
