#![no_main]

use libfuzzer_sys::fuzz_target;
use fips203::ml_kem_768;
use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};

fuzz_target!(|data: [u8; ml_kem_768::CT_LEN]| {
    let (ek, dk) = ml_kem_768::KG::keygen_from_seed([3u8; 32], [4u8; 32]).unwrap();
    let (ssk, ct) = ek.encaps_from_seed(&[5u8; 32]).unwrap();

    // Only the honest ciphertext may decapsulate to the encapsulated secret
    let ct_fuzz = ml_kem_768::CipherText::try_from_bytes(data).unwrap();
    let ssk_fuzz = dk.try_decaps(&ct_fuzz).unwrap();
    if data != ct.into_bytes() {
        assert_ne!(ssk, ssk_fuzz);
    }
});
