#![no_main]

use libfuzzer_sys::fuzz_target;
use fips203::ml_kem_512;
use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};

fuzz_target!(|data: [u8; 800+1632+768]| {  // ek_len + dk_len + ct_len = 3200

    // Deserialize a 'fuzzy' encapsulation key
    let ek = ml_kem_512::EncapsKey::try_from_bytes(data[0..800].try_into().unwrap());

    // Try to use 'fuzzy' ek (only coefficients below q survive the modulus check)
    if let Ok(ek) = ek {
        let _res = ek.encaps_from_seed(&[0u8; 32]);
    }


    // Deserialize a 'fuzzy' decapsulation key, which almost never passes the hash check
    let dk = ml_kem_512::DecapsKey::try_from_bytes(data[800..800+1632].try_into().unwrap());
    if let Ok(dk) = dk {
        let ct = ml_kem_512::CipherText::try_from_bytes([0u8; ml_kem_512::CT_LEN]).unwrap();
        let _ssk = dk.try_decaps(&ct);
    }


    // Decapsulate a 'fuzzy' ciphertext with a good key; every ciphertext is accepted
    let (_, dk) = ml_kem_512::KG::keygen_from_seed([1u8; 32], [2u8; 32]).unwrap();
    let ct = ml_kem_512::CipherText::try_from_bytes(data[800+1632..].try_into().unwrap()).unwrap();
    assert!(dk.try_decaps(&ct).is_ok());
});
