//! Property-based tests for the `fips203` crate.

macro_rules! mlkem_proptests {
    ($name:ident, $module:ident) => {
        mod $name {
            use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
            use fips203::{$module, Error};
            use proptest::{collection, prelude::*};

            proptest! {
                #![proptest_config(ProptestConfig::with_cases(32))]

                #[test]
                fn round_trip_test(
                    d in any::<[u8; 32]>(),
                    z in any::<[u8; 32]>(),
                    m in any::<[u8; 32]>()
                ) {
                    let (ek, dk) = $module::KG::keygen_from_seed(d, z).unwrap();
                    let ek = $module::EncapsKey::try_from_bytes(ek.into_bytes()).unwrap();
                    let dk = $module::DecapsKey::try_from_bytes(dk.into_bytes()).unwrap();

                    let (ssk1, ct) = ek.encaps_from_seed(&m).unwrap();
                    let ct = $module::CipherText::try_from_bytes(ct.into_bytes()).unwrap();
                    let ssk2 = dk.try_decaps(&ct).unwrap();
                    prop_assert_eq!(ssk1, ssk2);
                }

                #[test]
                fn tampered_ciphertext_test(
                    d in any::<[u8; 32]>(),
                    m in any::<[u8; 32]>(),
                    index in 0..$module::CT_LEN,
                    bit in 0u8..8
                ) {
                    let (ek, dk) = $module::KG::keygen_from_seed(d, [0u8; 32]).unwrap();
                    let (ssk1, ct) = ek.encaps_from_seed(&m).unwrap();
                    let mut ct_bytes = ct.into_bytes();
                    ct_bytes[index] ^= 1 << bit;
                    let ct_bad = $module::CipherText::try_from_bytes(ct_bytes).unwrap();
                    let ssk2 = dk.try_decaps(&ct_bad).unwrap();
                    prop_assert_ne!(ssk1, ssk2);
                }

                #[test]
                fn arbitrary_encaps_key_test(
                    bytes in collection::vec(any::<u8>(), $module::EK_LEN)
                ) {
                    let ek_bytes: [u8; $module::EK_LEN] = bytes.try_into().unwrap();
                    match $module::EncapsKey::try_from_bytes(ek_bytes) {
                        Ok(ek) => {
                            let (_ssk, _ct) = ek.encaps_from_seed(&[0u8; 32]).unwrap();
                        }
                        Err(e) => prop_assert!(matches!(e, Error::RangeViolation(_))),
                    }
                }

                #[test]
                fn arbitrary_decaps_key_test(
                    bytes in collection::vec(any::<u8>(), $module::DK_LEN)
                ) {
                    let dk_bytes: [u8; $module::DK_LEN] = bytes.try_into().unwrap();
                    let result = $module::DecapsKey::try_from_bytes(dk_bytes);
                    prop_assert!(matches!(result, Err(Error::KeyCheckFailure(_))));
                }
            }
        }
    };
}

#[cfg(feature = "ml-kem-512")]
mlkem_proptests!(ml_kem_512, ml_kem_512);
#[cfg(feature = "ml-kem-768")]
mlkem_proptests!(ml_kem_768, ml_kem_768);
#[cfg(feature = "ml-kem-1024")]
mlkem_proptests!(ml_kem_1024, ml_kem_1024);
