// This file applies fixed-seed vectors covering key generation, encapsulation and both the
// accepting and the implicitly rejecting decapsulation paths, for each parameter set.
//   from: tests/test_vectors/internal_projection.json (ACVP-style layout)

use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
use fips203::ParameterSet;
use hex::decode;
use rand_core::{CryptoRng, RngCore};
use serde_json::Value;
use std::fs;

#[cfg(feature = "ml-kem-1024")]
use fips203::ml_kem_1024;
#[cfg(feature = "ml-kem-512")]
use fips203::ml_kem_512;
#[cfg(feature = "ml-kem-768")]
use fips203::ml_kem_768;


// ----- CUSTOM RNG TO REPLAY VALUES -----
struct TestRng {
    data: Vec<Vec<u8>>,
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        let x = self.data.pop().expect("test rng problem");
        out.copy_from_slice(&x)
    }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(out);
        Ok(())
    }
}

impl CryptoRng for TestRng {}

impl TestRng {
    fn new() -> Self { TestRng { data: Vec::new() } }

    fn push(&mut self, new_data: &[u8]) {
        let x = new_data.to_vec();
        self.data.push(x);
    }
}


fn load_vectors() -> Value {
    let vectors = fs::read_to_string("./tests/test_vectors/internal_projection.json")
        .expect("Unable to read file");
    serde_json::from_str(&vectors).unwrap()
}

fn field(test: &Value, name: &str) -> Vec<u8> { decode(test[name].as_str().unwrap()).unwrap() }

fn seed(test: &Value, name: &str) -> [u8; 32] { field(test, name).try_into().unwrap() }


macro_rules! keygen_case {
    ($module:ident, $test:expr) => {{
        let (d, z) = (seed($test, "d"), seed($test, "z"));
        let ek_exp = field($test, "ek");
        let dk_exp = field($test, "dk");

        // The generator draws d first, then z
        let mut rnd = TestRng::new();
        rnd.push(&z);
        rnd.push(&d);
        let (ek_act, dk_act) = $module::KG::try_keygen_with_rng(&mut rnd).unwrap();
        assert_eq!(ek_exp, ek_act.into_bytes());
        assert_eq!(dk_exp, dk_act.into_bytes());

        let (ek_act, dk_act) = $module::KG::keygen_from_seed(d, z).unwrap();
        assert_eq!(ek_exp, ek_act.into_bytes());
        assert_eq!(dk_exp, dk_act.into_bytes());
    }};
}

macro_rules! encaps_case {
    ($module:ident, $test:expr) => {{
        let ek = $module::EncapsKey::try_from_bytes(field($test, "ek").try_into().unwrap()).unwrap();
        let m = seed($test, "m");
        let c_exp = field($test, "c");
        let k_exp = field($test, "k");

        let mut rnd = TestRng::new();
        rnd.push(&m);
        let (k_act, c_act) = ek.try_encaps_with_rng(&mut rnd).unwrap();
        assert_eq!(c_exp, c_act.into_bytes());
        assert_eq!(k_exp, k_act.into_bytes());

        let (k_act, c_act) = ek.encaps_from_seed(&m).unwrap();
        assert_eq!(c_exp, c_act.into_bytes());
        assert_eq!(k_exp, k_act.into_bytes());
    }};
}

macro_rules! decaps_case {
    ($module:ident, $test:expr) => {{
        let dk = $module::DecapsKey::try_from_bytes(field($test, "dk").try_into().unwrap()).unwrap();
        let mut c = field($test, "c");
        let ct = $module::CipherText::try_from_bytes(c.clone().try_into().unwrap()).unwrap();
        assert_eq!(field($test, "k"), dk.try_decaps(&ct).unwrap().into_bytes());

        c[0] ^= 0x01;
        let ct_bad = $module::CipherText::try_from_bytes(c.try_into().unwrap()).unwrap();
        assert_eq!(field($test, "kRejected"), dk.try_decaps(&ct_bad).unwrap().into_bytes());
    }};
}


#[test]
fn test_keygen() {
    let v = load_vectors();
    for test_group in v["testGroups"].as_array().unwrap().iter() {
        for test in test_group["tests"].as_array().unwrap().iter() {
            #[cfg(feature = "ml-kem-512")]
            if test_group["parameterSet"] == "ML-KEM-512" {
                keygen_case!(ml_kem_512, test);
            }

            #[cfg(feature = "ml-kem-768")]
            if test_group["parameterSet"] == "ML-KEM-768" {
                keygen_case!(ml_kem_768, test);
            }

            #[cfg(feature = "ml-kem-1024")]
            if test_group["parameterSet"] == "ML-KEM-1024" {
                keygen_case!(ml_kem_1024, test);
            }
        }
    }
}


#[test]
fn test_encaps() {
    let v = load_vectors();
    for test_group in v["testGroups"].as_array().unwrap().iter() {
        for test in test_group["tests"].as_array().unwrap().iter() {
            #[cfg(feature = "ml-kem-512")]
            if test_group["parameterSet"] == "ML-KEM-512" {
                encaps_case!(ml_kem_512, test);
            }

            #[cfg(feature = "ml-kem-768")]
            if test_group["parameterSet"] == "ML-KEM-768" {
                encaps_case!(ml_kem_768, test);
            }

            #[cfg(feature = "ml-kem-1024")]
            if test_group["parameterSet"] == "ML-KEM-1024" {
                encaps_case!(ml_kem_1024, test);
            }
        }
    }
}


#[test]
fn test_decaps() {
    let v = load_vectors();
    for test_group in v["testGroups"].as_array().unwrap().iter() {
        for test in test_group["tests"].as_array().unwrap().iter() {
            #[cfg(feature = "ml-kem-512")]
            if test_group["parameterSet"] == "ML-KEM-512" {
                decaps_case!(ml_kem_512, test);
            }

            #[cfg(feature = "ml-kem-768")]
            if test_group["parameterSet"] == "ML-KEM-768" {
                decaps_case!(ml_kem_768, test);
            }

            #[cfg(feature = "ml-kem-1024")]
            if test_group["parameterSet"] == "ML-KEM-1024" {
                decaps_case!(ml_kem_1024, test);
            }
        }
    }
}


// The byte-slice API must agree with the typed API on every vector
#[test]
fn test_parameter_set_api() {
    let v = load_vectors();
    for test_group in v["testGroups"].as_array().unwrap().iter() {
        let level = match test_group["parameterSet"].as_str().unwrap() {
            "ML-KEM-512" => 512,
            "ML-KEM-768" => 768,
            _ => 1024,
        };
        let ps = ParameterSet::from_security_level(level).unwrap();
        for test in test_group["tests"].as_array().unwrap().iter() {
            let mut ek = vec![0u8; ps.ek_len()];
            let mut dk = vec![0u8; ps.dk_len()];
            ps.key_gen_internal(&seed(test, "d"), &seed(test, "z"), &mut ek, &mut dk).unwrap();
            assert_eq!(field(test, "ek"), ek);
            assert_eq!(field(test, "dk"), dk);

            let mut c = vec![0u8; ps.ct_len()];
            let k = ps.encaps_internal(&ek, &seed(test, "m"), &mut c).unwrap();
            assert_eq!(field(test, "c"), c);
            assert_eq!(field(test, "k"), k.into_bytes());

            c[0] ^= 0x01;
            let k_rej = ps.decaps(&dk, &c).unwrap();
            assert_eq!(field(test, "kRejected"), k_rej.into_bytes());
        }
    }
}
