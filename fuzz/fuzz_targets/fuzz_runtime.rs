#![no_main]

use libfuzzer_sys::fuzz_target;
use fips203::ParameterSet;

// Arbitrary lengths and contents through the byte-slice API must error, never panic
fuzz_target!(|data: (u16, Vec<u8>, Vec<u8>)| {
    let (level, key, ct) = data;
    if let Ok(ps) = ParameterSet::from_security_level(level) {
        let _ssk = ps.decaps(&key, &ct);
        let mut ct_out = vec![0u8; ps.ct_len()];
        let _ssk = ps.encaps_internal(&key, &[0u8; 32], &mut ct_out);
    }
});
