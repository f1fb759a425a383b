// Reproduces the first NIST KAT response record (count = 0) for each parameter set and checks
// the SHA-256 of the formatted record against the published digests.
//
// $ cargo test --release --test nist_kat

use aes::cipher::{BlockEncrypt, KeyInit};
use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
use fips203::{ml_kem_1024, ml_kem_512, ml_kem_768};
use sha2::{Digest, Sha256};


// AES-256 CTR_DRBG from the NIST PQC `rng.c`, without derivation function or reseeding
struct NistDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

impl NistDrbg {
    fn new(entropy: &[u8; 48]) -> Self {
        let mut drbg = NistDrbg { key: [0u8; 32], v: [0u8; 16] };
        drbg.update(Some(entropy));
        drbg
    }

    fn next_block(&mut self) -> [u8; 16] {
        for j in (0..16).rev() {
            if self.v[j] == 0xff {
                self.v[j] = 0x00;
            } else {
                self.v[j] += 1;
                break;
            }
        }
        let cipher = aes::Aes256::new(self.key.as_slice().into());
        let mut block = aes::Block::clone_from_slice(self.v.as_slice());
        cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(&block);
        out
    }

    fn update(&mut self, provided_data: Option<&[u8; 48]>) {
        let mut temp = [0u8; 48];
        for i in 0..3 {
            temp[16 * i..16 * (i + 1)].copy_from_slice(&self.next_block());
        }
        if let Some(data) = provided_data {
            for (t, d) in temp.iter_mut().zip(data.iter()) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..32]);
        self.v.copy_from_slice(&temp[32..]);
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(16) {
            let block = self.next_block();
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.update(None);
    }
}


fn hex_upper(bytes: &[u8]) -> String { hex::encode_upper(bytes) }


// Returns the hex SHA-256 of the `count = 0` record for the chosen module
macro_rules! kat_record_digest {
    ($module:ident) => {{
        let mut entropy = [0u8; 48];
        for (i, e) in entropy.iter_mut().enumerate() {
            *e = i as u8;
        }
        let mut drbg = NistDrbg::new(&entropy);
        let mut seed = [0u8; 48];
        drbg.fill_bytes(&mut seed);

        // Each record restarts the generator from its own seed
        let mut drbg = NistDrbg::new(&seed);
        let mut coins = [0u8; 64];
        drbg.fill_bytes(&mut coins);
        let (mut d, mut z) = ([0u8; 32], [0u8; 32]);
        d.copy_from_slice(&coins[..32]);
        z.copy_from_slice(&coins[32..]);
        let (ek, dk) = $module::KG::keygen_from_seed(d, z).unwrap();

        let mut m = [0u8; 32];
        drbg.fill_bytes(&mut m);
        let (ssk, ct) = ek.encaps_from_seed(&m).unwrap();
        assert_eq!(ssk, dk.try_decaps(&ct).unwrap());

        let record = format!(
            "count = 0\nseed = {}\npk = {}\nsk = {}\nct = {}\nss = {}\n",
            hex_upper(&seed),
            hex_upper(&ek.into_bytes()),
            hex_upper(&dk.into_bytes()),
            hex_upper(&ct.into_bytes()),
            hex_upper(&ssk.into_bytes())
        );
        hex::encode(Sha256::digest(record.as_bytes()))
    }};
}


#[test]
fn test_nist_kat_512() {
    assert_eq!(
        kat_record_digest!(ml_kem_512),
        "c70041a761e01cd6426fa60e9fd6a4412c2be817386c8d0f3334898082512782"
    );
}

#[test]
fn test_nist_kat_768() {
    assert_eq!(
        kat_record_digest!(ml_kem_768),
        "5352539586b6c3df58be6158a6250aeff402bd73060b0a3de68850ac074c17c3"
    );
}

#[test]
fn test_nist_kat_1024() {
    assert_eq!(
        kat_record_digest!(ml_kem_1024),
        "f580d851e5fb27e6876e5e203fa18be4cdbfd49e05d48fec3d3992c8f43a13e6"
    );
}
