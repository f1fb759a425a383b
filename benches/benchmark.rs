use criterion::{criterion_group, criterion_main, Criterion};
use fips203::traits::{Decaps, Encaps, KeyGen};
use fips203::{ml_kem_1024, ml_kem_512, ml_kem_768};


pub fn criterion_benchmark(c: &mut Criterion) {
    let (ek512, dk512) = ml_kem_512::KG::try_keygen().unwrap();
    let (_, ct512) = ek512.try_encaps().unwrap();

    let (ek768, dk768) = ml_kem_768::KG::try_keygen().unwrap();
    let (_, ct768) = ek768.try_encaps().unwrap();

    let (ek1024, dk1024) = ml_kem_1024::KG::try_keygen().unwrap();
    let (_, ct1024) = ek1024.try_encaps().unwrap();


    c.bench_function("ml_kem_512 keygen", |b| b.iter(|| ml_kem_512::KG::try_keygen()));
    c.bench_function("ml_kem_512 encaps", |b| b.iter(|| ek512.try_encaps()));
    c.bench_function("ml_kem_512 decaps", |b| b.iter(|| dk512.try_decaps(&ct512)));

    c.bench_function("ml_kem_768 keygen", |b| b.iter(|| ml_kem_768::KG::try_keygen()));
    c.bench_function("ml_kem_768 encaps", |b| b.iter(|| ek768.try_encaps()));
    c.bench_function("ml_kem_768 decaps", |b| b.iter(|| dk768.try_decaps(&ct768)));

    c.bench_function("ml_kem_1024 keygen", |b| b.iter(|| ml_kem_1024::KG::try_keygen()));
    c.bench_function("ml_kem_1024 encaps", |b| b.iter(|| ek1024.try_encaps()));
    c.bench_function("ml_kem_1024 decaps", |b| b.iter(|| dk1024.try_decaps(&ct1024)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

// cargo bench
