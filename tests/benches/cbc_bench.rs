use chunkcrypt_algorithms::block::modes::registry;
use chunkcrypt_api::ParamSet;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_cbc(c: &mut Criterion) {
    let mut group = c.benchmark_group("CBC");
    let key = [0u8; 32];
    let iv = [0u8; 16];

    // Test different data sizes
    for size in [16, 256, 1024, 16384].iter() {
        let data = vec![0u8; *size];

        for (cipher, key_len) in [("AES-128", 16), ("AES-192", 24), ("AES-256", 32), ("SM4", 16)] {
            let name = format!("{cipher}/CBC-ENC");
            let params = ParamSet::new().with_key(&key[..key_len]).with_iv(&iv);
            group.bench_with_input(BenchmarkId::new(cipher, size), size, |b, _| {
                b.iter(|| {
                    let (mut mode, _) = registry::create(&name, &params).unwrap();
                    let _ = mode.process(&data);
                });
            });
        }
    }

    group.finish();
}

fn bench_registry_lookup(c: &mut Criterion) {
    let key = [0u8; 16];
    let iv = [0u8; 16];
    let params = ParamSet::new().with_key(&key).with_iv(&iv);

    c.bench_function("registry_create_aes128_ctr", |b| {
        b.iter(|| registry::create("AES-128/CTR", &params).unwrap());
    });
}

criterion_group!(benches, bench_cbc, bench_registry_lookup);
criterion_main!(benches);
