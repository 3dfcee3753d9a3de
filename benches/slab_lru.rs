use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};
use slablru::SlabLruCache;

fn filled(initial: usize, max: usize) -> SlabLruCache<u64, u64> {
    let mut cache = SlabLruCache::new(initial, max);
    for i in 0..max as u64 {
        cache.add(i, i);
    }
    cache
}

fn bench_add_get(c: &mut Criterion) {
    c.bench_function("slab_lru_add_get", |b| {
        b.iter_batched(
            || filled(1024, 1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.add(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pop_lru(c: &mut Criterion) {
    c.bench_function("slab_lru_pop_lru", |b| {
        b.iter_batched(
            || filled(1024, 1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("slab_lru_eviction_churn", |b| {
        b.iter_batched(
            || filled(1024, 1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.add(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_free_list_churn(c: &mut Criterion) {
    c.bench_function("slab_lru_free_list_churn", |b| {
        b.iter_batched(
            || filled(1024, 1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.remove(&std::hint::black_box(i));
                    cache.add(std::hint::black_box(i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

/// Growth cost from different initial hints up to the same maximum.
fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("slab_lru_growth");
    for initial in [1usize, 64, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(initial), &initial, |b, &initial| {
            b.iter(|| {
                let mut cache = SlabLruCache::new(initial, 4096);
                for i in 0..4096u64 {
                    cache.add(i, i);
                }
                std::hint::black_box(cache.slab_len())
            })
        });
    }
    group.finish();
}

fn bench_zipf_workload(c: &mut Criterion) {
    let universe = 16_384u64;
    let zipf = match Zipf::new(universe as f64, 1.0) {
        Ok(zipf) => zipf,
        Err(err) => panic!("zipf parameters: {err}"),
    };

    c.bench_function("slab_lru_zipf_get_or_add", |b| {
        b.iter_batched(
            || (filled(256, 2048), SmallRng::seed_from_u64(42)),
            |(mut cache, mut rng)| {
                for _ in 0..4096 {
                    let sample: f64 = zipf.sample(&mut rng);
                    let key = (sample as u64).saturating_sub(1).min(universe - 1);
                    if cache.get(&key).is_none() {
                        cache.add(key, key);
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_uniform_mixed(c: &mut Criterion) {
    c.bench_function("slab_lru_uniform_mixed", |b| {
        b.iter_batched(
            || (filled(1024, 1024), SmallRng::seed_from_u64(7)),
            |(mut cache, mut rng)| {
                for _ in 0..4096 {
                    let key = rng.random::<u64>() % 4096;
                    match rng.random::<u8>() % 8 {
                        0 => {
                            cache.remove(&key);
                        },
                        1 => {
                            let _ = std::hint::black_box(cache.peek(&key));
                        },
                        2..=4 => {
                            cache.add(key, key);
                        },
                        _ => {
                            let _ = std::hint::black_box(cache.get(&key));
                        },
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_add_get,
    bench_pop_lru,
    bench_eviction_churn,
    bench_free_list_churn,
    bench_growth,
    bench_zipf_workload,
    bench_uniform_mixed
);
criterion_main!(benches);
