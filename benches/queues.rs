use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use pairkit::builder::TierConfig;
use pairkit::pair::{Pair, Triple};
use pairkit::queue::{HfQueue, LfQueue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PAIRS: u32 = 4096;

fn skewed_freqs(seed: u64, n: u32, max: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            // Zipf-like: most pairs rare, a few very frequent.
            let r: f64 = rng.gen_range(0.0..1.0);
            ((1.0 / (1.0 - r * 0.999)) as usize).clamp(1, max)
        })
        .collect()
}

fn bench_hf_insert(c: &mut Criterion) {
    let freqs = skewed_freqs(7, PAIRS, 10_000);
    let mut group = c.benchmark_group("hf_queue");
    group.throughput(Throughput::Elements(PAIRS as u64));
    group.bench_function("insert", |b| {
        b.iter_batched(
            || HfQueue::new(PAIRS as usize, 2),
            |mut queue| {
                for (i, &freq) in freqs.iter().enumerate() {
                    let _ = queue.insert(
                        std::hint::black_box(Pair::new(i as u32, 0)),
                        Triple::new(i, 0, freq.max(2)),
                    );
                }
                queue
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_hf_decrease_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("hf_queue");
    group.throughput(Throughput::Elements(PAIRS as u64 * 8));
    group.bench_function("decrease_until_evicted", |b| {
        b.iter_batched(
            || {
                let mut queue = HfQueue::new(PAIRS as usize, 2);
                for i in 0..PAIRS {
                    queue.insert(Pair::new(i, i), Triple::new(0, 0, 9)).unwrap();
                }
                queue
            },
            |mut queue| {
                while let Ok(top) = queue.max() {
                    let _ = std::hint::black_box(queue.decrease(&top));
                }
                queue
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lf_decrease(c: &mut Criterion) {
    let freqs = skewed_freqs(11, PAIRS, 32);
    let mut group = c.benchmark_group("lf_queue");
    group.throughput(Throughput::Elements(PAIRS as u64));
    group.bench_function("decrease_each", |b| {
        b.iter_batched(
            || {
                let mut queue = LfQueue::new(PAIRS as usize, 32);
                for (i, &freq) in freqs.iter().enumerate() {
                    queue
                        .insert(Pair::new(i as u32, 1), Triple::new(i, 0, freq))
                        .unwrap();
                }
                queue
            },
            |mut queue| {
                for i in 0..PAIRS {
                    let _ = std::hint::black_box(queue.decrease(&Pair::new(i, 1)));
                }
                queue
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("min_max", |b| {
        let mut queue = LfQueue::new(PAIRS as usize, 32);
        for (i, &freq) in freqs.iter().enumerate() {
            queue
                .insert(Pair::new(i as u32, 1), Triple::new(i, 0, freq))
                .unwrap();
        }
        b.iter(|| {
            let _ = std::hint::black_box(queue.min());
            let _ = std::hint::black_box(queue.max());
        })
    });
    group.finish();
}

fn bench_tiered_merge_loop(c: &mut Criterion) {
    let freqs = skewed_freqs(23, PAIRS, 500);
    let mut group = c.benchmark_group("tiered");
    group.throughput(Throughput::Elements(PAIRS as u64));
    group.bench_function("take_max_and_decrease", |b| {
        b.iter_batched(
            || {
                let mut tiers = TierConfig::new(PAIRS as usize, 16).build::<u32>().unwrap();
                for (i, &freq) in freqs.iter().enumerate() {
                    tiers
                        .insert(Pair::new(i as u32, 2), Triple::new(i, 0, freq))
                        .unwrap();
                }
                tiers
            },
            |mut tiers| {
                for i in 0..PAIRS {
                    if let Ok(top) = tiers.max() {
                        let _ = std::hint::black_box(tiers.remove(&top));
                    }
                    let _ = tiers.decrease(&Pair::new((i * 7) % PAIRS, 2));
                }
                tiers
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hf_insert,
    bench_hf_decrease_drain,
    bench_lf_decrease,
    bench_tiered_merge_loop
);
criterion_main!(benches);
