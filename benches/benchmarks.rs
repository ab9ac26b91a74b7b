use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seqscan::io::records::SequenceRecord;
use seqscan::search::{self, kmp, Algorithm, Kmp, RabinKarp, ScanOpt};

fn make_reference(len: usize, seed: u32) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = seed;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn make_records(n: usize, len: usize) -> Vec<SequenceRecord> {
    (0..n)
        .map(|i| SequenceRecord { label: format!("seq{i}"), seq: make_reference(len, i as u32) })
        .collect()
}

fn bench_kmp(c: &mut Criterion) {
    let reference = make_reference(100_000, 42);
    let matcher = Kmp::new(&reference[100..120]);

    c.bench_function("kmp_20bp_100k", |b| {
        b.iter(|| {
            black_box(matcher.find_all(black_box(&reference)));
        })
    });
}

fn bench_rabin_karp(c: &mut Criterion) {
    let reference = make_reference(100_000, 42);
    let matcher = RabinKarp::new(&reference[100..120]);

    c.bench_function("rabin_karp_20bp_100k", |b| {
        b.iter(|| {
            black_box(matcher.find_all(black_box(&reference)));
        })
    });
}

fn bench_periodic_worst_case(c: &mut Criterion) {
    // 全 A 文本上每个位置都命中
    let text = vec![b'A'; 100_000];
    let pattern = vec![b'A'; 64];
    let kmp = Kmp::new(&pattern);
    let rk = RabinKarp::new(&pattern);

    c.bench_function("kmp_periodic_64bp", |b| b.iter(|| black_box(kmp.find_all(black_box(&text)))));
    c.bench_function("rabin_karp_periodic_64bp", |b| b.iter(|| black_box(rk.find_all(black_box(&text)))));
}

fn bench_failure_function(c: &mut Criterion) {
    let pattern = make_reference(10_000, 7);

    c.bench_function("failure_function_10k", |b| {
        b.iter(|| {
            black_box(kmp::failure_function(black_box(&pattern)));
        })
    });
}

fn bench_scan_records(c: &mut Criterion) {
    let records = make_records(1_000, 1_000);
    let pattern = b"ACGTAC";

    for threads in [1usize, 4] {
        let opt = ScanOpt { algorithm: Algorithm::Kmp, threads };
        c.bench_function(&format!("scan_1k_records_t{threads}"), |b| {
            b.iter(|| {
                black_box(search::scan_records(black_box(&records), pattern, &opt));
            })
        });
    }
}

criterion_group!(
    benches,
    bench_kmp,
    bench_rabin_karp,
    bench_periodic_worst_case,
    bench_failure_function,
    bench_scan_records
);
criterion_main!(benches);
