//! Benchmarks for the four-tap chorus.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pwm_chorus::{
    dsp::{chorus::Chorus, history::SampleHistory, Sample},
    HISTORY_LEN,
};

use crate::PERIOD_COUNTS;

pub fn bench_chorus(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/chorus");

    let mut history = SampleHistory::new();
    for i in 0..HISTORY_LEN {
        history.write(((i * 13) % 64) as Sample - 32);
        history.advance();
    }

    group.bench_function("tap_indices", |b| {
        b.iter(|| Chorus::tap_indices(black_box(37), black_box(150)))
    });

    for &count in PERIOD_COUNTS {
        let mut chorus = Chorus::new();
        let mut ring = history.clone();
        group.bench_with_input(BenchmarkId::new("process", count), &count, |b, &count| {
            b.iter(|| {
                let mut acc = 0i32;
                for _ in 0..count {
                    acc += chorus.process(black_box(&ring)) as i32;
                    ring.advance();
                }
                acc
            })
        });
    }

    group.finish();
}
