//! Benchmarks for the DC blocking filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pwm_chorus::dsp::{dc_block::DcBlocker, Sample};

use crate::PERIOD_COUNTS;

pub fn bench_dc_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/dc_block");

    for &count in PERIOD_COUNTS {
        // Biased square wave: a constant offset plus audio-rate swings
        let input: Vec<Sample> = (0..count)
            .map(|i| if i % 16 < 8 { 90 } else { 10 })
            .collect();

        let mut filter = DcBlocker::new();
        group.bench_with_input(BenchmarkId::new("next_sample", count), &count, |b, _| {
            b.iter(|| {
                let mut acc = 0i32;
                for &x in &input {
                    acc += filter.next_sample(black_box(x)) as i32;
                }
                acc
            })
        });
    }

    group.finish();
}
