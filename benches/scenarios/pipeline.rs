//! Benchmarks for complete sample periods.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pwm_chorus::{
    dsp::Effect,
    io::sim::{SimulatedAdc, SimulatedPwm},
    Board, ClockConfig, PeriodicDriver, Pipeline,
};

use crate::PERIOD_COUNTS;

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pipeline");
    let clock = ClockConfig::default()
        .validate()
        .expect("default clock is valid");

    for &count in PERIOD_COUNTS {
        // Raw processing, no timer replay
        let mut pipeline = Pipeline::new();
        group.bench_with_input(BenchmarkId::new("process", count), &count, |b, &count| {
            b.iter(|| {
                let mut last = 0u8;
                for i in 0..count {
                    last = pipeline.process(black_box(((i * 7) % 100) as i8 - 50));
                }
                last
            })
        });

        for (name, effect) in [("chorus", Effect::default()), ("bypass", Effect::Bypass)] {
            let mut board = Board::new(
                Pipeline::with_effect(effect),
                SimulatedAdc::new((0u32..).map(|n| (n % 200) as u8 + 27)),
                SimulatedPwm::new(),
            );
            let mut driver = PeriodicDriver::new(clock);
            group.bench_with_input(
                BenchmarkId::new(format!("driver_{}", name), count),
                &count,
                |b, &count| {
                    b.iter(|| {
                        driver
                            .run(black_box(&mut board), count as u64)
                            .expect("handler within budget")
                    })
                },
            );
        }
    }

    group.finish();
}
