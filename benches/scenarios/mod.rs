//! Whole-period benchmarks.
//!
//! These drive the pipeline the way the timers do: sampling handler, commit
//! handler and modulator latches for every period.

mod pipeline;

pub use pipeline::bench_pipeline;
