//! Benchmarks for the fixed-point DSP primitives.

mod chorus;
mod dc_block;

pub use chorus::bench_chorus;
pub use dc_block::bench_dc_block;
