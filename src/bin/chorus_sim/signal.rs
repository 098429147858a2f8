//! Test input for the simulated converter.

use pwm_chorus::io::converter::level_to_raw;
use std::f32::consts::TAU;

/// Maximum number of summed partials.
const MAX_TONES: usize = 8;

/// Sum of sines plus a constant offset, quantized like the 8-bit converter.
#[derive(Clone)]
pub struct TestSignal {
    sample_rate: f32,
    tones: Vec<(f32, f32)>,
    phases: Vec<f32>,
    bias: f32,
}

impl TestSignal {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            tones: Vec::with_capacity(MAX_TONES),
            phases: Vec::with_capacity(MAX_TONES),
            bias: 0.0,
        }
    }

    /// Add a partial. Ignored past `MAX_TONES`.
    pub fn tone(mut self, freq: f32, amplitude: f32) -> Self {
        if self.tones.len() < MAX_TONES {
            self.tones.push((freq, amplitude));
            self.phases.push(0.0);
        }
        self
    }

    pub fn bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

impl Iterator for TestSignal {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let mut level = self.bias;
        for ((freq, amplitude), phase) in self.tones.iter().zip(self.phases.iter_mut()) {
            level += amplitude * phase.sin();
            *phase += TAU * freq / self.sample_rate;
            if *phase >= TAU {
                *phase -= TAU;
            }
        }
        Some(level_to_raw(level))
    }
}
