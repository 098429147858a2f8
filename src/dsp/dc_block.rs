//! DC Blocking
//!
//! A one-pole high-pass built from a first difference and a leaky integrator:
//!
//!   y[n] = y[n-1] + (x[n] - x[n-1])
//!   y[n] = y[n] - (y[n] >> k)
//!
//! The difference removes any constant input, the leak pulls the integrator
//! back toward zero so the output settles instead of holding the last step.
//! With k = 4 the pole sits at 15/16, giving a cutoff of roughly fs / 100.
//!
//! The shift floors toward negative infinity, so a positive residue smaller
//! than 2^k is never leaked away while a negative one always reaches zero.
//! Steady state for a constant input therefore lands in [0, 2^k - 1].

use crate::{
    dsp::{saturate, Sample},
    DC_LEAK_SHIFT,
};

#[derive(Debug, Clone)]
pub struct DcBlocker {
    prev_raw: Sample,
    curr_raw: Sample,
    prev_out: Sample,
    shift: u8,
}

impl DcBlocker {
    pub const fn new() -> Self {
        Self::with_shift(DC_LEAK_SHIFT)
    }

    /// Larger shifts move the cutoff down and lengthen the settling time.
    pub const fn with_shift(shift: u8) -> Self {
        let shift = if shift > 7 { 7 } else { shift };
        Self {
            prev_raw: 0,
            curr_raw: 0,
            prev_out: 0,
            shift,
        }
    }

    /// Filter one centered reading. Call exactly once per sample period.
    #[inline]
    pub fn next_sample(&mut self, raw: Sample) -> Sample {
        self.prev_raw = self.curr_raw;
        self.curr_raw = raw;

        let stepped = saturate(
            self.prev_out as i16 + self.curr_raw as i16 - self.prev_raw as i16,
        );
        let out = stepped - (stepped >> self.shift);

        self.prev_out = out;
        out
    }

    pub fn last_output(&self) -> Sample {
        self.prev_out
    }

    pub fn shift(&self) -> u8 {
        self.shift
    }

    pub fn reset(&mut self) {
        self.prev_raw = 0;
        self.curr_raw = 0;
        self.prev_out = 0;
    }
}

impl Default for DcBlocker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HISTORY_LEN;

    fn leak(y: Sample, shift: u8) -> Sample {
        y - (y >> shift)
    }

    #[test]
    fn test_constant_input_settles_near_zero() {
        let epsilon = (1i8 << DC_LEAK_SHIFT) - 1;

        for level in [-127i8, -64, -1, 0, 1, 33, 100, 127] {
            let mut filter = DcBlocker::new();
            let mut out = 0;
            for _ in 0..HISTORY_LEN {
                out = filter.next_sample(level);
            }
            assert!(
                (0..=epsilon).contains(&out),
                "constant {} settled at {}, expected within [0, {}]",
                level,
                out,
                epsilon
            );
        }
    }

    #[test]
    fn test_negative_bias_decays_to_exact_zero() {
        let mut filter = DcBlocker::new();
        for _ in 0..HISTORY_LEN {
            filter.next_sample(-90);
        }
        assert_eq!(filter.last_output(), 0);
    }

    #[test]
    fn test_step_response_matches_integer_leak() {
        let mut filter = DcBlocker::new();
        let step: Sample = 100;

        // First period sees the full step, then the raw difference is zero
        let mut expected = leak(step, DC_LEAK_SHIFT);
        assert_eq!(filter.next_sample(step), expected);
        assert_eq!(expected, 94);

        for _ in 0..64 {
            expected = leak(expected, DC_LEAK_SHIFT);
            assert_eq!(filter.next_sample(step), expected);
        }
    }

    #[test]
    fn test_step_response_first_values() {
        let mut filter = DcBlocker::new();
        let out: Vec<Sample> = (0..9).map(|_| filter.next_sample(100)).collect();
        assert_eq!(out, vec![94, 89, 84, 79, 75, 71, 67, 63, 60]);

        let mut filter = DcBlocker::new();
        let out: Vec<Sample> = (0..3).map(|_| filter.next_sample(-100)).collect();
        assert_eq!(out, vec![-93, -87, -81]);
    }

    #[test]
    fn test_alternating_input_passes_through() {
        // A full-rate square wave is far above the cutoff and keeps its swing
        let mut filter = DcBlocker::new();
        let mut peak = 0i8;
        for n in 0..256 {
            let x = if n % 2 == 0 { 40 } else { -40 };
            let y = filter.next_sample(x);
            if n > 32 {
                peak = peak.max(y.saturating_abs());
            }
        }
        assert!(peak > 30, "expected high frequency to pass, got peak {}", peak);
    }

    #[test]
    fn test_large_step_saturates_instead_of_wrapping() {
        let mut filter = DcBlocker::new();
        filter.next_sample(-127);
        let y = filter.next_sample(127);
        // -119 + 254 would wrap negative in 8 bits
        assert!(y > 0, "step up produced {}", y);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = DcBlocker::new();
        filter.next_sample(80);
        filter.reset();
        assert_eq!(filter.last_output(), 0);
        assert_eq!(filter.next_sample(0), 0);
    }

    #[test]
    fn test_shift_is_clamped() {
        assert_eq!(DcBlocker::with_shift(12).shift(), 7);
        assert_eq!(DcBlocker::with_shift(3).shift(), 3);
    }
}
