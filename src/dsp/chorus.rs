use crate::{
    dsp::{history::SampleHistory, saturate, Sample},
    CHORUS_PERIOD, HISTORY_LEN,
};

/*
Chorus Effect
=============

Four reads from the sample history are summed into one output. Two of them
walk backwards in time as the delay offset `d` grows, two walk forwards, and
each pair is repeated half a buffer later:

    tap 0:  idx + d            (oldest end, moving towards the present)
    tap 1:  idx - d + 1        (the slot after idx is the oldest one)
    tap 2:  idx + d + 64
    tap 3:  idx - d + 65

All positions are taken modulo the ring size, so every tap lands on a slot
that has already been written. With d = 0, tap 0 is the newest sample.

The offset advances by one step on the first period of every CHORUS_PERIOD
periods and itself wraps at CHORUS_PERIOD, so the comb sweeps slowly and then
starts over. At 39 kHz and 200 periods per step the sweep moves about 195
taps per second.

No gain staging is applied: four full-scale taps overflow 8 bits, so the sum
is saturated to +/-127 before it is used.
*/

const HALF: usize = HISTORY_LEN / 2;

#[derive(Debug, Clone)]
pub struct Chorus {
    delay: u16,
    tick: u16,
    period: u16,
}

impl Chorus {
    pub const fn new() -> Self {
        Self::with_period(CHORUS_PERIOD)
    }

    /// Sweep that steps once every `period` sample periods.
    pub const fn with_period(period: u16) -> Self {
        let period = if period == 0 { 1 } else { period };
        Self {
            delay: 0,
            tick: 0,
            period,
        }
    }

    /// Ring slots read for write index `idx` and delay offset `delay`.
    #[inline]
    pub fn tap_indices(idx: usize, delay: usize) -> [usize; 4] {
        let mask = HISTORY_LEN - 1;
        // Reduce both first so the arithmetic stays inside 3 * HISTORY_LEN
        let idx = idx & mask;
        let d = delay & mask;
        let back = idx + HISTORY_LEN - d;
        [
            (idx + d) & mask,
            (back + 1) & mask,
            (idx + d + HALF) & mask,
            (back + HALF + 1) & mask,
        ]
    }

    /// Sum the taps for the current write index, then advance the sweep.
    #[inline]
    pub fn process(&mut self, history: &SampleHistory) -> Sample {
        let sum: i16 = Self::tap_indices(history.index(), self.delay as usize)
            .iter()
            .map(|&slot| history.at(slot) as i16)
            .sum();

        self.advance();
        saturate(sum)
    }

    /// Step the sweep by one sample period.
    #[inline]
    pub fn advance(&mut self) {
        if self.tick == 0 {
            self.delay = (self.delay + 1) % self.period;
        }
        self.tick = (self.tick + 1) % self.period;
    }

    pub fn delay(&self) -> u16 {
        self.delay
    }

    pub fn tick(&self) -> u16 {
        self.tick
    }

    pub fn period(&self) -> u16 {
        self.period
    }

    pub fn reset(&mut self) {
        self.delay = 0;
        self.tick = 0;
    }
}

impl Default for Chorus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_history(f: impl Fn(usize) -> Sample) -> SampleHistory {
        let mut history = SampleHistory::new();
        for i in 0..HISTORY_LEN {
            history.write(f(i));
            history.advance();
        }
        history
    }

    #[test]
    fn test_taps_at_zero_delay() {
        assert_eq!(Chorus::tap_indices(0, 0), [0, 1, 64, 65]);
        assert_eq!(Chorus::tap_indices(127, 0), [127, 0, 63, 64]);
    }

    #[test]
    fn test_taps_move_in_opposite_directions() {
        assert_eq!(Chorus::tap_indices(10, 3), [13, 8, 77, 72]);
        assert_eq!(Chorus::tap_indices(2, 5), [7, 126, 71, 62]);
    }

    #[test]
    fn test_tap_ages_follow_delay() {
        let mut history = SampleHistory::new();
        for idx in 0..HISTORY_LEN {
            for delay in 0..CHORUS_PERIOD as usize {
                let d = delay & (HISTORY_LEN - 1);
                let ages = Chorus::tap_indices(idx, delay).map(|slot| history.age_of(slot));
                assert_eq!(
                    ages,
                    [
                        HISTORY_LEN.wrapping_sub(d) & (HISTORY_LEN - 1),
                        d.wrapping_sub(1) & (HISTORY_LEN - 1),
                        (HALF + HISTORY_LEN - d) & (HISTORY_LEN - 1),
                        (d + HALF - 1) & (HISTORY_LEN - 1),
                    ],
                    "idx {} delay {}",
                    idx,
                    delay
                );
            }
            history.advance();
        }
    }

    #[test]
    fn test_zero_delay_reads_newest_and_oldest() {
        let history = SampleHistory::new();
        let ages = Chorus::tap_indices(history.index(), 0).map(|slot| history.age_of(slot));
        // Newest sample, oldest sample, and the two around the half-way point
        assert_eq!(ages, [0, HISTORY_LEN - 1, HALF, HALF - 1]);
    }

    #[test]
    fn test_process_reads_tagged_ages() {
        // Each slot holds half its age once the index wraps back to 0
        let history = filled_history(|i| ((HISTORY_LEN - i) % HISTORY_LEN / 2) as Sample);
        assert_eq!(history.index(), 0);

        let mut chorus = Chorus::new();
        for _ in 0..CHORUS_PERIOD {
            chorus.advance();
        }
        assert_eq!(chorus.delay(), 1);
        // Delay 1 reads ages 127, 0, 63 and 64: 63 + 0 + 31 + 32
        assert_eq!(chorus.process(&history), 126);
    }

    #[test]
    fn test_taps_wrap_large_write_index() {
        assert_eq!(Chorus::tap_indices(usize::MAX, 0), Chorus::tap_indices(127, 0));
        assert_eq!(
            Chorus::tap_indices(usize::MAX - 5, 199),
            Chorus::tap_indices(122, 199 - HISTORY_LEN)
        );
    }

    #[test]
    fn test_zero_delay_sum_is_exact() {
        let history = filled_history(|i| (i % 16) as Sample - 8);
        // Index wrapped back to 0 after a full fill
        let expected: i16 = [0usize, 1, 64, 65]
            .iter()
            .map(|&i| history.at(i) as i16)
            .sum();

        let mut chorus = Chorus::new();
        assert_eq!(chorus.process(&history) as i16, expected);
        assert_eq!(expected, -8 + -7 + -8 + -7);
    }

    #[test]
    fn test_output_saturates_at_extremes() {
        let loud = filled_history(|_| 127);
        let mut chorus = Chorus::new();
        assert_eq!(chorus.process(&loud), 127);

        let quiet = filled_history(|_| -127);
        let mut chorus = Chorus::new();
        assert_eq!(chorus.process(&quiet), -127);
    }

    #[test]
    fn test_output_bounded_for_any_delay() {
        let history = filled_history(|i| if i % 3 == 0 { 127 } else { -127 });
        let mut chorus = Chorus::new();
        for _ in 0..(CHORUS_PERIOD as usize * 4) {
            let out = chorus.process(&history);
            assert!((-127..=127).contains(&out), "out of range: {}", out);
        }
    }

    #[test]
    fn test_first_call_uses_zero_then_steps() {
        let mut chorus = Chorus::new();
        let history = SampleHistory::new();
        assert_eq!(chorus.delay(), 0);
        chorus.process(&history);
        assert_eq!(chorus.delay(), 1);
        for _ in 1..CHORUS_PERIOD {
            chorus.process(&history);
            assert_eq!(chorus.delay(), 1);
        }
        chorus.process(&history);
        assert_eq!(chorus.delay(), 2);
    }

    #[test]
    fn test_sub_counter_cycles_every_period() {
        let mut chorus = Chorus::new();
        for _ in 0..CHORUS_PERIOD {
            chorus.advance();
        }
        assert_eq!(chorus.tick(), 0);
        assert_eq!(chorus.delay(), 1);
    }

    #[test]
    fn test_delay_sweep_returns_to_start() {
        let mut chorus = Chorus::new();
        let full_sweep = CHORUS_PERIOD as u32 * CHORUS_PERIOD as u32;
        for n in 1..=full_sweep {
            chorus.advance();
            assert!(chorus.delay() < CHORUS_PERIOD);
            if n < full_sweep {
                assert!(!(chorus.delay() == 0 && chorus.tick() == 0));
            }
        }
        assert_eq!(chorus.delay(), 0);
        assert_eq!(chorus.tick(), 0);
    }

    #[test]
    fn test_short_period_sweep() {
        let mut chorus = Chorus::with_period(3);
        let delays: Vec<u16> = (0..9)
            .map(|_| {
                chorus.advance();
                chorus.delay()
            })
            .collect();
        assert_eq!(delays, vec![1, 1, 1, 2, 2, 2, 0, 0, 0]);
    }
}
