//! Timer arithmetic shared by the sampling clock and the modulator.
//!
//! Both timers count the same CPU clock. The modulator period is
//! `pwm_top + 1` ticks; the sample period is `sample_rate_div` modulator
//! periods, so the two stay frequency-locked and every sample period starts
//! on a modulator boundary. The commit handler fires at compare tick
//! `pwm_top - commit_offset`, which is always before the first modulator
//! boundary inside the period; the modulator then latches the new duty on
//! that boundary.
//!
//! ```text
//!  tick 0          commit_tick       pwm_top+1                 period
//!  |-- sample ISR --|-- commit ISR --|  latch                   |  latch
//!  v                v                v                          v
//! ```

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{COMMIT_OFFSET, CPU_HZ, PWM_TOP, SAMPLE_RATE_DIV};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    #[error("cpu clock frequency must be non-zero")]
    ZeroClock,
    #[error("sample rate divider must be at least 1")]
    ZeroDivider,
    #[error("commit offset {offset} leaves no room before pwm top {top}")]
    CommitOffsetTooLarge { offset: u8, top: u8 },
    #[error(
        "sampling handler took {needed} ticks in period {period}, commit fires after {budget}"
    )]
    DeadlineMissed { period: u64, needed: u32, budget: u32 },
}

/// Values the peripheral init layer writes into the two timers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub cpu_hz: u32,
    /// Modulator counter top; the duty register compares against it.
    pub pwm_top: u8,
    /// Modulator periods per sample period.
    pub sample_rate_div: u16,
    /// Compare-match distance before `pwm_top` for the commit handler.
    pub commit_offset: u8,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            cpu_hz: CPU_HZ,
            pwm_top: PWM_TOP,
            sample_rate_div: SAMPLE_RATE_DIV,
            commit_offset: COMMIT_OFFSET,
        }
    }
}

impl ClockConfig {
    /// Check the configuration and derive the tick schedule.
    pub fn validate(&self) -> Result<SampleClock, TimingError> {
        if self.cpu_hz == 0 {
            return Err(TimingError::ZeroClock);
        }
        if self.sample_rate_div == 0 {
            return Err(TimingError::ZeroDivider);
        }
        // The commit must land strictly after tick 0, where the sampling
        // handler fires, and strictly before the first modulator boundary.
        if self.commit_offset >= self.pwm_top {
            return Err(TimingError::CommitOffsetTooLarge {
                offset: self.commit_offset,
                top: self.pwm_top,
            });
        }

        let pwm_period_ticks = self.pwm_top as u32 + 1;
        let clock = SampleClock {
            config: *self,
            pwm_period_ticks,
            sample_period_ticks: pwm_period_ticks * self.sample_rate_div as u32,
            commit_tick: (self.pwm_top - self.commit_offset) as u32,
        };

        log::debug!(
            "sample clock: {:.1} Hz, pwm {:.1} Hz, period {} ticks, commit at tick {}",
            clock.sample_rate_hz(),
            clock.pwm_hz(),
            clock.sample_period_ticks,
            clock.commit_tick
        );

        Ok(clock)
    }
}

/// Validated timer schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleClock {
    config: ClockConfig,
    pwm_period_ticks: u32,
    sample_period_ticks: u32,
    commit_tick: u32,
}

impl SampleClock {
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn pwm_period_ticks(&self) -> u32 {
        self.pwm_period_ticks
    }

    pub fn sample_period_ticks(&self) -> u32 {
        self.sample_period_ticks
    }

    /// Tick within the sample period at which the commit handler fires.
    pub fn commit_tick(&self) -> u32 {
        self.commit_tick
    }

    /// Ticks the sampling handler may use before the commit preempts it.
    pub fn sampling_budget_ticks(&self) -> u32 {
        self.commit_tick
    }

    /// First modulator boundary strictly after `tick`.
    pub fn next_pwm_boundary(&self, tick: u32) -> u32 {
        (tick / self.pwm_period_ticks + 1) * self.pwm_period_ticks
    }

    /// Modulator boundaries inside one sample period, the last one closing it.
    pub fn pwm_boundaries(&self) -> impl Iterator<Item = u32> {
        let step = self.pwm_period_ticks;
        (1..=self.config.sample_rate_div as u32).map(move |k| k * step)
    }

    pub fn pwm_hz(&self) -> f32 {
        self.config.cpu_hz as f32 / self.pwm_period_ticks as f32
    }

    pub fn sample_rate_hz(&self) -> f32 {
        self.config.cpu_hz as f32 / self.sample_period_ticks as f32
    }
}
