//! Deterministic stand-in for the two hardware timers.
//!
//! On the target, the sampling handler runs from the timer overflow, the
//! commit handler from a compare match, and the modulator latches its duty on
//! its own overflow. Here the same events are replayed in tick order, one
//! sample period per call, so ordering can be tested on the host.

use crate::engine::clock::{SampleClock, TimingError};

/// Interrupt sources inside one sample period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Sample timer overflow, tick 0.
    SamplePeriod,
    /// Sample timer compare match.
    Commit,
    /// Modulator overflow: the buffered duty becomes active.
    PwmBoundary,
}

/// Callbacks registered with the timers.
pub trait TimerHandlers {
    fn on_sample_period(&mut self);

    fn on_commit(&mut self);

    /// Hardware latch point of the modulator. Nothing to do by default.
    fn on_pwm_boundary(&mut self) {}
}

pub struct PeriodicDriver {
    clock: SampleClock,
    period: u64,
    handler_ticks: u32,
}

impl PeriodicDriver {
    pub fn new(clock: SampleClock) -> Self {
        Self {
            clock,
            period: 0,
            handler_ticks: 0,
        }
    }

    /// Model the sampling handler as taking `ticks` timer ticks to run.
    pub fn with_handler_cost(mut self, ticks: u32) -> Self {
        self.handler_ticks = ticks;
        self
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    /// Periods completed so far.
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Events of one sample period with their tick, in firing order.
    pub fn schedule(&self) -> impl Iterator<Item = (u32, TimerEvent)> {
        let commit = self.clock.commit_tick();
        [(0, TimerEvent::SamplePeriod), (commit, TimerEvent::Commit)]
            .into_iter()
            .chain(
                self.clock
                    .pwm_boundaries()
                    .map(|tick| (tick, TimerEvent::PwmBoundary)),
            )
    }

    /// Fire every event of the next sample period.
    ///
    /// A sampling handler slower than the commit compare is a missed deadline:
    /// the commit would publish last period's duty. The error goes back to the
    /// caller and the period is not run.
    pub fn run_period<H: TimerHandlers>(&mut self, handlers: &mut H) -> Result<(), TimingError> {
        let budget = self.clock.sampling_budget_ticks();
        if self.handler_ticks >= budget {
            return Err(TimingError::DeadlineMissed {
                period: self.period,
                needed: self.handler_ticks,
                budget,
            });
        }

        for (_, event) in self.schedule() {
            match event {
                TimerEvent::SamplePeriod => handlers.on_sample_period(),
                TimerEvent::Commit => handlers.on_commit(),
                TimerEvent::PwmBoundary => handlers.on_pwm_boundary(),
            }
        }

        self.period += 1;
        Ok(())
    }

    pub fn run<H: TimerHandlers>(&mut self, handlers: &mut H, periods: u64) -> Result<(), TimingError> {
        for _ in 0..periods {
            self.run_period(handlers)?;
        }
        Ok(())
    }
}
