use crate::{
    dsp::{
        chorus::Chorus, dc_block::DcBlocker, history::SampleHistory, Effect, EffectKind, Sample,
    },
    engine::{handoff::PendingOutput, scheduler::TimerHandlers},
    io::{converter::to_duty, AnalogInput, PwmOutput},
    CHORUS_PERIOD, DC_LEAK_SHIFT,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Effect parameters fixed when the pipeline is built.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub effect: EffectKind,
    pub dc_shift: u8,
    pub chorus_period: u16,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            effect: EffectKind::Chorus,
            dc_shift: DC_LEAK_SHIFT,
            chorus_period: CHORUS_PERIOD,
        }
    }
}

/// All state the two interrupt handlers share.
///
/// The sampling handler takes `&mut self` and owns everything for its run;
/// the commit handler only needs `&self` because the pending duty is atomic.
#[derive(Debug)]
pub struct Pipeline {
    history: SampleHistory,
    dc: DcBlocker,
    effect: Effect,
    pending: PendingOutput,
    periods: u64,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_effect(Effect::default())
    }

    pub fn with_effect(effect: Effect) -> Self {
        Self {
            history: SampleHistory::new(),
            dc: DcBlocker::new(),
            effect,
            pending: PendingOutput::default(),
            periods: 0,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        let effect = match config.effect {
            EffectKind::Chorus => Effect::Chorus(Chorus::with_period(config.chorus_period)),
            EffectKind::Bypass => Effect::Bypass,
        };

        Self {
            dc: DcBlocker::with_shift(config.dc_shift),
            ..Self::with_effect(effect)
        }
    }

    /// Sampling handler: fires at the start of every sample period.
    ///
    /// The reading consumed here is the conversion started by the previous
    /// period's trigger, so the output lags the input by one period.
    pub fn on_sample_period<A: AnalogInput>(&mut self, adc: &mut A) -> u8 {
        adc.trigger_sample_acquisition();
        let raw = adc.read_last_sample();
        self.process(raw)
    }

    /// Filter, store, run the effect, publish, advance. Returns the published duty.
    #[inline]
    pub fn process(&mut self, raw: Sample) -> u8 {
        let filtered = self.dc.next_sample(raw);
        self.history.write(filtered);

        let duty = to_duty(self.effect.process(&self.history));
        self.pending.publish(duty);

        self.history.advance();
        self.periods = self.periods.wrapping_add(1);
        duty
    }

    /// Commit handler: copy the pending duty into the modulator's buffered register.
    #[inline]
    pub fn on_commit<P: PwmOutput>(&self, pwm: &mut P) {
        pwm.set_duty_cycle(self.pending.latest());
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn filter(&self) -> &DcBlocker {
        &self.dc
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn pending(&self) -> &PendingOutput {
        &self.pending
    }

    /// Current chorus delay offset, `None` when bypassed.
    pub fn chorus_delay(&self) -> Option<u16> {
        match &self.effect {
            Effect::Chorus(chorus) => Some(chorus.delay()),
            Effect::Bypass => None,
        }
    }

    /// Sample periods processed since construction or the last reset.
    pub fn periods(&self) -> u64 {
        self.periods
    }

    pub fn reset(&mut self) {
        self.history.reset();
        self.dc.reset();
        self.effect.reset();
        self.pending.reset();
        self.periods = 0;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline wired to its peripherals, ready to be driven by the timers.
pub struct Board<A, P> {
    pub pipeline: Pipeline,
    pub adc: A,
    pub pwm: P,
}

impl<A: AnalogInput, P: PwmOutput> Board<A, P> {
    pub fn new(pipeline: Pipeline, adc: A, pwm: P) -> Self {
        Self { pipeline, adc, pwm }
    }
}

impl<A: AnalogInput, P: PwmOutput> TimerHandlers for Board<A, P> {
    fn on_sample_period(&mut self) {
        self.pipeline.on_sample_period(&mut self.adc);
    }

    fn on_commit(&mut self) {
        self.pipeline.on_commit(&mut self.pwm);
    }

    fn on_pwm_boundary(&mut self) {
        self.pwm.on_period_boundary();
    }
}
