//! Fixed-point DSP primitives run by the sampling handler.
//!
//! Everything here is allocation-free and works on 8-bit centered samples with
//! integer arithmetic only, so the same code runs inside an interrupt on the
//! microcontroller and inside the host simulator.

/// Four-tap chorus with a slowly sweeping delay offset.
pub mod chorus;
/// Difference-plus-leak DC blocking high-pass.
pub mod dc_block;
/// Fixed 128-entry ring of filtered samples.
pub mod history;

use self::{chorus::Chorus, history::SampleHistory};
use crate::{SAMPLE_MAX, SAMPLE_MIN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Centered signal value, used range [-127, 127].
pub type Sample = i8;

/// Clamp a wide intermediate into the sample range.
///
/// Overflow must never wrap: a wrapped sum flips sign and clicks.
#[inline]
pub fn saturate(value: i16) -> Sample {
    value.clamp(SAMPLE_MIN as i16, SAMPLE_MAX as i16) as Sample
}

/// Which effect the sampling handler runs after the DC blocker.
///
/// Exactly one effect is active for the life of a pipeline.
#[derive(Debug, Clone)]
pub enum Effect {
    Chorus(Chorus),
    /// Pass the filtered sample straight to the output.
    Bypass,
}

/// Serializable selector for [`Effect`], without the runtime state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectKind {
    #[default]
    Chorus,
    Bypass,
}

impl Effect {
    pub fn from_kind(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Chorus => Effect::Chorus(Chorus::new()),
            EffectKind::Bypass => Effect::Bypass,
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Chorus(_) => EffectKind::Chorus,
            Effect::Bypass => EffectKind::Bypass,
        }
    }

    /// Produce one output sample from the history, newest entry at the write index.
    #[inline]
    pub fn process(&mut self, history: &SampleHistory) -> Sample {
        match self {
            Effect::Chorus(chorus) => chorus.process(history),
            Effect::Bypass => history.current(),
        }
    }

    pub fn reset(&mut self) {
        if let Effect::Chorus(chorus) = self {
            chorus.reset();
        }
    }
}

impl Default for Effect {
    fn default() -> Self {
        Effect::from_kind(EffectKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_clips_symmetrically() {
        assert_eq!(saturate(0), 0);
        assert_eq!(saturate(127), 127);
        assert_eq!(saturate(128), 127);
        assert_eq!(saturate(508), 127);
        assert_eq!(saturate(-127), -127);
        // -128 fits an i8 but is outside the used range
        assert_eq!(saturate(-128), -127);
        assert_eq!(saturate(-508), -127);
    }

    #[test]
    fn test_bypass_returns_current_sample() {
        let mut history = SampleHistory::new();
        history.write(42);
        let mut effect = Effect::Bypass;
        assert_eq!(effect.process(&history), 42);
    }

    #[test]
    fn test_effect_kind_round_trips() {
        assert_eq!(Effect::from_kind(EffectKind::Bypass).kind(), EffectKind::Bypass);
        assert_eq!(Effect::default().kind(), EffectKind::Chorus);
    }
}
