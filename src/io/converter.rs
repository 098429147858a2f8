use crate::{
    dsp::{saturate, Sample},
    SAMPLE_MIDPOINT,
};

/// Center an 8-bit converter reading on zero.
///
/// 255 would map to 128, which does not fit; it saturates to 127.
#[inline]
pub fn center_raw(raw: u8) -> Sample {
    saturate(raw as i16 - SAMPLE_MIDPOINT as i16)
}

/// Shift a centered sample into the modulator's duty range, silence at 127.
#[inline]
pub fn to_duty(sample: Sample) -> u8 {
    (saturate(sample as i16) as i16 + SAMPLE_MIDPOINT as i16) as u8
}

/// Average output level of a duty value, in [-1.0, 1.0].
pub fn duty_to_level(duty: u8) -> f32 {
    ((duty as f32 - SAMPLE_MIDPOINT as f32) / SAMPLE_MIDPOINT as f32).clamp(-1.0, 1.0)
}

/// Quantize an analog level (volts relative to the converter range, -1.0..=1.0)
/// into the reading the converter would produce.
pub fn level_to_raw(level: f32) -> u8 {
    (SAMPLE_MIDPOINT as f32 + level * SAMPLE_MIDPOINT as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}
