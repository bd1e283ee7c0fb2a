//! Additive detuned-sine tone rendering.

use std::f64::consts::TAU;

use super::fade::apply_fade;

/*
Tone Rendering
==============

A note is rendered as the average of several sine waves, each running at the
fundamental frequency scaled by a "detune multiplier":

    tone(t) = mean over m of sin(2pi * f * t * m)

The default multiplier set is five values evenly spaced from -10 to 2:

    [-10, -7, -4, -1, 2]

Negative multipliers mirror the sine around zero, so the mix contains
frequency content below and at the fundamental in an asymmetric pattern.
That lopsided spectrum is the instrument's characteristic chorus-like
timbre. It is intentional; do not replace the set with positive-only
harmonics.

Rendering steps:

  1. Time axis: n = trunc(seconds * sample_rate) samples evenly spaced over
     [0, seconds). Zero or negative duration renders an empty buffer.
  2. Mix: one sine per multiplier, averaged sample-by-sample.
  3. Level: the peak of the mix is normalized to full 16-bit scale, then
     scaled down by the requested volume.
  4. Fade: linear ramps at both ends (see the fade module).
  5. Quantize: truncate to i16. Normalization already bounds the values,
     so no further clamping is needed.
*/

/// Number of detuned sine components in the default mix.
pub const DETUNE_VOICES: usize = 5;

/// Default detune multipliers: [`DETUNE_VOICES`] values evenly spaced from
/// -10 to 2.
pub fn default_detune() -> [f64; DETUNE_VOICES] {
    let mut multipliers = [0.0; DETUNE_VOICES];
    let step = (2.0 - (-10.0)) / (DETUNE_VOICES - 1) as f64;
    for (i, m) in multipliers.iter_mut().enumerate() {
        *m = -10.0 + step * i as f64;
    }
    multipliers
}

/// Render one note as a mono 16-bit sample buffer.
///
/// The buffer holds exactly `trunc(seconds * sample_rate)` samples. Degenerate
/// input (non-positive duration, an empty multiplier set) renders an empty
/// buffer rather than erroring: there is nothing to play, and nothing to
/// diagnose either.
pub fn render_tone(
    frequency: f64,
    seconds: f64,
    volume: f64,
    multipliers: &[f64],
    sample_rate: u32,
    fade: usize,
) -> Vec<i16> {
    if seconds <= 0.0 || multipliers.is_empty() {
        return Vec::new();
    }
    let n = (seconds * sample_rate as f64) as usize;
    if n == 0 {
        return Vec::new();
    }

    // Evenly spaced time axis over [0, seconds), endpoint excluded.
    let step = seconds / n as f64;
    let mut mix = vec![0.0f64; n];
    for (i, out) in mix.iter_mut().enumerate() {
        let t = i as f64 * step;
        let mut acc = 0.0;
        for &m in multipliers {
            acc += (TAU * frequency * t * m).sin();
        }
        *out = acc / multipliers.len() as f64;
    }

    // Normalize the peak to full scale, then scale down by the volume.
    let peak = mix.iter().fold(0.0f64, |peak, &s| peak.max(s.abs()));
    if peak > 0.0 {
        let gain = volume * i16::MAX as f64 / peak;
        for s in &mut mix {
            *s *= gain;
        }
    }

    apply_fade(&mut mix, fade);

    mix.into_iter().map(|s| s as i16).collect()
}
