//! Player - validated configuration and the note/tune playback surface.

use std::path::Path;

use crate::dsp::{default_detune, render_tone, FADE_SAMPLES};
use crate::error::PlayerError;
use crate::pitch;
use crate::playback::{AudioSink, CpalSink, Transport};
use crate::sequencing::{Tune, PAUSE_TOKEN};
use crate::SAMPLE_RATE;

/// Playback settings, validated once at construction and immutable after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    volume: f64,
    mute_output: bool,
}

impl PlayerConfig {
    /// Build a config. `volume` must lie in the inclusive range 0.0 to 1.0;
    /// anything else (including NaN) is a [`PlayerError::Volume`].
    pub fn new(volume: f64, mute_output: bool) -> Result<Self, PlayerError> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(PlayerError::Volume(volume));
        }
        Ok(Self {
            volume,
            mute_output,
        })
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// When set, the per-note progress lines are suppressed. Sound still
    /// plays.
    pub fn mute_output(&self) -> bool {
        self.mute_output
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 0.3,
            mute_output: false,
        }
    }
}

/// Plays notes and tunes through an audio sink, one sound at a time.
///
/// A player is an explicit instance owned by the caller; there is no shared
/// process-wide default. Calls on one instance never overlap audibly: each
/// submission waits out the previous one.
pub struct Player<S: AudioSink> {
    config: PlayerConfig,
    transport: Transport<S>,
    detune: Vec<f64>,
}

impl Player<CpalSink> {
    /// Create a player on the host's default output device.
    pub fn new(config: PlayerConfig) -> Result<Self, PlayerError> {
        Ok(Self::with_sink(config, CpalSink::new()?))
    }
}

impl<S: AudioSink> Player<S> {
    /// Create a player over any audio sink.
    pub fn with_sink(config: PlayerConfig, sink: S) -> Self {
        Self {
            config,
            transport: Transport::new(sink),
            detune: default_detune().to_vec(),
        }
    }

    /// Replace the detune multiplier set used for synthesis.
    pub fn detune_multipliers(mut self, multipliers: Vec<f64>) -> Self {
        self.detune = multipliers;
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Play a single note token for `seconds`, or pause if the token is the
    /// reserved word `pause`.
    ///
    /// A token that fails to resolve is reported through the diagnostic
    /// channel and skipped; it is not an error to the caller. Only device
    /// failures surface as `Err`.
    pub fn play_note(&mut self, token: &str, seconds: f64) -> Result<(), PlayerError> {
        if token == PAUSE_TOKEN {
            self.transport.finish();
            self.report_pause(seconds);
            self.transport.pause(seconds);
            return Ok(());
        }

        let frequency = match pitch::resolve(token) {
            Ok(frequency) => frequency,
            Err(err) => {
                log::warn!("{err}");
                return Ok(());
            }
        };
        let samples = render_tone(
            frequency,
            seconds,
            self.config.volume,
            &self.detune,
            SAMPLE_RATE,
            FADE_SAMPLES,
        );
        self.transport.play(samples, SAMPLE_RATE)?;
        self.report_note(token, frequency, seconds);
        Ok(())
    }

    /// Play a whole tune in line order.
    ///
    /// Runs of consecutive notes are rendered into a single buffer and
    /// submitted together, so notes inside a run play back to back with no
    /// gap. A pause flushes the run, waits out its playback and then holds
    /// the silence for the pause's duration. Invalid tokens are diagnosed
    /// and skipped without stopping the tune.
    pub fn play_tune(&mut self, tune: &Tune) -> Result<(), PlayerError> {
        let mut pending: Vec<i16> = Vec::new();
        for step in &tune.steps {
            if step.is_pause() {
                if !pending.is_empty() {
                    self.transport.play(std::mem::take(&mut pending), SAMPLE_RATE)?;
                }
                self.transport.finish();
                self.report_pause(step.seconds);
                self.transport.pause(step.seconds);
                continue;
            }
            match pitch::resolve(&step.token) {
                Ok(frequency) => {
                    pending.extend(render_tone(
                        frequency,
                        step.seconds,
                        self.config.volume,
                        &self.detune,
                        SAMPLE_RATE,
                        FADE_SAMPLES,
                    ));
                    self.report_note(&step.token, frequency, step.seconds);
                }
                Err(err) => log::warn!("{err}"),
            }
        }
        if !pending.is_empty() {
            self.transport.play(pending, SAMPLE_RATE)?;
        }
        Ok(())
    }

    /// Read a tune file and play it.
    pub fn play_tune_file(&mut self, path: impl AsRef<Path>) -> Result<(), PlayerError> {
        let tune = Tune::from_path(path)?;
        self.play_tune(&tune)
    }

    /// Block until everything submitted so far has finished playing.
    ///
    /// Dropping the player waits too; calling this is only needed to hold
    /// the player for further use after the wait.
    pub fn finish(&mut self) {
        self.transport.finish();
    }

    fn report_note(&self, token: &str, frequency: f64, seconds: f64) {
        if self.config.mute_output {
            return;
        }
        println!("Playing {token} ({frequency:.2} Hz) for {seconds}s");
    }

    fn report_pause(&self, seconds: f64) {
        if self.config.mute_output {
            return;
        }
        println!("Pausing for {seconds}s");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_bounds_are_inclusive() {
        assert!(PlayerConfig::new(0.0, false).is_ok());
        assert!(PlayerConfig::new(1.0, false).is_ok());
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        assert!(matches!(
            PlayerConfig::new(1.5, false),
            Err(PlayerError::Volume(v)) if v == 1.5
        ));
        assert!(matches!(
            PlayerConfig::new(-0.1, false),
            Err(PlayerError::Volume(_))
        ));
        assert!(matches!(
            PlayerConfig::new(f64::NAN, false),
            Err(PlayerError::Volume(_))
        ));
    }

    #[test]
    fn default_config_is_quiet_but_not_muted() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume(), 0.3);
        assert!(!config.mute_output());
    }
}
