//! Tune parsing and rendering: one text line per note.
//!
//! A tune is an ordered sequence of lines of the form `NOTE` or
//! `NOTE:SECONDS`. Blank lines are skipped. `NOTE` is a token for the pitch
//! module, or the reserved word `pause`. A missing or malformed duration
//! falls back to half a second.

use std::fs;
use std::path::Path;

use crate::dsp::{render_tone, FADE_SAMPLES};
use crate::error::PlayerError;
use crate::pitch;
use crate::SAMPLE_RATE;

/// Seconds played when a line does not carry a usable duration.
pub const DEFAULT_NOTE_SECONDS: f64 = 0.5;

/// Reserved token for a silent step. Contributes no samples when a tune is
/// rendered; the playback path turns it into real elapsed time instead.
pub const PAUSE_TOKEN: &str = "pause";

/// One parsed tune line: a token and how long to hold it.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneStep {
    pub token: String,
    pub seconds: f64,
}

impl TuneStep {
    /// Parse one line. Returns `None` for blank lines.
    ///
    /// The line is split on the first `:`; everything after it is the
    /// duration. Parsing the duration never fails hard, it just falls back
    /// to the default.
    pub fn parse(line: &str) -> Option<TuneStep> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (token, seconds) = match line.split_once(':') {
            Some((token, duration)) => (
                token,
                duration.trim().parse().unwrap_or(DEFAULT_NOTE_SECONDS),
            ),
            None => (line, DEFAULT_NOTE_SECONDS),
        };
        Some(TuneStep {
            token: token.to_string(),
            seconds,
        })
    }

    pub fn is_pause(&self) -> bool {
        self.token == PAUSE_TOKEN
    }
}

/// An ordered sequence of tune steps.
#[derive(Debug, Clone, Default)]
pub struct Tune {
    pub steps: Vec<TuneStep>,
}

impl Tune {
    /// Build a tune from an ordered sequence of text lines.
    pub fn from_lines<I, S>(lines: I) -> Tune
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Tune {
            steps: lines
                .into_iter()
                .filter_map(|line| TuneStep::parse(line.as_ref()))
                .collect(),
        }
    }

    /// Read a tune from a text file, one step per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Tune, PlayerError> {
        let text = fs::read_to_string(path)?;
        Ok(Tune::from_lines(text.lines()))
    }

    /// Render the whole tune into one sample buffer.
    ///
    /// Each step is resolved and synthesized in line order and the buffers
    /// are concatenated back to back. Steps that fail to resolve emit one
    /// diagnostic each and contribute nothing, so the output is shorter than
    /// the line count suggests whenever invalid notes are present. Pauses
    /// contribute nothing here either; only the playback path gives them
    /// duration.
    pub fn render(&self, volume: f64, multipliers: &[f64]) -> Vec<i16> {
        let mut buffer = Vec::new();
        for step in &self.steps {
            if step.is_pause() {
                continue;
            }
            match pitch::resolve(&step.token) {
                Ok(frequency) => buffer.extend(render_tone(
                    frequency,
                    step.seconds,
                    volume,
                    multipliers,
                    SAMPLE_RATE,
                    FADE_SAMPLES,
                )),
                Err(err) => log::warn!("skipping tune step: {err}"),
            }
        }
        buffer
    }
}
