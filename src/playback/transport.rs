//! Transport - serializes playback so one sound plays at a time.

use std::thread;
use std::time::Duration;

use super::{AudioSink, PlaybackHandle};
use crate::error::PlayerError;

/// Owns the sink and at most one in-flight playback handle.
///
/// Two states: idle (no handle) and playing (handle held). Every entry point
/// first waits out the held handle, so submissions play in call order with no
/// overlap. Instances are meant for single-threaded sequential use; callers
/// that share one across threads must add their own mutual exclusion.
pub struct Transport<S: AudioSink> {
    sink: S,
    current: Option<S::Handle>,
}

impl<S: AudioSink> Transport<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: None,
        }
    }

    /// Wait for the previous sound, then start playing `samples`.
    pub fn play(&mut self, samples: Vec<i16>, sample_rate: u32) -> Result<(), PlayerError> {
        self.finish();
        let handle = self.sink.submit(samples, sample_rate)?;
        self.current = Some(handle);
        Ok(())
    }

    /// Wait for the previous sound, then block for `seconds` of silence.
    ///
    /// No buffer is produced or dispatched; the pause is pure elapsed time.
    pub fn pause(&mut self, seconds: f64) {
        self.finish();
        if seconds > 0.0 && seconds.is_finite() {
            thread::sleep(Duration::from_secs_f64(seconds));
        }
    }

    /// True while the most recently started sound is still audible.
    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|h| h.is_playing())
    }

    /// Block until the current sound, if any, has fully played out.
    pub fn finish(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.wait();
        }
    }
}

/// Waiting on drop keeps an in-flight sound from being truncated when the
/// transport goes out of scope, on every exit path.
impl<S: AudioSink> Drop for Transport<S> {
    fn drop(&mut self) {
        self.finish();
    }
}
