//! Error types for note parsing and playback.

use thiserror::Error;

/// A note token that could not be resolved to a frequency.
///
/// These are per-token failures: the offending token is skipped and playback
/// of the rest of a tune continues. Each variant carries the substring that
/// failed so diagnostics can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// First character is not one of the letters A-G.
    #[error("invalid note: '{0}'")]
    Letter(String),

    /// Octave is not an integer between 0 and 8.
    #[error("invalid octave: '{0}'")]
    Octave(String),

    /// Accidental is neither '#' nor 'b'.
    #[error("invalid accidental: '{0}'")]
    Accidental(String),

    /// Token length is outside the 1-3 character note grammar.
    #[error("invalid note token: '{0}'")]
    Shape(String),
}

impl NoteError {
    /// The offending substring, for callers assembling their own diagnostics.
    pub fn offending(&self) -> &str {
        match self {
            NoteError::Letter(s)
            | NoteError::Octave(s)
            | NoteError::Accidental(s)
            | NoteError::Shape(s) => s,
        }
    }
}

/// Fatal player errors: invalid construction or a broken output device.
///
/// Unlike [`NoteError`] these abort the current operation and are surfaced
/// to the caller.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Volume outside the inclusive range 0.0 to 1.0.
    #[error("volume must be between 0.0 and 1.0, got {0}")]
    Volume(f64),

    /// No default audio output device on this host.
    #[error("no audio output device available")]
    NoOutputDevice,

    /// The output device refused to report a stream configuration.
    #[error("failed to query output config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    /// The output stream could not be opened.
    #[error("failed to open output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// The output stream could not be started.
    #[error("failed to start playback: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    /// Reading a tune file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_errors_name_the_offending_text() {
        let err = NoteError::Octave("9".to_string());
        assert!(err.to_string().contains("octave"));
        assert_eq!(err.offending(), "9");
    }

    #[test]
    fn volume_error_reports_the_value() {
        let err = PlayerError::Volume(1.5);
        assert!(err.to_string().contains("1.5"));
    }
}
