//! Note tokens and their equal-temperament frequencies.
//!
//! A note token is one to three characters: a letter, an optional octave
//! digit, and an optional accidental.
//!
//! ```text
//!   "A"    letter only, octave defaults to 4      -> 440.00 Hz
//!   "A#"   accidental in second place, octave 4   -> 466.16 Hz
//!   "A5"   octave digit in second place           -> 880.00 Hz
//!   "Ab5"  letter, octave, accidental             -> 830.61 Hz
//! ```
//!
//! Letters are case-insensitive. Octaves run from 0 to 8. A sharp raises the
//! pitch by one semitone (a factor of the twelfth root of two), a flat lowers
//! it by the same factor.
//!
//! Parsing never panics. Every malformed token comes back as a [`NoteError`]
//! classified by the sub-field that failed, so a tune with one bad note can
//! keep playing the rest.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// Frequency ratio between adjacent semitones: the twelfth root of two.
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Lowest supported octave.
pub const OCTAVE_MIN: u8 = 0;
/// Highest supported octave.
pub const OCTAVE_MAX: u8 = 8;
/// Octave assumed when the token does not carry one.
pub const OCTAVE_DEFAULT: u8 = 4;

/// The seven natural note letters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    /// Fundamental frequency of this letter in octave 0, in Hz.
    ///
    /// The table anchors A4 at 440 Hz: each value here is the octave-4
    /// frequency divided by 2^4.
    pub const fn base_frequency(self) -> f64 {
        match self {
            NoteLetter::A => 27.500_00,
            NoteLetter::B => 30.867_71,
            NoteLetter::C => 16.351_60,
            NoteLetter::D => 18.354_05,
            NoteLetter::E => 20.601_72,
            NoteLetter::F => 21.826_76,
            NoteLetter::G => 24.499_71,
        }
    }

    fn from_char(ch: char) -> Option<NoteLetter> {
        match ch.to_ascii_uppercase() {
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            _ => None,
        }
    }
}

/// Semitone modifier attached to a note.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    /// `#`: one semitone up.
    Sharp,
    /// `b`: one semitone down.
    Flat,
}

impl Accidental {
    fn from_char(ch: char) -> Option<Accidental> {
        match ch {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn apply(self, frequency: f64) -> f64 {
        match self {
            Accidental::Sharp => frequency * SEMITONE_RATIO,
            Accidental::Flat => frequency / SEMITONE_RATIO,
        }
    }
}

/// A fully parsed note token.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteSpec {
    pub letter: NoteLetter,
    /// Octave number, 0 to 8.
    pub octave: u8,
    pub accidental: Option<Accidental>,
}

impl NoteSpec {
    /// Parse a token into its letter, octave and accidental.
    ///
    /// The letter is checked first, then the octave, then the accidental, and
    /// the returned error names whichever check failed first.
    pub fn parse(token: &str) -> Result<NoteSpec, NoteError> {
        let chars: Vec<char> = token.chars().collect();
        match chars.as_slice() {
            [letter] => Ok(NoteSpec {
                letter: parse_letter(*letter)?,
                octave: OCTAVE_DEFAULT,
                accidental: None,
            }),
            [letter, second] => {
                let letter = parse_letter(*letter)?;
                // A second character that is not an accidental is read as an
                // octave digit.
                if let Some(accidental) = Accidental::from_char(*second) {
                    Ok(NoteSpec {
                        letter,
                        octave: OCTAVE_DEFAULT,
                        accidental: Some(accidental),
                    })
                } else {
                    Ok(NoteSpec {
                        letter,
                        octave: parse_octave(*second)?,
                        accidental: None,
                    })
                }
            }
            [letter, octave, accidental] => {
                let letter = parse_letter(*letter)?;
                let octave = parse_octave(*octave)?;
                let accidental = Accidental::from_char(*accidental)
                    .ok_or_else(|| NoteError::Accidental(accidental.to_string()))?;
                Ok(NoteSpec {
                    letter,
                    octave,
                    accidental: Some(accidental),
                })
            }
            _ => Err(NoteError::Shape(token.to_string())),
        }
    }

    /// The fundamental frequency of this note, in Hz. Always positive.
    pub fn frequency(&self) -> f64 {
        let frequency = self.letter.base_frequency() * 2f64.powi(self.octave as i32);
        match self.accidental {
            Some(accidental) => accidental.apply(frequency),
            None => frequency,
        }
    }
}

fn parse_letter(ch: char) -> Result<NoteLetter, NoteError> {
    NoteLetter::from_char(ch).ok_or_else(|| NoteError::Letter(ch.to_string()))
}

fn parse_octave(ch: char) -> Result<u8, NoteError> {
    match ch.to_digit(10) {
        Some(octave) if octave <= OCTAVE_MAX as u32 => Ok(octave as u8),
        _ => Err(NoteError::Octave(ch.to_string())),
    }
}

/// Resolve a note token straight to its frequency in Hz.
pub fn resolve(token: &str) -> Result<f64, NoteError> {
    NoteSpec::parse(token).map(|spec| spec.frequency())
}
