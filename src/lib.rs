pub mod dsp;
pub mod error;
pub mod pitch; // Note tokens and equal-temperament frequencies
pub mod playback; // Output-device seam and one-at-a-time transport
pub mod player;
pub mod sequencing; // Tune parsing and rendering

pub const SAMPLE_RATE: u32 = 44_100;
