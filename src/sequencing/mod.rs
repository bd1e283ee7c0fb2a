pub mod tune;

pub use tune::{Tune, TuneStep, DEFAULT_NOTE_SECONDS, PAUSE_TOKEN};
