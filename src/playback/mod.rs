//! Playback: the output-device seam and the one-at-a-time transport.
//!
//! The sound card is an external collaborator. It takes a finished mono
//! 16-bit buffer plus a sample rate and renders it asynchronously; all this
//! crate sees is an opaque handle that can be queried or waited on. The
//! [`Transport`] sits in front of the device and makes sure at most one
//! buffer is ever playing.

/// Default-device playback through cpal.
pub mod device;
/// The serializer that holds at most one in-flight playback.
pub mod transport;

pub use device::CpalSink;
pub use transport::Transport;

use crate::error::PlayerError;

/// Opaque reference to one in-progress playback.
pub trait PlaybackHandle {
    /// Non-blocking completion query.
    fn is_playing(&self) -> bool;

    /// Block until the sound has finished. Waits on a completion signal
    /// from the device; never a spin loop.
    fn wait(&self);
}

/// An audio output device accepting finished sample buffers.
///
/// Buffers are one channel of signed 16-bit samples; both are fixed by the
/// signature. The returned handle stays valid for the lifetime of that one
/// playback.
pub trait AudioSink {
    type Handle: PlaybackHandle;

    fn submit(&mut self, samples: Vec<i16>, sample_rate: u32)
        -> Result<Self::Handle, PlayerError>;
}
