//! Playback through the default cpal output device.

use std::sync::{Arc, Condvar, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use super::{AudioSink, PlaybackHandle};
use crate::error::PlayerError;

/// Completion flag shared between the audio callback and the caller.
struct Completion {
    done: Mutex<bool>,
    signal: Condvar,
}

impl Completion {
    fn new() -> Self {
        Self {
            done: Mutex::new(false),
            signal: Condvar::new(),
        }
    }

    fn mark_done(&self) {
        let mut done = self.done.lock().unwrap();
        if !*done {
            *done = true;
            self.signal.notify_all();
        }
    }

    fn is_done(&self) -> bool {
        *self.done.lock().unwrap()
    }

    fn wait(&self) {
        let mut done = self.done.lock().unwrap();
        while !*done {
            done = self.signal.wait(done).unwrap();
        }
    }
}

/// The default output device, ready to accept sample buffers.
///
/// Each submitted buffer gets its own output stream at the buffer's sample
/// rate. The mono source is duplicated across however many channels the
/// device exposes.
pub struct CpalSink {
    device: cpal::Device,
    channels: u16,
}

impl CpalSink {
    /// Open the host's default output device.
    pub fn new() -> Result<Self, PlayerError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlayerError::NoOutputDevice)?;
        let channels = device.default_output_config()?.channels();
        Ok(Self { device, channels })
    }
}

/// Handle for one in-flight cpal playback.
///
/// Keeps the stream alive for as long as the sound should play; dropping the
/// handle tears the stream down.
pub struct CpalHandle {
    completion: Arc<Completion>,
    _stream: cpal::Stream,
}

impl PlaybackHandle for CpalHandle {
    fn is_playing(&self) -> bool {
        !self.completion.is_done()
    }

    fn wait(&self) {
        self.completion.wait();
    }
}

impl AudioSink for CpalSink {
    type Handle = CpalHandle;

    fn submit(
        &mut self,
        samples: Vec<i16>,
        sample_rate: u32,
    ) -> Result<CpalHandle, PlayerError> {
        // The whole clip is staged in a ring buffer sized to fit it, so the
        // audio callback pops samples without touching any locks.
        let (mut producer, mut consumer) = RingBuffer::<i16>::new(samples.len().max(1));
        for sample in samples {
            // Capacity equals the clip length; pushes cannot fail.
            let _ = producer.push(sample);
        }
        drop(producer);

        let completion = Arc::new(Completion::new());
        let callback_completion = completion.clone();
        let channels = self.channels as usize;

        let config = cpal::StreamConfig {
            channels: self.channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = self.device.build_output_stream(
            &config,
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    let value = match consumer.pop() {
                        Ok(sample) => sample as f32 / 32_768.0,
                        Err(_) => {
                            // Clip exhausted: flag completion and pad the
                            // rest of the device buffer with silence.
                            callback_completion.mark_done();
                            0.0
                        }
                    };
                    for out in frame.iter_mut() {
                        *out = value;
                    }
                }
            },
            |err| log::warn!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        Ok(CpalHandle {
            completion,
            _stream: stream,
        })
    }
}
