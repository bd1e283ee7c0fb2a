//! End-to-end player behavior against a probe sink.
//!
//! The probe stands in for the sound card: it records every submission and
//! tracks how many handles are "playing" at once, where a sound keeps
//! playing until someone waits on its handle.

use std::cell::Cell;
use std::rc::Rc;

use beeps::dsp::{default_detune, render_tone, FADE_SAMPLES};
use beeps::error::PlayerError;
use beeps::pitch;
use beeps::playback::{AudioSink, PlaybackHandle};
use beeps::player::{Player, PlayerConfig};
use beeps::sequencing::Tune;
use beeps::SAMPLE_RATE;

#[derive(Default)]
struct Probe {
    submitted_lengths: Cell<Vec<usize>>,
    active: Cell<usize>,
    max_active: Cell<usize>,
}

impl Probe {
    fn record_submission(&self, len: usize) {
        let mut lengths = self.submitted_lengths.take();
        lengths.push(len);
        self.submitted_lengths.set(lengths);

        let active = self.active.get() + 1;
        self.active.set(active);
        self.max_active.set(self.max_active.get().max(active));
    }

    fn lengths(&self) -> Vec<usize> {
        let lengths = self.submitted_lengths.take();
        self.submitted_lengths.set(lengths.clone());
        lengths
    }
}

struct ProbeSink {
    probe: Rc<Probe>,
}

struct ProbeHandle {
    probe: Rc<Probe>,
    done: Cell<bool>,
}

impl PlaybackHandle for ProbeHandle {
    fn is_playing(&self) -> bool {
        !self.done.get()
    }

    fn wait(&self) {
        if !self.done.get() {
            self.done.set(true);
            self.probe.active.set(self.probe.active.get() - 1);
        }
    }
}

impl AudioSink for ProbeSink {
    type Handle = ProbeHandle;

    fn submit(
        &mut self,
        samples: Vec<i16>,
        _sample_rate: u32,
    ) -> Result<ProbeHandle, PlayerError> {
        self.probe.record_submission(samples.len());
        Ok(ProbeHandle {
            probe: self.probe.clone(),
            done: Cell::new(false),
        })
    }
}

fn probed_player(volume: f64) -> (Player<ProbeSink>, Rc<Probe>) {
    let probe = Rc::new(Probe::default());
    let sink = ProbeSink {
        probe: probe.clone(),
    };
    let config = PlayerConfig::new(volume, true).unwrap();
    (Player::with_sink(config, sink), probe)
}

fn note_len(token: &str, seconds: f64) -> usize {
    render_tone(
        pitch::resolve(token).unwrap(),
        seconds,
        0.3,
        &default_detune(),
        SAMPLE_RATE,
        FADE_SAMPLES,
    )
    .len()
}

#[test]
fn back_to_back_notes_never_overlap() {
    let (mut player, probe) = probed_player(0.3);
    player.play_note("E4", 0.1).unwrap();
    player.play_note("D4", 0.1).unwrap();
    player.play_note("C4", 0.1).unwrap();
    drop(player);

    assert_eq!(probe.lengths().len(), 3);
    assert_eq!(probe.max_active.get(), 1);
    assert_eq!(probe.active.get(), 0);
}

#[test]
fn invalid_note_is_skipped_without_error() {
    let (mut player, probe) = probed_player(0.3);
    let result = player.play_note("X9", 0.1);

    assert!(result.is_ok());
    assert!(probe.lengths().is_empty());
}

#[test]
fn tune_plays_as_one_concatenated_buffer() {
    let (mut player, probe) = probed_player(0.3);
    let tune = Tune::from_lines(["E4:0.5", "D4:0.5"]);
    player.play_tune(&tune).unwrap();
    drop(player);

    let expected = note_len("E4", 0.5) + note_len("D4", 0.5);
    assert_eq!(probe.lengths(), vec![expected]);
}

#[test]
fn invalid_tokens_shrink_the_tune_buffer() {
    let (mut player, probe) = probed_player(0.3);
    let tune = Tune::from_lines(["E4:0.5", "X9:0.5", "D4:0.5"]);
    player.play_tune(&tune).unwrap();
    drop(player);

    // Only the two valid notes contribute samples.
    let expected = note_len("E4", 0.5) + note_len("D4", 0.5);
    assert_eq!(probe.lengths(), vec![expected]);
}

#[test]
fn pause_splits_the_tune_into_serialized_runs() {
    let (mut player, probe) = probed_player(0.3);
    let tune = Tune::from_lines(["E4:0.1", "D4:0.1", "pause:0", "C4:0.1"]);
    player.play_tune(&tune).unwrap();
    drop(player);

    let first_run = note_len("E4", 0.1) + note_len("D4", 0.1);
    let second_run = note_len("C4", 0.1);
    assert_eq!(probe.lengths(), vec![first_run, second_run]);
    assert_eq!(probe.max_active.get(), 1);
    assert_eq!(probe.active.get(), 0);
}

#[test]
fn dropping_the_player_waits_out_the_last_sound() {
    let (mut player, probe) = probed_player(0.3);
    player.play_note("A4", 0.1).unwrap();
    assert_eq!(probe.active.get(), 1);

    drop(player);
    assert_eq!(probe.active.get(), 0);
}

#[test]
fn finish_leaves_the_player_usable() {
    let (mut player, probe) = probed_player(0.3);
    player.play_note("A4", 0.1).unwrap();
    player.finish();
    assert_eq!(probe.active.get(), 0);

    player.play_note("B4", 0.1).unwrap();
    drop(player);
    assert_eq!(probe.lengths().len(), 2);
}
