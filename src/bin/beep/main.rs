//! beep - command line note and tune player
//!
//! Run with: cargo run --bin beep -- path/to/tune.txt

use std::path::PathBuf;

use clap::Parser;

use beeps::player::{Player, PlayerConfig};
use beeps::sequencing::Tune;

#[derive(Debug, Parser)]
#[command(name = "beep", about = "Play musical notes written in letter notation")]
struct Opt {
    /// Tune file, one `NOTE[:SECONDS]` line per note.
    score: Option<PathBuf>,

    /// Single note token to play instead of a file (e.g. `A4`, `C#3`, `Eb`).
    #[arg(short, long, conflicts_with = "score")]
    note: Option<String>,

    /// How long to hold `--note`, in seconds.
    #[arg(short, long, default_value_t = 0.5)]
    seconds: f64,

    /// Output volume, between 0.0 and 1.0.
    #[arg(long, default_value_t = 0.3)]
    volume: f64,

    /// Suppress the per-note progress lines.
    #[arg(long)]
    mute: bool,

    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();

    let level = match opt.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        _ => log::Level::Debug,
    };
    simple_logger::init_with_level(level)?;

    let config = PlayerConfig::new(opt.volume, opt.mute)?;
    let mut player = Player::new(config)?;

    if let Some(score) = &opt.score {
        player.play_tune_file(score)?;
    } else if let Some(note) = &opt.note {
        player.play_note(note, opt.seconds)?;
    } else {
        // No input: play a short two-note check so the command does
        // something audible out of the box.
        player.play_tune(&Tune::from_lines(["E4", "D4"]))?;
    }

    player.finish();
    Ok(())
}
