use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Hoigi engine driver: self-play and transcript replay.
#[derive(Debug, Parser)]
#[command(about, version)]
pub struct Cli {
    /// Engine config JSON. Piece values are read as multipliers of the defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play one game between two engines from the opening position.
    Play {
        #[arg(long, value_enum, default_value_t = PlayerKind::AlphaBeta)]
        white: PlayerKind,

        #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
        black: PlayerKind,

        /// Search depth for both engines. Defaults to the config's `search_depth`.
        #[arg(short, long)]
        depth: Option<u8>,

        /// Stop after this many plies even if nobody has won.
        #[arg(long, default_value_t = 200)]
        max_plies: usize,

        /// Seed for random players. Seeded from OS entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the move transcript here when the game ends.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a transcript file and report the final position.
    Replay {
        transcript: PathBuf,

        /// Print the final game state as JSON.
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Random,
    Minimax,
    AlphaBeta,
}
