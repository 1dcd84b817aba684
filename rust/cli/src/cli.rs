//! Command-line argument types for the `blackjack` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Simple Blackjack against a dealer who stands on 17"
)]
pub struct BlackjackCli {
    /// Subcommand to run; defaults to `play`
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive session at the terminal
    Play {
        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Print suits as letters (s c h d) instead of symbols
        #[arg(long)]
        ascii: bool,
    },
    /// Deal one opening hand face up and report the blackjack check
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
