//! # Blackjack CLI Library
//!
//! This library provides the text front end for the Blackjack rules engine.
//! It exposes subcommands for playing an interactive session, dealing a
//! single opening hand, and inspecting the resolved configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand against the process stdin.
//! [`run_with_input`] does the same with an explicit input stream.
//!
//! ## Example Usage
//!
//! ```
//! use std::io::Cursor;
//! let mut input = Cursor::new("s\nn\n");
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let args = vec!["blackjack", "play", "--seed", "42"];
//! let code = blackjack_cli::run_with_input(args, &mut input, &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("--- New Round ---"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play rounds interactively (the default when no subcommand is given)
//! - `deal`: Deal one opening hand for inspection
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{handle_cfg_command, handle_deal_command, handle_play_command};
pub use commands::{RoundEnd, TextSession};
pub use error::CliError;
use formatters::SuitStyle;

/// Main entry point for the CLI application.
///
/// Reads player input from the process stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`] but reads player input from `stdin`.
///
/// # Available Commands
///
/// - `play [--seed N] [--ascii]`: Interactive session
/// - `deal [--seed N]`: Deal a single opening hand
/// - `cfg`: Display configuration settings
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "deal", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err);
                    write_or_exit!(err, "Simple Blackjack CLI");
                    write_or_exit!(err, "Usage: blackjack [command] [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: blackjack --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let cmd = cli.cmd.unwrap_or(Commands::Play {
        seed: None,
        ascii: false,
    });

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
            return exit_code::ERROR;
        }
    };
    let cfg = &resolved.config;
    logging::init_logging(&cfg.log_level);
    let style = if cfg.ascii_suits {
        SuitStyle::Ascii
    } else {
        SuitStyle::detect()
    };

    let result = match cmd {
        Commands::Play { seed, ascii } => {
            let style = if ascii { SuitStyle::Ascii } else { style };
            handle_play_command(seed.or(cfg.seed), style, stdin, out, err)
        }
        Commands::Deal { seed } => handle_deal_command(seed.or(cfg.seed), style, out),
        Commands::Cfg => handle_cfg_command(&resolved, out),
    };
    finish(result, err)
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_capture(args: &[&str], input: &str) -> (i32, String, String) {
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run_with_input(args.iter().copied(), &mut stdin, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn unknown_command_lists_commands_and_exits_2() {
        let (code, _, err) = run_capture(&["blackjack", "split"], "");
        assert_eq!(code, 2);
        assert!(err.contains("Commands:"));
        assert!(err.contains("  play"));
        assert!(err.contains("  deal"));
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run_capture(&["blackjack", "--help"], "");
        assert_eq!(code, 0);
        assert!(out.contains("play"));
    }

    #[test]
    fn bare_invocation_starts_a_session() {
        let (code, out, _) = run_capture(&["blackjack"], "q\n");
        assert_eq!(code, 0);
        assert!(out.starts_with("Simple Blackjack - type q to quit at any prompt"));
    }
}
