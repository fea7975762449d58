//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

use std::path::PathBuf;

use crate::logger::Log;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the refresh scheduler loop with these settings
    Run {
        debug_enabled: bool,
        config_path: Option<PathBuf>,
    },
    /// Run a single acquisition cycle, print a gradient summary, and exit
    RunOnce {
        debug_enabled: bool,
        config_path: Option<PathBuf>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut run_once = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut config_path: Option<PathBuf> = None;
        let mut unknown_argument = false;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_ref() {
                "-h" | "--help" => display_help = true,
                "-V" | "--version" => display_version = true,
                "-d" | "--debug" => debug_enabled = true,
                "--once" => run_once = true,
                "-c" | "--config" => match iter.next() {
                    Some(path) => config_path = Some(PathBuf::from(path.as_ref())),
                    None => unknown_argument = true,
                },
                _ => unknown_argument = true,
            }
        }

        let action = if unknown_argument {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else if display_version {
            CliAction::ShowVersion
        } else if run_once {
            CliAction::RunOnce {
                debug_enabled,
                config_path,
            }
        } else {
            CliAction::Run {
                debug_enabled,
                config_path,
            }
        };

        ParsedArgs { action }
    }

    /// Print usage information.
    pub fn show_help() {
        Log::log_version();
        println!("Usage: solarium [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -c, --config <PATH>  Use an explicit configuration file");
        println!("  -d, --debug          Enable verbose operational logging");
        println!("      --once           Run one acquisition cycle and exit");
        println!("  -h, --help           Print help");
        println!("  -V, --version        Print version");
        Log::log_end();
    }

    /// Print the version line.
    pub fn show_version() {
        println!("solarium v{}", env!("CARGO_PKG_VERSION"));
    }
}
