//! cuemark CLI - label WAVE files with a cue point
//!
//! Usage: `cuemark <source> <target> [-t]`

mod cli_args;

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use cli_args::Cli;
use cuemark_cli::commands::patch::{self, failure_exit_code};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Malformed argument lists print usage and take no action. The
            // exit status stays 0 unless --strict-exit was given.
            let _ = e.print();
            let strict = std::env::args().any(|arg| arg == "--strict-exit");
            return if e.use_stderr() {
                ExitCode::from(failure_exit_code(strict))
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let options = cli.into_options();
    match patch::run(&options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(failure_exit_code(options.strict_exit))
        }
    }
}
