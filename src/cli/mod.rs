//! Command line front end: argument parsing, file discovery, and terminal output.

use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;
mod run;
mod scanner;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
