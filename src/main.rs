use anyhow::Result;

use rank_tracker::cli::Command;
use rank_tracker::{handle_check, handle_watch, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Watch(args) => handle_watch(args),
        Command::Check(args) => handle_check(args),
    }
}
