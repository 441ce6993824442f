use clap::Parser;
use pocketledger::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
