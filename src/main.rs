use clap::Parser;
use zonewatch::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
