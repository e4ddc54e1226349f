use clap::Parser;
use stocksim::cli::{Cli, init_tracing, run};

fn main() -> std::process::ExitCode {
    init_tracing();
    run(Cli::parse())
}
