use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod engine;
mod error;
mod files;
mod prompt;
mod standards;
mod util;
mod workflow;

use cli::{Command, RootArgs};

fn main() {
    let args = RootArgs::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Command::Init(init) => workflow::run_init(init),
        Command::Config(config) => workflow::run_config(config),
        Command::Standards(standards) => workflow::run_standards(standards),
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
