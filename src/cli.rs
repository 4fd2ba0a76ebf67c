//! CLI argument parsing for project initialization and standards scaffolding.
use crate::standards::StandardsKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "adrm",
    version,
    about = "Step-driven standards scaffolding and LM-assisted code edits",
    after_help = "Commands:\n  init                          Create configured directories and run steps.json\n  config                        Show the resolved config locations\n  standards <tech> --kind K     Write a standards document from a file or stdin\n\nExamples:\n  adrm init --model gpt-4\n  adrm init --config ./adrm.json --non-interactive\n  adrm config --json\n  adrm standards rust --kind implementation --content-file rust.md",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    Config(ConfigArgs),
    Standards(StandardsArgs),
}

/// Init command inputs.
#[derive(Parser, Debug)]
#[command(about = "Create configured directories and run the step list")]
pub struct InitArgs {
    /// Config file (default: ./config.json, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model used by steps that do not name one
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// API key used by steps that do not carry one
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Never prompt; missing files are skipped instead of created
    #[arg(long)]
    pub non_interactive: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Show the resolved config path, steps file and directories")]
pub struct ConfigArgs {
    /// Config file (default: ./config.json, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Write an implementation or performance standards document")]
pub struct StandardsArgs {
    /// Technology name used in the file name (e.g. rust, python)
    pub technology: String,

    #[arg(long, value_enum)]
    pub kind: StandardsKind,

    /// Read content from this file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,

    /// Config file (default: ./config.json, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
