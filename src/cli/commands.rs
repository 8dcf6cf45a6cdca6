use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ck", about = concat!("[x] checklist v", env!("CARGO_PKG_VERSION"), " - prioritized, assignable, dated items"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this config file instead of searching for checklist.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a checklist.toml template in the current directory
    Init(InitArgs),
    /// Print the checklist and its progress
    List,
    /// Run an action script against the checklist and print the result
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Checklist title (default: inferred from directory name)
    #[arg(long)]
    pub title: Option<String>,
    /// Overwrite an existing checklist.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Script file, or - to read from stdin
    pub file: String,
}
