use checklist::cli::commands::Cli;
use checklist::cli::handlers;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
