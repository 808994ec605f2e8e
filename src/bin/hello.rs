//! Minimal demo command: `poetry-venv-hello hello`

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "poetry-venv-hello")]
#[command(about = "Demo CLI for a freshly bootstrapped project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a greeting
    Hello,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hello => println!("Hello there"),
    }
}
