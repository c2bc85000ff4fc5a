use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands {
    pub mod basket;
    pub mod simulate;
}
mod output;
mod store;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("harvest=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command.unwrap_or(Commands::Simulate) {
        Commands::Simulate => commands::simulate::run(format),
        Commands::Create(args) => commands::basket::create(&args, format),
        Commands::Save(args) => commands::basket::save(&args, format),
        Commands::Branch(args) => commands::basket::branch(&args, format),
        Commands::Show(args) => commands::basket::show(&args, format),
    }
}
