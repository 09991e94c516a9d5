use clap::Parser;
use tracing_subscriber::EnvFilter;

mod align;
mod classify;
mod cli;
mod core;
mod parsing;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity count
    let filter = match cli.verbose {
        0 => EnvFilter::new("contam_check=warn"),
        1 => EnvFilter::new("contam_check=info"),
        _ => EnvFilter::new("contam_check=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::check::run(&cli)
}
