//! vacwatch binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vacwatch::cli::{Cli, Commands};
use vacwatch::output;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        output::print_error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db = cli.db.as_deref();

    match cli.command {
        Commands::Add(cmd) => cmd.execute(db, cli.quiet)?,
        Commands::Update(cmd) => cmd.execute(db, cli.verbose, cli.quiet).await?,
        Commands::List(cmd) => cmd.execute(db)?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
