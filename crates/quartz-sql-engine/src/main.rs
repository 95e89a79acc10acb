//! The `quartz-sql` REPL binary.

use std::io;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Interactive shell for the Quartz SQL in-memory engine.
#[derive(Parser)]
#[command(name = "quartz-sql")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    quartz_sql_engine::repl::run(stdin.lock(), stdout.lock())?;
    Ok(())
}
