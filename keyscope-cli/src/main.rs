//! CLI for the keyscope Redis key-pattern memory analyzer.
//!
//! Connects to a Redis instance, scans the key space, and prints a
//! memory-footprint breakdown grouped by structural key pattern.

use clap::{Parser, ValueEnum};
use keyscope::{ConnectConfig, RedisSource, analyze, render};

/// keyscope — Redis key-pattern memory analyzer.
#[derive(Parser)]
#[command(name = "keyscope", version, about)]
struct Cli {
    /// Redis server hostname.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Redis server port.
    #[arg(long, default_value = "6379")]
    port: u16,

    /// Logical database index.
    #[arg(long, default_value = "0")]
    db: i64,

    /// AUTH credential, if the server requires one.
    #[arg(long)]
    password: Option<String>,

    /// Glob filter applied by the server during the scan (e.g. "user:*").
    #[arg(long, default_value = "*")]
    pattern: String,

    /// Page-size hint passed to each scan request.
    #[arg(long, default_value = "1000")]
    count: usize,

    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

/// Output format for the analysis report.
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Fixed-width table, largest pattern family first.
    Table,
    /// JSON array of pattern summaries, same ordering.
    Json,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Connects, analyzes, and prints the report.
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConnectConfig {
        host: cli.host.clone(),
        port: cli.port,
        db: cli.db,
        password: cli.password.clone(),
    };

    let mut source = RedisSource::connect(&config)?;
    let summaries = analyze(&mut source, &cli.pattern, cli.count)?;

    match cli.format {
        OutputFormat::Table => {
            println!("Scanned {} (match {})", config.endpoint(), cli.pattern);
            println!();
            for line in render(&summaries) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            // Bare JSON on stdout, banner-free, in the same order as the
            // table rendering.
            let mut ordered = summaries;
            ordered.sort_by(|a, b| b.total_size.cmp(&a.total_size));
            println!("{}", serde_json::to_string_pretty(&ordered)?);
        }
    }

    Ok(())
}
