mod category;
mod fetcher;
mod models;
mod parser;
mod pipeline;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(name = "iso_links", about = "Windows/Office ISO link scraper for massgrave.dev docs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured document and write the JSON catalog (default)
    Run {
        /// Output file (default: windows_iso_links.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Base URL the document filenames are appended to
        #[arg(long)]
        base_url: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Parse a local markdown file and print the extracted versions as JSON
    Parse {
        file: PathBuf,
        /// Treat the file as an Office document (`## Office YYYY` sections)
        #[arg(long)]
        office: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        output: None,
        base_url: None,
        timeout: None,
    });
    let result = dispatch(command).await;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            output,
            base_url,
            timeout,
        } => {
            let mut settings = Settings::load()?;
            if let Some(output) = output {
                settings.output = output;
            }
            if let Some(base_url) = base_url {
                settings.base_url = base_url;
            }
            if let Some(timeout) = timeout {
                settings.timeout_secs = timeout;
            }
            info!(settings = ?settings, "Starting ISO link scraper");
            run(settings).await
        }
        Commands::Parse { file, office } => parse_file(&file, office),
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    println!("{}", "=".repeat(60));
    println!("Windows ISO Links Scraper");
    println!("Source: {}", settings.source);
    println!("{}", "=".repeat(60));

    let output = settings.output.clone();
    let mut runner = pipeline::Pipeline::new(settings)?;
    let (catalog, counts) = runner.run().await?;

    pipeline::print_summary(&catalog, &output);
    counts.print();
    Ok(())
}

fn parse_file(file: &Path, office: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let json = if office {
        serde_json::to_string_pretty(&parser::parse_office_versions(&content))?
    } else {
        serde_json::to_string_pretty(&parser::parse_windows_versions(&content))?
    };
    println!("{}", json);
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
