mod curate;
mod echo;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colligo_core::{ExtractConfig, FetchConfig, Pipeline, PipelineConfig, SeedRequest, UrlStatus};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collect raw text from seed URLs, then curate structured story records
#[derive(Parser, Debug)]
#[command(name = "colligo")]
#[command(author = "Colligo Contributors")]
#[command(version)]
#[command(about = "Collect raw text from seed URLs and curate story records", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch seed URLs for a subject and save extracted text
    Scrape(ScrapeArgs),
    /// Interactively curate raw text files into JSON story entries
    Curate(CurateArgs),
}

#[derive(clap::Args, Debug)]
struct ScrapeArgs {
    /// Public figure the seed URLs are about
    #[arg(short, long, value_name = "NAME")]
    subject: String,

    /// Seed URLs, processed in order
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Output directory for raw text files
    #[arg(short, long, default_value = colligo_core::RAW_DATA_DIR, value_name = "DIR")]
    output_dir: PathBuf,

    /// Minimum seconds between fetches to the same host
    #[arg(long, default_value = "2.5", value_name = "SECS")]
    delay: f64,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "20", value_name = "SECS")]
    timeout: u64,

    /// Retries for transient failures
    #[arg(long, default_value = "3", value_name = "NUM")]
    max_retries: u32,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Minimum character threshold for extracted text
    #[arg(long, default_value = "200", value_name = "NUM")]
    min_text_length: usize,
}

#[derive(clap::Args, Debug)]
struct CurateArgs {
    /// Directory containing raw text files
    #[arg(long, default_value = colligo_core::RAW_DATA_DIR, value_name = "DIR")]
    raw_dir: PathBuf,

    /// Directory receiving curated JSON entries
    #[arg(long, default_value = colligo_core::curation::OUTPUT_DIR, value_name = "DIR")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("colligo_core=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
        echo::print_banner();
    }

    match args.command {
        Command::Scrape(scrape) => run_scrape(scrape).await,
        Command::Curate(curate_args) => curate::run(&curate_args.raw_dir, &curate_args.output_dir),
    }
}

async fn run_scrape(args: ScrapeArgs) -> anyhow::Result<()> {
    let mut fetch = FetchConfig { timeout: args.timeout, max_retries: args.max_retries, ..Default::default() };
    if let Some(ua) = args.user_agent {
        fetch.user_agent = ua;
    }

    let config = PipelineConfig {
        fetch,
        extract: ExtractConfig { min_text_length: args.min_text_length },
        request_delay: Duration::from_secs_f64(args.delay),
        output_dir: args.output_dir,
    };

    echo::print_step(
        1,
        2,
        &format!("Processing {} seed URL(s) for {}", args.urls.len(), args.subject),
    );

    let mut pipeline = Pipeline::new(config).context("Failed to initialize pipeline")?;
    let request = SeedRequest::new(args.subject, args.urls);
    let outcomes = pipeline.run(&request).await.context("Batch run failed")?;

    echo::print_step(2, 2, "Writing summary");

    let mut successes = 0usize;
    for (i, outcome) in outcomes.iter().enumerate() {
        match &outcome.status {
            UrlStatus::Success => {
                successes += 1;
                let path = outcome
                    .output_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                echo::print_success(&format!("[{}] {} -> {}", i + 1, outcome.url, path));
            }
            UrlStatus::RobotsDisallowed => {
                echo::print_info(&format!("[{}] {} skipped: robots.txt disallows fetching", i + 1, outcome.url));
            }
            status => {
                echo::print_error(&format!("[{}] {} failed: {}", i + 1, outcome.url, status_label(status)));
            }
        }
    }

    eprintln!();
    echo::print_success(&format!("{}/{} sources saved", successes, outcomes.len()));

    Ok(())
}

fn status_label(status: &UrlStatus) -> String {
    match status {
        UrlStatus::Success => "saved".to_string(),
        UrlStatus::InvalidUrl => "invalid URL".to_string(),
        UrlStatus::RobotsDisallowed => "disallowed by robots.txt".to_string(),
        UrlStatus::HttpError(0) => "no response from server".to_string(),
        UrlStatus::HttpError(code) => format!("HTTP {}", code),
        UrlStatus::Timeout => "timed out".to_string(),
        UrlStatus::ParseError => "no extractable content".to_string(),
    }
}
