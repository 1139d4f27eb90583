//! # slidemix-cli: A CLI for `slidemix`
//!
//! This is the main entry point for the `slidemix` command-line interface.
//! It resolves oEmbed documents without a running server and checks URL
//! list files against the same rules the server applies to mixes.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use slidemix::{constants, Format, MixDraft, OembedServiceBuilder, Provider, SlideUrlMatcher};
use slidemix_html::HttpFetcher;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the slide provider
    #[arg(long, global = true, env = "SLIDEMIX_PROVIDER_URL", default_value = constants::PROVIDER_URL)]
    provider_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a slide page and print its oEmbed document
    Oembed(OembedArgs),
    /// Check a file of slide URLs, one per line
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct OembedArgs {
    /// The slide page URL
    url: String,
    /// Output format: json or xml
    #[arg(long, default_value = "json")]
    format: String,
    /// Give up on the page fetch after this many seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to a file with one slide URL per line
    file: PathBuf,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let provider = Provider::new(constants::PROVIDER_NAME, cli.provider_url.as_str());

    match &cli.command {
        Commands::Oembed(args) => handle_oembed(provider, args).await,
        Commands::Validate(args) => handle_validate(&provider, args),
    }
}

// --- Command Handlers ---

async fn handle_oembed(provider: Provider, args: &OembedArgs) -> Result<()> {
    let format: Format = args.format.parse()?;
    let fetcher = HttpFetcher::new(
        Duration::from_secs(args.timeout_secs),
        slidemix_html::DEFAULT_USER_AGENT,
    )?;
    let service = OembedServiceBuilder::new()
        .provider(provider)
        .fetcher(Arc::new(fetcher))
        .build()?;

    info!("Resolving {} as {format}", args.url);
    let encoded = service.resolve(&args.url, format).await?;
    println!("{}", encoded.body);
    Ok(())
}

fn handle_validate(provider: &Provider, args: &ValidateArgs) -> Result<()> {
    let urls_text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let matcher = SlideUrlMatcher::new(provider)?;

    // Only the URL list is checked; a file has no title.
    let draft = MixDraft::new("-", urls_text);
    match draft.validate(&matcher) {
        Ok(()) => {
            let count = slidemix::matcher::split_lines(&draft.urls_text).len();
            println!("OK: {count} URLs");
            Ok(())
        }
        Err(errors) => {
            for error in &errors.errors {
                println!("{error}");
            }
            bail!("Validation failed for {}", args.file.display())
        }
    }
}
