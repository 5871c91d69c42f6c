//! Command-line tool for inspecting dynamic link resolution.
//!
//! Runs the same host conversion and decision code as the server, without
//! starting an HTTP listener.
//!
//! # Usage
//!
//! ```bash
//! # Convert a production host to its preview host
//! cargo run --bin linkctl -- host preview app.example.com
//!
//! # Convert a preview host back to production
//! cargo run --bin linkctl -- host production app-preview.example.com
//!
//! # Classify a host
//! cargo run --bin linkctl -- host check app-preview.example.com
//!
//! # Resolve a dynamic link as an iPhone would
//! cargo run --bin linkctl -- resolve https://app.example.com/abc --user-agent "iPhone"
//! ```
//!
//! # Environment Variables
//!
//! - `PREVIEW_URL_STYLE`: `hyphenated` (default) or `subdomain`
//! - `EXCHANGE_SHORT_LINK_ENDPOINT`: exchange service used by `resolve`
//! - `EXCHANGE_TIMEOUT_SECONDS`: exchange request timeout

use dynamic_link_redirect::application::services::RedirectService;
use dynamic_link_redirect::config::{self, Config};
use dynamic_link_redirect::domain::{
    PreviewHostResolver, RedirectEngine, RedirectOutcome, RequestContext,
};
use dynamic_link_redirect::infrastructure::exchange::HttpLinkExchange;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// CLI tool for dynamic link resolution.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Preview/production host conversion
    Host {
        #[command(subcommand)]
        action: HostAction,
    },

    /// Resolve a dynamic link through the exchange service
    Resolve {
        /// Full dynamic link URL (e.g., "https://app.example.com/abc")
        url: String,

        /// User-Agent to classify the device with
        #[arg(short, long, default_value = "")]
        user_agent: String,
    },
}

/// Host conversion subcommands.
#[derive(Subcommand)]
enum HostAction {
    /// Print the preview host for a host
    Preview { host: String },

    /// Print the production host for a host
    Production { host: String },

    /// Report whether a host is a preview host
    Check { host: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Host { action } => handle_host_action(action, &config)?,
        Commands::Resolve { url, user_agent } => resolve(&url, &user_agent, config).await?,
    }

    Ok(())
}

fn handle_host_action(action: HostAction, config: &Config) -> Result<()> {
    let resolver = PreviewHostResolver::new(&config.preview_url_style);

    match action {
        HostAction::Preview { host } => {
            let preview = resolver.to_preview_host(&host)?;
            println!("{}", preview.bright_yellow().bold());
        }
        HostAction::Production { host } => {
            let production = resolver.to_production_host(&host)?;
            println!("{}", production.bright_yellow().bold());
        }
        HostAction::Check { host } => {
            let status = if resolver.is_preview_host(&host)? {
                "PREVIEW".yellow()
            } else {
                "PRODUCTION".green()
            };
            println!("  {}  {}", host.cyan(), status.bold());
        }
    }

    Ok(())
}

async fn resolve(raw_url: &str, user_agent: &str, config: Config) -> Result<()> {
    let url = Url::parse(raw_url).with_context(|| format!("Invalid URL '{raw_url}'"))?;
    if url.host_str().is_none() {
        bail!("URL '{raw_url}' has no host");
    }

    let exchange = HttpLinkExchange::new(
        config.exchange_endpoint.clone(),
        Duration::from_secs(config.exchange_timeout_seconds),
    )
    .context("Failed to create exchange client")?;

    let endpoint = exchange.endpoint().to_string();
    let engine = RedirectEngine::new(PreviewHostResolver::new(&config.preview_url_style));
    let service = RedirectService::new(engine, Arc::new(exchange));

    let request = RequestContext::new(url, user_agent);

    println!("{}", "🔗 Resolve dynamic link".bright_blue().bold());
    println!();
    println!("  URL:        {}", request.url().as_str().cyan());
    println!("  User-Agent: {}", request.user_agent().bright_black());
    println!("  Device:     {}", request.device().as_str().cyan());
    println!("  Exchange:   {}", endpoint.bright_black());
    println!();

    let outcome = service.resolve(&request).await;
    print_outcome(&outcome);

    Ok(())
}

fn print_outcome(outcome: &RedirectOutcome) {
    match outcome {
        RedirectOutcome::RenderPreviewPage(page) => {
            println!("{}", "✅ Preview page".green().bold());
            println!("  Title:       {}", page.social_title);
            println!("  Description: {}", page.social_description);
            println!("  Image:       {}", page.social_image_link);
            println!("  Continue to: {}", page.dynamic_link.bright_yellow());
        }
        RedirectOutcome::RedirectTo { url, status } => {
            println!(
                "{} {}",
                "✅ Redirect".green().bold(),
                status.as_u16().to_string().bright_white()
            );
            println!("  Location: {}", url.bright_yellow());
        }
        RedirectOutcome::NotFound => {
            println!("{}", "❌ Not found (404)".red().bold());
        }
        RedirectOutcome::ServerError(reason) => {
            println!("{}", "❌ Server error (500)".red().bold());
            println!("  {}", reason.red());
        }
        RedirectOutcome::NoAction => {
            println!("{}", "⚠️  No action (200, empty body)".yellow());
        }
    }
}
