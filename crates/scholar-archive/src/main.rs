//! Scholar Archive - Entry Point
//!
//! Serves the HTTP API, or fetches profiles once from the command line.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_archive::formatters::{
    ResponseFormat, format_stored_articles_markdown, render_profile,
};
use scholar_archive::error::ArchiveResult;
use scholar_archive::server::ArchiveServer;
use scholar_archive::service::ImportReport;
use scholar_archive::store::MemoryArticleStore;
use scholar_archive::{ArchiveService, Config, ScholarClient};

#[derive(Parser, Debug)]
#[command(name = "scholar-archive")]
#[command(about = "Fetch, normalize and archive Google Scholar author profiles")]
#[command(version)]
struct Cli {
    /// SerpAPI key used when a request does not carry its own
    #[arg(long, env = "SERPAPI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// HTTP server port
        #[arg(long, default_value = "8080", env = "PORT")]
        port: u16,
    },
    /// Fetch and normalize one or more author profiles
    Fetch {
        /// Google Scholar author ids (e.g. 4bahYMkAAAAJ)
        #[arg(required = true)]
        author_ids: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ResponseFormat::Markdown)]
        format: ResponseFormat,
    },
    /// Fetch profiles, archive their articles, and print the archive
    Import {
        /// Google Scholar author ids
        #[arg(required = true)]
        author_ids: Vec<String>,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `fetch` output stays pipeable.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

/// Print skips and failures for one import. Returns whether the import was complete.
fn report_import(author_id: &str, result: &ArchiveResult<ImportReport>) -> bool {
    match result {
        Ok(report) => {
            for skipped in &report.skipped {
                eprintln!("{author_id}: skipped article {}: {}", skipped.index, skipped.reason);
            }
            for failed in &report.failed {
                eprintln!("{author_id}: could not store article {}: {}", failed.index, failed.reason);
            }
            report.is_complete()
        }
        Err(e) => {
            eprintln!("{author_id}: {}", e.to_user_message());
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config = config.with_api_key(cli.api_key);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        has_api_key = config.has_api_key(),
        "Starting scholar archive"
    );

    let default_credential = config.api_key.clone();
    let client = ScholarClient::new(config)?;
    let service =
        ArchiveService::new(Arc::new(client), Arc::new(MemoryArticleStore::new()), default_credential);

    match cli.command {
        Command::Serve { port } => {
            ArchiveServer::new(service).run_http(port).await?;
        }
        Command::Fetch { author_ids, format } => {
            let mut failed = 0usize;

            for (author_id, result) in service.fetch_profiles(&author_ids, None).await {
                match result {
                    Ok(profile) => println!("{}", render_profile(&profile, format)?),
                    Err(e) => {
                        failed += 1;
                        eprintln!("{author_id}: {}", e.to_user_message());
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{failed} of {} profiles could not be fetched", author_ids.len());
            }
        }
        Command::Import { author_ids } => {
            let mut failed = 0usize;

            for author_id in &author_ids {
                let result = service.import_articles(author_id, None).await;
                if !report_import(author_id, &result) {
                    failed += 1;
                }
            }

            let articles = service.list_articles().await?;
            println!("{}", format_stored_articles_markdown(&articles));

            if failed > 0 {
                anyhow::bail!("{failed} of {} profiles could not be imported", author_ids.len());
            }
        }
    }

    Ok(())
}
