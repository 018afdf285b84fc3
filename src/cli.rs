// src/cli.rs
use crate::analysis::IdeaAnalyzer;
use crate::core::ConfigManager;
use crate::error::{NavigatorError, Severity};
use crate::session::{Credential, CredentialKind, Session};
use crate::types::job::{DEFAULT_DISPLAY, DEFAULT_START_PAGE};
use crate::types::{JobListing, JobListingQuery};
use crate::utils::write_file_bytes;
use crate::work24::projection::{self, CategoryCount};
use crate::work24::{JobProjection, Work24Client};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "startup-navigator")]
#[command(about = "Business idea analysis and Work24 job listing search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Optional configuration file (endpoints, timeouts, server address)
    #[arg(long, default_value = crate::core::config_manager::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log debug output, including a snippet of raw API responses
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search Work24 job listings and summarize them
    Jobs {
        #[arg(long, default_value_t = DEFAULT_START_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
        start_page: u32,

        #[arg(long, default_value_t = DEFAULT_DISPLAY, value_parser = clap::value_parser!(u32).range(1..=100))]
        display: u32,

        /// Also write the listings to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, env = "WORK24_AUTH_KEY", hide_env_values = true)]
        auth_key: Option<String>,
    },
    /// Analyze a business idea and print the markdown report
    Analyze {
        idea: String,

        #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Run the HTTP API
    Serve,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load(&cli.config)?;

    match cli.command {
        Command::Jobs {
            start_page,
            display,
            csv,
            auth_key,
        } => {
            let session = session_with(&config, CredentialKind::Work24AuthKey, auth_key);
            let client =
                Work24Client::new(config.service.work24_url.clone(), config.service.http_timeout())?;

            let outcome = match JobListingQuery::new(start_page, display) {
                Ok(query) => client.search(&session, &query).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(listing) => {
                    print_listing(&listing);
                    if let Some(path) = csv {
                        let bytes = projection::to_csv(listing.records())?;
                        write_file_bytes(&path, &bytes).await?;
                        println!("\nCSV saved: {}", path.display());
                    }
                    Ok(())
                }
                Err(e) => report_failure(e),
            }
        }

        Command::Analyze { idea, api_key } => {
            let session = session_with(&config, CredentialKind::AnthropicApiKey, api_key);
            let analyzer =
                IdeaAnalyzer::new(config.service.anthropic_url.clone(), config.service.llm_timeout())?;

            eprintln!("Starting analysis...");
            match analyzer.analyze_idea(&session, &idea).await {
                Ok(report) => {
                    println!("{}", report.markdown);
                    Ok(())
                }
                Err(e) => report_failure(e),
            }
        }

        Command::Serve => crate::web::start_web_server(config).await,
    }
}

/// A key passed on the command line (or its env var) wins over the config.
fn session_with(config: &ConfigManager, kind: CredentialKind, flag: Option<String>) -> Session {
    match flag.and_then(Credential::new) {
        Some(credential) => {
            info!("Using {} from command line (length {})", kind, credential.len());
            Session::new().with_credential(kind, credential)
        }
        None => config.credentials.clone(),
    }
}

/// Warnings are printed and end the command normally; errors fail it.
fn report_failure(err: NavigatorError) -> Result<()> {
    let label = match err.severity() {
        Severity::Warning => "Warning",
        Severity::Error => "Error",
    };
    eprintln!("{}: {}", label, err.user_message());
    for suggestion in err.suggestions() {
        eprintln!("  - {}", suggestion);
    }

    match err.severity() {
        Severity::Warning => Ok(()),
        Severity::Error => Err(err.into()),
    }
}

fn print_listing(listing: &JobListing) {
    let projection = JobProjection::from_listing(listing);

    println!("Loaded {} job listings.\n", projection.total);
    println!("{}", projection.table.headers.join(" | "));
    println!("{}", "-".repeat(80));
    for row in &projection.table.rows {
        println!("{}", row.join(" | "));
    }

    print_counts("Listings by region", &projection.region_counts);
    print_counts("Employment type distribution", &projection.employment_type_counts);
}

fn print_counts(title: &str, counts: &[CategoryCount]) {
    println!("\n{}", title);
    let widest = counts.iter().map(|c| c.count).max().unwrap_or(0).max(1);
    for entry in counts {
        let bar = "#".repeat((entry.count * 30).div_ceil(widest));
        let category = if entry.category.is_empty() {
            "(none)"
        } else {
            entry.category.as_str()
        };
        println!("  {:<20} {:>4} {}", category, entry.count, bar);
    }
}
