//! CLI for portfolio-repos.
//!
//! Reads `portfolio.toml`, fetches the configured GitHub repositories and
//! prints them together with the hand-written projects.

use clap::Parser;
use portfolio_repos::{
    compose_projects, fetch_all, BatchError, BatchReport, ConfigError, ErrorAffordance,
    PortfolioConfig, Project, ReqwestTransport, RepositoryFetchClient, RetryPolicy,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Portfolio Repos - Fetch GitHub repositories for a portfolio page.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the portfolio config file.
    #[arg(long, default_value = "portfolio.toml")]
    config: PathBuf,

    /// GitHub Personal Access Token; overrides the one in the config file.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Print the composed project list as JSON.
    #[arg(long)]
    json: bool,

    /// Retries per request after a network failure.
    #[arg(long, default_value_t = portfolio_repos::http::DEFAULT_RETRIES)]
    retries: u32,
}

/// Why a run stopped early.
enum Failure {
    Config(ConfigError),
    Setup(String),
    Batch(BatchError),
}

/// What a completed run produced.
struct RunOutput {
    projects: Vec<Project>,
    report: Option<BatchReport>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(&args).await {
        Ok(output) => {
            if args.json {
                match serde_json::to_string_pretty(&output.projects) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        error!(error = %e, "Failed to serialize projects");
                        return ExitCode::from(1);
                    }
                }
            } else {
                print_summary(&output);
            }
            ExitCode::from(0)
        }
        Err(Failure::Config(e)) => {
            error!(error = %e, "Invalid configuration");
            ExitCode::from(2)
        }
        Err(Failure::Setup(message)) => {
            error!(error = %message, "Failed to set up GitHub client");
            ExitCode::from(2)
        }
        Err(Failure::Batch(e)) => {
            error!(category = e.category(), "{}", e.user_message());
            match e.affordance() {
                ErrorAffordance::FixConfiguration => ExitCode::from(2),
                ErrorAffordance::RetryPage => ExitCode::from(1),
            }
        }
    }
}

/// Initializes tracing with `RUST_LOG` filtering, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: &Args) -> Result<RunOutput, Failure> {
    let config = PortfolioConfig::load(&args.config).map_err(Failure::Config)?;
    let github = &config.github;

    if !github.enabled {
        info!("GitHub integration disabled, listing manual projects only");
        return Ok(RunOutput {
            projects: compose_projects(Vec::new(), &config.projects, true),
            report: None,
        });
    }

    let transport = ReqwestTransport::build(None).map_err(|e| Failure::Setup(e.to_string()))?;
    let client = RepositoryFetchClient::new(Arc::new(transport), &github.api_base_url)
        .map_err(|e| Failure::Setup(e.to_string()))?
        .with_retry(RetryPolicy::new(args.retries));

    let fetch_config = github.fetch_configuration(args.token.clone());
    let report = fetch_all(&client, &fetch_config)
        .await
        .map_err(Failure::Batch)?;

    for failure in &report.failures {
        warn!(
            source = %failure.source,
            target = %failure.target,
            category = failure.error.category(),
            "Repository left out"
        );
    }

    let projects = compose_projects(
        report.records.clone(),
        &config.projects,
        github.show_github_repos_first,
    );
    Ok(RunOutput {
        projects,
        report: Some(report),
    })
}

/// Prints the project list and fetch summary.
fn print_summary(output: &RunOutput) {
    println!("\nProjects:");
    for project in &output.projects {
        let source = match project {
            Project::GitHub(record) => record.full_name.as_str(),
            Project::Manual(_) => "manual",
        };
        let marker = if project.is_featured() { "*" } else { " " };
        println!("  {marker} {} ({source})", project.title());
    }

    let Some(report) = &output.report else {
        return;
    };

    println!("\nSummary:");
    println!("  Sources queried: {}", report.sources_queried);
    println!("  Repositories: {}", report.records.len());
    println!("  Featured: {}", report.featured().count());
    println!("  Failed: {}", report.failures.len());
    println!("  Skipped entries: {}", report.skipped.len());
}
