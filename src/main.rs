//! ghlabel CLI
//!
//! Command line tool that replicates a reference repository's issue labels
//! across a user or organization's repositories

use clap::Parser;
use colored::Colorize;

use ghlabel::{
    config::DEFAULT_CONCURRENCY,
    diff::Operation,
    sync::{OpResult, SyncOutcome, SyncSummary},
    Error, GitHubClient, LabelSyncer, RepoSelector, RepoSync, Result, SyncConfig,
};

/// ghlabel CLI
///
/// ghlabel automatically manages issue labels
#[derive(Parser)]
#[command(
    name = "ghlabel",
    version,
    about = "ghlabel automatically manages issue labels",
    long_about = "GitHub Label (ghlabel) replicates a reference repository's issue labels \
    (names, colors, descriptions) onto a single repository or onto every repository \
    owned by a user or organization. Runs are dry-run by default."
)]
struct Cli {
    /// The user that owns the repositories
    #[arg(short = 'u', long)]
    user: Option<String>,

    /// The organization that owns the repositories
    #[arg(short = 'o', long)]
    org: Option<String>,

    /// A specific repository to sync
    #[arg(long)]
    repo: Option<String>,

    /// The repository from which to replicate labels (owner/repo format)
    #[arg(long = "ref", value_name = "OWNER/REPO")]
    reference: String,

    /// Apply the computed label changes (default is dry-run)
    #[arg(short = 'a', long)]
    apply: bool,

    /// GitHub access token
    #[arg(short = 't', long)]
    access_token: Option<String>,

    /// Maximum number of repositories reconciled concurrently
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Print the report as JSON instead of human-readable output
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {}", "✗".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let selector = RepoSelector::from_flags(cli.user, cli.org, cli.repo)?;
    let config = SyncConfig {
        access_token: get_access_token(cli.access_token)?,
        reference: cli.reference,
        selector,
        apply: cli.apply,
        concurrency: cli.concurrency,
    };

    let client = GitHubClient::new(&config.access_token).await?;

    if cli.verbose {
        println!(
            "{} Reference repository: {}",
            "•".blue(),
            config.reference.cyan()
        );

        if !config.apply {
            println!(
                "{} Running in dry-run mode (no changes will be made)",
                "!".yellow()
            );
        }

        if let Ok(rate) = client.rate_limit().await {
            println!(
                "{} API rate limit: {}/{} remaining (resets at {})",
                "•".blue(),
                rate.remaining,
                rate.limit,
                rate.reset_at.format("%H:%M:%S UTC")
            );
        }
    }

    let apply = config.apply;
    let syncer = LabelSyncer::new(client, config)?;
    let results = syncer.run().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display_results(&results, apply);
    }

    Ok(())
}

/// Get access token
fn get_access_token(arg_token: Option<String>) -> Result<String> {
    arg_token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .ok_or_else(|| {
            Error::config_validation(
                "GitHub access token is required. Set via --access-token, GITHUB_TOKEN env var, or -t flag",
            )
        })
}

/// Display the full per-repository report and summary
fn display_results(results: &[RepoSync], apply: bool) {
    for result in results {
        display_repo(result);
    }

    display_summary(&SyncSummary::of(results), apply);
}

/// Display one repository's outcome
fn display_repo(result: &RepoSync) {
    println!("\n{}", result.repo.to_string().cyan());

    match &result.outcome {
        SyncOutcome::Skipped { error } => {
            println!("  {} skipped: {}", "✗".red(), error.red());
        }
        SyncOutcome::Planned { plan } => {
            if plan.is_empty() {
                println!("  {} already in sync", "✓".green());
            }
            for operation in plan.operations() {
                display_operation(operation, None);
            }
        }
        SyncOutcome::Applied { results } => {
            if results.is_empty() {
                println!("  {} already in sync", "✓".green());
            }
            for op_result in results {
                display_operation(&op_result.operation, Some(op_result));
            }
        }
    }
}

/// Display one operation, with its apply outcome when available
fn display_operation(operation: &Operation, applied: Option<&OpResult>) {
    let status = match applied {
        None => "".to_string(),
        Some(result) if result.succeeded() => format!("{} ", "✓".green()),
        Some(_) => format!("{} ", "✗".red()),
    };

    match operation {
        Operation::Create { label } => {
            println!(
                "  {}{} {} (#{})",
                status,
                "+".green(),
                label.name.cyan(),
                label.color
            );
        }
        Operation::Update { name, .. } => {
            println!("  {}{} {}", status, "~".yellow(), name.cyan());
            for change in operation.changes() {
                println!("      {}", change.dimmed());
            }
        }
        Operation::Delete { name } => {
            println!("  {}{} {}", status, "-".red(), name.red());
        }
    }

    if let Some(OpResult { error: Some(error), .. }) = applied {
        println!("      {}", error.red());
    }
}

/// Display run totals
fn display_summary(summary: &SyncSummary, apply: bool) {
    println!();

    if apply {
        println!(
            "{} Sync completed: {} created, {} updated, {} deleted ({} already in sync)",
            "✓".green(),
            summary.created.to_string().green(),
            summary.updated.to_string().yellow(),
            summary.deleted.to_string().red(),
            summary.in_sync
        );

        if summary.failed_operations > 0 {
            println!(
                "{} {} operations failed",
                "✗".red(),
                summary.failed_operations.to_string().red()
            );
        }
    } else {
        println!(
            "{} Dry-run: {} to create, {} to update, {} to delete ({} already in sync)",
            "!".yellow(),
            summary.created.to_string().green(),
            summary.updated.to_string().yellow(),
            summary.deleted.to_string().red(),
            summary.in_sync
        );
        println!("  Use {} to execute these changes", "--apply".cyan());
    }

    if summary.skipped > 0 {
        println!(
            "{} {} repositories skipped",
            "✗".red(),
            summary.skipped.to_string().red()
        );
    }
}
