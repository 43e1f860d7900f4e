use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::cli::Commands;
use contribhub_api::Settings;
use contribhub_core::RunSummary;

pub async fn execute(command: Commands, settings: Settings) -> Result<()> {
    tracing::debug!(
        "Using GitHub API at {} for organization {}",
        settings.github_api_url,
        settings.github_org
    );

    match command {
        Commands::Aggregate { pretty, summary } => {
            let engine = contribhub_api::build_engine(&settings)?;

            let (records, run) = engine
                .aggregate_with_summary(engine.organization())
                .await?;

            print_json(&records, pretty)?;

            if summary {
                print_summary(&run);
            }
        }

        Commands::Issues { login } => {
            let engine = contribhub_api::build_engine(&settings)?;
            let issues = engine.fetch_issues_for(&login).await?;

            print_json(&json!({ "issues": issues }), true)?;
        }

        Commands::Pulls { login } => {
            let engine = contribhub_api::build_engine(&settings)?;
            let pull_requests = engine.fetch_pull_requests_for(&login).await?;

            print_json(&json!({ "pullRequests": pull_requests }), true)?;
        }

        Commands::Serve { .. } => {
            contribhub_api::serve(settings).await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

fn print_summary(run: &RunSummary) {
    eprintln!("✓ Aggregated {} contributors for {}", run.contributors, run.organization);
    eprintln!("  Run: {}", run.run_id);
    eprintln!("  Started: {}", run.started_at);
    eprintln!(
        "  Repositories: {} ({} skipped)",
        run.repositories, run.repositories_abandoned
    );
    eprintln!(
        "  Contributor branches: {} merged, {} skipped",
        run.branches_merged, run.branches_abandoned
    );
    eprintln!("  Duration: {}ms", run.elapsed_ms);
}
