use crate::output::{print_json, print_systems};
use anyhow::Context;
use chrono::Utc;
use statuspage_core::page;
use statuspage_core::publish::PublishOutcome;

use super::RepoArgs;

/// `statuspage update`: regenerate `index.html` and publish it when it changed.
pub fn run(args: &RepoArgs, json: bool) -> anyhow::Result<()> {
    let client = args.client()?;
    let repo = args.repo(&client)?;

    if !json {
        println!("Generating status page for {}/{}..", repo.owner(), repo.name());
    }
    let report = page::update(&repo, Utc::now()).context("update failed")?;

    if json {
        return print_json(&report);
    }

    print_systems(&report.snapshot.systems);
    println!();
    match report.outcome {
        PublishOutcome::Unchanged => {
            println!("Local status matches remote status, no need to commit.")
        }
        PublishOutcome::Created => println!("Published the first index.html."),
        PublishOutcome::Updated => println!("Updated index.html."),
    }
    println!(
        "{} incident(s) in the last {} days.",
        report.snapshot.incidents.len(),
        page::ISSUE_WINDOW_DAYS
    );
    Ok(())
}

/// `statuspage status`: compute system status without rendering or publishing.
pub fn status(args: &RepoArgs, json: bool) -> anyhow::Result<()> {
    let client = args.client()?;
    let repo = args.repo(&client)?;
    let snapshot = page::snapshot(&repo, Utc::now()).context("failed to read issues")?;

    if json {
        return print_json(&snapshot);
    }

    print_systems(&snapshot.systems);
    let open = snapshot.incidents.iter().filter(|i| !i.closed).count();
    println!(
        "\n{} open incident(s), {} in the last {} days.",
        open,
        snapshot.incidents.len(),
        page::ISSUE_WINDOW_DAYS
    );
    Ok(())
}
