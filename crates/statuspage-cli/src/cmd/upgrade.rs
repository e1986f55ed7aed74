use crate::output::{print_json, print_table};
use anyhow::Context;
use statuspage_core::page;
use statuspage_core::publish::PublishOutcome;

use super::RepoArgs;

/// `statuspage upgrade`: push the bundled template and assets to `gh-pages`.
pub fn run(args: &RepoArgs, json: bool) -> anyhow::Result<()> {
    let client = args.client()?;
    let repo = args.repo(&client)?;
    let results = page::upgrade(&repo).context("upgrade failed")?;

    if json {
        return print_json(&results);
    }

    let rows = results
        .iter()
        .map(|r| {
            let action = match r.outcome {
                PublishOutcome::Created => "created",
                PublishOutcome::Updated => "updated",
                PublishOutcome::Unchanged => "up to date",
            };
            vec![r.file.clone(), action.to_string()]
        })
        .collect();
    print_table(&["FILE", "ACTION"], rows);
    Ok(())
}
