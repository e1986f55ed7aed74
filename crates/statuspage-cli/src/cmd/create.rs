use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use statuspage_core::repo::{self, CreateOptions};

use super::RepoArgs;

/// `statuspage create`: set up a new page repository and publish the first page.
pub fn run(args: &RepoArgs, systems: &str, private: bool, json: bool) -> anyhow::Result<()> {
    let systems = repo::parse_systems(systems);
    if systems.is_empty() {
        anyhow::bail!("no systems given: pass --systems, e.g. --systems \"Website,API\"");
    }

    let client = args.client()?;
    let created = repo::create(
        &client,
        &CreateOptions {
            name: &args.name,
            org: args.org.as_deref(),
            systems: &systems,
            private,
        },
        Utc::now(),
    )
    .with_context(|| format!("failed to create status page '{}'", args.name))?;

    if json {
        return print_json(&created);
    }

    println!("Create new issues at {}", created.issues_url);
    println!("Visit your new status page at {}", created.page_url);
    println!("\nYour status page is now set up and ready!\n");
    println!("Run 'statuspage update' whenever you create or update an issue:");
    let org = args
        .org
        .as_deref()
        .map(|o| format!(" --org={o}"))
        .unwrap_or_default();
    println!("  statuspage update --name={}{org}", created.name);
    Ok(())
}
