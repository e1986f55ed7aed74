use crate::output::print_json;
use anyhow::Context;
use statuspage_core::repo::{add_system, remove_system, SystemChange};

use super::RepoArgs;

pub fn add(args: &RepoArgs, system: &str, update: bool, json: bool) -> anyhow::Result<()> {
    let client = args.client()?;
    let repo = args.repo(&client)?;
    let change = add_system(&repo, system).with_context(|| format!("failed to add system '{system}'"))?;
    report(system, change, json)?;
    if update && change.changed() {
        super::update::run(args, json)?;
    }
    Ok(())
}

pub fn remove(args: &RepoArgs, system: &str, update: bool, json: bool) -> anyhow::Result<()> {
    let client = args.client()?;
    let repo = args.repo(&client)?;
    let change =
        remove_system(&repo, system).with_context(|| format!("failed to remove system '{system}'"))?;
    report(system, change, json)?;
    if update && change.changed() {
        super::update::run(args, json)?;
    }
    Ok(())
}

fn report(system: &str, change: SystemChange, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "system": system.trim(),
            "change": change,
        }));
    }
    match change {
        SystemChange::Added => println!("Successfully added new system {system}"),
        SystemChange::Removed => println!("Successfully deleted {system}"),
        SystemChange::AlreadyExists => {
            println!("Unable to add new system {system}, it already exists.")
        }
        SystemChange::NotFound => {
            println!("Unable to remove system {system}, it does not exist.")
        }
    }
    Ok(())
}
