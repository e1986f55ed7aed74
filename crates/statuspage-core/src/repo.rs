use crate::assets::{Assets, ASSET_FILES};
use crate::error::{Result, StatusPageError};
use crate::github::{GithubClient, RepoClient, PAGES_BRANCH};
use crate::page::{self, UpdateReport};
use crate::types::{Severity, SYSTEM_LABEL_COLOR};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Login that owns the page repository: the organisation when given,
/// otherwise the authenticated user.
pub fn resolve_owner(client: &GithubClient, org: Option<&str>) -> Result<String> {
    match org {
        Some(org) => Ok(org.to_string()),
        None => Ok(client.authenticated_user()?.login),
    }
}

/// Split a comma-separated system list, trimming names and skipping blanks.
pub fn parse_systems(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn page_url(owner: &str, name: &str) -> String {
    format!("https://{owner}.github.io/{name}/")
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemChange {
    Added,
    AlreadyExists,
    Removed,
    NotFound,
}

impl SystemChange {
    pub fn changed(self) -> bool {
        matches!(self, SystemChange::Added | SystemChange::Removed)
    }
}

fn system_name(system: &str) -> Result<&str> {
    match system.trim() {
        "" => Err(StatusPageError::EmptySystemName),
        name => Ok(name),
    }
}

/// Create the system label. GitHub answers 422 for a label that exists.
pub fn add_system(repo: &RepoClient<'_>, system: &str) -> Result<SystemChange> {
    match repo.create_label(system_name(system)?, SYSTEM_LABEL_COLOR) {
        Ok(_) => Ok(SystemChange::Added),
        Err(e) if e.is_unprocessable() => {
            tracing::warn!(system, "system label already exists");
            Ok(SystemChange::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}

pub fn remove_system(repo: &RepoClient<'_>, system: &str) -> Result<SystemChange> {
    match repo.delete_label(system_name(system)?) {
        Ok(()) => Ok(SystemChange::Removed),
        Err(e) if e.is_not_found() => {
            tracing::warn!(system, "system label does not exist");
            Ok(SystemChange::NotFound)
        }
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateOptions<'a> {
    pub name: &'a str,
    pub org: Option<&'a str>,
    pub systems: &'a [String],
    pub private: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedPage {
    pub owner: String,
    pub name: String,
    pub page_url: String,
    pub issues_url: String,
    pub update: UpdateReport,
}

/// Set up a new page repository.
///
/// The repository gets the three severity labels and one label per system
/// in place of GitHub's defaults, a README on its default branch, and a
/// `gh-pages` branch holding the bundled assets. `gh-pages` becomes the
/// default branch and a first update publishes `index.html`.
pub fn create(
    client: &GithubClient,
    opts: &CreateOptions<'_>,
    now: DateTime<Utc>,
) -> Result<CreatedPage> {
    let owner = resolve_owner(client, opts.org)?;
    let description = format!("Visit this site at {}", page_url(&owner, opts.name));

    let created = client.create_repo(opts.org, opts.name, &description, opts.private)?;
    let owner = created.owner.login;
    let repo = client.repo(owner.clone(), created.name.clone());

    for label in repo.labels()? {
        repo.delete_label(&label.name)?;
    }
    for severity in Severity::all() {
        repo.create_label(severity.as_str(), severity.color())?;
    }
    for system in opts.systems {
        repo.create_label(system, SYSTEM_LABEL_COLOR)?;
    }

    // The pages branch needs a commit to branch from.
    repo.put_file("README.md", &description, "initial", None, None)?;
    let default_branch = created.default_branch.as_deref().unwrap_or("main");
    let base = repo.branch_sha(default_branch)?;
    repo.create_branch(PAGES_BRANCH, &base)?;

    for &file in ASSET_FILES {
        let content = Assets::text(file)?;
        repo.put_file(file, &content, "initial", Some(PAGES_BRANCH), None)?;
    }
    repo.set_default_branch(PAGES_BRANCH)?;

    let update = page::update(&repo, now)?;
    Ok(CreatedPage {
        issues_url: format!("https://github.com/{owner}/{}/issues", created.name),
        page_url: page_url(&owner, &created.name),
        owner,
        name: created.name,
        update,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
