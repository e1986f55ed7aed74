//! The status page pipeline: fetch issues and labels, derive system status
//! and incident history, render, publish.

use crate::assets::{Assets, ASSET_FILES};
use crate::config::{PageConfig, CONFIG_FILE};
use crate::error::{Result, StatusPageError};
use crate::github::{RepoClient, PAGES_BRANCH};
use crate::incident::{build_incidents, Collaborators, Incident};
use crate::publish::{publish_file, publish_index, PublishOutcome};
use crate::render::{render, PageContext, TEMPLATE_FILE};
use crate::status::{self, Panel, System};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Only issues updated within this many days feed the page.
pub const ISSUE_WINDOW_DAYS: i64 = 90;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Derived state of one run. Nothing here outlives the run except the
/// rendered page.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub systems: Vec<System>,
    pub incidents: Vec<Incident>,
    pub panels: Vec<Panel>,
}

pub fn snapshot(repo: &RepoClient<'_>, now: DateTime<Utc>) -> Result<Snapshot> {
    let since = now - Duration::days(ISSUE_WINDOW_DAYS);
    let issues = repo.issues_since(since)?;
    let labels = repo.labels()?;
    tracing::debug!(
        issues = issues.len(),
        labels = labels.len(),
        "fetched issues and labels"
    );

    let collaborators: Collaborators = repo
        .collaborators()?
        .into_iter()
        .map(|u| u.login)
        .collect();

    let systems = status::aggregate(&labels, &issues, &collaborators);
    let incidents = build_incidents(&issues, &collaborators, |issue| {
        repo.issue_comments(issue.number)
    })?;

    let panels = status::panels(&systems);
    Ok(Snapshot {
        systems,
        incidents,
        panels,
    })
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Page config from `config.json` at `git_ref`, merged over the defaults.
pub fn load_config(repo: &RepoClient<'_>, git_ref: &str) -> Result<PageConfig> {
    Ok(match repo.file(CONFIG_FILE, git_ref)? {
        Some(file) => PageConfig::from_json_or_default(&file.content),
        None => PageConfig::default(),
    })
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub outcome: PublishOutcome,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Regenerate `index.html` on the pages branch. Writes only when the
/// rendered page differs from the published one.
pub fn update(repo: &RepoClient<'_>, now: DateTime<Utc>) -> Result<UpdateReport> {
    let snapshot = snapshot(repo, now)?;

    // Read everything from one commit so template, config and the
    // published page agree.
    let head = repo.branch_sha(PAGES_BRANCH)?;
    let template = repo
        .file(TEMPLATE_FILE, &head)?
        .ok_or_else(|| StatusPageError::MissingFile {
            path: TEMPLATE_FILE.to_string(),
            branch: PAGES_BRANCH.to_string(),
        })?;
    let config = load_config(repo, &head)?;

    let content = render(
        &template.content,
        &PageContext {
            systems: &snapshot.systems,
            incidents: &snapshot.incidents,
            panels: &snapshot.panels,
            config: &config,
        },
    )?;

    let outcome = publish_index(repo, &content, PAGES_BRANCH, &head)?;
    Ok(UpdateReport { outcome, snapshot })
}

// ---------------------------------------------------------------------------
// upgrade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AssetUpgrade {
    pub file: String,
    pub outcome: PublishOutcome,
}

/// Bring the bundled assets on the pages branch up to date, creating the ones
/// that are missing and rewriting the ones whose content changed.
pub fn upgrade(repo: &RepoClient<'_>) -> Result<Vec<AssetUpgrade>> {
    let head = repo.branch_sha(PAGES_BRANCH)?;
    let mut results = Vec::with_capacity(ASSET_FILES.len());
    for &file in ASSET_FILES {
        let content = Assets::text(file)?;
        let outcome = publish_file(
            repo,
            file,
            &content,
            PAGES_BRANCH,
            &head,
            ("upgrade", "upgrade"),
        )?;
        results.push(AssetUpgrade {
            file: file.to_string(),
            outcome,
        });
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
