use crate::error::Result;
use crate::label::{severity_of, systems_of};
use crate::models::{Issue, IssueComment, IssueState};
use crate::types::Severity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Incident
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Update {
    pub created: DateTime<Utc>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub number: u64,
    pub title: String,
    pub created: DateTime<Utc>,
    pub severity: Severity,
    pub closed: bool,
    pub body: String,
    pub systems: Vec<String>,
    pub updates: Vec<Update>,
}

/// Logins allowed to author incidents and updates.
pub type Collaborators = HashSet<String>;

/// Affected systems (sorted) and severity of an issue that belongs in the
/// incident history, or `None` if it does not qualify.
pub fn qualify(issue: &Issue, collaborators: &Collaborators) -> Option<(Vec<String>, Severity)> {
    let mut systems: Vec<String> = systems_of(&issue.labels).map(str::to_string).collect();
    if systems.is_empty() {
        return None;
    }
    let severity = severity_of(&issue.labels)?;
    if !collaborators.contains(&issue.user.login) {
        return None;
    }
    systems.sort();
    Some((systems, severity))
}

/// Turn qualifying issues into incidents, newest first.
///
/// `fetch_comments` is only called for issues that qualify. Comments by
/// non-collaborators are dropped; the rest keep the order they were fetched in.
pub fn build_incidents<F>(
    issues: &[Issue],
    collaborators: &Collaborators,
    mut fetch_comments: F,
) -> Result<Vec<Incident>>
where
    F: FnMut(&Issue) -> Result<Vec<IssueComment>>,
{
    let mut incidents = Vec::new();
    for issue in issues {
        let Some((systems, severity)) = qualify(issue, collaborators) else {
            continue;
        };

        let updates = fetch_comments(issue)?
            .into_iter()
            .filter(|c| collaborators.contains(&c.user.login))
            .map(|c| Update {
                created: c.created_at,
                body: c.body.unwrap_or_default(),
            })
            .collect();

        incidents.push(Incident {
            number: issue.number,
            title: issue.title.clone(),
            created: issue.created_at,
            severity,
            closed: issue.state == IssueState::Closed,
            body: issue.body.clone().unwrap_or_default(),
            systems,
            updates,
        });
    }

    incidents.sort_by(|a, b| b.created.cmp(&a.created));
    Ok(incidents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
