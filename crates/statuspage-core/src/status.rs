use crate::incident::{qualify, Collaborators};
use crate::label;
use crate::models::{Issue, Label};
use crate::types::Status;
use serde::Serialize;

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct System {
    pub name: String,
    pub status: Status,
}

/// Build the current status of every system.
///
/// Systems are the repository's system labels sorted by name, each starting
/// out `operational`. Every open issue that qualifies as an incident (system
/// and severity labels, written by a collaborator) raises the named systems
/// to that severity. When several
/// open issues name the same system, the highest severity wins, so the result
/// does not depend on the order the API listed the issues in.
pub fn aggregate(
    labels: &[Label],
    issues: &[Issue],
    collaborators: &Collaborators,
) -> Vec<System> {
    let mut names: Vec<&str> = labels
        .iter()
        .filter(|l| label::is_system(l))
        .map(|l| l.name.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();

    let mut systems: Vec<System> = names
        .into_iter()
        .map(|name| System {
            name: name.to_string(),
            status: Status::Operational,
        })
        .collect();

    for issue in issues.iter().filter(|i| i.is_open()) {
        let Some((affected, severity)) = qualify(issue, collaborators) else {
            continue;
        };
        let status = Status::from(severity);
        for name in &affected {
            // Labels deleted from the repository but still attached to an
            // issue are not systems anymore.
            if let Some(system) = systems.iter_mut().find(|s| &s.name == name) {
                system.status = system.status.max(status);
            }
        }
    }
    systems
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Systems currently sharing one non-operational status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub status: Status,
    pub systems: Vec<String>,
}

/// Group non-operational systems by status, in first-seen order.
pub fn panels(systems: &[System]) -> Vec<Panel> {
    let mut panels: Vec<Panel> = Vec::new();
    for system in systems.iter().filter(|s| !s.status.is_operational()) {
        match panels.iter_mut().find(|p| p.status == system.status) {
            Some(panel) => panel.systems.push(system.name.clone()),
            None => panels.push(Panel {
                status: system.status,
                systems: vec![system.name.clone()],
            }),
        }
    }
    panels
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueState, User};
    use chrono::Utc;

    fn issue(number: u64, state: IssueState, labels: Vec<Label>) -> Issue {
        issue_by("some-dude", number, state, labels)
    }

    fn issue_by(author: &str, number: u64, state: IssueState, labels: Vec<Label>) -> Issue {
        Issue {
            number,
            title: format!("issue {number}"),
            body: None,
            state,
            user: User {
                login: author.to_string(),
            },
            labels,
            created_at: Utc::now(),
            pull_request: None,
        }
    }

    fn collaborators() -> Collaborators {
        ["some-dude".to_string()].into_iter().collect()
    }

    fn repo_labels() -> Vec<Label> {
        vec![
            Label::new("Website", "171717"),
            Label::new("API", "171717"),
            Label::new("major outage", "FF4D4D"),
            Label::new("bug", "d73a4a"),
        ]
    }

    #[test]
    fn systems_start_operational_and_sorted() {
        let systems = aggregate(&repo_labels(), &[], &collaborators());
        assert_eq!(
            systems,
            vec![
                System {
                    name: "API".to_string(),
                    status: Status::Operational
                },
                System {
                    name: "Website".to_string(),
                    status: Status::Operational
                },
            ]
        );
    }

    #[test]
    fn open_issue_marks_its_systems() {
        let issues = vec![issue(
            1,
            IssueState::Open,
            vec![
                Label::new("major outage", "FF4D4D"),
                Label::new("Website", "171717"),
            ],
        )];
        let systems = aggregate(&repo_labels(), &issues, &collaborators());
        assert_eq!(systems[0].status, Status::Operational);
        assert_eq!(systems[1].status, Status::MajorOutage);

        let panels = panels(&systems);
        assert_eq!(
            panels,
            vec![Panel {
                status: Status::MajorOutage,
                systems: vec!["Website".to_string()],
            }]
        );
    }

    #[test]
    fn closed_issues_do_not_affect_status() {
        let issues = vec![issue(
            1,
            IssueState::Closed,
            vec![
                Label::new("major outage", "FF4D4D"),
                Label::new("API", "171717"),
            ],
        )];
        let systems = aggregate(&repo_labels(), &issues, &collaborators());
        assert!(systems.iter().all(|s| s.status.is_operational()));
        assert!(panels(&systems).is_empty());
    }

    #[test]
    fn issue_without_severity_is_ignored() {
        let issues = vec![issue(1, IssueState::Open, vec![Label::new("API", "171717")])];
        let systems = aggregate(&repo_labels(), &issues, &collaborators());
        assert!(systems.iter().all(|s| s.status.is_operational()));
    }

    #[test]
    fn highest_severity_wins_regardless_of_order() {
        let outage = issue(
            1,
            IssueState::Open,
            vec![
                Label::new("major outage", "FF4D4D"),
                Label::new("API", "171717"),
            ],
        );
        let investigating = issue(
            2,
            IssueState::Open,
            vec![
                Label::new("investigating", "1192FC"),
                Label::new("API", "171717"),
            ],
        );

        let collabs = collaborators();
        let forward = aggregate(
            &repo_labels(),
            &[outage.clone(), investigating.clone()],
            &collabs,
        );
        let backward = aggregate(&repo_labels(), &[investigating, outage], &collabs);
        assert_eq!(forward[0].status, Status::MajorOutage);
        assert_eq!(forward, backward);
    }

    #[test]
    fn issue_by_non_collaborator_does_not_affect_status() {
        let issues = vec![issue_by(
            "stranger",
            1,
            IssueState::Open,
            vec![
                Label::new("major outage", "FF4D4D"),
                Label::new("Website", "171717"),
            ],
        )];
        let systems = aggregate(&repo_labels(), &issues, &collaborators());
        assert!(systems.iter().all(|s| s.status.is_operational()));
        assert!(panels(&systems).is_empty());
    }

    #[test]
    fn unknown_system_label_on_issue_is_ignored() {
        let issues = vec![issue(
            1,
            IssueState::Open,
            vec![
                Label::new("major outage", "FF4D4D"),
                Label::new("Retired", "171717"),
            ],
        )];
        let systems = aggregate(&repo_labels(), &issues, &collaborators());
        assert_eq!(systems.len(), 2);
        assert!(systems.iter().all(|s| s.status.is_operational()));
    }

    #[test]
    fn panels_group_by_status_in_first_seen_order() {
        let systems = vec![
            System {
                name: "API".to_string(),
                status: Status::DegradedPerformance,
            },
            System {
                name: "CDN".to_string(),
                status: Status::Operational,
            },
            System {
                name: "Database".to_string(),
                status: Status::MajorOutage,
            },
            System {
                name: "Website".to_string(),
                status: Status::DegradedPerformance,
            },
        ];
        let panels = panels(&systems);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].status, Status::DegradedPerformance);
        assert_eq!(panels[0].systems, vec!["API", "Website"]);
        assert_eq!(panels[1].status, Status::MajorOutage);
        assert_eq!(panels[1].systems, vec!["Database"]);
    }
}
