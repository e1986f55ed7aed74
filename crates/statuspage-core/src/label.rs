use crate::models::Label;
use crate::types::{Severity, SYSTEM_LABEL_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    System,
    Severity(Severity),
    Unclassified,
}

/// Classify a label by its colour. GitHub reports colours in lowercase hex,
/// so the comparison ignores case.
pub fn classify(color: &str) -> LabelClass {
    let color = color.trim_start_matches('#');
    if color.eq_ignore_ascii_case(SYSTEM_LABEL_COLOR) {
        return LabelClass::System;
    }
    Severity::all()
        .iter()
        .find(|s| color.eq_ignore_ascii_case(s.color()))
        .map_or(LabelClass::Unclassified, |&s| LabelClass::Severity(s))
}

pub fn is_system(label: &Label) -> bool {
    classify(&label.color) == LabelClass::System
}

/// Names of the system labels in `labels`, in the order given.
pub fn systems_of(labels: &[Label]) -> impl Iterator<Item = &str> {
    labels
        .iter()
        .filter(|l| is_system(l))
        .map(|l| l.name.as_str())
}

/// First recognised severity among `labels`.
pub fn severity_of(labels: &[Label]) -> Option<Severity> {
    labels.iter().find_map(|l| match classify(&l.color) {
        LabelClass::Severity(s) => Some(s),
        _ => None,
    })
}
