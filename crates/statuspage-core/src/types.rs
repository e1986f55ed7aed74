use serde::{Deserialize, Serialize};
use std::fmt;

/// Colour shared by every label that names a monitored system.
pub const SYSTEM_LABEL_COLOR: &str = "171717";

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Incident severity, ordered by impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "investigating")]
    Investigating,
    #[serde(rename = "degraded performance")]
    DegradedPerformance,
    #[serde(rename = "major outage")]
    MajorOutage,
}

impl Severity {
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Investigating,
            Severity::DegradedPerformance,
            Severity::MajorOutage,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Investigating => "investigating",
            Severity::DegradedPerformance => "degraded performance",
            Severity::MajorOutage => "major outage",
        }
    }

    /// Label colour (uppercase hex, no `#`) that marks this severity.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Investigating => "1192FC",
            Severity::DegradedPerformance => "FFA500",
            Severity::MajorOutage => "FF4D4D",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "operational")]
    Operational,
    #[serde(rename = "investigating")]
    Investigating,
    #[serde(rename = "degraded performance")]
    DegradedPerformance,
    #[serde(rename = "major outage")]
    MajorOutage,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Operational => "operational",
            Status::Investigating => "investigating",
            Status::DegradedPerformance => "degraded performance",
            Status::MajorOutage => "major outage",
        }
    }

    pub fn is_operational(self) -> bool {
        self == Status::Operational
    }
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Investigating => Status::Investigating,
            Severity::DegradedPerformance => Status::DegradedPerformance,
            Severity::MajorOutage => Status::MajorOutage,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
