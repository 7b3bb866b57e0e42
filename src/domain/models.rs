//! Scoring output entities: severities, issues, categories and the final result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ====== Enums ======

/// Issue severity. Declaration order is the sort order used everywhere
/// issues are ranked: critical first, notice last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Notice,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Notice];

    /// Sort rank: critical=0, warning=1, notice=2.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Notice => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
        }
    }

    /// True when `self` is at least as severe as `threshold`.
    pub fn at_least(&self, threshold: Severity) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Letter grade derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Lower bounds are inclusive: 90 is an A, 89 a B.
    pub fn from_score(overall: u32) -> Self {
        match overall {
            90.. => Grade::A,
            80..=89 => Grade::B,
            65..=79 => Grade::C,
            50..=64 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation priority, mapped one-to-one from the worst severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Priority::High,
            Severity::Warning => Priority::Medium,
            Severity::Notice => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ====== Entities ======

/// A single finding attached to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthIssue {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub recommendation: String,
}

impl HealthIssue {
    pub fn new(
        severity: Severity,
        category: &str,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// One scored dimension. `score` is the 0-100 category health,
/// `max_score` the category's fixed share of the overall 100 points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCategory {
    pub name: String,
    pub score: f64,
    pub max_score: u32,
    pub weighted_score: f64,
    pub issues: Vec<HealthIssue>,
}

impl HealthCategory {
    /// Points left on the table for this category.
    pub fn shortfall(&self) -> f64 {
        (self.max_score as f64 - self.weighted_score).max(0.0)
    }

    pub fn worst_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).min()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreResult {
    pub overall: u32,
    pub grade: Grade,
    pub categories: Vec<HealthCategory>,
    pub issues: Vec<HealthIssue>,
}

impl HealthScoreResult {
    pub fn category(&self, name: &str) -> Option<&HealthCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn issues_at_least(&self, threshold: Severity) -> impl Iterator<Item = &HealthIssue> {
        self.issues.iter().filter(move |i| i.severity.at_least(threshold))
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Per-category advice derived from a scored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    /// Weighted points recoverable by fixing every issue in the category.
    pub potential_gain: f64,
    pub action: String,
    pub issue_count: usize,
}
