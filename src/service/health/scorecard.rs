//! Per-category score accumulation.
//!
//! Deductive categories start at 100 and lose points; additive categories
//! start at 0 and earn them. Each category also names its weighting
//! formula, and the formulas differ in how they round.

use crate::domain::models::{HealthCategory, HealthIssue, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringModel {
    /// Starts at 100, clamped to a floor of 0.
    Deductive,
    /// Starts at 0, clamped to a ceiling of 100.
    Additive,
}

impl ScoringModel {
    fn baseline(&self) -> f64 {
        match self {
            ScoringModel::Deductive => 100.0,
            ScoringModel::Additive => 0.0,
        }
    }

    fn clamp(&self, score: f64) -> f64 {
        match self {
            ScoringModel::Deductive => score.max(0.0),
            ScoringModel::Additive => score.min(100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// `score / 100 * max_score`, unrounded.
    Proportional,
    /// `round(score * max_score) / 100`.
    RoundedHundredths,
    /// `max_score * 0.5`, used when an input is unavailable.
    Half,
}

impl Weighting {
    pub fn apply(&self, score: f64, max_score: u32) -> f64 {
        let max = max_score as f64;
        match self {
            Weighting::Proportional => score / 100.0 * max,
            Weighting::RoundedHundredths => (score * max).round() / 100.0,
            Weighting::Half => max * 0.5,
        }
    }
}

/// Mutable working state for one analyzer run. Consumed by `finish`.
#[derive(Debug)]
pub struct Scorecard {
    category: &'static str,
    model: ScoringModel,
    score: f64,
    issues: Vec<HealthIssue>,
}

impl Scorecard {
    pub fn deductive(category: &'static str) -> Self {
        Self::new(category, ScoringModel::Deductive)
    }

    pub fn additive(category: &'static str) -> Self {
        Self::new(category, ScoringModel::Additive)
    }

    fn new(category: &'static str, model: ScoringModel) -> Self {
        Self {
            category,
            model,
            score: model.baseline(),
            issues: Vec::new(),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Replace the running score outright (discrete tiers, external scores).
    pub fn set(&mut self, score: f64) {
        self.score = score;
    }

    pub fn deduct(&mut self, points: f64) {
        self.score -= points;
    }

    pub fn award(&mut self, points: f64) {
        self.score += points;
    }

    /// Record an issue without touching the score.
    pub fn flag(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) {
        self.issues
            .push(HealthIssue::new(severity, self.category, message, recommendation));
    }

    /// Deduct points and record the issue that caused it.
    pub fn penalize(
        &mut self,
        points: f64,
        severity: Severity,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) {
        self.deduct(points);
        self.flag(severity, message, recommendation);
    }

    pub fn finish(self, max_score: u32, weighting: Weighting) -> HealthCategory {
        let score = self.model.clamp(self.score).clamp(0.0, 100.0);
        HealthCategory {
            name: self.category.to_string(),
            score,
            max_score,
            weighted_score: weighting.apply(score, max_score),
            issues: self.issues,
        }
    }
}

/// Fixed score for a category whose input sub-record is absent.
pub fn unavailable(
    category: &'static str,
    score: f64,
    max_score: u32,
    weighting: Weighting,
) -> HealthCategory {
    HealthCategory {
        name: category.to_string(),
        score,
        max_score,
        weighted_score: weighting.apply(score, max_score),
        issues: Vec::new(),
    }
}
