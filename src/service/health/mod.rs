//! Health scoring engine.
//!
//! Fifteen category analyzers, each a pure function of the page snapshot
//! (and, for performance, the vitals snapshot), registered in one ordered
//! table. The aggregator folds over that table:
//! - weighted category scores are summed and rounded into `overall`
//! - the grade is derived from `overall`
//! - every category's issues are merged and stably sorted by severity
//!
//! The engine never fails. Missing sub-records are a defined input
//! variant that each analyzer maps to a fixed neutral score.

mod on_page;
mod scorecard;
mod signals;
mod technical;

pub use on_page::{
    ContentDepth, HeadingStructure, ImageOptimization, LinkHygiene, MetaDescription, TitleTag,
};
pub use scorecard::{Scorecard, ScoringModel, Weighting};
pub use signals::{Indexability, TopicalDepth, TrustSignals, WritingQuality};
pub use technical::{
    Accessibility, Performance, SecurityPractices, SocialReadiness, StructuredData,
};

use crate::domain::models::{Grade, HealthCategory, HealthIssue, HealthScoreResult};
use crate::domain::snapshot::{CoreWebVitalsSnapshot, PageAuditSnapshot};
use tracing::{debug, info};

/// One scoring dimension with a fixed share of the overall 100 points.
pub trait CategoryAnalyzer: Send + Sync {
    /// Display name, also stamped on every issue the category emits.
    fn name(&self) -> &'static str;

    /// Point-weight of this category in the overall score.
    fn max_score(&self) -> u32;

    fn analyze(
        &self,
        page: &PageAuditSnapshot,
        vitals: Option<&CoreWebVitalsSnapshot>,
    ) -> HealthCategory;
}

/// All analyzers in output order. Weights sum to exactly 100.
pub static ANALYZERS: [&dyn CategoryAnalyzer; 15] = [
    &TitleTag,
    &MetaDescription,
    &HeadingStructure,
    &ImageOptimization,
    &LinkHygiene,
    &ContentDepth,
    &Performance,
    &SecurityPractices,
    &StructuredData,
    &SocialReadiness,
    &Accessibility,
    &WritingQuality,
    &Indexability,
    &TrustSignals,
    &TopicalDepth,
];

/// Sum of every registered category weight.
pub fn total_weight() -> u32 {
    ANALYZERS.iter().map(|a| a.max_score()).sum()
}

/// Score one page. Inputs are only read, never modified.
pub fn analyze_health(
    page: &PageAuditSnapshot,
    vitals: Option<&CoreWebVitalsSnapshot>,
) -> HealthScoreResult {
    let categories: Vec<HealthCategory> = ANALYZERS
        .iter()
        .map(|analyzer| {
            let category = analyzer.analyze(page, vitals);
            debug!(
                category = category.name.as_str(),
                score = category.score,
                weighted = category.weighted_score,
                issues = category.issues.len(),
                "category scored"
            );
            category
        })
        .collect();

    let overall = overall_score(&categories);
    let grade = Grade::from_score(overall);
    let issues = merge_issues(&categories);

    info!(
        url = page.url.as_str(),
        overall,
        grade = grade.as_str(),
        issues = issues.len(),
        "health score computed"
    );

    HealthScoreResult {
        overall,
        grade,
        categories,
        issues,
    }
}

/// `round(sum of weighted scores)`, bounded to 0..=100.
pub fn overall_score(categories: &[HealthCategory]) -> u32 {
    let total: f64 = categories.iter().map(|c| c.weighted_score).sum();
    total.round().clamp(0.0, 100.0) as u32
}

/// Flatten per-category issues and order them by severity. The sort is
/// stable, so equal severities keep category emission order.
pub fn merge_issues(categories: &[HealthCategory]) -> Vec<HealthIssue> {
    let mut issues: Vec<HealthIssue> = categories
        .iter()
        .flat_map(|c| c.issues.iter().cloned())
        .collect();
    issues.sort_by_key(|issue| issue.severity.rank());
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Severity;
    use crate::test_utils::assertions::{count_issues, has_issue};
    use crate::test_utils::fixtures;

    #[test]
    fn test_weights_sum_to_hundred() {
        assert_eq!(total_weight(), 100);
    }

    #[test]
    fn test_category_order_is_fixed() {
        let names: Vec<&str> = ANALYZERS.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec![
                "Title Tag",
                "Meta Description",
                "Heading Structure",
                "Image Optimization",
                "Link Hygiene",
                "Content Depth",
                "Performance",
                "Security & Best Practices",
                "Schema & Structured Data",
                "Social Media Readiness",
                "Accessibility",
                "Content Quality",
                "Indexability",
                "E-E-A-T Signals",
                "Content Comprehensiveness",
            ]
        );
    }

    #[test]
    fn test_merge_issues_is_stable_within_severity() {
        let categories = vec![
            HealthCategory {
                name: "One".into(),
                score: 0.0,
                max_score: 50,
                weighted_score: 0.0,
                issues: vec![
                    HealthIssue::new(Severity::Critical, "One", "A", ""),
                    HealthIssue::new(Severity::Warning, "One", "B", ""),
                ],
            },
            HealthCategory {
                name: "Two".into(),
                score: 0.0,
                max_score: 50,
                weighted_score: 0.0,
                issues: vec![HealthIssue::new(Severity::Critical, "Two", "C", "")],
            },
        ];

        let messages: Vec<String> = merge_issues(&categories)
            .into_iter()
            .map(|i| i.message)
            .collect();
        assert_eq!(messages, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_overall_rounds_weighted_sum() {
        let category = |weighted: f64| HealthCategory {
            name: "x".into(),
            score: 0.0,
            max_score: 0,
            weighted_score: weighted,
            issues: vec![],
        };
        assert_eq!(overall_score(&[category(40.25), category(4.25)]), 45);
        assert_eq!(overall_score(&[category(40.25), category(4.3)]), 45);
        assert_eq!(overall_score(&[category(40.25), category(4.25), category(0.01)]), 45);
        assert_eq!(overall_score(&[category(44.5)]), 45);
    }

    #[test]
    fn test_well_built_page_scores_an_a() {
        let page = fixtures::healthy_page();
        let vitals = fixtures::good_vitals();
        let result = analyze_health(&page, Some(&vitals));

        assert_eq!(result.grade, Grade::A, "categories: {:#?}", result.categories);
        assert!(result.issues.iter().all(|i| i.severity != Severity::Critical));
    }

    #[test]
    fn test_bare_page_issue_inventory() {
        let result = analyze_health(&fixtures::bare_page(), None);

        assert!(has_issue(&result.issues, "Title Tag", Severity::Critical));
        assert!(has_issue(&result.issues, "Heading Structure", Severity::Notice));
        assert!(has_issue(&result.issues, "Schema & Structured Data", Severity::Warning));
        assert_eq!(count_issues(&result.issues, "Security & Best Practices"), 4);
        assert_eq!(count_issues(&result.issues, "Social Media Readiness"), 0);
        assert_eq!(count_issues(&result.issues, "E-E-A-T Signals"), 0);
        assert_eq!(result.issues[0].category, "Title Tag");
    }

    #[test]
    fn test_analysis_does_not_mutate_inputs() {
        let page = fixtures::healthy_page();
        let vitals = fixtures::good_vitals();
        let (page_before, vitals_before) = (page.clone(), vitals.clone());

        let first = analyze_health(&page, Some(&vitals));
        let second = analyze_health(&page, Some(&vitals));

        assert_eq!(page, page_before);
        assert_eq!(vitals, vitals_before);
        assert_eq!(first, second);
    }
}
