//! Plain-text fix list meant to be handed to a coding agent or developer.

use std::fmt::Write as _;

use crate::domain::models::{HealthScoreResult, Severity};

#[derive(Debug, Clone)]
pub struct InstructionOptions {
    pub url: String,
    pub keyword: String,
    /// Least severe issue level to include.
    pub min_severity: Severity,
    pub include_breakdown: bool,
}

impl Default for InstructionOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            keyword: String::new(),
            min_severity: Severity::Notice,
            include_breakdown: true,
        }
    }
}

pub struct InstructionDocument;

impl InstructionDocument {
    pub fn render(result: &HealthScoreResult, options: &InstructionOptions) -> String {
        let keyword = if options.keyword.trim().is_empty() {
            "(none)"
        } else {
            options.keyword.as_str()
        };

        // Values are written as-is; braces in a URL or keyword stay literal.
        let mut doc = String::new();
        let _ = writeln!(doc, "SEO fix instructions for {}", options.url);
        let _ = writeln!(doc, "Target keyword: {}", keyword);
        let _ = writeln!(
            doc,
            "Current health: {}/100 (grade {})",
            result.overall,
            result.grade.as_str()
        );
        let _ = writeln!(
            doc,
            "Open issues: {} critical, {} warnings, {} notices",
            result.count(Severity::Critical),
            result.count(Severity::Warning),
            result.count(Severity::Notice)
        );

        if options.include_breakdown {
            doc.push_str("\nCategory breakdown:\n");
            for category in &result.categories {
                let _ = writeln!(
                    doc,
                    "- {}: {:.0}/100 ({:.2} of {} points)",
                    category.name, category.score, category.weighted_score, category.max_score
                );
            }
        }

        if result.issues_at_least(options.min_severity).next().is_none() {
            let _ = writeln!(
                doc,
                "\nNo changes required: no {} issues or worse were found.",
                options.min_severity
            );
            return doc;
        }

        let mut number = 1;
        for severity in Severity::ALL {
            if !severity.at_least(options.min_severity) {
                continue;
            }
            let issues: Vec<_> = result
                .issues
                .iter()
                .filter(|i| i.severity == severity)
                .collect();
            if issues.is_empty() {
                continue;
            }

            let _ = writeln!(doc, "\n{}:", section_title(severity));
            for issue in issues {
                let _ = writeln!(doc, "{}. [{}] {}", number, issue.category, issue.message);
                let _ = writeln!(doc, "   Fix: {}", issue.recommendation);
                number += 1;
            }
        }

        doc
    }
}

fn section_title(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical fixes (do these first)",
        Severity::Warning => "Warnings",
        Severity::Notice => "Notices (nice to have)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::health::analyze_health;
    use crate::test_utils::fixtures::{bare_page, good_vitals, healthy_page};

    fn options(min_severity: Severity) -> InstructionOptions {
        InstructionOptions {
            url: "https://example.com/running-shoes".into(),
            keyword: "running shoes".into(),
            min_severity,
            ..Default::default()
        }
    }

    #[test]
    fn test_header_and_breakdown() {
        let result = analyze_health(&bare_page(), None);
        let doc = InstructionDocument::render(&result, &options(Severity::Notice));

        assert!(doc.starts_with("SEO fix instructions for https://example.com/running-shoes\n"));
        assert!(doc.contains("Target keyword: running shoes"));
        assert!(doc.contains(&format!("Current health: {}/100 (grade {})", result.overall, result.grade)));
        assert!(doc.contains("- Title Tag: 0/100 (0.00 of 7 points)"));
        assert!(doc.contains("1. [Title Tag]"));
    }

    #[test]
    fn test_sections_follow_severity_and_filter() {
        let result = analyze_health(&bare_page(), None);

        let all = InstructionDocument::render(&result, &options(Severity::Notice));
        let critical_at = all.find("Critical fixes").unwrap();
        let warnings_at = all.find("\nWarnings:").unwrap();
        let notices_at = all.find("Notices (nice to have)").unwrap();
        assert!(critical_at < warnings_at && warnings_at < notices_at);

        let critical_only = InstructionDocument::render(&result, &options(Severity::Critical));
        assert!(critical_only.contains("Critical fixes"));
        assert!(!critical_only.contains("\nWarnings:"));
        assert!(!critical_only.contains("Notices (nice to have)"));

        let numbered = all.lines().filter(|l| l.contains(". [")).count();
        assert_eq!(numbered, result.issues.len());
    }

    #[test]
    fn test_clean_result_renders_no_changes_line() {
        let result = analyze_health(&healthy_page(), Some(&good_vitals()));
        assert!(result.issues.is_empty());

        let doc = InstructionDocument::render(&result, &options(Severity::Notice));
        assert!(doc.contains("No changes required"));
        assert!(!doc.contains("Fix:"));
    }

    #[test]
    fn test_header_keeps_braces_in_user_text() {
        let result = analyze_health(&bare_page(), None);
        let opts = InstructionOptions {
            url: "https://x.test/{grade}/{keyword}".into(),
            keyword: "{overall} shoes".into(),
            ..Default::default()
        };
        let doc = InstructionDocument::render(&result, &opts);

        assert!(doc.starts_with("SEO fix instructions for https://x.test/{grade}/{keyword}\n"));
        assert!(doc.contains("Target keyword: {overall} shoes\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let result = analyze_health(&bare_page(), None);
        let opts = InstructionOptions::default();
        assert_eq!(
            InstructionDocument::render(&result, &opts),
            InstructionDocument::render(&result, &opts)
        );
        assert!(InstructionDocument::render(&result, &opts).contains("Target keyword: (none)"));
    }
}
