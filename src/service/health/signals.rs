//! Content and trust categories: writing quality, indexability, E-E-A-T
//! and topical comprehensiveness.
//!
//! The last three weight with `round(score * max) / 100` rather than the
//! proportional formula used by the earlier categories.

use super::scorecard::unavailable;
use super::{CategoryAnalyzer, Scorecard, Weighting};
use crate::domain::models::{HealthCategory, Severity};
use crate::domain::snapshot::{
    CanonicalStatus, CoreWebVitalsSnapshot, PageAuditSnapshot, TrustSignal,
};

// ====== 12. Content Quality ======

pub struct WritingQuality;

impl WritingQuality {
    pub const NAME: &'static str = "Content Quality";
    const NO_DATA_SCORE: f64 = 50.0;
    const HARD_READING_GRADE: f64 = 14.0;
    const ELEVATED_READING_GRADE: f64 = 12.0;
    const MAX_KEYWORD_DENSITY: f64 = 5.0;
    const MIN_WORDS_FOR_DENSITY: usize = 100;
}

fn keyword_label(page: &PageAuditSnapshot) -> String {
    if page.keyword.trim().is_empty() {
        "the target keyword".to_string()
    } else {
        format!("\"{}\"", page.keyword.trim())
    }
}

impl CategoryAnalyzer for WritingQuality {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        4
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let Some(quality) = &page.content_quality else {
            return unavailable(
                Self::NAME,
                Self::NO_DATA_SCORE,
                self.max_score(),
                Weighting::Proportional,
            );
        };

        let mut card = Scorecard::deductive(Self::NAME);
        let keyword = keyword_label(page);

        if quality.readability_grade > Self::HARD_READING_GRADE {
            card.penalize(
                25.0,
                Severity::Warning,
                format!("Content is hard to read (grade level {:.1})", quality.readability_grade),
                "Use shorter sentences and simpler words; aim for grade 8-10",
            );
        } else if quality.readability_grade > Self::ELEVATED_READING_GRADE {
            card.penalize(
                10.0,
                Severity::Notice,
                format!("Content reads at an advanced level (grade {:.1})", quality.readability_grade),
                "Simplify long sentences to widen the audience",
            );
        }

        if quality.keyword_count > 0 {
            if !quality.keyword_in_title {
                card.penalize(
                    25.0,
                    Severity::Warning,
                    format!("Title does not contain {}", keyword),
                    "Place the target keyword near the start of the title tag",
                );
            }
            if !quality.keyword_in_h1 {
                card.penalize(
                    20.0,
                    Severity::Notice,
                    format!("H1 does not contain {}", keyword),
                    "Work the target keyword naturally into the H1",
                );
            }
        }

        if page.word_count > Self::MIN_WORDS_FOR_DENSITY {
            if quality.keyword_density == 0.0 {
                card.penalize(
                    25.0,
                    Severity::Warning,
                    format!("{} does not appear in the body text", keyword),
                    "Mention the target keyword in the introduction and a few times throughout",
                );
            } else if quality.keyword_density > Self::MAX_KEYWORD_DENSITY {
                card.penalize(
                    20.0,
                    Severity::Warning,
                    format!("Keyword density is too high ({:.1}%)", quality.keyword_density),
                    "Reduce repetition and use synonyms to avoid keyword stuffing",
                );
            }
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 13. Indexability ======

pub struct Indexability;

impl Indexability {
    pub const NAME: &'static str = "Indexability";
    const NO_DATA_SCORE: f64 = 50.0;
}

impl CategoryAnalyzer for Indexability {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        7
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let Some(index) = &page.indexability else {
            return unavailable(Self::NAME, Self::NO_DATA_SCORE, self.max_score(), Weighting::Half);
        };

        let mut card = Scorecard::deductive(Self::NAME);

        if index.has_noindex {
            card.penalize(
                100.0,
                Severity::Critical,
                "Page is marked noindex",
                "Remove the noindex directive if this page should appear in search results",
            );
        }
        if index.has_nofollow {
            card.penalize(
                20.0,
                Severity::Warning,
                "Page is marked nofollow",
                "Remove nofollow so search engines can follow the page's links",
            );
        }
        match index.canonical_status {
            CanonicalStatus::Missing => card.penalize(
                15.0,
                Severity::Warning,
                "No canonical URL declared",
                "Add a self-referencing canonical tag",
            ),
            CanonicalStatus::Mismatch => card.penalize(
                30.0,
                Severity::Critical,
                "Canonical URL points elsewhere, so this page may be dropped from the index",
                "Point the canonical at this page's own URL",
            ),
            CanonicalStatus::Valid => {}
        }
        if index.has_redirect {
            card.penalize(
                10.0,
                Severity::Warning,
                "Requested URL redirects",
                "Link directly to the final URL to avoid redirect hops",
            );
        }

        card.finish(self.max_score(), Weighting::RoundedHundredths)
    }
}

// ====== 14. E-E-A-T Signals ======

pub struct TrustSignals;

impl TrustSignals {
    pub const NAME: &'static str = "E-E-A-T Signals";
}

impl CategoryAnalyzer for TrustSignals {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        6
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let Some(eeat) = &page.eeat else {
            return unavailable(Self::NAME, 0.0, self.max_score(), Weighting::RoundedHundredths);
        };

        let mut card = Scorecard::additive(Self::NAME);

        if eeat.has_author_info {
            card.award(20.0);
        } else {
            card.flag(
                Severity::Warning,
                "No author information found",
                "Add an author byline with credentials and a link to an author bio",
            );
        }
        if eeat.has_about_page {
            card.award(15.0);
        } else {
            card.flag(
                Severity::Warning,
                "No link to an About page",
                "Create an About page describing who is behind the site and link to it",
            );
        }
        if eeat.has_contact_page {
            card.award(15.0);
        } else {
            card.flag(
                Severity::Notice,
                "No link to a Contact page",
                "Add a Contact page and link it from the navigation or footer",
            );
        }
        if eeat.has_privacy_policy {
            card.award(15.0);
        } else {
            card.flag(
                Severity::Warning,
                "No privacy policy link",
                "Publish a privacy policy and link it from the footer",
            );
        }
        if eeat.has_terms_of_service {
            card.award(10.0);
        }

        if eeat.has_signal(TrustSignal::Copyright) {
            card.award(5.0);
        }
        if eeat.has_signal(TrustSignal::PhysicalAddress) {
            card.award(10.0);
        }
        if eeat.has_signal(TrustSignal::SocialProfiles) {
            card.award(10.0);
        }

        card.finish(self.max_score(), Weighting::RoundedHundredths)
    }
}

// ====== 15. Content Comprehensiveness ======

pub struct TopicalDepth;

impl TopicalDepth {
    pub const NAME: &'static str = "Content Comprehensiveness";
}

impl CategoryAnalyzer for TopicalDepth {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        5
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let Some(depth) = &page.comprehensiveness else {
            return unavailable(Self::NAME, 0.0, self.max_score(), Weighting::RoundedHundredths);
        };

        let mut card = Scorecard::additive(Self::NAME);

        match depth.section_count {
            5.. => card.award(25.0),
            3..=4 => card.award(15.0),
            count => {
                card.award(5.0);
                card.flag(
                    Severity::Warning,
                    format!("Only {} content section(s)", count),
                    "Organize the content into at least five H2 sections",
                );
            }
        }

        match depth.topic_coverage {
            8.. => card.award(20.0),
            4..=7 => card.award(10.0),
            covered => card.flag(
                Severity::Notice,
                format!("Narrow topic coverage ({} subtopics)", covered),
                "Cover related subtopics and questions searchers have about the keyword",
            ),
        }

        if depth.has_faq {
            card.award(15.0);
        } else {
            card.flag(
                Severity::Notice,
                "No FAQ section",
                "Add an FAQ section answering common questions, marked up with FAQPage schema",
            );
        }

        if depth.has_table_of_contents {
            card.award(10.0);
        }

        match depth.entity_count {
            10.. => card.award(15.0),
            5..=9 => card.award(8.0),
            _ => {}
        }

        if depth.read_time_minutes >= 5.0 {
            card.award(15.0);
        } else if depth.read_time_minutes >= 3.0 {
            card.award(8.0);
        } else {
            card.flag(
                Severity::Notice,
                format!("Short read time ({:.1} min)", depth.read_time_minutes),
                "Deepen the content so it takes at least three minutes to read",
            );
        }

        card.finish(self.max_score(), Weighting::RoundedHundredths)
    }
}
