//! On-page categories: title, description, headings, images, links, depth.

use super::{CategoryAnalyzer, Scorecard, Weighting};
use crate::domain::models::{HealthCategory, Severity};
use crate::domain::snapshot::{CoreWebVitalsSnapshot, PageAuditSnapshot};

// ====== 1. Title Tag ======

pub struct TitleTag;

impl TitleTag {
    pub const NAME: &'static str = "Title Tag";
    const MIN_CHARS: usize = 30;
    const MAX_CHARS: usize = 60;
}

impl CategoryAnalyzer for TitleTag {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        7
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);

        if !page.has_title() {
            card.set(0.0);
            card.flag(
                Severity::Critical,
                "Page has no title tag",
                "Add a unique, descriptive <title> of 30-60 characters that leads with the target keyword",
            );
            return card.finish(self.max_score(), Weighting::Proportional);
        }

        let len = page.title_chars();
        if len < Self::MIN_CHARS {
            card.penalize(
                40.0,
                Severity::Warning,
                format!("Title is too short ({} characters, recommended 30-60)", len),
                "Expand the title with the primary keyword and a clear value proposition",
            );
        } else if len > Self::MAX_CHARS {
            card.penalize(
                20.0,
                Severity::Notice,
                format!("Title is too long ({} characters, recommended 30-60)", len),
                "Shorten the title so it displays fully in search results",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 2. Meta Description ======

pub struct MetaDescription;

impl MetaDescription {
    pub const NAME: &'static str = "Meta Description";
    const MIN_CHARS: usize = 120;
    const MAX_CHARS: usize = 160;
}

impl CategoryAnalyzer for MetaDescription {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        6
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);

        if !page.has_meta_description() {
            card.set(0.0);
            card.flag(
                Severity::Critical,
                "Page has no meta description",
                "Write a compelling 120-160 character meta description that includes the target keyword",
            );
            return card.finish(self.max_score(), Weighting::Proportional);
        }

        let len = page.meta_description_chars();
        if len < Self::MIN_CHARS {
            card.penalize(
                30.0,
                Severity::Warning,
                format!("Meta description is too short ({} characters, recommended 120-160)", len),
                "Expand the description to summarize the page and invite the click",
            );
        } else if len > Self::MAX_CHARS {
            card.penalize(
                15.0,
                Severity::Notice,
                format!("Meta description is too long ({} characters, recommended 120-160)", len),
                "Trim the description so search engines do not truncate it",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 3. Heading Structure ======

pub struct HeadingStructure;

impl HeadingStructure {
    pub const NAME: &'static str = "Heading Structure";
}

impl CategoryAnalyzer for HeadingStructure {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        7
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);
        let h1_count = page.heading_count("h1");

        if h1_count == 0 {
            card.penalize(
                60.0,
                Severity::Critical,
                "Page has no H1 heading",
                "Add exactly one H1 near the top of the page containing the main keyword",
            );
        } else if h1_count > 1 {
            card.penalize(
                30.0,
                Severity::Warning,
                format!("Page has {} H1 headings", h1_count),
                "Keep a single H1 and demote the others to H2",
            );
        }

        if page.heading_count("h2") == 0 {
            card.penalize(
                20.0,
                Severity::Notice,
                "Page has no H2 headings",
                "Break the content into sections with descriptive H2 subheadings",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 4. Image Optimization ======

pub struct ImageOptimization;

impl ImageOptimization {
    pub const NAME: &'static str = "Image Optimization";
    const EAGER_IMAGE_ALLOWANCE: usize = 3;
}

impl CategoryAnalyzer for ImageOptimization {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        6
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);
        let total = page.images.len();

        if total == 0 {
            card.penalize(
                20.0,
                Severity::Notice,
                "Page has no images",
                "Add relevant, optimized images to support the content",
            );
            return card.finish(self.max_score(), Weighting::Proportional);
        }

        let missing_alt = page.images.iter().filter(|img| !img.has_alt).count();
        if missing_alt > 0 {
            let ratio = missing_alt as f64 / total as f64;
            let severity = if ratio > 0.5 {
                Severity::Critical
            } else {
                Severity::Warning
            };
            card.penalize(
                (ratio * 60.0).round(),
                severity,
                format!("{} of {} images are missing alt text", missing_alt, total),
                "Describe every meaningful image with concise alt text",
            );
        }

        let legacy = page.images.iter().filter(|img| !img.is_next_gen()).count();
        if legacy as f64 / total as f64 > 0.5 {
            card.penalize(
                15.0,
                Severity::Notice,
                format!("{} of {} images use legacy formats", legacy, total),
                "Serve images as WebP or AVIF to cut transfer size",
            );
        }

        let eager = page.images.iter().filter(|img| !img.lazy_loaded).count();
        if eager > Self::EAGER_IMAGE_ALLOWANCE {
            card.penalize(
                10.0,
                Severity::Notice,
                format!("{} images load eagerly", eager),
                "Add loading=\"lazy\" to images below the fold",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 5. Link Hygiene ======

pub struct LinkHygiene;

impl LinkHygiene {
    pub const NAME: &'static str = "Link Hygiene";
    const POINTS_PER_BROKEN_LINK: f64 = 15.0;
    const MAX_BROKEN_LINK_PENALTY: f64 = 60.0;
}

impl CategoryAnalyzer for LinkHygiene {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        7
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);
        let internal = page.internal_links.len();

        if internal == 0 {
            card.penalize(
                40.0,
                Severity::Warning,
                "Page has no internal links",
                "Link to related pages on the same site to spread authority and aid crawling",
            );
        }

        let broken = page.broken_links.len();
        if broken > 0 {
            let points = (broken as f64 * Self::POINTS_PER_BROKEN_LINK).min(Self::MAX_BROKEN_LINK_PENALTY);
            card.penalize(
                points,
                Severity::Critical,
                format!("{} broken link(s) found", broken),
                "Fix or remove links that return errors",
            );
        }

        if (1..=2).contains(&internal) {
            card.penalize(
                15.0,
                Severity::Notice,
                format!("Only {} internal link(s) on the page", internal),
                "Add a few more contextual internal links",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 6. Content Depth ======

pub struct ContentDepth;

impl ContentDepth {
    pub const NAME: &'static str = "Content Depth";
}

impl CategoryAnalyzer for ContentDepth {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        10
    }

    /// Discrete tiers rather than cumulative deductions.
    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);
        let words = page.word_count;

        let (score, severity) = match words {
            0..=99 => (10.0, Some(Severity::Critical)),
            100..=299 => (40.0, Some(Severity::Warning)),
            300..=599 => (65.0, Some(Severity::Notice)),
            600..=999 => (80.0, None),
            _ => (100.0, None),
        };

        card.set(score);
        if let Some(severity) = severity {
            card.flag(
                severity,
                format!("Thin content: only {} words", words),
                "Expand the page with in-depth, original coverage of the topic (aim for 1000+ words)",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}
