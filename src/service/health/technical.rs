//! Technical categories: performance, security, structured data, social
//! previews and accessibility.

use super::scorecard::unavailable;
use super::{CategoryAnalyzer, Scorecard, Weighting};
use crate::domain::models::{HealthCategory, Severity};
use crate::domain::snapshot::{CoreWebVitalsSnapshot, PageAuditSnapshot, VitalRating};

// ====== 7. Performance ======

pub struct Performance;

impl Performance {
    pub const NAME: &'static str = "Performance";
    const UNMEASURED_SCORE: f64 = 50.0;
}

fn seconds(ms: Option<f64>) -> String {
    ms.map(|v| format!(" ({:.1}s)", v / 1000.0)).unwrap_or_default()
}

fn milliseconds(ms: Option<f64>) -> String {
    ms.map(|v| format!(" ({:.0}ms)", v)).unwrap_or_default()
}

impl CategoryAnalyzer for Performance {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        13
    }

    /// Vitals ratings raise issues but never move the score, which comes
    /// straight from the lab performance score.
    fn analyze(
        &self,
        _: &PageAuditSnapshot,
        vitals: Option<&CoreWebVitalsSnapshot>,
    ) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);

        let Some(vitals) = vitals else {
            card.set(Self::UNMEASURED_SCORE);
            card.flag(
                Severity::Notice,
                "Core Web Vitals data is unavailable",
                "Measure the page with PageSpeed Insights or Lighthouse to assess real performance",
            );
            return card.finish(self.max_score(), Weighting::Proportional);
        };

        card.set(vitals.performance_score.clamp(0.0, 100.0));

        match vitals.lcp() {
            Some(VitalRating::Poor) => card.flag(
                Severity::Critical,
                format!("Largest Contentful Paint is poor{}", seconds(vitals.lcp_ms)),
                "Optimize the hero image, preload critical resources and reduce server response time to get LCP under 2.5s",
            ),
            Some(VitalRating::NeedsImprovement) => card.flag(
                Severity::Warning,
                format!("Largest Contentful Paint needs improvement{}", seconds(vitals.lcp_ms)),
                "Compress above-the-fold images and defer render-blocking CSS and JavaScript",
            ),
            _ => {}
        }

        if vitals.cls() == Some(VitalRating::Poor) {
            let value = vitals.cls.map(|v| format!(" ({:.2})", v)).unwrap_or_default();
            card.flag(
                Severity::Warning,
                format!("Cumulative Layout Shift is poor{}", value),
                "Reserve space for images, embeds and ads with explicit width and height",
            );
        }

        if vitals.inp() == Some(VitalRating::Poor) {
            card.flag(
                Severity::Warning,
                format!("Interaction to Next Paint is poor{}", milliseconds(vitals.inp_ms)),
                "Break up long JavaScript tasks and trim third-party scripts",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 8. Security & Best Practices ======

pub struct SecurityPractices;

impl SecurityPractices {
    pub const NAME: &'static str = "Security & Best Practices";
    const MIN_SECURITY_HEADERS: usize = 3;
}

impl CategoryAnalyzer for SecurityPractices {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        8
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);

        if !page.is_https {
            card.penalize(
                50.0,
                Severity::Critical,
                "Page is not served over HTTPS",
                "Install a TLS certificate and redirect all HTTP traffic to HTTPS",
            );
        }
        if !page.has_robots_txt {
            card.penalize(
                15.0,
                Severity::Warning,
                "No robots.txt file found",
                "Publish a robots.txt at the site root that references the sitemap",
            );
        }
        if !page.has_sitemap {
            card.penalize(
                15.0,
                Severity::Warning,
                "No XML sitemap found",
                "Generate an XML sitemap and submit it in Google Search Console",
            );
        }
        if !page.has_canonical() {
            card.penalize(
                10.0,
                Severity::Notice,
                "Page has no canonical tag",
                "Add a self-referencing <link rel=\"canonical\"> to prevent duplicate-content issues",
            );
        }
        if let Some(headers) = &page.security_headers {
            let present = headers.present_count();
            if present < Self::MIN_SECURITY_HEADERS {
                let missing = if headers.missing.is_empty() {
                    String::new()
                } else {
                    format!(" (missing: {})", headers.missing.join(", "))
                };
                card.penalize(
                    10.0,
                    Severity::Warning,
                    format!("Only {} of 6 security headers are set{}", present, missing),
                    "Configure HSTS, Content-Security-Policy, X-Frame-Options and X-Content-Type-Options on the server",
                );
            }
        }
        if page.has_canonical_mismatch {
            card.penalize(
                10.0,
                Severity::Warning,
                "Canonical URL points to a different page",
                "Make the canonical tag reference this page unless it is an intentional duplicate",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 9. Schema & Structured Data ======

pub struct StructuredData;

impl StructuredData {
    pub const NAME: &'static str = "Schema & Structured Data";
    const NO_DATA_SCORE: f64 = 30.0;
    const NO_MARKUP_SCORE: f64 = 20.0;
}

impl CategoryAnalyzer for StructuredData {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        5
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let mut card = Scorecard::deductive(Self::NAME);

        match &page.schema {
            None => {
                card.set(Self::NO_DATA_SCORE);
                card.flag(
                    Severity::Warning,
                    "Structured data could not be evaluated",
                    "Add JSON-LD structured data (Organization, WebPage, Article) describing the page",
                );
            }
            Some(schema) if !schema.has_json_ld && !schema.has_microdata => {
                card.set(Self::NO_MARKUP_SCORE);
                card.flag(
                    Severity::Warning,
                    "No structured data found",
                    "Add JSON-LD structured data so search engines can show rich results",
                );
            }
            Some(schema) => {
                if schema.types.len() < 2 {
                    card.penalize(
                        30.0,
                        Severity::Notice,
                        format!("Only {} schema type(s) declared", schema.types.len()),
                        "Describe more entities on the page, e.g. BreadcrumbList, FAQPage or Product",
                    );
                }
                if !schema.has_json_ld {
                    card.penalize(
                        15.0,
                        Severity::Notice,
                        "Structured data uses microdata only",
                        "Migrate to JSON-LD, the format Google recommends",
                    );
                }
            }
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 10. Social Media Readiness ======

pub struct SocialReadiness;

impl SocialReadiness {
    pub const NAME: &'static str = "Social Media Readiness";
    const NO_DATA_SCORE: f64 = 30.0;
}

impl CategoryAnalyzer for SocialReadiness {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        4
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let Some(social) = &page.social else {
            return unavailable(
                Self::NAME,
                Self::NO_DATA_SCORE,
                self.max_score(),
                Weighting::Proportional,
            );
        };

        let mut card = Scorecard::deductive(Self::NAME);

        let og_missing = social.open_graph.missing();
        if !og_missing.is_empty() {
            card.penalize(
                40.0,
                Severity::Warning,
                format!("Open Graph tags incomplete (missing {})", og_missing.join(", ")),
                "Add og:title, og:description and og:image so shares render a rich preview",
            );
        }

        let twitter_missing = social.twitter.missing();
        if !twitter_missing.is_empty() {
            card.penalize(
                30.0,
                Severity::Notice,
                format!("Twitter Card tags incomplete (missing {})", twitter_missing.join(", ")),
                "Add twitter:card, twitter:title, twitter:description and twitter:image",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}

// ====== 11. Accessibility ======

pub struct Accessibility;

impl Accessibility {
    pub const NAME: &'static str = "Accessibility";
    const NO_DATA_SCORE: f64 = 40.0;
    const MIN_ALT_COVERAGE: f64 = 0.8;
}

impl CategoryAnalyzer for Accessibility {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn max_score(&self) -> u32 {
        5
    }

    fn analyze(&self, page: &PageAuditSnapshot, _: Option<&CoreWebVitalsSnapshot>) -> HealthCategory {
        let Some(a11y) = &page.accessibility else {
            return unavailable(
                Self::NAME,
                Self::NO_DATA_SCORE,
                self.max_score(),
                Weighting::Proportional,
            );
        };

        let mut card = Scorecard::deductive(Self::NAME);

        if !a11y.has_viewport {
            card.penalize(
                40.0,
                Severity::Critical,
                "No viewport meta tag",
                "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            );
        }
        if !a11y.has_lang_attribute {
            card.penalize(
                25.0,
                Severity::Warning,
                "The <html> element has no lang attribute",
                "Declare the page language, e.g. <html lang=\"en\">",
            );
        }
        if a11y.total_images > 0 && a11y.images_without_alt > 0 {
            let described = a11y.total_images.saturating_sub(a11y.images_without_alt);
            let coverage = described as f64 / a11y.total_images as f64;
            if coverage < Self::MIN_ALT_COVERAGE {
                card.penalize(
                    20.0,
                    Severity::Warning,
                    format!("Only {:.0}% of images have alt text", coverage * 100.0),
                    "Provide alt text for at least 80% of images; mark decorative ones with alt=\"\"",
                );
            }
        }
        if a11y.unlabeled_inputs > 0 {
            card.penalize(
                15.0,
                Severity::Notice,
                format!("{} form input(s) have no label", a11y.unlabeled_inputs),
                "Associate every input with a <label> or an aria-label",
            );
        }

        card.finish(self.max_score(), Weighting::Proportional)
    }
}
