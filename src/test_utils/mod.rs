//! Shared fixtures for unit tests, integration tests and benchmarks.

pub mod fixtures {
    use crate::domain::snapshot::{
        AccessibilitySignals, CanonicalStatus, ContentComprehensiveness, ContentQuality,
        CoreWebVitalsSnapshot, EeatSignals, HeadingGroup, ImageAsset, IndexabilitySignals,
        OpenGraphTags, PageAuditSnapshot, SchemaMarkup, SecurityHeaders, SocialMeta, TrustSignal,
        TwitterTags, VitalRating,
    };
    use std::collections::BTreeMap;

    fn headings(groups: &[(&str, &[&str])]) -> BTreeMap<String, HeadingGroup> {
        groups
            .iter()
            .map(|(tag, texts)| {
                (
                    tag.to_string(),
                    HeadingGroup {
                        count: texts.len(),
                        texts: texts.iter().map(|t| t.to_string()).collect(),
                    },
                )
            })
            .collect()
    }

    fn webp(name: &str) -> ImageAsset {
        ImageAsset {
            src: format!("https://example.com/images/{}.webp", name),
            has_alt: true,
            alt: Some(name.replace('-', " ")),
            format: "webp".into(),
            lazy_loaded: true,
        }
    }

    /// A page that passes every check.
    pub fn healthy_page() -> PageAuditSnapshot {
        let title = "Best Running Shoes for Beginners in 2024 | Example";
        let description = "Compare the best running shoes for beginners: cushioning, fit and price \
                           tested over 500 miles, with picks for every budget and foot shape.";

        PageAuditSnapshot {
            url: "https://example.com/running-shoes".into(),
            keyword: "running shoes".into(),
            title: Some(title.into()),
            title_length: title.chars().count(),
            meta_description: Some(description.into()),
            meta_description_length: description.chars().count(),
            headings: headings(&[
                ("h1", &["Best Running Shoes for Beginners"][..]),
                (
                    "h2",
                    &["How We Tested", "Top Picks", "Buying Guide", "Sizing", "FAQ"][..],
                ),
                ("h3", &["Cushioning", "Drop", "Weight", "Durability"][..]),
            ]),
            word_count: 1500,
            internal_links: (1..=6)
                .map(|i| format!("https://example.com/guide-{}", i))
                .collect(),
            external_links: vec!["https://www.runnersworld.com/".into()],
            images: vec![
                webp("hero-shoe"),
                webp("sole-detail"),
                webp("fit-test"),
                webp("budget-pick"),
            ],
            canonical_url: Some("https://example.com/running-shoes".into()),
            has_robots_txt: true,
            has_sitemap: true,
            is_https: true,
            has_canonical_mismatch: false,
            schema: Some(SchemaMarkup {
                types: vec!["Article".into(), "BreadcrumbList".into(), "FAQPage".into()],
                has_json_ld: true,
                has_microdata: false,
            }),
            security_headers: Some(SecurityHeaders {
                present: SecurityHeaders::TRACKED[..5]
                    .iter()
                    .map(|h| h.to_string())
                    .collect(),
                missing: vec!["permissions-policy".into()],
            }),
            accessibility: Some(AccessibilitySignals {
                has_viewport: true,
                has_lang_attribute: true,
                total_images: 4,
                images_without_alt: 0,
                unlabeled_inputs: 0,
            }),
            content_quality: Some(ContentQuality {
                readability_grade: 9.2,
                keyword_count: 12,
                keyword_density: 0.8,
                keyword_in_title: true,
                keyword_in_h1: true,
            }),
            social: Some(SocialMeta {
                open_graph: OpenGraphTags {
                    title: true,
                    description: true,
                    image: true,
                },
                twitter: TwitterTags {
                    card: true,
                    title: true,
                    description: true,
                    image: true,
                },
            }),
            indexability: Some(IndexabilitySignals {
                has_noindex: false,
                has_nofollow: false,
                canonical_status: CanonicalStatus::Valid,
                has_redirect: false,
            }),
            eeat: Some(EeatSignals {
                has_author_info: true,
                has_about_page: true,
                has_contact_page: true,
                has_privacy_policy: true,
                has_terms_of_service: true,
                signals: vec![
                    TrustSignal::Copyright,
                    TrustSignal::PhysicalAddress,
                    TrustSignal::SocialProfiles,
                ],
            }),
            comprehensiveness: Some(ContentComprehensiveness {
                section_count: 5,
                topic_coverage: 9,
                has_faq: true,
                has_table_of_contents: true,
                entity_count: 14,
                read_time_minutes: 7.5,
            }),
            broken_links: vec![],
        }
    }

    /// Plain-HTTP stub: no metadata, no headings, 50 words, nothing optional.
    pub fn bare_page() -> PageAuditSnapshot {
        PageAuditSnapshot {
            url: "http://example.com/".into(),
            word_count: 50,
            ..Default::default()
        }
    }

    pub fn good_vitals() -> CoreWebVitalsSnapshot {
        CoreWebVitalsSnapshot {
            performance_score: 95.0,
            lcp_ms: Some(1800.0),
            inp_ms: Some(120.0),
            cls: Some(0.03),
            fcp_ms: Some(900.0),
            ttfb_ms: Some(250.0),
            lcp_rating: Some(VitalRating::Good),
            inp_rating: Some(VitalRating::Good),
            cls_rating: Some(VitalRating::Good),
        }
    }

    pub fn poor_vitals() -> CoreWebVitalsSnapshot {
        CoreWebVitalsSnapshot {
            performance_score: 31.0,
            lcp_ms: Some(6100.0),
            inp_ms: Some(640.0),
            cls: Some(0.41),
            fcp_ms: Some(3900.0),
            ttfb_ms: Some(1400.0),
            lcp_rating: None,
            inp_rating: None,
            cls_rating: None,
        }
    }

    /// Small but well-formed article used by extractor tests.
    pub const ARTICLE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Trail Running Shoes: A Complete Buyer's Guide</title>
    <meta name="description" content="Everything you need to pick trail running shoes: grip, drop, cushioning and fit, explained by coaches who log fifty miles a week on rough terrain.">
    <meta name="author" content="Dana Whitfield">
    <link rel="canonical" href="https://example.com/trail-running-shoes">
    <meta property="og:title" content="Trail Running Shoes Guide">
    <meta property="og:description" content="Pick the right trail running shoes.">
    <meta property="og:image" content="https://example.com/og.webp">
    <meta name="twitter:card" content="summary_large_image">
    <script type="application/ld+json">
    {"@context": "https://schema.org", "@graph": [
        {"@type": "Article", "headline": "Trail Running Shoes"},
        {"@type": ["BreadcrumbList"]}
    ]}
    </script>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About us</a>
        <a href="/contact">Contact</a>
        <a href="#top">Top</a>
    </nav>
    <div id="table-of-contents"><a href="#grip">Grip</a></div>
    <h1>Trail Running Shoes Explained</h1>
    <p>Choosing trail running shoes starts with grip. Brooks and Salomon both make excellent options for Colorado mountain routes.</p>
    <h2 id="grip">Grip and Lugs</h2>
    <p>Deep lugs bite into mud. Shallow lugs suit hard-packed fire roads.</p>
    <h2>Frequently Asked Questions</h2>
    <p>Do trail running shoes work on pavement? Yes, for short stretches.</p>
    <img src="/images/lugs.webp" alt="Close-up of shoe lugs" loading="lazy">
    <img src="/images/mud.jpg">
    <form>
        <label for="email">Email</label>
        <input type="email" id="email">
        <input type="text" name="name">
        <input type="submit" value="Join">
    </form>
    <footer>
        <a href="https://twitter.com/example">Twitter</a>
        <a href="/privacy-policy">Privacy Policy</a>
        <a href="https://partner.example.org/gear">Partner gear</a>
        <address>12 Summit Road, Boulder, CO</address>
        <p>&copy; 2024 Example Media</p>
    </footer>
</body>
</html>"##;
}

/// Helper assertions for tests
#[cfg(test)]
pub mod assertions {
    use crate::domain::models::{HealthIssue, Severity};

    /// Checks if any issue of the category has the given severity
    pub fn has_issue(issues: &[HealthIssue], category: &str, severity: Severity) -> bool {
        issues
            .iter()
            .any(|i| i.category == category && i.severity == severity)
    }

    /// Counts issues raised by a category
    pub fn count_issues(issues: &[HealthIssue], category: &str) -> usize {
        issues.iter().filter(|i| i.category == category).count()
    }
}
