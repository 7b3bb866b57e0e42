//! Input records handed to the scoring engine.
//!
//! A `PageAuditSnapshot` is what the extractor knows about one page. The
//! nested sub-records are `Option`s: a collaborator that could not produce
//! one leaves it out and the matching category falls back to a fixed
//! neutral score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ====== Page snapshot ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageAuditSnapshot {
    pub url: String,
    pub keyword: String,
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub headings: BTreeMap<String, HeadingGroup>,
    pub word_count: usize,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub images: Vec<ImageAsset>,
    pub canonical_url: Option<String>,
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
    pub is_https: bool,
    pub has_canonical_mismatch: bool,

    pub schema: Option<SchemaMarkup>,
    pub security_headers: Option<SecurityHeaders>,
    pub accessibility: Option<AccessibilitySignals>,
    pub content_quality: Option<ContentQuality>,
    pub social: Option<SocialMeta>,
    pub indexability: Option<IndexabilitySignals>,
    pub eeat: Option<EeatSignals>,
    pub comprehensiveness: Option<ContentComprehensiveness>,
    pub broken_links: Vec<BrokenLink>,
}

impl PageAuditSnapshot {
    /// A title that is absent or blank counts as missing.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn has_meta_description(&self) -> bool {
        self.meta_description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    /// Recorded title length, or the character count when the extractor
    /// left the length unset.
    pub fn title_chars(&self) -> usize {
        match (&self.title, self.title_length) {
            (Some(title), 0) => title.trim().chars().count(),
            (_, len) => len,
        }
    }

    pub fn meta_description_chars(&self) -> usize {
        match (&self.meta_description, self.meta_description_length) {
            (Some(desc), 0) => desc.trim().chars().count(),
            (_, len) => len,
        }
    }

    pub fn has_canonical(&self) -> bool {
        self.canonical_url
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    /// Number of headings recorded for a tag such as `"h1"`.
    pub fn heading_count(&self, tag: &str) -> usize {
        self.headings.get(tag).map(|h| h.count).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingGroup {
    pub count: usize,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageAsset {
    pub src: String,
    pub has_alt: bool,
    pub alt: Option<String>,
    /// Lowercase file extension, empty when unknown.
    pub format: String,
    pub lazy_loaded: bool,
}

impl ImageAsset {
    pub const NEXT_GEN_FORMATS: [&'static str; 2] = ["webp", "avif"];

    pub fn is_next_gen(&self) -> bool {
        Self::NEXT_GEN_FORMATS.contains(&self.format.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrokenLink {
    pub url: String,
    pub status_code: Option<u16>,
}

// ====== Optional sub-records ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaMarkup {
    pub types: Vec<String>,
    pub has_json_ld: bool,
    pub has_microdata: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityHeaders {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

impl SecurityHeaders {
    /// Response headers tracked for the best-practices check.
    pub const TRACKED: [&'static str; 6] = [
        "strict-transport-security",
        "content-security-policy",
        "x-frame-options",
        "x-content-type-options",
        "referrer-policy",
        "permissions-policy",
    ];

    pub fn present_count(&self) -> usize {
        self.present.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySignals {
    pub has_viewport: bool,
    pub has_lang_attribute: bool,
    pub total_images: usize,
    pub images_without_alt: usize,
    pub unlabeled_inputs: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentQuality {
    /// Flesch-Kincaid grade level.
    pub readability_grade: f64,
    /// Occurrences of the target keyword in the body text.
    pub keyword_count: usize,
    /// Keyword occurrences per hundred words.
    pub keyword_density: f64,
    pub keyword_in_title: bool,
    pub keyword_in_h1: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMeta {
    pub open_graph: OpenGraphTags,
    pub twitter: TwitterTags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenGraphTags {
    pub title: bool,
    pub description: bool,
    pub image: bool,
}

impl OpenGraphTags {
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.title, "og:title"),
            (self.description, "og:description"),
            (self.image, "og:image"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, tag)| tag)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterTags {
    pub card: bool,
    pub title: bool,
    pub description: bool,
    pub image: bool,
}

impl TwitterTags {
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.card, "twitter:card"),
            (self.title, "twitter:title"),
            (self.description, "twitter:description"),
            (self.image, "twitter:image"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, tag)| tag)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStatus {
    /// Canonical present and pointing at the page itself.
    #[default]
    Valid,
    Missing,
    Mismatch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexabilitySignals {
    pub has_noindex: bool,
    pub has_nofollow: bool,
    pub canonical_status: CanonicalStatus,
    pub has_redirect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustSignal {
    Copyright,
    PhysicalAddress,
    SocialProfiles,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EeatSignals {
    pub has_author_info: bool,
    pub has_about_page: bool,
    pub has_contact_page: bool,
    pub has_privacy_policy: bool,
    pub has_terms_of_service: bool,
    pub signals: Vec<TrustSignal>,
}

impl EeatSignals {
    pub fn has_signal(&self, signal: TrustSignal) -> bool {
        self.signals.contains(&signal)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentComprehensiveness {
    pub section_count: usize,
    pub topic_coverage: usize,
    pub has_faq: bool,
    pub has_table_of_contents: bool,
    pub entity_count: usize,
    pub read_time_minutes: f64,
}

// ====== Core Web Vitals ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    Poor,
}

impl VitalRating {
    pub const LCP_GOOD_MS: f64 = 2500.0;
    pub const LCP_POOR_MS: f64 = 4000.0;
    pub const INP_GOOD_MS: f64 = 200.0;
    pub const INP_POOR_MS: f64 = 500.0;
    pub const CLS_GOOD: f64 = 0.1;
    pub const CLS_POOR: f64 = 0.25;

    fn classify(value: f64, good: f64, poor: f64) -> Self {
        if value <= good {
            VitalRating::Good
        } else if value <= poor {
            VitalRating::NeedsImprovement
        } else {
            VitalRating::Poor
        }
    }

    pub fn for_lcp(ms: f64) -> Self {
        Self::classify(ms, Self::LCP_GOOD_MS, Self::LCP_POOR_MS)
    }

    pub fn for_inp(ms: f64) -> Self {
        Self::classify(ms, Self::INP_GOOD_MS, Self::INP_POOR_MS)
    }

    pub fn for_cls(value: f64) -> Self {
        Self::classify(value, Self::CLS_GOOD, Self::CLS_POOR)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreWebVitalsSnapshot {
    /// Lab performance score, 0-100.
    pub performance_score: f64,
    pub lcp_ms: Option<f64>,
    pub inp_ms: Option<f64>,
    pub cls: Option<f64>,
    pub fcp_ms: Option<f64>,
    pub ttfb_ms: Option<f64>,
    pub lcp_rating: Option<VitalRating>,
    pub inp_rating: Option<VitalRating>,
    pub cls_rating: Option<VitalRating>,
}

impl CoreWebVitalsSnapshot {
    /// Reported rating, or one derived from the raw value.
    pub fn lcp(&self) -> Option<VitalRating> {
        self.lcp_rating.or_else(|| self.lcp_ms.map(VitalRating::for_lcp))
    }

    pub fn inp(&self) -> Option<VitalRating> {
        self.inp_rating.or_else(|| self.inp_ms.map(VitalRating::for_inp))
    }

    pub fn cls(&self) -> Option<VitalRating> {
        self.cls_rating.or_else(|| self.cls.map(VitalRating::for_cls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserializes_with_absent_sub_records() {
        let json = r#"{
            "url": "https://example.com",
            "title": "Example",
            "titleLength": 7,
            "wordCount": 50,
            "hasRobotsTxt": true
        }"#;
        let page: PageAuditSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(page.title_length, 7);
        assert!(page.has_robots_txt);
        assert!(page.schema.is_none());
        assert!(page.eeat.is_none());
        assert!(page.images.is_empty());
        assert_eq!(page.heading_count("h1"), 0);
    }

    #[test]
    fn test_blank_title_counts_as_missing() {
        let page = PageAuditSnapshot {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(!page.has_title());
    }

    #[test]
    fn test_unknown_trust_signal_is_tolerated() {
        let json = r#"{"hasAuthorInfo": true, "signals": ["copyright", "award-badge"]}"#;
        let eeat: EeatSignals = serde_json::from_str(json).unwrap();

        assert!(eeat.has_signal(TrustSignal::Copyright));
        assert_eq!(eeat.signals[1], TrustSignal::Unrecognized);
    }

    #[test]
    fn test_vital_rating_thresholds_are_inclusive() {
        assert_eq!(VitalRating::for_lcp(2500.0), VitalRating::Good);
        assert_eq!(VitalRating::for_lcp(2501.0), VitalRating::NeedsImprovement);
        assert_eq!(VitalRating::for_lcp(4000.0), VitalRating::NeedsImprovement);
        assert_eq!(VitalRating::for_lcp(4001.0), VitalRating::Poor);
        assert_eq!(VitalRating::for_inp(500.0), VitalRating::NeedsImprovement);
        assert_eq!(VitalRating::for_cls(0.3), VitalRating::Poor);
    }

    #[test]
    fn test_explicit_rating_wins_over_raw_value() {
        let vitals: CoreWebVitalsSnapshot = serde_json::from_str(
            r#"{"performanceScore": 80, "lcpMs": 5200, "lcpRating": "needs-improvement", "cls": 0.02}"#,
        )
        .unwrap();

        assert_eq!(vitals.lcp(), Some(VitalRating::NeedsImprovement));
        assert_eq!(vitals.cls(), Some(VitalRating::Good));
        assert_eq!(vitals.inp(), None);
    }

    #[test]
    fn test_missing_social_tags_are_listed() {
        let og = OpenGraphTags {
            title: true,
            description: false,
            image: false,
        };
        assert_eq!(og.missing(), vec!["og:description", "og:image"]);
    }
}
