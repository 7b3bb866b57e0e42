//! HTML auditor: turns a fetched document plus request metadata into a
//! [`PageAuditSnapshot`] for the health engine.
//!
//! Everything measurable from markup is extracted here; facts that need
//! the network (robots.txt, sitemap, response headers, link status) come
//! in through the [`AuditRequest`].

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::domain::adapters::heading_inventory;
use crate::domain::request::AuditRequest;
use crate::domain::snapshot::{
    AccessibilitySignals, CanonicalStatus, ContentComprehensiveness, ContentQuality, EeatSignals,
    ImageAsset, IndexabilitySignals, PageAuditSnapshot, SchemaMarkup, SecurityHeaders, SocialMeta,
    TrustSignal,
};
use crate::error::{AppError, Result};
use crate::extractor::text_metrics;
use crate::extractor::{ExtractedHeading, ExtractedSchema, PageExtractor, TrustMarkers};

/// Builds snapshots from raw HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAuditor;

impl HtmlAuditor {
    pub fn new() -> Self {
        Self
    }

    /// Audit one document. Fails only when the page URL is unusable.
    pub fn audit(&self, html: &str, request: &AuditRequest) -> Result<PageAuditSnapshot> {
        let page_url = Url::parse(&request.url).map_err(|e| AppError::invalid_url(&request.url, e))?;
        let final_url = match request.final_url.as_deref() {
            Some(raw) => Some(Url::parse(raw).map_err(|e| AppError::invalid_url(raw, e))?),
            None => None,
        };
        let served_url = final_url.as_ref().unwrap_or(&page_url);

        let document = Html::parse_document(html);

        let title = PageExtractor::extract_title(&document);
        let meta_description = PageExtractor::extract_meta_description(&document);
        let canonical_url = PageExtractor::extract_canonical(&document)
            .map(|href| resolve(&page_url, &href));
        let body_text = PageExtractor::extract_body_text(&document);
        let word_count = body_text.split_whitespace().count();
        let headings = PageExtractor::extract_headings(&document);
        let images: Vec<ImageAsset> = PageExtractor::extract_images(&document, page_url.as_str())
            .into_iter()
            .map(ImageAsset::from)
            .collect();
        let (internal_links, external_links, _) =
            PageExtractor::extract_links(&document, page_url.as_str());
        let schema = PageExtractor::extract_schema(&document);
        let trust = PageExtractor::extract_trust_markers(&document, &body_text, &schema);

        let canonical = canonical_status(canonical_url.as_deref(), &page_url, final_url.as_ref());
        let indexability = IndexabilitySignals {
            has_noindex: false,
            has_nofollow: false,
            canonical_status: canonical,
            has_redirect: final_url
                .as_ref()
                .is_some_and(|f| normalize(f.as_str()) != normalize(page_url.as_str())),
        };
        let indexability = apply_robots_directives(
            indexability,
            PageExtractor::extract_meta_robots(&document).as_deref(),
            request.header("x-robots-tag"),
        );

        let h1_texts: Vec<&str> = headings
            .iter()
            .filter(|h| h.level == 1)
            .map(|h| h.text.as_str())
            .collect();
        let keyword_count = text_metrics::count_keyword(&body_text, &request.keyword);
        let content_quality = ContentQuality {
            readability_grade: text_metrics::flesch_kincaid_grade(&body_text),
            keyword_count,
            keyword_density: text_metrics::keyword_density(keyword_count, word_count),
            keyword_in_title: title
                .as_deref()
                .is_some_and(|t| text_metrics::contains_keyword(t, &request.keyword)),
            keyword_in_h1: h1_texts
                .iter()
                .any(|t| text_metrics::contains_keyword(t, &request.keyword)),
        };

        let accessibility = AccessibilitySignals {
            has_viewport: PageExtractor::has_viewport(&document),
            has_lang_attribute: PageExtractor::extract_html_lang(&document).is_some(),
            total_images: images.len(),
            images_without_alt: images.iter().filter(|i| !i.has_alt).count(),
            unlabeled_inputs: PageExtractor::count_unlabeled_inputs(&document),
        };

        let comprehensiveness = ContentComprehensiveness {
            section_count: headings.iter().filter(|h| h.level == 2).count(),
            topic_coverage: headings.iter().filter(|h| h.level == 2 || h.level == 3).count(),
            has_faq: has_faq(&headings, &schema),
            has_table_of_contents: PageExtractor::has_table_of_contents(&document, &body_text),
            entity_count: text_metrics::count_entities(&body_text),
            read_time_minutes: text_metrics::read_time_minutes(word_count),
        };

        let snapshot = PageAuditSnapshot {
            url: request.url.clone(),
            keyword: request.keyword.clone(),
            title_length: title.as_deref().map(|t| t.chars().count()).unwrap_or(0),
            title,
            meta_description_length: meta_description
                .as_deref()
                .map(|d| d.chars().count())
                .unwrap_or(0),
            meta_description,
            headings: heading_inventory(&headings),
            word_count,
            internal_links,
            external_links,
            images,
            has_canonical_mismatch: canonical == CanonicalStatus::Mismatch,
            canonical_url,
            has_robots_txt: request.has_robots_txt,
            has_sitemap: request.has_sitemap,
            is_https: served_url.scheme() == "https",
            schema: Some(schema_markup(schema)),
            security_headers: security_headers(request),
            accessibility: Some(accessibility),
            content_quality: Some(content_quality),
            social: Some(SocialMeta::from(PageExtractor::extract_social_tags(&document))),
            indexability: Some(indexability),
            eeat: Some(eeat_signals(&trust)),
            comprehensiveness: Some(comprehensiveness),
            broken_links: request.broken_links.clone(),
        };

        debug!(
            "HTML audit of {}: {} words, {} headings, {} images, {} internal links",
            snapshot.url,
            snapshot.word_count,
            headings.len(),
            snapshot.images.len(),
            snapshot.internal_links.len()
        );

        Ok(snapshot)
    }
}

// ====== Helpers ======

fn resolve(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Comparison form of a URL: no fragment, no trailing slash.
fn normalize(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.as_str().trim_end_matches('/').to_string()
        }
        Err(_) => raw.trim().trim_end_matches('/').to_string(),
    }
}

fn canonical_status(canonical: Option<&str>, page_url: &Url, final_url: Option<&Url>) -> CanonicalStatus {
    let Some(canonical) = canonical else {
        return CanonicalStatus::Missing;
    };
    let canonical = normalize(canonical);
    let matches_page = canonical == normalize(page_url.as_str())
        || final_url.is_some_and(|f| canonical == normalize(f.as_str()));

    if matches_page {
        CanonicalStatus::Valid
    } else {
        CanonicalStatus::Mismatch
    }
}

/// Fold `meta robots` and `X-Robots-Tag` directives into the signals.
fn apply_robots_directives(
    mut signals: IndexabilitySignals,
    meta: Option<&str>,
    header: Option<&str>,
) -> IndexabilitySignals {
    let directives = [meta, header]
        .into_iter()
        .flatten()
        .flat_map(|value| value.split(','))
        .map(|d| d.trim().to_ascii_lowercase());

    for directive in directives {
        // Header values may be scoped to a user agent ("googlebot: noindex").
        let directive = directive.rsplit(':').next().unwrap_or("").trim();
        match directive {
            "noindex" => signals.has_noindex = true,
            "nofollow" => signals.has_nofollow = true,
            "none" => {
                signals.has_noindex = true;
                signals.has_nofollow = true;
            }
            _ => {}
        }
    }
    signals
}

fn has_faq(headings: &[ExtractedHeading], schema: &ExtractedSchema) -> bool {
    schema
        .json_ld_types
        .iter()
        .chain(&schema.microdata_types)
        .any(|t| t == "FAQPage")
        || headings.iter().any(|h| {
            let text = h.text.to_lowercase();
            text.contains("faq") || text.contains("frequently asked")
        })
}

fn schema_markup(schema: ExtractedSchema) -> SchemaMarkup {
    let mut types: Vec<String> = Vec::new();
    for ty in schema.json_ld_types.into_iter().chain(schema.microdata_types) {
        if !types.contains(&ty) {
            types.push(ty);
        }
    }
    SchemaMarkup {
        types,
        has_json_ld: schema.has_json_ld,
        has_microdata: schema.has_microdata,
    }
}

/// Tracked headers, or `None` when the caller supplied no headers at all.
fn security_headers(request: &AuditRequest) -> Option<SecurityHeaders> {
    if request.response_headers.is_empty() {
        return None;
    }
    let (present, missing): (Vec<&str>, Vec<&str>) = SecurityHeaders::TRACKED
        .iter()
        .copied()
        .partition(|name| request.header(name).is_some());

    Some(SecurityHeaders {
        present: present.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
    })
}

fn eeat_signals(trust: &TrustMarkers) -> EeatSignals {
    let signals = [
        (trust.copyright, TrustSignal::Copyright),
        (trust.physical_address, TrustSignal::PhysicalAddress),
        (trust.social_profiles, TrustSignal::SocialProfiles),
    ]
    .into_iter()
    .filter_map(|(found, signal)| found.then_some(signal))
    .collect();

    EeatSignals {
        has_author_info: trust.author,
        has_about_page: trust.about_page,
        has_contact_page: trust.contact_page,
        has_privacy_policy: trust.privacy_policy,
        has_terms_of_service: trust.terms_of_service,
        signals,
    }
}
