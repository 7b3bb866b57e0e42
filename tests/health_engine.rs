//! Integration tests for the health scoring engine.
//!
//! Fixed scenarios pin exact scores; property tests cover the invariants
//! that must hold for any snapshot.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use std::collections::BTreeMap;

use seo_health::domain::models::{Grade, HealthCategory, HealthIssue, Severity};
use seo_health::domain::snapshot::{
    AccessibilitySignals, CanonicalStatus, ContentComprehensiveness, ContentQuality,
    CoreWebVitalsSnapshot, EeatSignals, HeadingGroup, ImageAsset, IndexabilitySignals,
    OpenGraphTags, PageAuditSnapshot, SchemaMarkup, SecurityHeaders, SocialMeta, TrustSignal,
    TwitterTags, VitalRating,
};
use seo_health::service::health::{
    analyze_health, merge_issues, CategoryAnalyzer, Indexability, TrustSignals,
};
use seo_health::test_utils::fixtures::{bare_page, healthy_page};

fn category_score(result: &seo_health::HealthScoreResult, name: &str) -> f64 {
    result
        .category(name)
        .unwrap_or_else(|| panic!("missing category {}", name))
        .score
}

// ====== Scenarios ======

#[test]
fn test_empty_http_page_grades_f() {
    let result = analyze_health(&bare_page(), None);

    assert_eq!(category_score(&result, "Title Tag"), 0.0);
    assert_eq!(category_score(&result, "Meta Description"), 0.0);
    assert_eq!(category_score(&result, "Heading Structure"), 20.0);
    assert_eq!(category_score(&result, "Content Depth"), 10.0);
    assert_eq!(category_score(&result, "Security & Best Practices"), 10.0);
    assert_eq!(result.overall, 29);
    assert_eq!(result.grade, Grade::F);
}

#[test]
fn test_good_vitals_add_performance_points() {
    let vitals = CoreWebVitalsSnapshot {
        performance_score: 95.0,
        lcp_rating: Some(VitalRating::Good),
        cls_rating: Some(VitalRating::Good),
        inp_rating: Some(VitalRating::Good),
        ..Default::default()
    };
    let result = analyze_health(&bare_page(), Some(&vitals));

    let performance = result.category("Performance").unwrap();
    assert_eq!(performance.score, 95.0);
    assert!((performance.weighted_score - 12.35).abs() < 1e-9);
    assert!(performance.issues.is_empty());
    assert_eq!(result.overall, 35);
    assert_eq!(result.grade, Grade::F);
}

#[test]
fn test_partial_trust_signals() {
    let page = PageAuditSnapshot {
        eeat: Some(EeatSignals {
            has_author_info: true,
            has_about_page: true,
            has_contact_page: false,
            has_privacy_policy: true,
            has_terms_of_service: false,
            signals: vec![],
        }),
        ..bare_page()
    };
    let category = TrustSignals.analyze(&page, None);

    assert_eq!(category.score, 50.0);
    assert_eq!(category.weighted_score, 3.0);
    assert_eq!(category.issues.len(), 1);
    assert_eq!(category.issues[0].severity, Severity::Notice);
    assert!(category.issues[0].message.to_lowercase().contains("contact"));
}

#[test]
fn test_noindex_with_canonical_mismatch() {
    let page = PageAuditSnapshot {
        indexability: Some(IndexabilitySignals {
            has_noindex: true,
            canonical_status: CanonicalStatus::Mismatch,
            ..Default::default()
        }),
        ..bare_page()
    };
    let category = Indexability.analyze(&page, None);

    assert_eq!(category.score, 0.0);
    assert_eq!(category.weighted_score, 0.0);
    assert_eq!(category.issues.len(), 2);
    assert!(category.issues.iter().all(|i| i.severity == Severity::Critical));
}

#[test]
fn test_issue_sort_is_stable_across_categories() {
    let category = |name: &str, issues: Vec<HealthIssue>| HealthCategory {
        name: name.into(),
        score: 0.0,
        max_score: 0,
        weighted_score: 0.0,
        issues,
    };
    let merged = merge_issues(&[
        category("A", vec![HealthIssue::new(Severity::Critical, "A", "a", "")]),
        category("B", vec![HealthIssue::new(Severity::Warning, "B", "b", "")]),
        category("C", vec![HealthIssue::new(Severity::Critical, "C", "c", "")]),
    ]);

    let order: Vec<&str> = merged.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(order, vec!["a", "c", "b"]);
}

#[test]
fn test_healthy_page_scores_near_perfect() {
    let result = analyze_health(&healthy_page(), None);
    assert!(result.overall >= 90);
    assert_eq!(result.grade, Grade::A);
}

// ====== Properties ======

fn arb_image() -> impl Strategy<Value = ImageAsset> {
    (
        any::<bool>(),
        prop_oneof![Just("webp"), Just("avif"), Just("jpg"), Just("png"), Just("")],
        any::<bool>(),
    )
        .prop_map(|(has_alt, format, lazy_loaded)| ImageAsset {
            src: format!("https://example.com/img.{}", format),
            has_alt,
            alt: has_alt.then(|| "alt".to_string()),
            format: format.to_string(),
            lazy_loaded,
        })
}

fn arb_canonical() -> impl Strategy<Value = CanonicalStatus> {
    prop_oneof![
        Just(CanonicalStatus::Valid),
        Just(CanonicalStatus::Missing),
        Just(CanonicalStatus::Mismatch),
    ]
}

fn arb_rating() -> impl Strategy<Value = Option<VitalRating>> {
    option::of(prop_oneof![
        Just(VitalRating::Good),
        Just(VitalRating::NeedsImprovement),
        Just(VitalRating::Poor),
    ])
}

fn arb_vitals() -> impl Strategy<Value = CoreWebVitalsSnapshot> {
    (
        -10.0f64..120.0,
        option::of(0.0f64..10_000.0),
        option::of(0.0f64..2_000.0),
        option::of(0.0f64..1.0),
        arb_rating(),
    )
        .prop_map(|(performance_score, lcp_ms, inp_ms, cls, lcp_rating)| {
            CoreWebVitalsSnapshot {
                performance_score,
                lcp_ms,
                inp_ms,
                cls,
                lcp_rating,
                ..Default::default()
            }
        })
}

fn arb_signals() -> impl Strategy<
    Value = (
        Option<SchemaMarkup>,
        Option<AccessibilitySignals>,
        Option<ContentQuality>,
        Option<SocialMeta>,
    ),
> {
    (
        option::of((0usize..4, any::<bool>(), any::<bool>()).prop_map(
            |(n, has_json_ld, has_microdata)| SchemaMarkup {
                types: (0..n).map(|i| format!("Type{}", i)).collect(),
                has_json_ld,
                has_microdata,
            },
        )),
        option::of(
            (any::<bool>(), any::<bool>(), 0usize..10, 0usize..10, 0usize..4).prop_map(
                |(has_viewport, has_lang_attribute, total, without, unlabeled_inputs)| {
                    AccessibilitySignals {
                        has_viewport,
                        has_lang_attribute,
                        total_images: total,
                        images_without_alt: without.min(total),
                        unlabeled_inputs,
                    }
                },
            ),
        ),
        option::of(
            (0.0f64..25.0, 0usize..40, 0.0f64..12.0, any::<bool>(), any::<bool>()).prop_map(
                |(readability_grade, keyword_count, keyword_density, in_title, in_h1)| {
                    ContentQuality {
                        readability_grade,
                        keyword_count,
                        keyword_density,
                        keyword_in_title: in_title,
                        keyword_in_h1: in_h1,
                    }
                },
            ),
        ),
        option::of(vec(any::<bool>(), 7).prop_map(|f| SocialMeta {
            open_graph: OpenGraphTags {
                title: f[0],
                description: f[1],
                image: f[2],
            },
            twitter: TwitterTags {
                card: f[3],
                title: f[4],
                description: f[5],
                image: f[6],
            },
        })),
    )
}

fn arb_trust() -> impl Strategy<
    Value = (
        Option<IndexabilitySignals>,
        Option<EeatSignals>,
        Option<ContentComprehensiveness>,
        Option<SecurityHeaders>,
    ),
> {
    (
        option::of(
            (any::<bool>(), any::<bool>(), arb_canonical(), any::<bool>()).prop_map(
                |(has_noindex, has_nofollow, canonical_status, has_redirect)| {
                    IndexabilitySignals {
                        has_noindex,
                        has_nofollow,
                        canonical_status,
                        has_redirect,
                    }
                },
            ),
        ),
        option::of(vec(any::<bool>(), 8).prop_map(|f| {
            let signals = [
                (f[5], TrustSignal::Copyright),
                (f[6], TrustSignal::PhysicalAddress),
                (f[7], TrustSignal::SocialProfiles),
            ]
            .into_iter()
            .filter_map(|(on, s)| on.then_some(s))
            .collect();
            EeatSignals {
                has_author_info: f[0],
                has_about_page: f[1],
                has_contact_page: f[2],
                has_privacy_policy: f[3],
                has_terms_of_service: f[4],
                signals,
            }
        })),
        option::of(
            (0usize..8, 0usize..12, any::<bool>(), any::<bool>(), 0usize..20, 0.0f64..15.0)
                .prop_map(|(sections, topics, faq, toc, entities, minutes)| {
                    ContentComprehensiveness {
                        section_count: sections,
                        topic_coverage: topics,
                        has_faq: faq,
                        has_table_of_contents: toc,
                        entity_count: entities,
                        read_time_minutes: minutes,
                    }
                }),
        ),
        option::of((0usize..=6).prop_map(|n| SecurityHeaders {
            present: SecurityHeaders::TRACKED[..n].iter().map(|h| h.to_string()).collect(),
            missing: SecurityHeaders::TRACKED[n..].iter().map(|h| h.to_string()).collect(),
        })),
    )
}

fn arb_page() -> impl Strategy<Value = PageAuditSnapshot> {
    (
        (
            option::of("[A-Za-z ]{0,90}"),
            option::of("[a-z ]{0,200}"),
            0usize..4,
            0usize..6,
            0usize..3000,
        ),
        (
            0usize..10,
            0usize..4,
            vec(arb_image(), 0..8),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        ),
        arb_signals(),
        arb_trust(),
    )
        .prop_map(
            |(
                (title, description, h1, h2, word_count),
                (internal, broken, images, https, robots, sitemap, mismatch),
                (schema, accessibility, content_quality, social),
                (indexability, eeat, comprehensiveness, security_headers),
            )| {
                let mut headings = BTreeMap::new();
                for (tag, count) in [("h1", h1), ("h2", h2)] {
                    if count > 0 {
                        headings.insert(
                            tag.to_string(),
                            HeadingGroup {
                                count,
                                texts: vec!["Heading".to_string(); count],
                            },
                        );
                    }
                }

                PageAuditSnapshot {
                    url: "https://example.com/page".into(),
                    keyword: "page".into(),
                    title_length: title.as_ref().map(|t| t.chars().count()).unwrap_or(0),
                    title,
                    meta_description_length: description
                        .as_ref()
                        .map(|d| d.chars().count())
                        .unwrap_or(0),
                    meta_description: description,
                    headings,
                    word_count,
                    internal_links: (0..internal)
                        .map(|i| format!("https://example.com/{}", i))
                        .collect(),
                    external_links: vec![],
                    images,
                    canonical_url: (!mismatch).then(|| "https://example.com/page".to_string()),
                    has_robots_txt: robots,
                    has_sitemap: sitemap,
                    is_https: https,
                    has_canonical_mismatch: mismatch,
                    schema,
                    security_headers,
                    accessibility,
                    content_quality,
                    social,
                    indexability,
                    eeat,
                    comprehensiveness,
                    broken_links: (0..broken)
                        .map(|i| seo_health::domain::snapshot::BrokenLink {
                            url: format!("https://example.com/dead-{}", i),
                            status_code: Some(404),
                        })
                        .collect(),
                }
            },
        )
}

proptest! {
    /// Property: category weights always total exactly 100.
    #[test]
    fn weights_always_total_hundred(page in arb_page(), vitals in option::of(arb_vitals())) {
        let result = analyze_health(&page, vitals.as_ref());
        let total: u32 = result.categories.iter().map(|c| c.max_score).sum();
        prop_assert_eq!(total, 100);
        prop_assert_eq!(result.categories.len(), 15);
    }

    /// Property: every score stays within 0..=100 and the grade follows overall.
    #[test]
    fn scores_stay_in_bounds(page in arb_page(), vitals in option::of(arb_vitals())) {
        let result = analyze_health(&page, vitals.as_ref());

        for category in &result.categories {
            prop_assert!((0.0..=100.0).contains(&category.score), "{} scored {}", category.name, category.score);
            prop_assert!(category.weighted_score >= 0.0);
            prop_assert!(category.weighted_score <= category.max_score as f64 + 1e-9);
        }
        prop_assert!(result.overall <= 100);
        prop_assert_eq!(result.grade, Grade::from_score(result.overall));

        let sum: f64 = result.categories.iter().map(|c| c.weighted_score).sum();
        prop_assert_eq!(result.overall, sum.round() as u32);
    }

    /// Property: merged issues are ordered by severity and nothing is lost.
    #[test]
    fn issues_sorted_by_severity(page in arb_page(), vitals in option::of(arb_vitals())) {
        let result = analyze_health(&page, vitals.as_ref());

        let emitted: usize = result.categories.iter().map(|c| c.issues.len()).sum();
        prop_assert_eq!(result.issues.len(), emitted);
        for pair in result.issues.windows(2) {
            prop_assert!(pair[0].severity.rank() <= pair[1].severity.rank());
        }
    }

    /// Property: scoring is deterministic and leaves its inputs untouched.
    #[test]
    fn scoring_is_pure(page in arb_page(), vitals in option::of(arb_vitals())) {
        let page_before = page.clone();
        let vitals_before = vitals.clone();

        let first = serde_json::to_string(&analyze_health(&page, vitals.as_ref())).unwrap();
        let second = serde_json::to_string(&analyze_health(&page, vitals.as_ref())).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(page, page_before);
        prop_assert_eq!(vitals, vitals_before);
    }
}
