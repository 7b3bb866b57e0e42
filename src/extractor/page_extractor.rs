use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// Lazily compiled, process-wide selector for a literal CSS query.
macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse($css).expect(concat!("invalid selector: ", $css)))
    }};
}

#[derive(Debug, Clone)]
pub struct ExtractedHeading {
    pub level: i64,
    pub text: String,
    pub position: i64,
}

#[derive(Debug, Clone)]
pub struct ExtractedImage {
    pub src: String,
    pub alt: Option<String>,
    pub loading: Option<String>,
    pub is_decorative: bool,
}

#[derive(Debug, Clone)]
pub struct ExtractedLink {
    pub href: String,
    pub is_internal: bool,
    pub text: Option<String>,
}

pub type LinkLists = (Vec<String>, Vec<String>, Vec<ExtractedLink>);

/// Structured data found in the document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedSchema {
    pub json_ld_types: Vec<String>,
    pub microdata_types: Vec<String>,
    pub has_json_ld: bool,
    pub has_microdata: bool,
    /// Any JSON-LD block mentions a PostalAddress.
    pub has_postal_address: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedSocialTags {
    pub og_title: bool,
    pub og_description: bool,
    pub og_image: bool,
    pub twitter_card: bool,
    pub twitter_title: bool,
    pub twitter_description: bool,
    pub twitter_image: bool,
}

/// Trust markers used for E-E-A-T scoring.
#[derive(Debug, Clone, Default)]
pub struct TrustMarkers {
    pub author: bool,
    pub about_page: bool,
    pub contact_page: bool,
    pub privacy_policy: bool,
    pub terms_of_service: bool,
    pub copyright: bool,
    pub physical_address: bool,
    pub social_profiles: bool,
}

const SOCIAL_HOSTS: [&str; 8] = [
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
];

const NON_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

pub struct PageExtractor;

impl PageExtractor {
    pub fn extract_title(html: &Html) -> Option<String> {
        html.select(selector!("title"))
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn extract_meta_description(html: &Html) -> Option<String> {
        html.select(selector!("meta[name='description']"))
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn extract_canonical(html: &Html) -> Option<String> {
        html.select(selector!("link[rel='canonical']"))
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Visible body text, skipping script/style content.
    pub fn extract_body_text(html: &Html) -> String {
        let Some(body) = html.select(selector!("body")).next() else {
            return String::new();
        };

        let mut parts: Vec<&str> = Vec::new();
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| NON_TEXT_ELEMENTS.contains(&el.name()))
            });
            let text = text.trim();
            if !hidden && !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join(" ")
    }

    pub fn extract_word_count(html: &Html) -> i64 {
        Self::extract_body_text(html).split_whitespace().count() as i64
    }

    pub fn extract_headings(html: &Html) -> Vec<ExtractedHeading> {
        html.select(selector!("h1, h2, h3, h4, h5, h6"))
            .enumerate()
            .filter_map(|(idx, element)| {
                let tag = element.value().name();
                let level = tag.trim_start_matches('h').parse::<i64>().ok()?;
                let text = element.text().collect::<String>().trim().to_string();
                if text.is_empty() {
                    return None;
                }

                Some(ExtractedHeading {
                    level,
                    text,
                    position: idx as i64,
                })
            })
            .collect()
    }

    pub fn extract_images(html: &Html, base_url: &str) -> Vec<ExtractedImage> {
        let base = Url::parse(base_url).ok();

        html.select(selector!("img[src]"))
            .filter_map(|element| {
                let src = element.value().attr("src")?.trim().to_string();
                if src.is_empty() {
                    return None;
                }

                let resolved_src = if let Some(ref base) = base {
                    base.join(&src).map(|u| u.to_string()).unwrap_or(src)
                } else {
                    src
                };

                let alt = element.value().attr("alt").map(|s| s.trim().to_string());
                let loading = element
                    .value()
                    .attr("loading")
                    .map(|s| s.trim().to_ascii_lowercase());
                let is_decorative = alt.as_deref().map(|a| a.is_empty()).unwrap_or(false)
                    || element.value().attr("role") == Some("presentation")
                    || element.value().attr("aria-hidden") == Some("true");

                Some(ExtractedImage {
                    src: resolved_src,
                    alt,
                    loading,
                    is_decorative,
                })
            })
            .collect()
    }

    pub fn extract_links(html: &Html, base_url: &str) -> LinkLists {
        let base = Url::parse(base_url).ok();
        let base_host = base
            .as_ref()
            .and_then(|u| u.host_str())
            .map(|s| s.to_string());
        let base_port = base.as_ref().and_then(|u| u.port());

        let mut internal = Vec::new();
        let mut external = Vec::new();
        let mut all = Vec::new();

        for element in html.select(selector!("a[href]")) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();

            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
            {
                continue;
            }

            let link_text = Self::anchor_text(&element);

            let resolved = if let Some(ref base) = base {
                base.join(href)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| href.to_string())
            } else {
                href.to_string()
            };

            let is_internal = if let Ok(link_url) = Url::parse(&resolved) {
                link_url.host_str().map(|h| h.to_string()) == base_host
                    && link_url.port() == base_port
            } else {
                false
            };

            all.push(ExtractedLink {
                href: resolved.clone(),
                is_internal,
                text: link_text,
            });

            if is_internal {
                internal.push(resolved);
            } else {
                external.push(resolved);
            }
        }

        (internal, external, all)
    }

    /// Visible/accessible text for an anchor (fallbacks: aria-label, title, img alt).
    fn anchor_text(element: &ElementRef<'_>) -> Option<String> {
        let mut text = element.text().collect::<String>().trim().to_string();
        if text.is_empty() {
            if let Some(attr) = element
                .value()
                .attr("aria-label")
                .or_else(|| element.value().attr("title"))
            {
                text = attr.trim().to_string();
            }
        }
        if text.is_empty() {
            for img in element.select(selector!("img")) {
                if let Some(alt) = img.value().attr("alt") {
                    if !alt.trim().is_empty() {
                        text = alt.trim().to_string();
                        break;
                    }
                }
            }
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn extract_html_lang(html: &Html) -> Option<String> {
        html.select(selector!("html[lang]"))
            .next()
            .and_then(|el| el.value().attr("lang"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn has_viewport(html: &Html) -> bool {
        html.select(selector!("meta[name='viewport']"))
            .next()
            .and_then(|el| el.value().attr("content"))
            .is_some_and(|c| !c.trim().is_empty())
    }

    /// Content of `meta[name=robots]` and `meta[name=googlebot]`, joined.
    pub fn extract_meta_robots(html: &Html) -> Option<String> {
        let directives: Vec<String> = html
            .select(selector!("meta[name='robots'], meta[name='googlebot']"))
            .filter_map(|el| el.value().attr("content"))
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        if directives.is_empty() {
            None
        } else {
            Some(directives.join(", "))
        }
    }

    pub fn extract_schema(html: &Html) -> ExtractedSchema {
        let mut schema = ExtractedSchema::default();

        for script in html.select(selector!("script[type='application/ld+json']")) {
            let raw = script.text().collect::<String>();
            if raw.trim().is_empty() {
                continue;
            }
            schema.has_json_ld = true;
            if raw.contains("PostalAddress") {
                schema.has_postal_address = true;
            }
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => collect_json_ld_types(&value, &mut schema.json_ld_types),
                Err(e) => tracing::debug!("skipping unparsable JSON-LD block: {}", e),
            }
        }

        for element in html.select(selector!("[itemscope][itemtype]")) {
            schema.has_microdata = true;
            if let Some(itemtype) = element.value().attr("itemtype") {
                for ty in itemtype.split_whitespace() {
                    let name = ty.trim_end_matches('/').rsplit('/').next().unwrap_or(ty);
                    if !name.is_empty() {
                        schema.microdata_types.push(name.to_string());
                    }
                }
            }
        }

        schema
    }

    pub fn extract_social_tags(html: &Html) -> ExtractedSocialTags {
        let has = |property: &str| {
            html.select(selector!("meta[property], meta[name]"))
                .filter(|el| {
                    let key = el
                        .value()
                        .attr("property")
                        .or_else(|| el.value().attr("name"))
                        .unwrap_or("");
                    key.eq_ignore_ascii_case(property)
                })
                .any(|el| {
                    el.value()
                        .attr("content")
                        .is_some_and(|c| !c.trim().is_empty())
                })
        };

        ExtractedSocialTags {
            og_title: has("og:title"),
            og_description: has("og:description"),
            og_image: has("og:image"),
            twitter_card: has("twitter:card"),
            twitter_title: has("twitter:title"),
            twitter_description: has("twitter:description"),
            twitter_image: has("twitter:image"),
        }
    }

    /// Form controls with no accessible name.
    pub fn count_unlabeled_inputs(html: &Html) -> usize {
        let labeled_ids: HashSet<&str> = html
            .select(selector!("label[for]"))
            .filter_map(|label| label.value().attr("for"))
            .map(str::trim)
            .collect();

        html.select(selector!("input, select, textarea"))
            .filter(|control| {
                let el = control.value();
                if el.name() == "input" {
                    let kind = el.attr("type").unwrap_or("text").to_ascii_lowercase();
                    if matches!(
                        kind.as_str(),
                        "hidden" | "submit" | "button" | "reset" | "image"
                    ) {
                        return false;
                    }
                }

                let named = ["aria-label", "aria-labelledby", "title"]
                    .iter()
                    .any(|attr| el.attr(attr).is_some_and(|v| !v.trim().is_empty()));
                let has_label = el.id().is_some_and(|id| labeled_ids.contains(id));
                let wrapped = control.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|e| e.name() == "label")
                });

                !(named || has_label || wrapped)
            })
            .count()
    }

    pub fn extract_trust_markers(html: &Html, body_text: &str, schema: &ExtractedSchema) -> TrustMarkers {
        let mut markers = TrustMarkers {
            author: html
                .select(selector!(
                    "meta[name='author'], [rel='author'], [itemprop='author'], .author, .byline"
                ))
                .any(|el| {
                    el.value()
                        .attr("content")
                        .map(|c| !c.trim().is_empty())
                        .unwrap_or(true)
                }),
            copyright: body_text.contains('©') || body_text.to_lowercase().contains("copyright"),
            physical_address: schema.has_postal_address
                || html
                    .select(selector!("address, [itemprop='address']"))
                    .next()
                    .is_some(),
            ..Default::default()
        };

        for anchor in html.select(selector!("a[href]")) {
            let href = anchor.value().attr("href").unwrap_or("").to_lowercase();
            let text = anchor.text().collect::<String>().to_lowercase();
            let mentions = |needle: &str| href.contains(needle) || text.contains(needle);

            markers.about_page |= mentions("about");
            markers.contact_page |= mentions("contact");
            markers.privacy_policy |= mentions("privacy");
            markers.terms_of_service |=
                mentions("terms") || mentions("conditions") || href.contains("/tos");

            if let Ok(url) = Url::parse(&href) {
                if let Some(host) = url.host_str() {
                    let host = host.trim_start_matches("www.");
                    markers.social_profiles |= SOCIAL_HOSTS
                        .iter()
                        .any(|s| host == *s || host.ends_with(&format!(".{}", s)));
                }
            }
        }

        markers
    }

    pub fn has_table_of_contents(html: &Html, body_text: &str) -> bool {
        html.select(selector!(
            "#toc, .toc, [id*='table-of-contents'], [class*='table-of-contents'], [class~='ez-toc-container']"
        ))
        .next()
        .is_some()
            || body_text.to_lowercase().contains("table of contents")
    }
}

/// Collect `@type` values from a JSON-LD document, following `@graph` and
/// top-level arrays but not nested property values.
fn collect_json_ld_types(value: &serde_json::Value, types: &mut Vec<String>) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                collect_json_ld_types(item, types);
            }
        }
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(ty)) => types.push(ty.clone()),
                Some(serde_json::Value::Array(list)) => {
                    types.extend(list.iter().filter_map(|t| t.as_str()).map(String::from))
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_json_ld_types(graph, types);
            }
        }
        _ => {}
    }
}
