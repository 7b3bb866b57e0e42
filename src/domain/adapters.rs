//! Adapter layer for converting extractor output to snapshot types.

use std::collections::BTreeMap;
use url::Url;

use crate::domain::snapshot::{HeadingGroup, ImageAsset, OpenGraphTags, SocialMeta, TwitterTags};
use crate::extractor::{ExtractedHeading, ExtractedImage, ExtractedSocialTags};

// ============================================================================
// IMAGES
// ============================================================================

impl From<ExtractedImage> for ImageAsset {
    fn from(image: ExtractedImage) -> Self {
        let format = image_format(&image.src);
        let has_alt = image.alt.is_some() || image.is_decorative;
        let lazy_loaded = image.loading.as_deref() == Some("lazy");

        Self {
            src: image.src,
            has_alt,
            alt: image.alt,
            format,
            lazy_loaded,
        }
    }
}

/// Lowercase image format from a `data:` MIME type or the path extension.
pub fn image_format(src: &str) -> String {
    if let Some(rest) = src.strip_prefix("data:image/") {
        let end = rest.find([';', ',', '+']).unwrap_or(rest.len());
        return rest[..end].to_ascii_lowercase();
    }

    let path = match Url::parse(src) {
        Ok(url) => url.path().to_string(),
        Err(_) => src.split(['?', '#']).next().unwrap_or("").to_string(),
    };
    let file = path.rsplit('/').next().unwrap_or("");

    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            if ext == "jpeg" {
                "jpg".to_string()
            } else {
                ext
            }
        }
        _ => String::new(),
    }
}

// ============================================================================
// HEADINGS
// ============================================================================

/// Group headings by tag (`h1`..`h6`), keeping document order within a tag.
pub fn heading_inventory(headings: &[ExtractedHeading]) -> BTreeMap<String, HeadingGroup> {
    let mut inventory: BTreeMap<String, HeadingGroup> = BTreeMap::new();
    for heading in headings {
        let group = inventory.entry(format!("h{}", heading.level)).or_default();
        group.count += 1;
        group.texts.push(heading.text.clone());
    }
    inventory
}

// ============================================================================
// SOCIAL TAGS
// ============================================================================

impl From<ExtractedSocialTags> for SocialMeta {
    fn from(tags: ExtractedSocialTags) -> Self {
        Self {
            open_graph: OpenGraphTags {
                title: tags.og_title,
                description: tags.og_description,
                image: tags.og_image,
            },
            twitter: TwitterTags {
                card: tags.twitter_card,
                title: tags.twitter_title,
                description: tags.twitter_description,
                image: tags.twitter_image,
            },
        }
    }
}
