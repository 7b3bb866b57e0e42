//! HTML parsing helpers feeding the page auditor.

pub mod page_extractor;
pub mod text_metrics;

pub use page_extractor::{
    ExtractedHeading, ExtractedImage, ExtractedLink, ExtractedSchema, ExtractedSocialTags,
    LinkLists, PageExtractor, TrustMarkers,
};
