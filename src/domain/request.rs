//! Per-audit settings supplied alongside the HTML document.
//!
//! Everything the extractor cannot learn from markup alone (response
//! headers, robots.txt/sitemap discovery, link checking, redirects) is
//! provided by the caller here.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::snapshot::BrokenLink;
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditRequest {
    pub url: String,
    pub keyword: String,
    /// URL the request ended on after redirects, when it differs.
    pub final_url: Option<String>,
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
    pub response_headers: Vec<ResponseHeader>,
    pub broken_links: Vec<BrokenLink>,
}

impl AuditRequest {
    pub fn new(url: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response_headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub name: String,
    pub value: String,
}

impl FromStr for ResponseHeader {
    type Err = AppError;

    /// Parses `Name: value`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once(':')
            .ok_or_else(|| AppError::InvalidInput(format!("expected 'Name: value', got '{}'", s)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(format!("empty header name in '{}'", s)));
        }
        Ok(Self {
            name: name.to_ascii_lowercase(),
            value: value.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parsing() {
        let header: ResponseHeader = "Strict-Transport-Security: max-age=63072000".parse().unwrap();
        assert_eq!(header.name, "strict-transport-security");
        assert_eq!(header.value, "max-age=63072000");

        assert!("no-colon".parse::<ResponseHeader>().is_err());
        assert!(": value".parse::<ResponseHeader>().is_err());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut request = AuditRequest::new("https://example.com", "shoes");
        request.response_headers.push("X-Robots-Tag: noindex".parse().unwrap());

        assert_eq!(request.header("x-robots-tag"), Some("noindex"));
        assert_eq!(request.header("content-security-policy"), None);
    }
}
