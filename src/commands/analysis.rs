use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::models::{HealthScoreResult, Recommendation, Severity};
use crate::domain::request::{AuditRequest, ResponseHeader};
use crate::domain::snapshot::{BrokenLink, CoreWebVitalsSnapshot, PageAuditSnapshot};
use crate::error::{AppError, Result};
use crate::service::{
    analyze_health, build_recommendations, HtmlAuditor, InstructionDocument, InstructionOptions,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// `AuditReport` as pretty-printed JSON
    Json,
}

/// Inputs for auditing a saved HTML page.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Path to the saved HTML document
    #[arg(long)]
    pub html: PathBuf,

    /// URL the document was fetched from
    #[arg(long, env = "SEO_HEALTH_URL")]
    pub url: String,

    /// Target keyword
    #[arg(long, env = "SEO_HEALTH_KEYWORD", default_value = "")]
    pub keyword: String,

    /// URL the fetch ended on after redirects
    #[arg(long)]
    pub final_url: Option<String>,

    /// The site serves a robots.txt
    #[arg(long)]
    pub robots_txt: bool,

    /// The site publishes an XML sitemap
    #[arg(long)]
    pub sitemap: bool,

    /// Response header as "Name: value" (repeatable)
    #[arg(long = "header")]
    pub headers: Vec<ResponseHeader>,

    /// Link found broken by a link checker (repeatable)
    #[arg(long = "broken-link")]
    pub broken_links: Vec<String>,

    /// Core Web Vitals snapshot as JSON
    #[arg(long)]
    pub vitals: Option<PathBuf>,
}

impl From<&PageArgs> for AuditRequest {
    fn from(args: &PageArgs) -> Self {
        Self {
            url: args.url.clone(),
            keyword: args.keyword.clone(),
            final_url: args.final_url.clone(),
            has_robots_txt: args.robots_txt,
            has_sitemap: args.sitemap,
            response_headers: args.headers.clone(),
            broken_links: args
                .broken_links
                .iter()
                .map(|url| BrokenLink {
                    url: url.clone(),
                    status_code: None,
                })
                .collect(),
        }
    }
}

/// JSON envelope written by the CLI. The health result inside it carries
/// no timestamp of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub url: String,
    pub keyword: String,
    pub generated_at: DateTime<Utc>,
    pub health: HealthScoreResult,
    pub recommendations: Vec<Recommendation>,
}

impl AuditReport {
    pub fn new(page: &PageAuditSnapshot, health: HealthScoreResult) -> Self {
        let recommendations = build_recommendations(&health);
        Self {
            url: page.url.clone(),
            keyword: page.keyword.clone(),
            generated_at: Utc::now(),
            health,
            recommendations,
        }
    }
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| AppError::parse(format!("{}: {}", path.display(), e)))
}

fn load_vitals(path: Option<&Path>) -> Result<Option<CoreWebVitalsSnapshot>> {
    path.map(load_json).transpose()
}

fn audit_page(args: &PageArgs) -> Result<PageAuditSnapshot> {
    let html = fs::read_to_string(&args.html)?;
    let request = AuditRequest::from(args);
    HtmlAuditor::new().audit(&html, &request)
}

// ====== Commands ======

/// Score a previously captured snapshot.
pub fn score_command(audit: &Path, vitals: Option<&Path>, format: OutputFormat) -> Result<String> {
    let page: PageAuditSnapshot = load_json(audit)?;
    let vitals = load_vitals(vitals)?;
    info!("Scoring snapshot for {}", page.url);

    let health = analyze_health(&page, vitals.as_ref());
    render(AuditReport::new(&page, health), format)
}

/// Extract a snapshot from HTML, then score it.
pub fn audit_command(args: &PageArgs, format: OutputFormat) -> Result<String> {
    let page = audit_page(args)?;
    let vitals = load_vitals(args.vitals.as_deref())?;
    info!("Auditing {} for keyword '{}'", page.url, page.keyword);

    let health = analyze_health(&page, vitals.as_ref());
    render(AuditReport::new(&page, health), format)
}

pub fn instructions_command(args: &PageArgs, min_severity: Severity) -> Result<String> {
    let page = audit_page(args)?;
    let vitals = load_vitals(args.vitals.as_deref())?;

    let health = analyze_health(&page, vitals.as_ref());
    let options = InstructionOptions {
        url: page.url.clone(),
        keyword: page.keyword.clone(),
        min_severity,
        ..Default::default()
    };
    Ok(InstructionDocument::render(&health, &options))
}

// ====== Rendering ======

fn render(report: AuditReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(render_text(&report)),
    }
}

pub fn render_text(report: &AuditReport) -> String {
    let health = &report.health;
    let mut out = String::new();

    let _ = writeln!(out, "SEO health for {}", report.url);
    if !report.keyword.is_empty() {
        let _ = writeln!(out, "Keyword: {}", report.keyword);
    }
    let _ = writeln!(out, "Overall: {}/100 (grade {})", health.overall, health.grade);

    out.push_str("\nCategories:\n");
    for category in &health.categories {
        let _ = writeln!(
            out,
            "  {:<28} {:>5.1}  {:>5.2}/{}",
            category.name, category.score, category.weighted_score, category.max_score
        );
    }

    if !health.issues.is_empty() {
        let _ = writeln!(out, "\nIssues ({}):", health.issues.len());
        for issue in &health.issues {
            let _ = writeln!(out, "  [{}] {}: {}", issue.severity, issue.category, issue.message);
            let _ = writeln!(out, "      -> {}", issue.recommendation);
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for (idx, rec) in report.recommendations.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. [{}] {} (+{:.2}): {}",
                idx + 1,
                rec.priority,
                rec.category,
                rec.potential_gain,
                rec.action
            );
        }
    }

    out
}
