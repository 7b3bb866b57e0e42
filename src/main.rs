// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seo_health::commands::{self, OutputFormat, PageArgs};
use seo_health::domain::models::Severity;
use seo_health::lifecycle;

/// Page-level SEO health scoring
#[derive(Parser, Debug)]
#[command(name = "seo-health")]
#[command(version)]
#[command(about = "Score a page's SEO health across fifteen weighted categories", long_about = None)]
struct Cli {
    /// Enable debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a saved page snapshot (JSON)
    Score {
        /// PageAuditSnapshot as JSON
        #[arg(long)]
        audit: PathBuf,

        /// Core Web Vitals snapshot as JSON
        #[arg(long)]
        vitals: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, env = "SEO_HEALTH_FORMAT", default_value = "text")]
        format: OutputFormat,
    },

    /// Extract a snapshot from saved HTML and score it
    Audit {
        #[command(flatten)]
        page: PageArgs,

        /// Output format
        #[arg(short, long, value_enum, env = "SEO_HEALTH_FORMAT", default_value = "text")]
        format: OutputFormat,
    },

    /// Print a numbered fix list for the page
    Instructions {
        #[command(flatten)]
        page: PageArgs,

        /// Least severe issue level to include
        #[arg(long, env = "SEO_HEALTH_MIN_SEVERITY", default_value = "notice")]
        min_severity: Severity,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    lifecycle::init_logging(cli.verbose);

    let output = match &cli.command {
        Commands::Score {
            audit,
            vitals,
            format,
        } => commands::score_command(audit, vitals.as_deref(), *format)
            .with_context(|| format!("Failed to score {}", audit.display()))?,
        Commands::Audit { page, format } => commands::audit_command(page, *format)
            .with_context(|| format!("Failed to audit {}", page.html.display()))?,
        Commands::Instructions { page, min_severity } => {
            commands::instructions_command(page, *min_severity)
                .with_context(|| format!("Failed to build instructions for {}", page.url))?
        }
    };

    print!("{}", output);
    Ok(())
}
