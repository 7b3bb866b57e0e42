pub mod analysis;

pub use analysis::{
    audit_command, instructions_command, load_json, score_command, AuditReport, OutputFormat,
    PageArgs,
};
