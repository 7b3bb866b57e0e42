pub mod auditor;
pub mod health;
pub mod instructions;
pub mod recommendations;

pub use auditor::HtmlAuditor;
pub use health::{analyze_health, CategoryAnalyzer, ANALYZERS};
pub use instructions::{InstructionDocument, InstructionOptions};
pub use recommendations::build_recommendations;
