//! Pipeline stages: prompt building, response parsing, sanitization,
//! and the fallback orchestrator.

mod orchestrator;
mod prompt;
mod response;
mod sanitize;

pub use orchestrator::ExtractionPipeline;
pub use prompt::{build_category_prompt, build_prompt, build_summary_prompt};
pub use response::{anchor_heuristics, parse_completion};
pub use sanitize::Sanitizer;
