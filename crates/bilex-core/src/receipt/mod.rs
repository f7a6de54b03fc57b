//! Receipt text analysis: normalization, pattern rules, and the
//! heuristic extractor.

pub mod category;
pub mod heuristics;
pub mod normalize;
pub mod rules;

pub use category::infer_category;
pub use heuristics::extract_guess;
pub use normalize::{clean_ocr_text, normalize_lines};
