//! Core library for bill data extraction.
//!
//! This crate turns noisy OCR text recovered from a photographed receipt
//! into a sanitized expense draft. It provides:
//! - Text normalization of raw OCR output
//! - Heuristic extraction (merchant, total, line items) from pattern rules
//! - Prompt building that anchors a generative backend to heuristic facts
//! - Response parsing and repair of free-form completions
//! - A validation boundary that coerces any candidate payload into a draft
//! - A fallback orchestrator that always produces a usable result
//!
//! The pipeline never returns an error to its caller: every failure is
//! absorbed into a lower-fidelity tier (`ai` -> `heuristic` -> `minimal`),
//! with the tier recorded for observability.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod receipt;

pub use error::ParseFailure;
pub use models::config::{BackendConfig, BilexConfig, CategoryRule, ExtractionConfig};
pub use models::expense::{
    Category, ExpenseDraft, Extraction, HeuristicGuess, PaymentMethod, ReceiptItem, Tier,
};
pub use pipeline::{
    ExtractionPipeline, Sanitizer, build_category_prompt, build_prompt, build_summary_prompt,
    parse_completion,
};
pub use receipt::{clean_ocr_text, extract_guess, normalize_lines};

/// Re-export backend types consumed by the orchestrator.
pub use bilex_backend::{BackendError, GenerativeBackend};
