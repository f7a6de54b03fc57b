//! Extraction orchestrator: sequences the pipeline stages into a
//! fallback chain that always ends in a valid draft.
//!
//! Tier order: `ai` (backend parsed and sanitized, money anchored) ->
//! `heuristic` (guess-only draft) -> `minimal` (input too short for
//! heuristics). A run makes at most one backend call, no stage is
//! retried, and `process` has no error-returning exit.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use bilex_backend::{BackendError, GenerativeBackend};

use crate::models::config::BilexConfig;
use crate::models::expense::{
    Category, ExpenseDraft, Extraction, HeuristicGuess, PaymentMethod, Tier,
};
use crate::receipt::{extract_guess, infer_category, normalize_lines};

use super::prompt::{build_category_prompt, build_prompt, build_summary_prompt};
use super::response::{anchor_heuristics, parse_completion};
use super::sanitize::{Sanitizer, excerpt, money};

/// The bill data extraction pipeline.
///
/// Holds no mutable state between runs; independent documents can be
/// processed concurrently on separate calls.
pub struct ExtractionPipeline {
    config: BilexConfig,
    backend: Option<Arc<dyn GenerativeBackend>>,
    sanitizer: Sanitizer,
}

impl ExtractionPipeline {
    pub fn new(config: BilexConfig) -> Self {
        Self {
            config,
            backend: None,
            sanitizer: Sanitizer::new(),
        }
    }

    /// Attach a generative backend. Without one, every run resolves at
    /// the heuristic tier.
    pub fn with_backend(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Override the sanitizer, mainly to pin the processing date in
    /// tests.
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Process one document's OCR text into an expense draft.
    ///
    /// Never fails: callers always receive a draft plus the tier that
    /// produced it, and decide separately whether the tier warrants a
    /// quality warning.
    pub async fn process(&self, raw_text: &str) -> Extraction {
        let lines = normalize_lines(raw_text);
        let normalized_len: usize = lines.iter().map(|l| l.chars().count()).sum();

        if normalized_len < self.config.extraction.min_text_length {
            info!(
                "Normalized text too short ({} chars), using minimal-default tier",
                normalized_len
            );
            return Extraction {
                draft: self.minimal_draft(raw_text),
                tier: Tier::Minimal,
            };
        }

        let guess = extract_guess(&lines, &self.config.extraction);

        if let Some(backend) = &self.backend {
            match self.try_backend(backend.as_ref(), raw_text, &guess).await {
                Ok(draft) => {
                    info!("Draft produced by backend tier ({})", backend.name());
                    return Extraction {
                        draft,
                        tier: Tier::Ai,
                    };
                }
                Err(reason) => {
                    warn!("Backend tier failed ({reason}), falling back to heuristics");
                }
            }
        } else {
            debug!("No backend configured, using heuristics directly");
        }

        Extraction {
            draft: self.heuristic_draft(&guess, raw_text),
            tier: Tier::Heuristic,
        }
    }

    /// Categorize a free-text expense description with the backend.
    ///
    /// The reply is coerced into the closed category set; an unknown
    /// reply, a backend failure, or a missing backend all resolve to
    /// `Other`.
    pub async fn categorize(&self, description: &str, amount: Decimal) -> Category {
        let Some(backend) = &self.backend else {
            debug!("No backend configured, categorizing as Other");
            return Category::Other;
        };

        let prompt = build_category_prompt(description, amount);
        match self.bounded_generate(backend.as_ref(), &prompt).await {
            Ok(completion) => Category::parse(completion.trim()).unwrap_or(Category::Other),
            Err(reason) => {
                warn!("Categorization failed ({reason}), using Other");
                Category::Other
            }
        }
    }

    /// Generate a prose spending summary over a set of drafts. Falls
    /// back to a fixed apology line when no backend is configured or the
    /// call fails.
    pub async fn monthly_summary(&self, expenses: &[ExpenseDraft]) -> String {
        const UNAVAILABLE: &str = "Unable to generate summary at this time.";

        let Some(backend) = &self.backend else {
            debug!("No backend configured, summary unavailable");
            return UNAVAILABLE.to_string();
        };

        let prompt = build_summary_prompt(expenses);
        match self.bounded_generate(backend.as_ref(), &prompt).await {
            Ok(completion) => completion,
            Err(reason) => {
                warn!("Summary generation failed ({reason})");
                UNAVAILABLE.to_string()
            }
        }
    }

    /// One bounded backend attempt: prompt, completion, parse, anchor,
    /// sanitize. Any failure collapses into a loggable reason.
    async fn try_backend(
        &self,
        backend: &dyn GenerativeBackend,
        raw_text: &str,
        guess: &HeuristicGuess,
    ) -> Result<ExpenseDraft, String> {
        let prompt = build_prompt(raw_text, guess);
        let completion = self.bounded_generate(backend, &prompt).await?;

        let mut payload = parse_completion(&completion).map_err(|e| e.to_string())?;
        anchor_heuristics(&mut payload, guess);

        Ok(self.sanitizer.sanitize(&payload, raw_text))
    }

    /// Single backend call under the configured timeout.
    async fn bounded_generate(
        &self,
        backend: &dyn GenerativeBackend,
        prompt: &str,
    ) -> Result<String, String> {
        let deadline = Duration::from_secs(self.config.backend.timeout_secs);
        match tokio::time::timeout(deadline, backend.generate(prompt)).await {
            Ok(Ok(completion)) => Ok(completion),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(BackendError::Timeout.to_string()),
        }
    }

    /// Heuristics-only draft: everything derived from the guess plus the
    /// keyword category table.
    fn heuristic_draft(&self, guess: &HeuristicGuess, raw_text: &str) -> ExpenseDraft {
        let category = infer_category(
            &guess.merchant,
            raw_text,
            &self.config.extraction.category_rules,
        );

        let description = if guess.line_items.is_empty() {
            let mut text = excerpt(raw_text, self.config.extraction.excerpt_length);
            if raw_text.chars().count() > self.config.extraction.excerpt_length {
                text.push_str("...");
            }
            text
        } else {
            guess
                .line_items
                .iter()
                .map(|item| format!("{} ${}", item.item, money(item.price)))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let summary = if guess.line_items.is_empty() {
            format!(
                "Transaction at {} for ${}.",
                guess.merchant,
                money(guess.total_amount)
            )
        } else {
            format!(
                "Transaction at {} for ${} including {} items.",
                guess.merchant,
                money(guess.total_amount),
                guess.line_items.len()
            )
        };

        ExpenseDraft {
            title: format!("{} expense at {}", category.as_str(), guess.merchant),
            amount: guess.total_amount,
            category,
            date: self.sanitizer.today(),
            description,
            merchant: guess.merchant.clone(),
            payment_method: PaymentMethod::Other,
            summary,
            line_items: guess.line_items.clone(),
        }
    }

    /// Minimal-default draft for input too short to analyze: the largest
    /// bare numeric token stands in for the amount, everything else is
    /// defaulted.
    fn minimal_draft(&self, raw_text: &str) -> ExpenseDraft {
        let amount = crate::receipt::rules::largest_numeric_token(raw_text);

        let mut description = excerpt(raw_text, 200);
        if raw_text.chars().count() > 200 {
            description.push_str("...");
        }

        ExpenseDraft {
            title: "Receipt Processed".to_string(),
            amount,
            category: Category::Other,
            date: self.sanitizer.today(),
            description,
            merchant: "Unknown".to_string(),
            payment_method: PaymentMethod::Other,
            summary: format!(
                "Receipt processed successfully. Amount: ${}. Please review and update details as needed.",
                money(amount)
            ),
            line_items: Vec::new(),
        }
    }
}
