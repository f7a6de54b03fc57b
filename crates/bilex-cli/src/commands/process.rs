//! Process command - extract an expense draft from a single OCR text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use bilex_backend::GeminiBackend;
use bilex_core::models::config::BilexConfig;
use bilex_core::models::expense::Extraction;
use bilex_core::{ExtractionPipeline, clean_ocr_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the generative backend and use heuristics only
    #[arg(long)]
    no_ai: bool,

    /// Override the backend timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Override the backend model
    #[arg(long)]
    model: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(secs) = args.timeout_secs {
        config.backend.timeout_secs = secs;
    }
    if let Some(model) = &args.model {
        config.backend.model = model.clone();
    }

    let raw_text = read_input(&args.input)?;
    let text = clean_ocr_text(&raw_text);

    info!("Processing {} chars of OCR text", text.len());

    let pipeline = build_pipeline(config, args.no_ai);
    let extraction = pipeline.process(&text).await;

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    eprintln!(
        "{} Draft produced by {} tier",
        style("ℹ").blue(),
        extraction.tier.as_str()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load config from an explicit path or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BilexConfig> {
    match config_path {
        Some(path) => Ok(BilexConfig::from_file(std::path::Path::new(path))?),
        None => Ok(BilexConfig::default()),
    }
}

/// Wire up the pipeline, attaching the Gemini backend when an API key is
/// available. Without one the pipeline still runs, heuristics only.
pub fn build_pipeline(config: BilexConfig, no_ai: bool) -> ExtractionPipeline {
    let model = config.backend.model.clone();
    let pipeline = ExtractionPipeline::new(config);

    if no_ai {
        return pipeline;
    }

    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            pipeline.with_backend(Arc::new(GeminiBackend::new(key).with_model(model)))
        }
        _ => {
            warn!("GEMINI_API_KEY not set, running heuristics only");
            pipeline
        }
    }
}

fn read_input(input: &PathBuf) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}

pub fn format_extraction(extraction: &Extraction, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_text(extraction: &Extraction) -> String {
    let draft = &extraction.draft;
    let mut output = String::new();

    output.push_str(&format!("Title:    {}\n", draft.title));
    output.push_str(&format!("Merchant: {}\n", draft.merchant));
    output.push_str(&format!("Amount:   ${}\n", draft.amount));
    output.push_str(&format!("Category: {}\n", draft.category.as_str()));
    output.push_str(&format!("Date:     {}\n", draft.date));
    output.push_str(&format!("Payment:  {}\n", draft.payment_method.as_str()));

    if !draft.line_items.is_empty() {
        output.push_str("Items:\n");
        for item in &draft.line_items {
            output.push_str(&format!("  {} ${}\n", item.item, item.price));
        }
    }

    output.push_str(&format!("\n{}\n", draft.summary));
    output.push_str(&format!("Tier: {}\n", extraction.tier.as_str()));

    output
}
