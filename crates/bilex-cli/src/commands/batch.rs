//! Batch processing command for multiple OCR text files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use bilex_core::clean_ocr_text;
use bilex_core::models::expense::Extraction;

use super::process::{build_pipeline, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "scans/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file JSON drafts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write a summary CSV
    #[arg(long)]
    summary: bool,

    /// Skip the generative backend and use heuristics only
    #[arg(long)]
    no_ai: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    extraction: Option<Extraction>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = build_pipeline(config, args.no_ai);

    let paths: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    if paths.is_empty() {
        anyhow::bail!("No files matched pattern: {}", args.input);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        pb.set_message(path.display().to_string());

        let result = match fs::read_to_string(&path) {
            Ok(raw) => {
                let text = clean_ocr_text(&raw);
                let extraction = pipeline.process(&text).await;
                BatchResult {
                    path: path.clone(),
                    extraction: Some(extraction),
                    error: None,
                }
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                BatchResult {
                    path: path.clone(),
                    extraction: None,
                    error: Some(e.to_string()),
                }
            }
        };

        if let (Some(dir), Some(extraction)) = (&args.output_dir, &result.extraction) {
            let out_path = dir
                .join(path.file_stem().unwrap_or_default())
                .with_extension("json");
            fs::write(&out_path, serde_json::to_string_pretty(extraction)?)?;
            debug!("Wrote {}", out_path.display());
        }

        results.push(result);
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    if args.summary {
        let summary = build_summary_csv(&results)?;
        if let Some(dir) = &args.output_dir {
            let path = dir.join("summary.csv");
            fs::write(&path, summary)?;
            println!("{} Summary written to {}", style("✓").green(), path.display());
        } else {
            println!("{}", summary);
        }
    }

    let processed = results.iter().filter(|r| r.extraction.is_some()).count();
    let failed = results.len() - processed;

    println!(
        "{} Processed {} files ({} unreadable) in {:?}",
        style("✓").green(),
        processed,
        failed,
        start.elapsed()
    );

    for result in results.iter().filter(|r| r.error.is_some()) {
        eprintln!(
            "  {} {}: {}",
            style("✗").red(),
            result.path.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

fn build_summary_csv(results: &[BatchResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["file", "tier", "merchant", "amount", "category", "items"])?;

    for result in results {
        let Some(extraction) = &result.extraction else {
            continue;
        };
        let draft = &extraction.draft;
        wtr.write_record([
            &result.path.display().to_string(),
            extraction.tier.as_str(),
            &draft.merchant,
            &draft.amount.to_string(),
            draft.category.as_str(),
            &draft.line_items.len().to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
