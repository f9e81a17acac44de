//! Split command - run the full pipeline on a batch PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use seiq_core::pipeline::{GroupResult, RunSummary};
use seiq_core::{CompanyMaster, MailDraft, Pipeline, SealStore, SourceDocument, segment_source};

/// Master workbook file name used for auto-detection.
const MASTER_FILE_NAME: &str = "会社マスター.xlsx";

/// Seal directory name used for auto-detection.
const SEAL_DIR_NAME: &str = "電子印";

/// Arguments for the split command.
#[derive(Args)]
pub struct SplitArgs {
    /// Input batch PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Company master workbook (default: auto-detect next to the input)
    #[arg(short, long)]
    master: Option<PathBuf>,

    /// Seal image directory (default: auto-detect next to the input)
    #[arg(short, long)]
    seal_dir: Option<PathBuf>,

    /// Storage root (default: the master's 保存先 sheet, then the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write mail drafts as JSON files into this directory
    #[arg(long)]
    drafts_dir: Option<PathBuf>,

    /// Also write a summary CSV into the storage root
    #[arg(long)]
    summary: bool,
}

pub fn run(args: SplitArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let base_dir = args
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let master_path = args
        .master
        .clone()
        .or_else(|| find_in_dir_or_children(&base_dir, MASTER_FILE_NAME))
        .ok_or_else(|| {
            anyhow::anyhow!("company master ({}) not found; pass --master", MASTER_FILE_NAME)
        })?;
    let seal_dir = args
        .seal_dir
        .clone()
        .or_else(|| find_in_dir_or_children(&base_dir, SEAL_DIR_NAME))
        .ok_or_else(|| {
            anyhow::anyhow!("seal directory ({}) not found; pass --seal-dir", SEAL_DIR_NAME)
        })?;

    let master = CompanyMaster::load(&master_path)?;
    let seals = SealStore::load(&seal_dir)?;

    let output_root = args
        .output_dir
        .clone()
        .or_else(|| master.storage_root().map(Path::to_path_buf))
        .unwrap_or_else(|| base_dir.clone());

    println!("{} Input: {}", style("ℹ").blue(), args.input.display());
    println!("{} Master: {}", style("ℹ").blue(), master_path.display());
    println!("{} Output root: {}", style("ℹ").blue(), output_root.display());

    let data = fs::read(&args.input)?;
    let source = SourceDocument::from_bytes(&data)?;
    let groups = segment_source(&source);

    println!(
        "{} {} page(s), {} invoice group(s) detected",
        style("ℹ").blue(),
        source.page_count(),
        groups.len()
    );

    let pb = ProgressBar::new(groups.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} groups")
            .unwrap()
            .progress_chars("=>-"),
    );

    let pipeline = Pipeline::new(&master, &seals);
    let mut results = Vec::with_capacity(groups.len());
    let mut drafts = Vec::new();
    for group in &groups {
        let (result, draft) = pipeline.run_group(&source, group, &output_root);
        results.push(result);
        drafts.extend(draft);
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let summary = RunSummary {
        results,
        drafts,
        output_root: output_root.clone(),
    };

    if let Some(drafts_dir) = &args.drafts_dir {
        write_drafts(drafts_dir, &summary.drafts)?;
        println!(
            "{} {} mail draft(s) written to {}",
            style("✓").green(),
            summary.drafts.len(),
            drafts_dir.display()
        );
    }

    if args.summary {
        fs::create_dir_all(&output_root)?;
        let summary_path = output_root.join("summary.csv");
        write_summary(&summary_path, &summary.results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Final report
    println!();
    println!(
        "{} Processed {} group(s) in {:?}",
        style("✓").green(),
        summary.processed(),
        start.elapsed()
    );
    println!(
        "   {} succeeded, {} failed",
        style(summary.succeeded()).green(),
        style(summary.processed() - summary.succeeded()).red()
    );
    println!("   Output: {}", output_root.display());

    let failed: Vec<&GroupResult> = summary.results.iter().filter(|r| !r.succeeded()).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed groups:").red());
        for result in failed {
            println!(
                "  - {} (№ {}): {}",
                result.company,
                result.base_number,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Look for a file or directory in `base_dir`, then one level below it.
fn find_in_dir_or_children(base_dir: &Path, name: &str) -> Option<PathBuf> {
    let direct = base_dir.join(name);
    if direct.exists() {
        return Some(direct);
    }

    for entry in fs::read_dir(base_dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let candidate = path.join(name);
            if candidate.exists() {
                debug!("auto-detected {}", candidate.display());
                return Some(candidate);
            }
        }
    }
    None
}

fn write_drafts(dir: &Path, drafts: &[MailDraft]) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    for draft in drafts {
        let stem = draft
            .attachment
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("draft");
        let path = dir.join(format!("{}.json", stem));
        fs::write(&path, serde_json::to_string_pretty(draft)?)?;
        debug!("wrote draft {}", path.display());
    }
    Ok(())
}

fn write_summary(path: &Path, results: &[GroupResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "company",
        "invoice_number",
        "pages",
        "close_date",
        "stamped",
        "status",
        "output",
        "error",
    ])?;

    for result in results {
        let pages = result
            .pages
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let stamped = match result.stamped {
            Some(seiq_core::StampOutcome::Stamped) => "yes",
            Some(seiq_core::StampOutcome::Skipped) => "skipped",
            None => "",
        };

        wtr.write_record([
            result.company.as_str(),
            result.base_number.as_str(),
            &pages,
            &result
                .close_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            stamped,
            if result.succeeded() { "success" } else { "error" },
            &result
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
