//! Inspect command - show the invoice groups without writing anything.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use seiq_core::{SourceDocument, segment_source};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input batch PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text listing
    Text,
    /// JSON output
    Json,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let source = SourceDocument::from_bytes(&data)?;
    let groups = segment_source(&source);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
        OutputFormat::Text => {
            println!(
                "{} {} page(s), {} invoice group(s)",
                style("ℹ").blue(),
                source.page_count(),
                groups.len()
            );
            for group in &groups {
                let pages = group
                    .pages
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let close_date = group
                    .close_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  № {:<8} {:<24} pages [{}]  closing {}",
                    group.base_number, group.company, pages, close_date
                );
            }
        }
    }

    Ok(())
}
