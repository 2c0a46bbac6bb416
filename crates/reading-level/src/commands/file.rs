//! File command: full analysis of one markdown document.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use reading_level_core::DocumentAnalysis;

use super::analyze_input_file;

/// Arguments for the `file` subcommand.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Markdown file to analyze.
    pub file: Utf8PathBuf,
}

#[derive(Serialize)]
struct FileReport<'a> {
    #[serde(flatten)]
    analysis: &'a DocumentAnalysis,
    info_box: String,
}

/// Analyze a file and print its info box, detailed metrics, and suggestions.
#[instrument(name = "cmd_file", skip_all, fields(file = %args.file))]
pub fn cmd_file(
    args: FileArgs,
    global_json: bool,
    max_input_bytes: Option<u64>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, json_output = global_json, "executing file command");

    let analysis = analyze_input_file(&args.file, max_input_bytes)?;

    if global_json {
        let report = FileReport {
            analysis: &analysis,
            info_box: analysis.info_box(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", analysis.info_box());
    print_details(&analysis);
    Ok(())
}

fn print_details(analysis: &DocumentAnalysis) {
    let m = &analysis.metrics;
    let time = &analysis.reading_time.breakdown;

    println!("{}", "Detailed Metrics".bold().underline());
    println!("{}: {:.1}", "Grade level".dimmed(), m.grade_level);
    println!(
        "{}: {:.1} ({})",
        "Flesch score".dimmed(),
        m.flesch_score,
        analysis.level.flesch_interpretation
    );
    println!("{}: {:.1}%", "Technical density".dimmed(), m.technical_density);
    println!("{}: {}", "Total words".dimmed(), m.total_words);
    println!("{}: {}", "Code blocks".dimmed(), m.code_blocks);
    println!(
        "{}: {} text, {} code, {} other (minutes)",
        "Time breakdown".dimmed(),
        time.text,
        time.code,
        time.other
    );

    println!();
    println!("{} {}", "Level:".bold(), analysis.level.level.cyan());
    for reason in &analysis.level.reasoning {
        println!("  - {reason}");
    }

    if !analysis.suggestions.is_empty() {
        println!();
        println!("{}", "Improvement Suggestions".bold().underline());
        for suggestion in &analysis.suggestions {
            println!("  {} {suggestion}", "•".yellow());
        }
    }
}
