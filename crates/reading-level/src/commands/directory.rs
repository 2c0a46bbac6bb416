//! Directory command: sweep a tree of markdown files and summarize it.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use reading_level_core::Config;
use reading_level_core::batch::{self, BatchOutcome, SummaryReport};
use reading_level_core::level::Level;
use reading_level_core::report::format_minutes;

/// Arguments for the `directory` subcommand.
#[derive(Args, Debug)]
pub struct DirectoryArgs {
    /// Directory to search recursively for `.md` files.
    pub dir: Utf8PathBuf,

    /// Entries in each ranking (overrides config `top`).
    #[arg(long)]
    pub top: Option<usize>,

    /// Glob pattern to skip, relative to DIR (repeatable; adds to config `exclude`).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

/// Analyze every markdown file under a directory and print the summary report.
///
/// Files that fail to load are reported as warnings; only a bad root is an error.
#[instrument(name = "cmd_directory", skip_all, fields(dir = %args.dir))]
pub fn cmd_directory(
    args: DirectoryArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(dir = %args.dir, top = ?args.top, "executing directory command");

    let mut config = config.clone();
    if let Some(top) = args.top {
        config.top = Some(top);
    }
    if !args.exclude.is_empty() {
        config
            .exclude
            .get_or_insert_with(Vec::new)
            .extend(args.exclude);
    }
    let options = config
        .batch_options()
        .context("invalid exclude pattern")?;

    let progress = if quiet || global_json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
                .context("invalid progress template")?
                .progress_chars("=> "),
        );
        bar
    };

    let outcome = batch::analyze_directory(&args.dir, &options, |path, _index, total| {
        progress.set_length(total as u64);
        progress.set_message(path.to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let outcome = outcome.with_context(|| format!("failed to analyze directory {}", args.dir))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_summary(&outcome.summary);
    print_failures(&outcome, quiet);
    Ok(())
}

fn print_summary(summary: &SummaryReport) {
    println!("{}", "Summary Report".bold().underline());
    println!("{}: {}", "Total documents".dimmed(), summary.total_documents);
    if summary.failed > 0 {
        println!("{}: {}", "Failed".dimmed(), summary.failed.red());
    }

    let avg = &summary.averages;
    println!();
    println!("{}", "Averages".bold());
    println!("  {}: {:.1} minutes", "Reading time".dimmed(), avg.reading_time);
    println!("  {}: {:.1}", "Grade level".dimmed(), avg.grade_level);
    println!("  {}: {:.1}%", "Technical density".dimmed(), avg.technical_density);

    println!();
    println!("{}", "Level Distribution".bold());
    for level in Level::ALL {
        let count = summary.distribution_by_level.get(level);
        println!(
            "  {} {:<13} {:>4}  ({:>5.1}%)",
            level.emoji(),
            level.as_str(),
            count,
            percentage(count, summary.total_documents)
        );
    }

    println!();
    println!("{}", "Most Complex Documents".bold());
    for (rank, entry) in summary.most_complex.iter().enumerate() {
        println!(
            "  {}. {}: grade {:.1} ({})",
            rank + 1,
            entry.file.cyan(),
            entry.grade_level,
            entry.level
        );
    }

    println!();
    println!("{}", "Longest Reading Times".bold());
    for (rank, entry) in summary.longest_reads.iter().enumerate() {
        println!(
            "  {}. {}: {} ({})",
            rank + 1,
            entry.file.cyan(),
            format_minutes(entry.minutes),
            entry.level
        );
    }
}

fn print_failures(outcome: &BatchOutcome, quiet: bool) {
    if quiet || outcome.failures.is_empty() {
        return;
    }
    eprintln!();
    for failure in &outcome.failures {
        eprintln!("{} {}: {}", "warning:".yellow(), failure.path, failure.message);
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
