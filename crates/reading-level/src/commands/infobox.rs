//! Infobox command: print only the reading guide, ready to paste into a page.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use super::analyze_input_file;

/// Arguments for the `infobox` subcommand.
#[derive(Args, Debug)]
pub struct InfoboxArgs {
    /// Markdown file to analyze.
    pub file: Utf8PathBuf,
}

/// Print the rendered info box for a file.
///
/// With `--json` the box is wrapped as `{"file": ..., "info_box": ...}`.
#[instrument(name = "cmd_infobox", skip_all, fields(file = %args.file))]
pub fn cmd_infobox(
    args: InfoboxArgs,
    global_json: bool,
    max_input_bytes: Option<u64>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing infobox command");

    let analysis = analyze_input_file(&args.file, max_input_bytes)?;
    let info_box = analysis.info_box();

    if global_json {
        let value = serde_json::json!({
            "file": analysis.file,
            "info_box": info_box,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{info_box}");
    }
    Ok(())
}
