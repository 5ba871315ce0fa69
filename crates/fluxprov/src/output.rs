//! Output formatting: JSON, compact JSON, YAML.
//!
//! Renders data in the format selected by `--output`.

use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a serde-serializable value in the chosen format.
pub fn render<T>(format: &OutputFormat, data: &T) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end());
}
