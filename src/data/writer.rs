use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use regex::Regex;

use super::loader::{discover_basenames, load_results, parse_table, RunPattern};
use super::model::Summary;
use super::stats::summarize;
use crate::error::DataError;

/// Output format of an aggregated summary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SummaryFormat {
    /// `# name (N runs)` header, three space-separated columns.
    #[default]
    Txt,
    /// Header row `mean,stderr,cumulative_stderr`.
    Csv,
    /// A single JSON object.
    Json,
}

impl SummaryFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SummaryFormat::Txt => "txt",
            SummaryFormat::Csv => "csv",
            SummaryFormat::Json => "json",
        }
    }
}

// ---------------------------------------------------------------------------
// Directory summarization
// ---------------------------------------------------------------------------

/// Aggregate every run sequence in `dir` and write one summary per sequence
/// into `output_dir` (defaults to `dir`). Returns the written paths.
///
/// Each summary is written as soon as its sequence is loaded, so a failing
/// sequence leaves the summaries before it on disk.
pub fn summarize_directory(
    dir: &Path,
    output_dir: Option<&Path>,
    format: SummaryFormat,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.unwrap_or(dir);
    let mut written = Vec::new();

    for basename in discover_basenames(dir)? {
        info!("Loading {basename}");
        let set = load_results(&RunPattern::new(dir, &basename))?;
        let summary = summarize(&set).with_context(|| format!("aggregating {}", set.name))?;
        let path = output_dir.join(format!("{}.{}", summary.name, format.extension()));
        write_summary(&summary, &path, format)?;
        info!("Wrote {} ({} runs)", path.display(), summary.runs);
        written.push(path);
    }

    Ok(written)
}

/// Write a summary in the requested format.
pub fn write_summary(summary: &Summary, path: &Path, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Txt => {
            std::fs::write(path, summary_to_text(summary))
                .with_context(|| format!("writing {}", path.display()))?;
        }
        SummaryFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            for row in summary.rows() {
                writer.serialize(row).context("writing CSV row")?;
            }
            writer.flush().context("flushing CSV")?;
        }
        SummaryFormat::Json => {
            let text = serde_json::to_string_pretty(summary).context("encoding JSON")?;
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

/// Text form: header comment, then `mean stderr cumulative_stderr` per line.
pub fn summary_to_text(summary: &Summary) -> String {
    let mut out = format!("# {} ({} runs)\n", summary.name, summary.runs);
    for row in summary.rows() {
        let _ = writeln!(
            out,
            "{} {} {}",
            format_sci(row.mean),
            format_sci(row.stderr),
            format_sci(row.cumulative_stderr)
        );
    }
    out
}

/// Scientific notation with 18 fractional digits and a signed exponent of
/// at least two digits, e.g. `-1.250000000000000000e-03`.
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let raw = format!("{value:.18e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

// ---------------------------------------------------------------------------
// Reading summaries back
// ---------------------------------------------------------------------------

/// Read a text summary written by [`write_summary`].
///
/// Name and run count come from the `# name (N runs)` header; without one
/// the file stem is used as the name and the count is 0.
pub fn read_summary(path: &Path) -> Result<Summary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let table = parse_table(&text, path)?;

    if table.rows > 0 && table.columns != 3 {
        return Err(DataError::SummaryShape { found: table.columns })
            .with_context(|| format!("reading {}", path.display()));
    }

    let header = Regex::new(r"^#\s*(.*?)\s*\((\d+) runs\)\s*$").expect("valid regex");
    let parsed = text
        .lines()
        .find(|l| l.trim_start().starts_with('#'))
        .and_then(|l| header.captures(l.trim()))
        .map(|caps| (caps[1].to_string(), caps[2].parse().unwrap_or(0)));

    let (name, runs) = parsed.unwrap_or_else(|| {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("summary")
            .to_string();
        (stem, 0)
    });

    let (mean, stderr, cumulative_stderr) = if table.rows == 0 {
        (Vec::new(), Vec::new(), Vec::new())
    } else {
        (table.column(0), table.column(1), table.column(2))
    };

    Ok(Summary {
        name,
        runs,
        mean,
        stderr,
        cumulative_stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_matches_fixed_scientific_layout() {
        assert_eq!(format_sci(1.0), "1.000000000000000000e+00");
        assert_eq!(format_sci(0.0), "0.000000000000000000e+00");
        assert_eq!(format_sci(-0.00125), "-1.250000000000000000e-03");
        assert_eq!(format_sci(2.5e120), "2.500000000000000000e+120");
        assert_eq!(format_sci(f64::NAN), "nan");
        assert_eq!(format_sci(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn text_has_header_and_three_columns() {
        let s = Summary {
            name: "lander".into(),
            runs: 2,
            mean: vec![2.0, 4.0],
            stderr: vec![0.5, 0.5],
            cumulative_stderr: vec![0.5, 1.0],
        };
        let text = summary_to_text(&s);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# lander (2 runs)"));
        assert_eq!(
            lines.next(),
            Some("2.000000000000000000e+00 5.000000000000000000e-01 5.000000000000000000e-01")
        );
        assert_eq!(lines.count(), 1);
    }
}
