use std::path::PathBuf;

use clap::{Parser, Subcommand};

use runplot::SummaryFormat;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Aggregate every `{name}-{n}.txt` run sequence in a directory
    Summarize {
        /// Directory holding the run files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Where to write summaries (defaults to DIR)
        #[arg(short, long, value_name = "OUT_DIR")]
        output: Option<PathBuf>,

        /// Summary file format
        #[arg(long, value_enum, default_value_t = SummaryFormat::Txt)]
        format: SummaryFormat,
    },

    /// Draw text summaries as mean lines over ±2 stderr bands
    Plot {
        /// Summary files written by `summarize`
        #[arg(value_name = "SUMMARY", required = true)]
        summaries: Vec<PathBuf>,

        /// Output image (.png or .svg)
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Series label, in the order of SUMMARY (defaults to the recorded name)
        #[arg(long = "label")]
        labels: Vec<String>,

        /// Draw this label above its curve instead of below
        #[arg(long = "above", value_name = "LABEL")]
        above: Vec<String>,

        /// x-axis title
        #[arg(long)]
        xlabel: Option<String>,

        /// y-axis title
        #[arg(long)]
        ylabel: Option<String>,

        /// Plot running totals with the cumulative stderr
        #[arg(long, default_value_t = false)]
        cumulative: bool,

        /// Image size in pixels
        #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_size)]
        size: (u32, u32),
    },

    /// Open the interactive viewer
    View {
        /// Run directory to load at start-up
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

/// Parse a size like "800x600".
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("size must be non-zero".to_string());
    }
    Ok((w, h))
}
