mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::{Args, Command};
use runplot::{app, read_summary, summarize_directory, Figure};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Summarize { dir, output, format } => {
            let written = summarize_directory(&dir, output.as_deref(), format)
                .with_context(|| format!("summarizing {}", dir.display()))?;
            info!("Wrote {} summaries", written.len());
        }
        Command::Plot {
            summaries,
            output,
            labels,
            above,
            xlabel,
            ylabel,
            cumulative,
            size,
        } => {
            let mut figure = Figure::new().with_size(size.0, size.1);
            for (i, path) in summaries.iter().enumerate() {
                add_summary(&mut figure, path, labels.get(i), &above, cumulative)?;
            }
            if xlabel.is_some() || ylabel.is_some() {
                figure.set_labels(
                    xlabel.as_deref().unwrap_or(""),
                    ylabel.as_deref().unwrap_or(""),
                );
            }
            figure.set_tick_style();
            figure.save(&output)?;
        }
        Command::View { dir } => {
            app::run_viewer(dir.as_deref())
                .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))?;
        }
    }

    Ok(())
}

fn add_summary(
    figure: &mut Figure,
    path: &Path,
    label: Option<&String>,
    above: &[String],
    cumulative: bool,
) -> Result<()> {
    let summary = read_summary(path)?;
    let label = label.cloned().unwrap_or_else(|| summary.name.clone());
    let place_above = above.contains(&label);

    if cumulative {
        figure.plot_results(
            &summary.cumulative_mean(),
            &summary.cumulative_stderr,
            &label,
            place_above,
        )?;
    } else {
        figure.plot_results(&summary.mean, &summary.stderr, &label, place_above)?;
    }
    Ok(())
}
