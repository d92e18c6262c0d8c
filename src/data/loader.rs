use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;

use super::model::{RunSet, Table};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a whitespace-delimited numeric table from a file.
pub fn load_table(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_table(&text, path)?)
}

/// Load runs 0, 1, 2, … of `pattern` until the next file is missing.
///
/// Only a missing file ends the sequence. Any other IO failure or a
/// malformed file is returned as an error.
pub fn load_results(pattern: &RunPattern) -> Result<RunSet> {
    let mut runs = Vec::new();

    loop {
        let path = pattern.path(runs.len());
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => break,
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        debug!("Read {}", path.display());

        let series = parse_table(&text, &path)?
            .into_series()
            .with_context(|| format!("loading {}", path.display()))?;
        runs.push(series);
    }

    info!("Loaded {} runs", runs.len());
    Ok(RunSet {
        name: pattern.name(),
        runs,
    })
}

/// Load every run sequence in `dir`.
///
/// A sequence is any file named `{basename}-0.txt`; the basenames are
/// visited in sorted order.
pub fn load_directory(dir: &Path) -> Result<Vec<RunSet>> {
    let mut sets = Vec::new();
    for basename in discover_basenames(dir)? {
        info!("Loading {basename}");
        let pattern = RunPattern::new(dir, &basename);
        sets.push(load_results(&pattern)?);
    }
    Ok(sets)
}

/// Basenames of all `{basename}-0.txt` files in `dir`, sorted. The suffix
/// match is case-sensitive.
pub fn discover_basenames(dir: &Path) -> Result<Vec<String>> {
    let first_run = Regex::new(r"^(.+)-0\.txt$").expect("valid regex");

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("listing directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("listing directory {}", dir.display()))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(caps) = first_run.captures(file_name) {
            names.push(caps[1].to_string());
        }
    }
    names.sort();
    Ok(names)
}

// ---------------------------------------------------------------------------
// Run naming pattern
// ---------------------------------------------------------------------------

/// File naming scheme for a run sequence: `{prefix}{n}{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPattern {
    prefix: String,
    suffix: String,
    name: String,
}

impl RunPattern {
    /// `{dir}/{basename}-{n}.txt`
    pub fn new(dir: &Path, basename: &str) -> Self {
        let prefix = dir.join(format!("{basename}-")).to_string_lossy().into_owned();
        RunPattern {
            prefix,
            suffix: ".txt".to_string(),
            name: basename.to_string(),
        }
    }

    /// Build from a template with a single `{}` placeholder, e.g.
    /// `out/returns-{}.txt`.
    pub fn from_template(template: &str) -> Result<Self, DataError> {
        let (prefix, suffix) = template
            .split_once("{}")
            .ok_or_else(|| DataError::MissingPlaceholder(template.to_string()))?;
        Ok(RunPattern {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            name: name_from_prefix(prefix),
        })
    }

    /// Path of run `n`.
    pub fn path(&self, n: usize) -> PathBuf {
        PathBuf::from(format!("{}{n}{}", self.prefix, self.suffix))
    }

    /// Name of the sequence.
    pub fn name(&self) -> String {
        self.name.clone()
    }
}

/// File name of a template prefix with any trailing separator removed.
fn name_from_prefix(prefix: &str) -> String {
    let file_name = Path::new(prefix)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let trimmed = file_name.trim_end_matches(['-', '_', '.']);
    if trimmed.is_empty() {
        "runs".to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Text parsing
// ---------------------------------------------------------------------------

/// Parse the text of a numeric table.
///
/// `#` starts a comment, blank lines are skipped, fields are separated by
/// any whitespace. `path` is only used in error messages.
pub fn parse_table(text: &str, path: &Path) -> Result<Table, DataError> {
    let mut table = Table::default();

    for (line_no, line) in text.lines().enumerate() {
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };

        let start = table.values.len();
        for (field, token) in content.split_whitespace().enumerate() {
            let value = token.parse::<f64>().map_err(|_| DataError::BadNumber {
                path: path.to_path_buf(),
                line: line_no + 1,
                field: field + 1,
                token: token.to_string(),
            })?;
            table.values.push(value);
        }

        let found = table.values.len() - start;
        if found == 0 {
            continue;
        }
        if table.rows == 0 {
            table.columns = found;
        } else if found != table.columns {
            return Err(DataError::RaggedRow {
                path: path.to_path_buf(),
                line: line_no + 1,
                expected: table.columns,
                found,
            });
        }
        table.rows += 1;
    }

    Ok(table)
}
