use std::{
    borrow::Cow,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trimmed evaluation report. Field order is the on-disk key order.
///
/// The scalar fields are copied verbatim from the raw report (they may be
/// strings, integers or floats depending on the evaluation run), so they
/// stay untyped and default to `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CleanReport {
    pub model_checkpoint: Value,
    pub base_model: Value,
    pub total_samples_in_dataset: Value,
    pub samples_evaluated: Value,
    pub samples_skipped: Value,
    pub overall_wer: Value,
    pub overall_wer_percent: Value,
    pub results: Vec<CleanResult>,
}

// One result row in the trimmed report; a missing field reads back as ""
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CleanResult {
    pub path: Value,
    pub ground_truth: Value,
    pub prediction: String,
}

impl Default for CleanResult {
    fn default() -> Self {
        Self {
            path: Value::String(String::new()),
            ground_truth: Value::String(String::new()),
            prediction: String::new(),
        }
    }
}

impl CleanResult {
    /// `path` as text; non-string values are rendered as JSON.
    pub fn path_text(&self) -> String {
        value_text(&self.path)
    }

    pub fn ground_truth_text(&self) -> String {
        value_text(&self.ground_truth)
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Load the raw evaluation dump as an untyped document.
///
/// Bare `NaN`, `Infinity` and `-Infinity` (written by Python's `json.dump`
/// for an undefined WER) are read as `null`.
pub fn read_report(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&null_non_finite(&content))
        .with_context(|| format!("parsing {}", path.display()))
}

const NON_FINITE: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

// rewrite non-finite float tokens outside string literals to `null`
fn null_non_finite(text: &str) -> Cow<'_, str> {
    if !NON_FINITE.iter().any(|tok| text.contains(tok)) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let (mut in_string, mut escaped) = (false, false);
    while let Some(c) = rest.chars().next() {
        if !in_string {
            if let Some(tail) = NON_FINITE.iter().find_map(|tok| rest.strip_prefix(tok)) {
                out.push_str("null");
                rest = tail;
                continue;
            }
            in_string = c == '"';
        } else if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            in_string = false;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

pub fn read_clean_report(path: &Path) -> Result<CleanReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Write the trimmed report as UTF-8 JSON, two-space indented.
/// serde_json leaves non-ASCII characters unescaped.
pub fn write_clean_report(path: &Path, report: &CleanReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("writing {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}
