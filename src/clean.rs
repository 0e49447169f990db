use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map as JsonMap, Value};

use crate::report::{CleanReport, CleanResult};

/// First `text=` followed by a quoted literal. A backslash escapes the next
/// character, so an apostrophe inside the text does not end the match.
static TEXT_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)text=(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#).unwrap()
});

/// Counters reported after a cleaning pass (logged, never written out).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub records: usize,
    pub empty_predictions: usize,
}

/// Pull the transcribed text out of a prediction such as
/// `[Transcription(text='hello world', language='en')]`.
/// Returns an empty string when there is no `text=` literal.
pub fn extract_prediction_text(prediction: &str) -> String {
    TEXT_FIELD_RE
        .captures(prediction)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| unescape(m.as_str()))
        .unwrap_or_default()
}

// decode the escapes a repr-style literal uses; unknown ones stay as written
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Build the trimmed report from a raw evaluation dump.
///
/// Scalar metadata is copied as-is (`null` when absent). Every entry of
/// `results` becomes one row with `path`, `ground_truth` and the extracted
/// prediction text; missing fields default to `""`.
pub fn clean_report(doc: &Value) -> Result<(CleanReport, CleanStats)> {
    let Value::Object(top) = doc else {
        bail!("top-level JSON must be an object (found {})", kind(doc));
    };

    let rows: &[Value] = match top.get("results") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(arr)) => arr.as_slice(),
        Some(other) => bail!("\"results\" must be an array (found {})", kind(other)),
    };

    let mut stats = CleanStats::default();
    let mut results = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let Value::Object(obj) = row else {
            bail!("results[{idx}] must be an object (found {})", kind(row));
        };
        let cleaned = clean_row(obj);
        if cleaned.prediction.is_empty() {
            stats.empty_predictions += 1;
        }
        results.push(cleaned);
    }
    stats.records = results.len();

    let scalar = |key: &str| top.get(key).cloned().unwrap_or(Value::Null);
    let report = CleanReport {
        model_checkpoint: scalar("model_checkpoint"),
        base_model: scalar("base_model"),
        total_samples_in_dataset: scalar("total_samples_in_dataset"),
        samples_evaluated: scalar("samples_evaluated"),
        samples_skipped: scalar("samples_skipped"),
        overall_wer: scalar("overall_wer"),
        overall_wer_percent: scalar("overall_wer_percent"),
        results,
    };
    Ok((report, stats))
}

fn clean_row(obj: &JsonMap<String, Value>) -> CleanResult {
    let or_empty = |key: &str| {
        obj.get(key)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    };
    let prediction = obj
        .get("prediction")
        .and_then(Value::as_str)
        .map(extract_prediction_text)
        .unwrap_or_default();

    CleanResult {
        path: or_empty("path"),
        ground_truth: or_empty("ground_truth"),
        prediction,
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
