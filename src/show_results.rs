/*
cargo run --bin show_results

cargo run --bin show_results -- \
    -i eval/whisper-small/evaluation_results_clean.json \
    --empty-only --limit 20
*/

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use asr_eval_clean::{read_clean_report, CleanReport, CleanResult};

static SAMPLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"sample_(\d+)\.wav$").unwrap());

// Print a cleaned evaluation report, one block per audio sample
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    // Cleaned report written by clean_results
    #[arg(short, long, default_value = "evaluation_results_clean.json")]
    input: PathBuf,

    // Print at most this many samples (omit to print all)
    #[arg(long)]
    limit: Option<usize>,

    // Only samples whose prediction came out empty
    #[arg(long)]
    empty_only: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let report = read_clean_report(&cli.input)?;
    print_header(&report);

    let mut shown = 0usize;
    for row in report
        .results
        .iter()
        .filter(|r| !cli.empty_only || r.prediction.is_empty())
    {
        if let Some(cap) = cli.limit {
            if shown >= cap {
                break;
            }
        }
        print_sample(row);
        shown += 1;
    }

    println!("{shown} of {} sample(s) shown", report.results.len());
    Ok(())
}

/// Sample number from a path like `audio_fixed/sample_00042.wav`, else 0.
fn sample_number(path: &str) -> u64 {
    SAMPLE_RE
        .captures(path)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn print_header(report: &CleanReport) {
    println!("{:<18} {}", "checkpoint", show(&report.model_checkpoint));
    println!("{:<18} {}", "base model", show(&report.base_model));
    println!(
        "{:<18} {} evaluated / {} skipped / {} total",
        "samples",
        show(&report.samples_evaluated),
        show(&report.samples_skipped),
        show(&report.total_samples_in_dataset)
    );
    println!(
        "{:<18} {} ({}%)",
        "overall WER",
        show(&report.overall_wer),
        show(&report.overall_wer_percent)
    );
    println!("{:=<60}", "");
}

fn print_sample(row: &CleanResult) {
    let path = row.path_text();
    println!("Sample #{}  {path}", sample_number(&path));
    println!("  ground truth : {}", row.ground_truth_text());
    println!("  prediction   : {}", row.prediction);
    println!("{:-<60}", "");
}

fn show(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
