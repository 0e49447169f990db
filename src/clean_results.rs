/*
cargo run --bin clean_results

cargo run --bin clean_results -- \
    -i eval/whisper-small/evaluation_results_all.json \
    -o eval/whisper-small/evaluation_results_clean.json
*/

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use asr_eval_clean::{clean_report, logging::init_file_logger, read_report, write_clean_report};

// Trim an ASR evaluation dump to metadata + path / ground_truth / prediction text
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    // Raw evaluation report
    #[arg(short, long, default_value = "evaluation_results_all.json")]
    input: PathBuf,

    // Cleaned report (overwritten if it exists)
    #[arg(short, long, default_value = "evaluation_results_clean.json")]
    output: PathBuf,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // the run log is optional; a read-only working dir must not block cleaning
    if let Err(e) = init_file_logger(&cli.log_dir, "clean_results") {
        eprintln!("Run log disabled: {e:#}");
    }
    info!("Started - input: {:?}, output: {:?}", cli.input, cli.output);

    let raw = read_report(&cli.input)?;
    let (clean, stats) = clean_report(&raw)?;
    info!("Loaded {} result records", stats.records);
    if stats.empty_predictions > 0 {
        warn!(
            "{} of {} predictions had no text='...' literal",
            stats.empty_predictions, stats.records
        );
    }

    write_clean_report(&cli.output, &clean)?;
    info!("Wrote {} records → {:?}", clean.results.len(), cli.output);

    println!("Cleaned JSON written to {}", cli.output.display());
    Ok(())
}
