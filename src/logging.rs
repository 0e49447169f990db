use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Local;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

/// Send `log` output to `<log_dir>/<prefix>_<timestamp>.log` for this run.
/// Returns the log file path.
pub fn init_file_logger(log_dir: &Path, prefix: &str) -> Result<PathBuf> {
    create_dir_all(log_dir)
        .with_context(|| format!("creating log dir {}", log_dir.display()))?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("{prefix}_{ts}.log"));
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&log_path).with_context(|| format!("creating {}", log_path.display()))?,
    )?;
    Ok(log_path)
}
