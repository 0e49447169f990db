// Shared pieces of the evaluation-report tools.
//
// `clean_results` turns a raw ASR evaluation dump into a trimmed report,
// `show_results` prints a trimmed report to the terminal.

pub mod clean;
pub mod logging;
pub mod report;

pub use clean::{clean_report, extract_prediction_text, CleanStats};
pub use report::{read_clean_report, read_report, write_clean_report, CleanReport, CleanResult};
