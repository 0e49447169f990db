use std::fs;

use asr_eval_clean::{clean_report, read_clean_report, read_report, write_clean_report};
use serde_json::{json, Value};

const RAW: &str = r#"{
  "model_checkpoint": "./whisper-vi/checkpoint-4000",
  "base_model": "openai/whisper-small",
  "total_samples_in_dataset": 3,
  "samples_evaluated": 3,
  "samples_skipped": 0,
  "overall_wer": 0.125,
  "overall_wer_percent": 12.5,
  "results": [
    {
      "path": "audio_fixed/sample_00000.wav",
      "ground_truth": "xin chào các bạn",
      "prediction": "[Transcription(text='xin chào các bạn', language='vi')]",
      "wer": 0.0
    },
    {
      "path": "audio_fixed/sample_00001.wav",
      "ground_truth": "it's raining",
      "prediction": "[Transcription(text=\"it's raining\", language='en')]",
      "wer": 0.0
    },
    {
      "path": "audio_fixed/sample_00002.wav",
      "ground_truth": "hello",
      "prediction": "ERROR: decoder timeout"
    }
  ]
}"#;

#[test]
fn cleans_report_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("evaluation_results_all.json");
    let output = dir.path().join("evaluation_results_clean.json");
    fs::write(&input, RAW).unwrap();

    let raw = read_report(&input).unwrap();
    let (clean, stats) = clean_report(&raw).unwrap();
    write_clean_report(&output, &clean).unwrap();

    assert_eq!(stats.records, 3);
    assert_eq!(stats.empty_predictions, 1);

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "model_checkpoint": "./whisper-vi/checkpoint-4000",
            "base_model": "openai/whisper-small",
            "total_samples_in_dataset": 3,
            "samples_evaluated": 3,
            "samples_skipped": 0,
            "overall_wer": 0.125,
            "overall_wer_percent": 12.5,
            "results": [
                {
                    "path": "audio_fixed/sample_00000.wav",
                    "ground_truth": "xin chào các bạn",
                    "prediction": "xin chào các bạn"
                },
                {
                    "path": "audio_fixed/sample_00001.wav",
                    "ground_truth": "it's raining",
                    "prediction": "it's raining"
                },
                {
                    "path": "audio_fixed/sample_00002.wav",
                    "ground_truth": "hello",
                    "prediction": ""
                }
            ]
        })
    );
}

#[test]
fn rerunning_on_clean_output_blanks_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let first_out = dir.path().join("clean.json");
    let second_out = dir.path().join("clean_again.json");

    let (clean, _) = clean_report(&serde_json::from_str(RAW).unwrap()).unwrap();
    write_clean_report(&first_out, &clean).unwrap();

    let (again, stats) = clean_report(&read_report(&first_out).unwrap()).unwrap();
    write_clean_report(&second_out, &again).unwrap();

    let reread = read_clean_report(&second_out).unwrap();
    assert_eq!(reread.results.len(), clean.results.len());
    assert!(reread.results.iter().all(|r| r.prediction.is_empty()));
    assert_eq!(stats.empty_predictions, 3);
    assert_eq!(reread.overall_wer, clean.overall_wer);
}

#[test]
fn output_file_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.json");
    fs::write(&output, "stale contents that are much longer than the new report").unwrap();

    let (clean, _) = clean_report(&json!({})).unwrap();
    write_clean_report(&output, &clean).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("{\n  \"model_checkpoint\": null"));
    assert!(text.trim_end().ends_with('}'));
    assert!(!text.contains("stale"));
}
