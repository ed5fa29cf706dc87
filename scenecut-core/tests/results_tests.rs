// scenecut-core/tests/results_tests.rs

use scenecut_core::ground_truth::{evaluate, read_ground_truth_csv, undo_ground_offset};
use scenecut_core::results::{read_shot_list, read_shot_table, write_outputs, write_summary_json};
use scenecut_core::{
    CoreError, DetectorConfig, FixedThreshold, HistogramMatrix, ResultBundle, RunSummary,
    analyze_histograms, hist_diffs, local_maxima,
};
use std::fs;
use tempfile::tempdir;

fn spike_histograms() -> HistogramMatrix {
    HistogramMatrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        vec![9.0, 9.0],
        vec![0.0, 0.0],
        vec![0.0, 0.0],
    ])
    .expect("rows have equal width")
}

#[test]
fn test_spike_signal_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let histograms = spike_histograms();

    let diffs = hist_diffs(&histograms)?;
    assert_eq!(diffs, vec![0.0, 0.0, 9.0, 9.0, 0.0]);
    assert_eq!(local_maxima(&diffs), vec![true, false, true, true, false]);

    let bundle = analyze_histograms(histograms, &FixedThreshold(4.0))?;
    assert_eq!(bundle.shots(), &[0, 2]);
    Ok(())
}

#[test]
fn test_outputs_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = DetectorConfig::default();
    let bundle = analyze_histograms(spike_histograms(), &FixedThreshold(4.0))?;

    let paths = write_outputs(&bundle, dir.path(), &config)?;

    assert_eq!(fs::read_to_string(&paths.shot_list)?, "000000\n000002\n");
    assert_eq!(read_shot_list(&paths.shot_list)?, vec![0, 2]);

    let records = read_shot_table(&paths.shot_table)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].frame, 0);
    assert_eq!(records[0].normalized_diff, 0.0);
    assert_eq!(records[0].histogram, vec![0.0, 0.0]);
    assert_eq!(records[1].frame, 2);
    assert_eq!(records[1].normalized_diff, 1.0);
    assert_eq!(records[1].raw_diff, 9.0);
    assert_eq!(records[1].histogram, vec![9.0, 9.0]);

    let summary_path = dir.path().join(&config.summary_json_name);
    write_summary_json(&bundle.summary(&config), &summary_path)?;
    let summary: RunSummary = serde_json::from_str(&fs::read_to_string(&summary_path)?)?;
    assert_eq!(summary.shots, vec![0, 2]);
    assert_eq!(summary.frame_count, 5);
    assert_eq!(summary.max_diff, Some(9.0));

    Ok(())
}

#[test]
fn test_uniform_video_cannot_be_normalized() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let histograms = HistogramMatrix::from_rows(vec![vec![0.0, 0.0]; 4])?;
    let bundle = analyze_histograms(histograms, &FixedThreshold(0.0))?;
    assert_eq!(bundle.shots(), &[0]);

    let result = write_outputs(&bundle, dir.path(), &DetectorConfig::default());
    assert!(matches!(result, Err(CoreError::DegenerateSignal(_))));
    Ok(())
}

#[test]
fn test_merged_chunks_keep_global_positions() -> Result<(), Box<dyn std::error::Error>> {
    let first = analyze_histograms(
        HistogramMatrix::from_rows(vec![vec![0.0], vec![0.0], vec![5.0]])?,
        &FixedThreshold(1.0),
    )?;
    let second = analyze_histograms(
        HistogramMatrix::from_rows(vec![vec![0.0], vec![7.0], vec![7.0]])?,
        &FixedThreshold(1.0),
    )?;
    assert_eq!(first.shots(), &[0, 2]);
    assert_eq!(second.shots(), &[0, 1]);

    let merged = ResultBundle::merge([first, second])?;
    assert_eq!(merged.frame_count(), 6);
    assert_eq!(merged.shots(), &[0, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_detected_shots_scored_against_ground_truth() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let truth_path = dir.path().join("title.csv");
    fs::write(&truth_path, "shot,s_frame,e_frame\n1,100,149\n2,150.0,199\n3,200,260\n")?;

    let truth = undo_ground_offset(&read_ground_truth_csv(&truth_path)?);
    assert_eq!(truth, vec![0, 50, 100]);

    let evaluation = evaluate(&[0, 51, 75], &truth, 1);
    assert_eq!(evaluation.true_positives, 2);
    assert_eq!(evaluation.false_positives, 1);
    assert_eq!(evaluation.false_negatives, 1);
    Ok(())
}
