//! Implementation of the 'evaluate' subcommand.

use crate::cli::EvaluateArgs;
use crate::error::CliResult;

use scenecut_core::results::read_shot_list;
use scenecut_core::{Evaluation, evaluate, read_ground_truth_csv, undo_ground_offset};

use log::debug;

/// Compares a shot list against ground truth and prints the scores.
pub fn run_evaluate(args: EvaluateArgs) -> CliResult<Evaluation> {
    let detected: Vec<i64> = read_shot_list(&args.shots)?
        .into_iter()
        .map(|shot| shot as i64)
        .collect();

    let mut truth = read_ground_truth_csv(&args.truth)?;
    if args.undo_offset {
        truth = undo_ground_offset(&truth);
    }
    debug!(
        "Comparing {} detections with {} ground-truth shots (tolerance {})",
        detected.len(),
        truth.len(),
        args.tolerance
    );

    let evaluation = evaluate(&detected, &truth, args.tolerance);
    print_evaluation(&evaluation);
    Ok(evaluation)
}

fn print_evaluation(evaluation: &Evaluation) {
    println!("True positives:  {}", evaluation.true_positives);
    println!("False positives: {}", evaluation.false_positives);
    println!("False negatives: {}", evaluation.false_negatives);
    println!("Precision:       {:.3}", evaluation.precision);
    println!("Recall:          {:.3}", evaluation.recall);
    println!("F1:              {:.3}", evaluation.f1);
}
