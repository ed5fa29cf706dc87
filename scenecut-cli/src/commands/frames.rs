//! Implementation of the 'frames' subcommand.
//!
//! Runs the detector on a directory of frames that were decoded earlier,
//! without invoking ffmpeg.

use crate::cli::FramesArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::progress::FrameProgress;

use scenecut_core::results::{write_outputs, write_summary_json};
use scenecut_core::{
    FrameNaming, analyze_frames, count_frames_in_dir, delete_frames, first_frame_index,
};

use log::{debug, info};

/// Detects shots in `args.frames_dir` and writes the outputs.
pub fn run_frames(args: FramesArgs) -> CliResult<()> {
    let extension = args.extension.trim_start_matches('.');
    let naming = FrameNaming::new(args.digits, extension);
    let config = super::build_config(&args.detection, naming)?;

    let first_frame = match args.first_frame {
        Some(first) => first,
        None => first_frame_index(&args.frames_dir, &config.naming)?,
    };
    let count = match args.count {
        Some(count) => count,
        None => count_frames_in_dir(&args.frames_dir, &config.naming)?,
    };
    debug!(
        "Reading {} frames from {} starting at {}",
        count,
        args.frames_dir.display(),
        first_frame
    );

    let progress = FrameProgress::new("Histograms", count as u64);
    let bundle = analyze_frames(&config, &args.frames_dir, count, first_frame, |done, total| {
        progress.update(done, total)
    });
    progress.finish();
    let bundle = bundle?;

    let paths = write_outputs(&bundle, &args.output_dir, &config)?;
    if args.detection.json_summary {
        let summary_path = args.output_dir.join(&config.summary_json_name);
        write_summary_json(&bundle.summary(&config), &summary_path)?;
        info!("Wrote run summary to {}", summary_path.display());
    }

    if args.delete_frames {
        let removed = delete_frames(
            &args.frames_dir,
            &config.naming,
            first_frame,
            first_frame + count as u64,
        )
        .cli_context("Deleting analyzed frames")?;
        info!("Deleted {} frames from {}", removed, args.frames_dir.display());
    }

    println!("Frames:    {}", bundle.frame_count());
    println!("Shots:     {}", bundle.shots().len());
    println!("Shot list: {}", paths.shot_list.display());
    Ok(())
}
