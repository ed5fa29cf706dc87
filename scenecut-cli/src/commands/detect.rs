//! Implementation of the 'detect' subcommand.
//!
//! Decodes a movie into numbered frames with ffmpeg, runs the histogram
//! shot detector on them and writes the shot list and shot table.

use crate::cli::DetectArgs;
use crate::error::CliResult;
use crate::progress::FrameProgress;

use scenecut_core::results::{OutputPaths, write_outputs, write_summary_json};
use scenecut_core::{
    CoreError, FfmpegFrameExtractor, FrameNaming, FrameStorage, MovieRun, check_dependency,
    process_movie,
};

use std::fs;
use std::time::Instant;

use log::{debug, info};

/// Runs shot detection on a movie file or a directory holding one.
pub fn run_detect(args: DetectArgs) -> CliResult<()> {
    let start_time = Instant::now();

    if !args.input_path.exists() {
        return Err(CoreError::MovieNotFound(args.input_path.clone()));
    }

    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;

    let mut config = super::build_config(&args.detection, FrameNaming::default())?;
    config.keep_frames = !args.delete_frames;
    let storage = if args.scratch {
        FrameStorage::Scratch
    } else {
        FrameStorage::BesideMovie
    };
    debug!("Configuration: {config:?}, storage: {storage:?}");

    fs::create_dir_all(&args.output_dir)?;

    let progress = FrameProgress::new("Histograms", 0);
    let extractor = FfmpegFrameExtractor::new();
    let run = process_movie(&extractor, &args.input_path, &config, storage, |done, total| {
        progress.update(done, total)
    });
    progress.finish();
    let run = run?;

    let paths = write_outputs(&run.bundle, &args.output_dir, &config)?;
    if args.detection.json_summary {
        let summary_path = args.output_dir.join(&config.summary_json_name);
        write_summary_json(&run.bundle.summary(&config), &summary_path)?;
        info!("Wrote run summary to {}", summary_path.display());
    }

    print_summary(&run, &paths);
    debug!("Finished in {:.1?}", start_time.elapsed());
    Ok(())
}

fn print_summary(run: &MovieRun, paths: &OutputPaths) {
    println!("Movie:      {}", run.movie.display());
    println!("Frames:     {}", run.bundle.frame_count());
    println!("Shots:      {}", run.bundle.shots().len());
    println!("Shot list:  {}", paths.shot_list.display());
    println!("Shot table: {}", paths.shot_table.display());
    if !run.frames_deleted {
        println!("Frames kept in {}", run.frames_dir.display());
    }
}
