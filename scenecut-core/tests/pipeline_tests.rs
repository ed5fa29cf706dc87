// scenecut-core/tests/pipeline_tests.rs

use image::{Rgb, RgbImage};
use scenecut_core::config::{DetectorConfigBuilder, FrameNaming, ThresholdMode};
use scenecut_core::external::mocks::FakeFrameExtractor;
use scenecut_core::{
    CoreError, DetectorConfig, FrameStorage, analyze_frames, count_frames_in_dir,
    first_frame_index, process_movie,
};
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const GRAY: [u8; 3] = [96, 96, 96];

// Three shots: black, white, gray. Colors sit well inside their histogram
// buckets so JPEG rounding does not move any pixel across a bucket edge.
fn three_shot_colors() -> Vec<[u8; 3]> {
    vec![BLACK, BLACK, BLACK, WHITE, WHITE, WHITE, GRAY, GRAY]
}

fn fixed_config(threshold: f64) -> DetectorConfig {
    DetectorConfigBuilder::new()
        .threshold_mode(ThresholdMode::Fixed)
        .threshold(threshold)
        .build()
}

fn write_png_frames(dir: &Path, naming: &FrameNaming, first: u64, colors: &[[u8; 3]]) {
    for (offset, color) in colors.iter().enumerate() {
        RgbImage::from_pixel(4, 4, Rgb(*color))
            .save(dir.join(naming.file_name(first + offset as u64)))
            .expect("Failed to write frame");
    }
}

#[test]
fn test_process_movie_detects_color_changes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;
    File::create(dir.path().join("notes.txt"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors());
    let config = fixed_config(10.0);

    let mut updates = Vec::new();
    let run = process_movie(
        &extractor,
        dir.path(),
        &config,
        FrameStorage::BesideMovie,
        |done, total| updates.push((done, total)),
    )?;

    assert_eq!(run.movie, dir.path().join("movie.mp4"));
    assert_eq!(run.frames_dir, dir.path().join("frames"));
    assert_eq!(run.first_frame, 1);
    assert_eq!(run.reported_frames, 8);
    assert_eq!(run.bundle.frame_count(), 8);
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);
    assert_eq!(run.bundle.histograms().width(), 12);
    assert!(!run.frames_deleted);
    assert!(run.frames_dir.join("000008.jpg").exists());

    assert_eq!(updates.len(), 8);
    assert_eq!(updates.last(), Some(&(8, 8)));

    let calls = extractor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].movie, dir.path().join("movie.mp4"));

    Ok(())
}

#[test]
fn test_process_movie_deletes_frames_when_not_kept() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let movie = dir.path().join("clip.mkv");
    File::create(&movie)?;

    let extractor = FakeFrameExtractor::new(three_shot_colors());
    let mut config = fixed_config(10.0);
    config.keep_frames = false;

    let run = process_movie(&extractor, &movie, &config, FrameStorage::BesideMovie, |_, _| {})?;

    assert!(run.frames_deleted);
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);
    assert!(!run.frames_dir.join("000001.jpg").exists());
    assert!(!run.frames_dir.join("000008.jpg").exists());

    Ok(())
}

#[test]
fn test_process_movie_scratch_storage() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let scratch_base = tempdir()?;
    let movie = dir.path().join("movie.mp4");
    File::create(&movie)?;

    let extractor = FakeFrameExtractor::new(three_shot_colors());
    let mut config = fixed_config(10.0);
    config.temp_dir = Some(scratch_base.path().to_path_buf());

    let run = process_movie(&extractor, &movie, &config, FrameStorage::Scratch, |_, _| {})?;

    assert!(run.frames_deleted);
    assert!(run.frames_dir.starts_with(scratch_base.path()));
    assert!(!run.frames_dir.exists());
    assert!(!dir.path().join("frames").exists());
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);

    Ok(())
}

#[test]
fn test_process_movie_adaptive_threshold() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors());
    let config = DetectorConfigBuilder::new()
        .threshold_mode(ThresholdMode::MaxFraction)
        .max_fraction(0.5)
        .build();

    let run = process_movie(&extractor, dir.path(), &config, FrameStorage::BesideMovie, |_, _| {})?;
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);

    Ok(())
}

#[test]
fn test_process_movie_default_config_finds_equal_cuts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;

    // 16x9 frames: every cut moves all 144 pixels to another bucket
    let extractor = FakeFrameExtractor::new(three_shot_colors()).with_size(16, 9);
    let run = process_movie(
        &extractor,
        dir.path(),
        &DetectorConfig::default(),
        FrameStorage::BesideMovie,
        |_, _| {},
    )?;

    assert_eq!(
        run.bundle.diffs(),
        &[144.0, 0.0, 0.0, 144.0, 0.0, 0.0, 144.0, 0.0]
    );
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);
    Ok(())
}

#[test]
fn test_process_movie_mean_std_finds_equal_cuts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors());
    let config = DetectorConfigBuilder::new()
        .threshold_mode(ThresholdMode::MeanStd)
        .adaptive_k(2.0)
        .build();

    let run = process_movie(&extractor, dir.path(), &config, FrameStorage::BesideMovie, |_, _| {})?;
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);
    Ok(())
}

#[test]
fn test_process_movie_ignores_frames_from_earlier_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let first_movie = dir.path().join("a.mp4");
    let second_movie = dir.path().join("b.mp4");
    File::create(&first_movie)?;
    File::create(&second_movie)?;

    let long = FakeFrameExtractor::new(vec![BLACK, BLACK, WHITE, WHITE, GRAY, GRAY]);
    let first = process_movie(
        &long,
        &first_movie,
        &fixed_config(10.0),
        FrameStorage::BesideMovie,
        |_, _| {},
    )?;
    assert_eq!(first.bundle.frame_count(), 6);
    assert!(first.frames_dir.join("000006.jpg").exists());

    let short = FakeFrameExtractor::new(vec![WHITE, WHITE, WHITE]);
    let second = process_movie(
        &short,
        &second_movie,
        &fixed_config(10.0),
        FrameStorage::BesideMovie,
        |_, _| {},
    )?;

    assert_eq!(second.frames_dir, first.frames_dir);
    assert_eq!(second.bundle.frame_count(), 3);
    assert_eq!(second.bundle.shots(), &[0]);
    assert!(!second.frames_dir.join("000004.jpg").exists());
    Ok(())
}

#[test]
fn test_process_movie_short_decode_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors()).with_reported_count(10);
    let result = process_movie(
        &extractor,
        dir.path(),
        &fixed_config(10.0),
        FrameStorage::BesideMovie,
        |_, _| {},
    );

    match result {
        Err(CoreError::MissingDecoderOutput(message)) => assert!(message.contains("8 of 10")),
        Err(e) => panic!("Unexpected error type: {:?}", e),
        Ok(_) => panic!("Expected the run to fail"),
    }
    Ok(())
}

#[test]
fn test_process_movie_extra_frames_are_analyzed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors()).with_reported_count(7);
    let run = process_movie(
        &extractor,
        dir.path(),
        &fixed_config(10.0),
        FrameStorage::BesideMovie,
        |_, _| {},
    )?;

    assert_eq!(run.reported_frames, 7);
    assert_eq!(run.bundle.frame_count(), 8);
    assert_eq!(run.bundle.shots(), &[0, 3, 6]);
    Ok(())
}

#[test]
fn test_process_movie_decoder_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("movie.mp4"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors()).failing();
    let result = process_movie(
        &extractor,
        dir.path(),
        &DetectorConfig::default(),
        FrameStorage::BesideMovie,
        |_, _| {},
    );

    match result {
        Err(CoreError::MissingDecoderOutput(_)) => {}
        Err(e) => panic!("Unexpected error type: {:?}", e),
        Ok(_) => panic!("Expected the run to fail"),
    }
    Ok(())
}

#[test]
fn test_process_movie_without_movie_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("readme.md"))?;

    let extractor = FakeFrameExtractor::new(three_shot_colors());
    let result = process_movie(
        &extractor,
        dir.path(),
        &DetectorConfig::default(),
        FrameStorage::BesideMovie,
        |_, _| {},
    );

    assert!(matches!(result, Err(CoreError::MovieNotFound(_))));
    assert!(extractor.calls().is_empty());
    Ok(())
}

#[test]
fn test_analyze_existing_frames_from_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = DetectorConfigBuilder::new()
        .threshold_mode(ThresholdMode::Fixed)
        .threshold(4.0)
        .frame_extension("png")
        .build();
    write_png_frames(
        dir.path(),
        &config.naming,
        0,
        &[BLACK, BLACK, WHITE, WHITE, BLACK],
    );

    let first = first_frame_index(dir.path(), &config.naming)?;
    let count = count_frames_in_dir(dir.path(), &config.naming)?;
    assert_eq!((first, count), (0, 5));

    let bundle = analyze_frames(&config, dir.path(), count, first, |_, _| {})?;
    assert_eq!(bundle.diffs(), &[16.0, 0.0, 16.0, 0.0, 16.0]);
    assert_eq!(bundle.shots(), &[0, 2, 4]);

    Ok(())
}

#[test]
fn test_chunked_analysis_matches_whole_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut config = fixed_config(4.0);
    config.naming = FrameNaming::new(4, "png");
    let colors = [
        BLACK, BLACK, WHITE, WHITE, WHITE, GRAY, GRAY, BLACK, BLACK, BLACK, WHITE,
    ];
    write_png_frames(dir.path(), &config.naming, 1, &colors);

    let whole = analyze_frames(&config, dir.path(), colors.len(), 1, |_, _| {})?;

    for chunk_size in [1, 2, 3, 4, 11, 50] {
        config.chunk_size = Some(chunk_size);
        let mut last = (0, 0);
        let chunked = analyze_frames(&config, dir.path(), colors.len(), 1, |done, total| {
            last = (done, total)
        })?;
        assert_eq!(chunked, whole, "chunk size {chunk_size}");
        assert_eq!(last, (colors.len(), colors.len()));
    }

    Ok(())
}

#[test]
fn test_missing_frame_file_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = fixed_config(4.0);
    let naming = FrameNaming::new(6, "png");
    write_png_frames(dir.path(), &naming, 1, &[BLACK, WHITE]);

    let config = DetectorConfig { naming, ..config };
    let result = analyze_frames(&config, dir.path(), 3, 1, |_, _| {});
    match result {
        Err(CoreError::FrameRead { path, .. }) => assert!(path.ends_with("000003.png")),
        Err(e) => panic!("Unexpected error type: {:?}", e),
        Ok(_) => panic!("Expected a missing frame error"),
    }
    Ok(())
}

#[test]
fn test_empty_frame_directory_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let naming = FrameNaming::default();
    assert!(matches!(
        first_frame_index(dir.path(), &naming),
        Err(CoreError::NoFramesFound { .. })
    ));
    assert!(matches!(
        count_frames_in_dir(dir.path(), &naming),
        Err(CoreError::NoFramesFound { .. })
    ));
    Ok(())
}
