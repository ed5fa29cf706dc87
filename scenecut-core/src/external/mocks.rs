// scenecut-core/src/external/mocks.rs

// --- Test doubles for the external decoder ---
//
// Always compiled so integration tests and downstream crates can drive the
// pipeline without ffmpeg installed.

use super::*;
use crate::config::FrameNaming;
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use image::{Rgb, RgbImage};
use std::cell::RefCell;
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

// ============================================================================
// FFMPEG PROCESS MOCKS
// ============================================================================

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// An expected ffmpeg call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    /// Number of empty frame files to create from the output pattern
    pub frames_to_write: usize,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        frames_to_write: usize,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            frames_to_write,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        frames_to_write: usize,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), frames_to_write);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), 0);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(exit_code << 8),
        };
        self.add_expectation(arg_pattern, Ok(process), 0);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
            return Err(CoreError::OperationFailed(format!(
                "MockFfmpegSpawner: no expectation for {args:?}"
            )));
        };

        let expectation = expectations.remove(index);
        log::debug!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        let process = expectation.result?;
        if expectation.frames_to_write > 0 {
            let pattern = args.last().ok_or_else(|| {
                CoreError::OperationFailed("MockFfmpegSpawner: command has no output".to_string())
            })?;
            write_pattern_files(pattern, expectation.frames_to_write)?;
        }
        Ok(process)
    }
}

/// Creates empty files `1..=count` from an ffmpeg `%0Nd` output pattern.
fn write_pattern_files(pattern: &str, count: usize) -> CoreResult<()> {
    let path = PathBuf::from(pattern);
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_pattern = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CoreError::PathError(format!("invalid output pattern {pattern}")))?;

    let (prefix, rest) = file_pattern
        .split_once('%')
        .ok_or_else(|| CoreError::PathError(format!("no frame number in {pattern}")))?;
    let (width, suffix) = rest
        .split_once('d')
        .ok_or_else(|| CoreError::PathError(format!("no frame number in {pattern}")))?;
    let width: usize = width.trim_start_matches('0').parse().unwrap_or(0);

    std::fs::create_dir_all(parent)?;
    for frame in 1..=count {
        std::fs::File::create(parent.join(format!("{prefix}{frame:0width$}{suffix}")))?;
    }
    Ok(())
}

// ============================================================================
// FFPROBE MOCK
// ============================================================================

/// Mock implementation of FfprobeExecutor returning preset frame counts.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    frame_counts: Rc<RefCell<HashMap<PathBuf, u64>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the frame count reported for `input_path`.
    pub fn expect_frame_count(&self, input_path: &Path, frames: u64) {
        self.frame_counts
            .borrow_mut()
            .insert(input_path.to_path_buf(), frames);
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn count_frames(&self, input_path: &Path) -> CoreResult<u64> {
        self.frame_counts
            .borrow()
            .get(input_path)
            .copied()
            .ok_or_else(|| {
                CoreError::FfprobeParse(format!(
                    "MockFfprobeExecutor: No expectation set for path {}",
                    input_path.display()
                ))
            })
    }
}

// ============================================================================
// FAKE FRAME EXTRACTOR
// ============================================================================

/// A call received by [`FakeFrameExtractor::extract_frames`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractCall {
    pub movie: PathBuf,
    pub frames_dir: PathBuf,
}

/// In-memory decoder that writes one solid-color image per frame.
///
/// Frames are numbered from `first_frame` (1 by default, like ffmpeg).
#[derive(Clone)]
pub struct FakeFrameExtractor {
    colors: Vec<[u8; 3]>,
    width: u32,
    height: u32,
    first_frame: u64,
    reported_count: Option<u64>,
    fail_extraction: bool,
    calls: Rc<RefCell<Vec<ExtractCall>>>,
}

impl FakeFrameExtractor {
    /// One frame per color, 8x8 pixels each.
    pub fn new(colors: Vec<[u8; 3]>) -> Self {
        Self {
            colors,
            width: 8,
            height: 8,
            first_frame: 1,
            reported_count: None,
            fail_extraction: false,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_first_frame(mut self, first_frame: u64) -> Self {
        self.first_frame = first_frame;
        self
    }

    /// Frame count returned by `count_frames` instead of the number of colors.
    pub fn with_reported_count(mut self, count: u64) -> Self {
        self.reported_count = Some(count);
        self
    }

    /// Makes `extract_frames` fail as if the decoder wrote nothing.
    pub fn failing(mut self) -> Self {
        self.fail_extraction = true;
        self
    }

    pub fn calls(&self) -> Vec<ExtractCall> {
        self.calls.borrow().clone()
    }
}

impl FrameExtractor for FakeFrameExtractor {
    fn extract_frames(
        &self,
        movie: &Path,
        frames_dir: &Path,
        naming: &FrameNaming,
    ) -> CoreResult<usize> {
        self.calls.borrow_mut().push(ExtractCall {
            movie: movie.to_path_buf(),
            frames_dir: frames_dir.to_path_buf(),
        });

        if self.fail_extraction || self.colors.is_empty() {
            return Err(CoreError::MissingDecoderOutput(format!(
                "fake decoder wrote no frames for {}",
                movie.display()
            )));
        }

        std::fs::create_dir_all(frames_dir)?;
        for (offset, color) in self.colors.iter().enumerate() {
            let path = frames_dir.join(naming.file_name(self.first_frame + offset as u64));
            RgbImage::from_pixel(self.width, self.height, Rgb(*color))
                .save(&path)
                .map_err(|e| {
                    CoreError::OperationFailed(format!(
                        "fake decoder could not write {}: {}",
                        path.display(),
                        e
                    ))
                })?;
        }
        Ok(self.colors.len())
    }

    fn count_frames(&self, _movie: &Path) -> CoreResult<u64> {
        Ok(self.reported_count.unwrap_or(self.colors.len() as u64))
    }
}
