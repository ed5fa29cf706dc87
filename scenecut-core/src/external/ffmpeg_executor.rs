// ============================================================================
// scenecut-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Decoding Movies into Frame Files
//
// This module wraps ffmpeg-sidecar behind two small traits so that the frame
// extractor can be driven by a mock spawner in tests.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active ffmpeg process
// - FfmpegSpawner: Trait for creating new ffmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - FfmpegFrameExtractor: FrameExtractor running `ffmpeg -i <movie> <dir>/%06d.jpg`

use super::ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor};
use super::FrameExtractor;
use crate::config::FrameNaming;
use crate::discovery;
use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::Path;
use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            CoreError::OperationFailed(format!("ffmpeg event stream unavailable: {e}"))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

// --- Frame Extraction ---

/// Builds `ffmpeg -y -i <movie> <frames_dir>/<pattern>`.
///
/// ffmpeg numbers the output images from 1.
pub fn build_extract_command(movie: &Path, frames_dir: &Path, naming: &FrameNaming) -> FfmpegCommand {
    let output = frames_dir.join(naming.ffmpeg_pattern());

    let mut cmd = FfmpegCommand::new();
    cmd.arg("-y");
    cmd.input(movie.to_string_lossy().as_ref());
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// `FrameExtractor` that decodes with ffmpeg and counts frames with ffprobe.
#[derive(Debug, Clone, Default)]
pub struct FfmpegFrameExtractor<S = SidecarSpawner, P = CrateFfprobeExecutor> {
    spawner: S,
    probe: P,
}

impl FfmpegFrameExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: FfmpegSpawner, P: FfprobeExecutor> FfmpegFrameExtractor<S, P> {
    /// Uses the given spawner and ffprobe executor.
    pub fn with_executors(spawner: S, probe: P) -> Self {
        Self { spawner, probe }
    }
}

impl<S: FfmpegSpawner, P: FfprobeExecutor> FrameExtractor for FfmpegFrameExtractor<S, P> {
    fn extract_frames(
        &self,
        movie: &Path,
        frames_dir: &Path,
        naming: &FrameNaming,
    ) -> CoreResult<usize> {
        std::fs::create_dir_all(frames_dir)?;

        let cmd = build_extract_command(movie, frames_dir, naming);
        let args: Vec<String> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        log::debug!("Running frame extraction: ffmpeg {}", args.join(" "));

        let mut process = self.spawner.spawn(cmd)?;
        let mut last_error: Option<String> = None;
        process.handle_events(|event| {
            match event {
                FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) | FfmpegEvent::Error(line) => {
                    log::debug!("ffmpeg: {}", line);
                    last_error = Some(line);
                }
                _ => {}
            }
            Ok(())
        })?;

        let status = process.wait()?;
        if !status.success() {
            log::error!("Frame extraction failed for {}: {}", movie.display(), status);
            return Err(command_failed_error(
                "ffmpeg (frame extraction)",
                status,
                last_error.unwrap_or_else(|| "Frame extraction process failed".to_string()),
            ));
        }

        let written = discovery::count_frames_in_dir(frames_dir, naming).map_err(|e| match e {
            CoreError::NoFramesFound { dir, pattern } => CoreError::MissingDecoderOutput(format!(
                "ffmpeg wrote no frames matching {} to {}",
                pattern,
                dir.display()
            )),
            other => other,
        })?;

        log::info!("Extracted {} frames from {}", written, movie.display());
        Ok(written)
    }

    fn count_frames(&self, movie: &Path) -> CoreResult<u64> {
        self.probe.count_frames(movie)
    }
}
