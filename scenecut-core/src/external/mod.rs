// ============================================================================
// scenecut-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Frame Decoding Through ffmpeg and ffprobe
//
// Decoding a movie into numbered frame files is delegated to ffmpeg, and the
// frame count comes from ffprobe. Both sit behind traits so the pipeline can
// run against the in-memory fakes in `mocks` during tests.
//
// KEY COMPONENTS:
// - FrameExtractor: Decodes a movie into a frame directory and counts frames
// - FfmpegSpawner / FfmpegProcess: ffmpeg process abstraction (ffmpeg-sidecar)
// - FfprobeExecutor: Frame counting abstraction (ffprobe crate)
// - check_dependency: Verifies an external command can be started

use crate::config::FrameNaming;
use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// ffmpeg process spawning and the ffmpeg-backed frame extractor
pub mod ffmpeg_executor;

/// Frame counting with ffprobe
pub mod ffprobe_executor;

/// Fakes for tests
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegFrameExtractor, FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner,
    build_extract_command,
};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor};

// ============================================================================
// FRAME EXTRACTION
// ============================================================================

/// Decodes a movie into numbered frame files.
///
/// # Examples
///
/// ```rust
/// use scenecut_core::config::FrameNaming;
/// use scenecut_core::external::FrameExtractor;
/// use scenecut_core::external::mocks::FakeFrameExtractor;
///
/// let dir = tempfile::tempdir().unwrap();
/// let extractor = FakeFrameExtractor::new(vec![[0, 0, 0], [255, 255, 255]]);
/// let written = extractor
///     .extract_frames(&dir.path().join("movie.mp4"), dir.path(), &FrameNaming::default())
///     .unwrap();
/// assert_eq!(written, 2);
/// ```
pub trait FrameExtractor {
    /// Writes every frame of `movie` into `frames_dir` using `naming`.
    ///
    /// Returns the number of frame files present afterwards. Producing no
    /// frames is an error.
    fn extract_frames(
        &self,
        movie: &Path,
        frames_dir: &Path,
        naming: &FrameNaming,
    ) -> CoreResult<usize>;

    /// Number of frames the decoder reports for `movie`.
    fn count_frames(&self, movie: &Path) -> CoreResult<u64>;
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `<cmd_name> -version` with its output discarded. Only the ability to
/// start the process matters, not its exit status.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}
