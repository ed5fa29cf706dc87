//! Frame counting with ffprobe.
//!
//! Runs ffprobe with `-count_frames` so the video stream reports the number
//! of frames actually decoded (`nb_read_frames`). Containers that carry a
//! frame count in their header fall back to `nb_frames`.
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{Config, FfProbeError, ffprobe_config};
use std::path::Path;

/// Reports how many frames a movie holds.
pub trait FfprobeExecutor {
    /// Number of frames in the first video stream of `input_path`.
    fn count_frames(&self, input_path: &Path) -> CoreResult<u64>;
}

/// `FfprobeExecutor` backed by the ffprobe crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn count_frames(&self, input_path: &Path) -> CoreResult<u64> {
        log::debug!(
            "Running ffprobe (via crate) for frame count on: {}",
            input_path.display()
        );
        let config = Config::builder().count_frames(true).build();
        match ffprobe_config(config, input_path) {
            Ok(metadata) => {
                let video_stream = metadata
                    .streams
                    .iter()
                    .find(|s| s.codec_type.as_deref() == Some("video"))
                    .ok_or_else(|| {
                        CoreError::FfprobeParse(format!(
                            "No video stream found in {}",
                            input_path.display()
                        ))
                    })?;

                let frames = parse_frame_count(video_stream.nb_read_frames.as_deref())
                    .or_else(|| parse_frame_count(video_stream.nb_frames.as_deref()))
                    .ok_or_else(|| {
                        CoreError::FfprobeParse(format!(
                            "No frame count reported for {}",
                            input_path.display()
                        ))
                    })?;

                log::debug!("ffprobe reports {} frames in {}", frames, input_path.display());
                Ok(frames)
            }
            Err(err) => {
                log::error!(
                    "ffprobe failed for frame count on {}: {:?}",
                    input_path.display(),
                    err
                );
                Err(map_ffprobe_error(err, "frame count"))
            }
        }
    }
}

fn parse_frame_count(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe {context} output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
