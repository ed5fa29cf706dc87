//! Frame file naming convention shared by the decoder and the extractor.
//!
//! ffmpeg writes frames as `%06d.jpg` by default; the same convention is used
//! to build file names when reading them back and to recognise frame files
//! during discovery.

use serde::{Deserialize, Serialize};

/// Default number of zero-padded digits in a frame file name.
pub const DEFAULT_FRAME_DIGITS: usize = 6;

/// Default image extension for extracted frames.
pub const DEFAULT_FRAME_EXTENSION: &str = "jpg";

/// Zero-padded, numbered frame file naming (`000001.jpg`, `000002.jpg`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNaming {
    /// Number of zero-padded digits in the file stem
    pub digits: usize,

    /// File extension without the leading dot
    pub extension: String,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            digits: DEFAULT_FRAME_DIGITS,
            extension: DEFAULT_FRAME_EXTENSION.to_string(),
        }
    }
}

impl FrameNaming {
    pub fn new(digits: usize, extension: impl Into<String>) -> Self {
        Self {
            digits,
            extension: extension.into(),
        }
    }

    /// File name for the given frame number, e.g. `000042.jpg`.
    #[must_use]
    pub fn file_name(&self, frame: u64) -> String {
        format!("{frame:0width$}.{}", self.extension, width = self.digits)
    }

    /// Output pattern passed to ffmpeg, e.g. `%06d.jpg`.
    #[must_use]
    pub fn ffmpeg_pattern(&self) -> String {
        format!("%0{}d.{}", self.digits, self.extension)
    }

    /// Glob-like description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}.{}", "N".repeat(self.digits), self.extension)
    }

    /// Parses the frame number out of a file name that follows this naming.
    ///
    /// Returns `None` for files with another extension, a non-numeric stem or
    /// a stem that is not padded to `digits`.
    pub fn parse_index(&self, file_name: &str) -> Option<u64> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        if ext != self.extension {
            return None;
        }
        if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: u64 = stem.parse().ok()?;
        // Only names this naming would produce, so every counted file can be opened
        (format!("{index:0width$}", width = self.digits) == stem).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_padding() {
        let naming = FrameNaming::default();
        assert_eq!(naming.file_name(1), "000001.jpg");
        assert_eq!(naming.file_name(123456), "123456.jpg");
        assert_eq!(naming.file_name(1234567), "1234567.jpg");
    }

    #[test]
    fn test_ffmpeg_pattern() {
        assert_eq!(FrameNaming::default().ffmpeg_pattern(), "%06d.jpg");
        assert_eq!(FrameNaming::new(4, "png").ffmpeg_pattern(), "%04d.png");
    }

    #[test]
    fn test_parse_index() {
        let naming = FrameNaming::default();
        assert_eq!(naming.parse_index("000007.jpg"), Some(7));
        assert_eq!(naming.parse_index("000007.JPG"), None);
        assert_eq!(naming.parse_index("000007.png"), None);
        assert_eq!(naming.parse_index("frame7.jpg"), None);
        assert_eq!(naming.parse_index(".jpg"), None);
        assert_eq!(naming.parse_index("notes"), None);
    }

    #[test]
    fn test_parse_index_requires_padded_names() {
        let naming = FrameNaming::default();
        assert_eq!(naming.parse_index("7.jpg"), None);
        assert_eq!(naming.parse_index("0000007.jpg"), None);
        assert_eq!(naming.parse_index("1234567.jpg"), Some(1_234_567));
        assert_eq!(naming.parse_index(&naming.file_name(42)), Some(42));
    }
}
