// ============================================================================
// scenecut-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Histogram extraction progress bar
//
// Wraps an indicatif bar behind the `(done, total)` callback the core
// pipeline calls after every frame. indicatif hides the bar by itself when
// stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{prefix} [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})";

/// Progress bar for frame analysis.
pub struct FrameProgress {
    bar: ProgressBar,
}

impl FrameProgress {
    /// Creates a bar for `total` frames (0 if unknown yet).
    pub fn new(prefix: &str, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_prefix(prefix.to_string());
        Self { bar }
    }

    /// Callback for the core pipeline's `(done, total)` updates.
    pub fn update(&self, done: usize, total: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(done as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Current position, for tests.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_tracks_position_and_length() {
        let progress = FrameProgress::new("Histograms", 0);
        progress.update(3, 10);
        assert_eq!(progress.position(), 3);
        progress.update(10, 10);
        assert_eq!(progress.position(), 10);
        progress.finish();
    }
}
