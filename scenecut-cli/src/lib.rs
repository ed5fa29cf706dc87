// scenecut-cli/src/lib.rs
//
// Library portion of the Scenecut CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, DetectArgs, DetectionOptions, EvaluateArgs, FramesArgs};
pub use commands::detect::run_detect;
pub use commands::evaluate::run_evaluate;
pub use commands::frames::run_frames;
