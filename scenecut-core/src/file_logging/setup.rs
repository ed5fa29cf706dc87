use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::{Path, PathBuf};

/// Path of the run log for a timestamp such as `20240131_235959`.
pub fn log_file_path(log_dir: &Path, timestamp: &str) -> PathBuf {
    log_dir.join(format!("scenecut_run_{timestamp}.log"))
}

/// Sends log records to `log_file` and, with `console`, also to stderr.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter, console: bool) -> Result<()> {
    // Create log directory if it doesn't exist
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}"
        )))
        .build(log_file)?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)));
    let mut root = Root::builder().appender("file");

    if console {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new("[{l}] {m}{n}")))
            .build();
        builder = builder.appender(Appender::builder().build("console", Box::new(stderr)));
        root = root.appender("console");
    }

    let config = builder.build(root.build(log_level))?;
    log4rs::init_config(config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let path = log_file_path(Path::new("/var/log/scenecut"), "20240131_235959");
        assert_eq!(
            path,
            PathBuf::from("/var/log/scenecut/scenecut_run_20240131_235959.log")
        );
    }
}
