use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;

use reflect_core::Transcript;

/// Append-only transcript file with a colored console mirror.
///
/// One file per run, named deterministically from the run's start time.
/// Line format: `{role}: {timestamp}; {message}`.
pub struct FileTranscript {
    file: File,
    path: PathBuf,
}

impl FileTranscript {
    /// Build the per-run file name from a start timestamp.
    pub fn file_name(started_at: &chrono::DateTime<Local>) -> String {
        format!(
            "self_reflection_log_{}.txt",
            started_at.format("%Y-%m-%d_%H-%M-%S")
        )
    }

    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Transcript for FileTranscript {
    fn append(&mut self, role_label: &str, text: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        if let Err(err) = writeln!(self.file, "{}: {}; {}", role_label, timestamp, text) {
            log::warn!(
                "failed to write transcript entry to {}: {}",
                self.path.display(),
                err
            );
        }
        println!("{}: {}; {}", role_label.blue(), timestamp.yellow(), text);
    }
}
