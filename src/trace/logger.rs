use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::trace::trace::TraceEvent;

/// Appends [`TraceEvent`]s to a JSONL file, one event per line.
///
/// A file that cannot be opened disables the logger instead of failing
/// the run.
pub struct TraceLogger {
    path: PathBuf,
    sink: Option<Mutex<LineWriter<File>>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let sink = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(Mutex::new(LineWriter::new(file))),
            Err(e) => {
                warn!(path = %path.display(), "trace disabled, cannot open file: {}", e);
                None
            }
        };
        Self { path, sink }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Write one event. Failures are logged and dropped.
    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(action = %event.action, "unserializable trace event: {}", e);
                return;
            }
        };

        let written = match sink.lock() {
            Ok(mut writer) => writeln!(writer, "{}", line),
            Err(_) => {
                warn!("trace writer poisoned, event dropped");
                return;
            }
        };
        if let Err(e) = written {
            warn!(path = %self.path.display(), "trace write failed: {}", e);
        }
    }
}
