//! Destinations for finished recording sessions.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::data::recorder::SessionLog;
use crate::error::ExportError;

/// File name proposed for every exported session.
pub const EXPORT_FILE_NAME: &str = "obd_log.json";
/// Content type of the exported session.
pub const EXPORT_MIME: &str = "application/json";

/// Where a serialized session goes when recording stops.
pub trait ExportTarget {
    /// Deliver `bytes` under `file_name`. Returns a human-readable location.
    fn export(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<String, ExportError>;
}

/// Serialize `log` and hand it to `target` under the fixed file name.
pub fn export_session(target: &mut dyn ExportTarget, log: &SessionLog) -> Result<String, ExportError> {
    let bytes = log.to_json_bytes()?;
    target.export(EXPORT_FILE_NAME, EXPORT_MIME, &bytes)
}

/// Write exports into a fixed directory, overwriting any previous file.
#[derive(Debug, Clone)]
pub struct DirectoryExport {
    dir: PathBuf,
}

impl DirectoryExport {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportTarget for DirectoryExport {
    fn export(&mut self, file_name: &str, _mime: &str, bytes: &[u8]) -> Result<String, ExportError> {
        let path = self.dir.join(file_name);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, bytes))
            .map_err(|source| ExportError::Io { path: path.clone(), source })?;
        Ok(path.display().to_string())
    }
}

/// An export captured in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Keeps exports in memory; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryExport {
    files: Arc<Mutex<Vec<ExportedFile>>>,
}

impl MemoryExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<ExportedFile> {
        match self.files.lock() {
            Ok(files) => files.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ExportTarget for MemoryExport {
    fn export(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<String, ExportError> {
        let file = ExportedFile {
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        };
        let mut files = match self.files.lock() {
            Ok(files) => files,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.push(file);
        Ok(format!("memory:{file_name}#{}", files.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::data::recorder::Record;
    use crate::data::sample::Sample;

    #[test]
    fn directory_export_writes_fixed_name() {
        let dir = std::env::temp_dir().join(format!("obd_dashboard_export_{}", std::process::id()));
        let mut target = DirectoryExport::new(&dir);
        assert_eq!(target.dir(), dir.as_path());
        let clock = ManualClock::new(1_700_000_000_000);
        let log = SessionLog {
            records: vec![Record { time: clock.now().epoch_millis, sample: Sample::new().with("RPM", 800.0) }],
        };
        let location = export_session(&mut target, &log).unwrap();
        let path = dir.join(EXPORT_FILE_NAME);
        assert_eq!(location, path.display().to_string());
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "time": 1_700_000_000_000i64, "RPM": 800.0 }]));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
