//! Export target that asks for a destination with a native save dialog.

use std::path::PathBuf;

use crate::data::export::ExportTarget;
use crate::error::ExportError;

/// Asks for a destination with a native save dialog, proposing the export file name.
#[derive(Debug, Default, Clone)]
pub struct DialogExport {
    last_dir: Option<PathBuf>,
}

impl ExportTarget for DialogExport {
    fn export(&mut self, file_name: &str, _mime: &str, bytes: &[u8]) -> Result<String, ExportError> {
        let mut dlg = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter("JSON", &["json"]);
        if let Some(dir) = &self.last_dir {
            dlg = dlg.set_directory(dir);
        }
        let path = dlg.save_file().ok_or(ExportError::Cancelled)?;
        std::fs::write(&path, bytes).map_err(|source| ExportError::Io { path: path.clone(), source })?;
        self.last_dir = path.parent().map(|p| p.to_path_buf());
        Ok(path.display().to_string())
    }
}
