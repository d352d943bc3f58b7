use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sitecraft_logging::site_info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("output directory unusable: {0}")]
    OutputDir(String),
    #[error("output path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Create `dir` if needed and make sure it is a directory.
pub fn ensure_site_dir(dir: &Path) -> Result<(), WriteError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(WriteError::OutputDir(format!("{} is not a directory", dir.display()))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(dir)
            .map_err(|e| WriteError::OutputDir(format!("{}: {e}", dir.display()))),
        Err(err) => Err(WriteError::OutputDir(format!("{}: {err}", dir.display()))),
    }
}

/// Writes site documents into one directory. A reader never sees a half
/// written file: content goes to a temp file that is then renamed over the
/// target.
pub struct SiteWriter {
    dir: PathBuf,
}

impl SiteWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, html: &str) -> Result<PathBuf, WriteError> {
        ensure_site_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(html.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| WriteError::Io(e.error))?;

        site_info!("wrote {} bytes to {}", html.len(), target.display());
        Ok(target)
    }
}

/// Atomically write `html` to an explicit file path.
pub fn write_site_file(path: &Path, html: &str) -> Result<PathBuf, WriteError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| WriteError::NoFileName(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    SiteWriter::new(dir).write(filename, html)
}
