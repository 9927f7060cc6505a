//! Log files in temporary directories.
//!
//! The compression is chosen from the file name, the same way the parser
//! detects it: `.gz` is gzip, `.bz2` is bzip2, anything else plain text.

use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding log files; removed when dropped.
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` inside the directory.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        write_log(&self.dir.path().join(name), contents)
    }
}

/// Writes a log file, compressing it according to its extension.
pub fn write_log(path: &Path, contents: &str) -> Result<PathBuf> {
    let file = File::create(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => {
            let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            encoder.write_all(contents.as_bytes())?;
            encoder.finish()?;
        }
        Some("bz2") => {
            let mut encoder = bzip2::write::BzEncoder::new(file, bzip2::Compression::default());
            encoder.write_all(contents.as_bytes())?;
            encoder.finish()?;
        }
        _ => {
            let mut file = file;
            file.write_all(contents.as_bytes())?;
        }
    }
    Ok(path.to_path_buf())
}
