use crate::{Error, Result};
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Compression of a log file, detected from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            _ => Compression::None,
        }
    }
}

/// Opens a log file for reading, decompressing it on the fly if needed.
pub fn open_log(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn BufRead> = match Compression::from_path(path) {
        Compression::None => Box::new(BufReader::new(file)),
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
    };
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_compression_from_path() {
        assert_eq!(Compression::from_path(&PathBuf::from("job.log")), Compression::None);
        assert_eq!(Compression::from_path(&PathBuf::from("job.log.gz")), Compression::Gzip);
        assert_eq!(Compression::from_path(&PathBuf::from("job.log.bz2")), Compression::Bzip2);
        assert_eq!(Compression::from_path(&PathBuf::from("gz")), Compression::None);
    }

    #[test]
    fn test_open_missing_file() {
        let err = match open_log(Path::new("/nonexistent/modtime/job.log")) {
            Ok(_) => panic!("expected an error"),
            Err(err) => err,
        };
        assert!(matches!(err, Error::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/modtime/job.log"));
    }
}
