//! File output helpers

use crate::{Error, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Permission bits given to persisted archives on Unix
#[cfg(unix)]
const ARCHIVE_MODE: u32 = 0o644;

/// Buffered output that only appears at its destination once persisted
///
/// Data is written to a temporary file in the destination directory. If the
/// value is dropped before [`AtomicFile::persist`] runs, the temporary file
/// is removed and any existing file at the destination is left untouched.
#[derive(Debug)]
pub struct AtomicFile {
    writer: BufWriter<NamedTempFile>,
    destination: PathBuf,
}

impl AtomicFile {
    /// Start writing a file that will replace `destination` when persisted
    pub fn create<P: AsRef<Path>>(destination: P) -> Result<Self> {
        let destination = destination.as_ref().to_path_buf();
        let dir = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let temp_file = tempfile::Builder::new()
            .prefix(".fixture-zip-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        log::trace!(
            "Writing {} via temporary file {}",
            destination.display(),
            temp_file.path().display()
        );

        Ok(Self {
            writer: BufWriter::new(temp_file),
            destination,
        })
    }

    /// Final path of the file
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Flush, sync and atomically rename the temporary file to its destination
    pub fn persist(self) -> Result<PathBuf> {
        let temp_file = self
            .writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp_file
                .as_file()
                .set_permissions(fs::Permissions::from_mode(ARCHIVE_MODE))?;
        }
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(&self.destination)
            .map_err(|e| Error::Io(e.error))?;

        Ok(self.destination)
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
