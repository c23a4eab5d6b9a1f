//! Streaming builder for zip archives

use crate::{
    Error, Result,
    compression::{CompressionMethod, compress},
    datetime::DosDateTime,
    io::AtomicFile,
    path::normalize_entry_name,
    records::{CentralDirectoryHeader, EndOfCentralDirectory, HOST_UNIX, LocalFileHeader, name_flags},
};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Regular file type bits for the Unix mode kept in external attributes
const S_IFREG: u32 = 0o100_000;

/// Per-entry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOptions {
    /// Compression method
    pub method: CompressionMethod,
    /// Compression level, `None` for the method's default
    pub level: Option<u32>,
    /// Modification time, `None` for the DOS epoch (or the file's mtime
    /// when added with [`ArchiveBuilder::add_entry_file`])
    pub last_modified: Option<DosDateTime>,
    /// Unix permission bits recorded for the entry
    pub unix_permissions: u32,
}

impl EntryOptions {
    /// Options for the given method with default level and metadata
    pub fn new(method: CompressionMethod) -> Self {
        Self {
            method,
            level: None,
            last_modified: None,
            unix_permissions: 0o644,
        }
    }

    /// Set the compression level
    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the modification time
    pub fn last_modified(mut self, modified: DosDateTime) -> Self {
        self.last_modified = Some(modified);
        self
    }

    /// Set the Unix permission bits
    pub fn unix_permissions(mut self, mode: u32) -> Self {
        self.unix_permissions = mode & 0o7777;
        self
    }
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self::new(CompressionMethod::Stored)
    }
}

/// Builder that writes zip entries as they are added
///
/// Each call to [`add_entry_data`](Self::add_entry_data) compresses the
/// payload and writes its local header and data straight to the sink; the
/// central directory is kept in memory and written by
/// [`finish`](Self::finish). Entries appear in the archive in the order they
/// were added.
///
/// # Examples
///
/// ```no_run
/// use fixture_zip::{ArchiveBuilder, CompressionMethod, EntryOptions};
///
/// let mut builder = ArchiveBuilder::create("out.zip")?;
/// builder.add_entry_data(
///     "hello.txt",
///     b"Hello world",
///     &EntryOptions::new(CompressionMethod::Deflated).level(9),
/// )?;
/// builder.persist()?;
/// # Ok::<(), fixture_zip::Error>(())
/// ```
#[derive(Debug)]
pub struct ArchiveBuilder<W: Write> {
    /// Output sink
    writer: W,
    /// Bytes written so far, i.e. the offset of the next record
    offset: u64,
    /// Central directory records for the entries written so far
    central_directory: Vec<CentralDirectoryHeader>,
    /// Names already used in this archive
    names: HashSet<String>,
    /// Set once a write to the sink failed; the sink then holds a partial record
    poisoned: bool,
}

impl ArchiveBuilder<AtomicFile> {
    /// Start an archive that replaces `path` once [`persist`](Self::persist) succeeds
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(AtomicFile::create(path)?))
    }

    /// Write the central directory and move the archive into place
    ///
    /// Returns the final path.
    pub fn persist(self) -> Result<PathBuf> {
        let file = self.finish()?;
        let destination = file.destination().to_path_buf();
        log::debug!("Persisting archive to {}", destination.display());
        file.persist()
    }
}

impl<W: Write> ArchiveBuilder<W> {
    /// Create a builder writing to an arbitrary sink
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            offset: 0,
            central_directory: Vec::new(),
            names: HashSet::new(),
            poisoned: false,
        }
    }

    /// Number of entries written so far
    pub fn len(&self) -> usize {
        self.central_directory.len()
    }

    /// Whether no entries have been written
    pub fn is_empty(&self) -> bool {
        self.central_directory.is_empty()
    }

    /// Bytes written to the sink so far
    pub fn bytes_written(&self) -> u64 {
        self.offset
    }

    /// Add an entry from memory
    pub fn add_entry_data(&mut self, name: &str, data: &[u8], options: &EntryOptions) -> Result<()> {
        if self.poisoned {
            return Err(Error::WriterPoisoned);
        }

        let name = normalize_entry_name(name)?;
        if self.names.contains(&name) {
            return Err(Error::DuplicateEntry(name));
        }

        // 0xFFFF in the end record means "see zip64", which is not written
        if self.central_directory.len() >= usize::from(u16::MAX) - 1 {
            return Err(Error::capacity(format!(
                "more than {} entries require zip64",
                u16::MAX - 1
            )));
        }

        let local_header_offset = u32::try_from(self.offset).map_err(|_| {
            Error::capacity(format!("entry {name} starts beyond 4 GiB and requires zip64"))
        })?;
        let uncompressed_size = u32::try_from(data.len())
            .map_err(|_| Error::capacity(format!("entry {name} is larger than 4 GiB")))?;

        let crc32 = crc32fast::hash(data);
        let compressed = compress(data, options.method, options.level)?;
        let compressed_size = u32::try_from(compressed.len()).map_err(|_| {
            Error::capacity(format!("compressed entry {name} is larger than 4 GiB"))
        })?;

        log::debug!(
            "Writing {name} ({}): {uncompressed_size} -> {compressed_size} bytes, crc 0x{crc32:08X}",
            options.method
        );

        let version_needed = options.method.version_needed();
        let flags = name_flags(&name);
        let modified = options.last_modified.unwrap_or_default();

        let local = LocalFileHeader {
            version_needed,
            flags,
            method: options.method.to_u16(),
            modified,
            crc32,
            compressed_size,
            uncompressed_size,
            file_name: name.as_bytes().to_vec(),
            extra_field: Vec::new(),
        };
        self.write_guarded(|writer| {
            local.write(writer)?;
            writer.write_all(&compressed)?;
            Ok(())
        })?;
        self.offset += local.encoded_len() + u64::from(compressed_size);

        self.central_directory.push(CentralDirectoryHeader {
            version_made_by: (HOST_UNIX << 8) | version_needed,
            version_needed,
            flags,
            method: local.method,
            modified,
            crc32,
            compressed_size,
            uncompressed_size,
            disk_number_start: 0,
            internal_attributes: 0,
            external_attributes: (S_IFREG | options.unix_permissions) << 16,
            local_header_offset,
            file_name: local.file_name,
            extra_field: Vec::new(),
            file_comment: Vec::new(),
        });
        self.names.insert(name);

        Ok(())
    }

    /// Add an entry from a file on disk
    ///
    /// Without an explicit modification time the file's own mtime is used.
    pub fn add_entry_file<P: AsRef<Path>>(
        &mut self,
        name: &str,
        path: P,
        options: &EntryOptions,
    ) -> Result<()> {
        let path = path.as_ref();
        let data = fs::read(path)?;

        let mut options = *options;
        if options.last_modified.is_none() {
            let modified = fs::metadata(path)?.modified()?;
            options.last_modified = Some(DosDateTime::from_system_time(modified));
        }

        self.add_entry_data(name, &data, &options)
    }

    /// Run a write against the sink, poisoning the builder if it fails
    fn write_guarded(&mut self, write: impl FnOnce(&mut W) -> Result<()>) -> Result<()> {
        let result = write(&mut self.writer);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Write the central directory and end record, returning the sink
    pub fn finish(mut self) -> Result<W> {
        if self.poisoned {
            return Err(Error::WriterPoisoned);
        }

        let directory_offset = u32::try_from(self.offset)
            .map_err(|_| Error::capacity("central directory starts beyond 4 GiB"))?;

        let mut directory = Vec::new();
        for header in &self.central_directory {
            header.write(&mut directory)?;
        }
        let directory_size = u32::try_from(directory.len())
            .map_err(|_| Error::capacity("central directory is larger than 4 GiB"))?;

        self.writer.write_all(&directory)?;
        EndOfCentralDirectory::single_disk(
            self.central_directory.len() as u16,
            directory_size,
            directory_offset,
        )
        .write(&mut self.writer)?;
        self.writer.flush()?;

        log::debug!(
            "Finished archive: {} entries, central directory of {directory_size} bytes at {directory_offset}",
            self.central_directory.len()
        );

        Ok(self.writer)
    }
}
