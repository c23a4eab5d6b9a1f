//! Reading zip archives
//!
//! The reader trusts the central directory for names, sizes and offsets,
//! then re-reads each local header to find where the payload starts.
//! Multi-disk, zip64 and encrypted archives are rejected.

use crate::{
    Error, Result,
    compression::{CompressionMethod, decompress},
    cp437,
    datetime::DosDateTime,
    records::{CentralDirectoryHeader, EndOfCentralDirectory, FLAG_UTF8, LocalFileHeader},
};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// General purpose flag bit 0: entry is encrypted
const FLAG_ENCRYPTED: u16 = 1;

/// Metadata of one entry, taken from the central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name
    pub name: String,
    /// Raw compression method id
    pub method_id: u16,
    /// CRC-32 of the uncompressed data
    pub crc32: u32,
    /// Size of the payload as stored
    pub compressed_size: u64,
    /// Size of the payload after decompression
    pub uncompressed_size: u64,
    /// Offset of the local file header
    pub local_header_offset: u64,
    /// Modification time
    pub last_modified: DosDateTime,
    /// General purpose bit flag
    pub flags: u16,
    /// Unix permission bits, if the entry was made on a Unix host
    pub unix_mode: Option<u32>,
}

impl EntryInfo {
    fn from_header(header: CentralDirectoryHeader) -> Result<Self> {
        let name = if header.flags & FLAG_UTF8 != 0 {
            String::from_utf8_lossy(&header.file_name).into_owned()
        } else {
            cp437::decode(&header.file_name)
        };

        // 0xFFFFFFFF defers to a zip64 extra field, which is not read
        if [
            header.compressed_size,
            header.uncompressed_size,
            header.local_header_offset,
        ]
        .contains(&u32::MAX)
        {
            return Err(Error::invalid_format(format!(
                "Entry {name} uses zip64 sizes or offsets, which are not supported"
            )));
        }

        let unix_mode = (header.version_made_by >> 8 == crate::records::HOST_UNIX)
            .then_some(header.external_attributes >> 16);

        Ok(Self {
            name,
            method_id: header.method,
            crc32: header.crc32,
            compressed_size: u64::from(header.compressed_size),
            uncompressed_size: u64::from(header.uncompressed_size),
            local_header_offset: u64::from(header.local_header_offset),
            last_modified: header.modified,
            flags: header.flags,
            unix_mode,
        })
    }

    /// Compression method, if supported
    pub fn compression(&self) -> Result<CompressionMethod> {
        CompressionMethod::from_u16(self.method_id)
    }

    /// Whether the entry is encrypted
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }
}

/// An open zip archive
///
/// # Examples
///
/// ```no_run
/// use fixture_zip::Archive;
///
/// let mut archive = Archive::open("out.zip")?;
/// for entry in archive.entries() {
///     println!("{} ({} bytes)", entry.name, entry.uncompressed_size);
/// }
/// let text = archive.read_entry("stored-n0.txt")?;
/// # Ok::<(), fixture_zip::Error>(())
/// ```
#[derive(Debug)]
pub struct Archive<R> {
    reader: R,
    entries: Vec<EntryInfo>,
    /// Entry records and payloads must end before this offset
    data_end: u64,
    comment: Vec<u8>,
}

impl Archive<BufReader<File>> {
    /// Open an archive on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Read the central directory from any seekable source
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let (end, end_offset) = EndOfCentralDirectory::find_and_read(&mut reader)?;

        if end.disk_number != 0 || end.disk_with_central_directory != 0 {
            return Err(Error::invalid_format("Multi-disk archives are not supported"));
        }
        if end.total_entries == u16::MAX || end.central_directory_offset == u32::MAX {
            return Err(Error::invalid_format("Zip64 archives are not supported"));
        }
        if end.entries_on_this_disk != end.total_entries {
            return Err(Error::invalid_format(format!(
                "Entry count mismatch: {} on disk, {} total",
                end.entries_on_this_disk, end.total_entries
            )));
        }

        let directory_offset = u64::from(end.central_directory_offset);
        let directory_size = u64::from(end.central_directory_size);
        if directory_offset + directory_size > end_offset {
            return Err(Error::invalid_format(format!(
                "Central directory ({directory_size} bytes at {directory_offset}) overlaps the end record at {end_offset}"
            )));
        }

        reader.seek(SeekFrom::Start(directory_offset))?;
        let mut directory = vec![0u8; directory_size as usize];
        reader.read_exact(&mut directory)?;

        let mut cursor = Cursor::new(directory);
        let mut entries = Vec::with_capacity(usize::from(end.total_entries));
        for _ in 0..end.total_entries {
            let header = CentralDirectoryHeader::read(&mut cursor)?;
            entries.push(EntryInfo::from_header(header)?);
        }

        log::debug!(
            "Read central directory: {} entries at offset {directory_offset}",
            entries.len()
        );

        Ok(Self {
            reader,
            entries,
            data_end: directory_offset,
            comment: end.comment,
        })
    }

    /// Entries in central directory order
    pub fn entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    /// Entry names in central directory order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Archive comment
    pub fn comment(&self) -> &[u8] {
        &self.comment
    }

    /// Look up an entry by name
    pub fn entry(&self, name: &str) -> Option<&EntryInfo> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Read and decompress an entry by name
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))?;

        self.read_entry_at(index)
    }

    /// Read and decompress an entry by its position in the central directory
    pub fn read_entry_at(&mut self, index: usize) -> Result<Vec<u8>> {
        let entry = self
            .entries
            .get(index)
            .cloned()
            .ok_or_else(|| Error::EntryNotFound(format!("#{index}")))?;

        if entry.is_encrypted() {
            return Err(Error::invalid_format(format!(
                "Entry {} is encrypted",
                entry.name
            )));
        }
        let method = entry.compression()?;

        self.reader.seek(SeekFrom::Start(entry.local_header_offset))?;
        let local = LocalFileHeader::read(&mut self.reader)?;
        if local.method != entry.method_id {
            return Err(Error::invalid_format(format!(
                "Local header of {} uses method {}, central directory says {}",
                entry.name, local.method, entry.method_id
            )));
        }

        let data_offset = entry.local_header_offset + local.encoded_len();
        if data_offset + entry.compressed_size > self.data_end {
            return Err(Error::invalid_format(format!(
                "Entry {} ({} bytes at {data_offset}) runs past the central directory at {}",
                entry.name, entry.compressed_size, self.data_end
            )));
        }
        self.reader.seek(SeekFrom::Start(data_offset))?;
        let mut compressed = vec![0u8; entry.compressed_size as usize];
        self.reader.read_exact(&mut compressed)?;

        let data = decompress(&compressed, method, entry.uncompressed_size as usize)?;

        let actual = crc32fast::hash(&data);
        if actual != entry.crc32 {
            return Err(Error::ChecksumMismatch {
                entry: entry.name,
                expected: entry.crc32,
                actual,
            });
        }

        Ok(data)
    }
}
