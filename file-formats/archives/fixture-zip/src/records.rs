//! Zip record layouts: local file header, central directory header and
//! end of central directory record
//!
//! Field order and sizes follow PKWARE's APPNOTE sections 4.3.7, 4.3.12
//! and 4.3.16. All integers are little-endian.

use crate::datetime::DosDateTime;
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Local file header signature (`PK\x03\x04`)
pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;
/// Central directory file header signature (`PK\x01\x02`)
pub const CENTRAL_DIRECTORY_HEADER_SIGNATURE: u32 = 0x0201_4b50;
/// End of central directory signature (`PK\x05\x06`)
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

/// General purpose flag bit 11: name and comment are UTF-8
pub const FLAG_UTF8: u16 = 1 << 11;

/// "Version made by" host system byte for Unix
pub const HOST_UNIX: u16 = 3;

/// Fixed part of the local file header
pub const LOCAL_FILE_HEADER_SIZE: u64 = 30;
/// Fixed part of the end of central directory record
pub const END_OF_CENTRAL_DIRECTORY_SIZE: u64 = 22;

/// Flags for an entry name: UTF-8 marker only when the name needs it
pub fn name_flags(name: &str) -> u16 {
    if name.is_ascii() { 0 } else { FLAG_UTF8 }
}

/// Local file header preceding each entry's payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader {
    /// Version needed to extract
    pub version_needed: u16,
    /// General purpose bit flag
    pub flags: u16,
    /// Compression method id
    pub method: u16,
    /// Last modification time
    pub modified: DosDateTime,
    /// CRC-32 of the uncompressed data
    pub crc32: u32,
    /// Size of the payload as stored
    pub compressed_size: u32,
    /// Size of the payload after decompression
    pub uncompressed_size: u32,
    /// Raw entry name
    pub file_name: Vec<u8>,
    /// Raw extra field
    pub extra_field: Vec<u8>,
}

impl LocalFileHeader {
    /// Total encoded size including name and extra field
    pub fn encoded_len(&self) -> u64 {
        LOCAL_FILE_HEADER_SIZE + self.file_name.len() as u64 + self.extra_field.len() as u64
    }

    /// Write the header
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(LOCAL_FILE_HEADER_SIGNATURE)?;
        writer.write_u16::<LittleEndian>(self.version_needed)?;
        writer.write_u16::<LittleEndian>(self.flags)?;
        writer.write_u16::<LittleEndian>(self.method)?;
        writer.write_u16::<LittleEndian>(self.modified.time)?;
        writer.write_u16::<LittleEndian>(self.modified.date)?;
        writer.write_u32::<LittleEndian>(self.crc32)?;
        writer.write_u32::<LittleEndian>(self.compressed_size)?;
        writer.write_u32::<LittleEndian>(self.uncompressed_size)?;
        writer.write_u16::<LittleEndian>(self.file_name.len() as u16)?;
        writer.write_u16::<LittleEndian>(self.extra_field.len() as u16)?;
        writer.write_all(&self.file_name)?;
        writer.write_all(&self.extra_field)?;
        Ok(())
    }

    /// Read a header positioned at the signature
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let signature = reader.read_u32::<LittleEndian>()?;
        if signature != LOCAL_FILE_HEADER_SIGNATURE {
            return Err(Error::invalid_format(format!(
                "Invalid local file header signature 0x{signature:08X}"
            )));
        }

        let version_needed = reader.read_u16::<LittleEndian>()?;
        let flags = reader.read_u16::<LittleEndian>()?;
        let method = reader.read_u16::<LittleEndian>()?;
        let time = reader.read_u16::<LittleEndian>()?;
        let date = reader.read_u16::<LittleEndian>()?;
        let crc32 = reader.read_u32::<LittleEndian>()?;
        let compressed_size = reader.read_u32::<LittleEndian>()?;
        let uncompressed_size = reader.read_u32::<LittleEndian>()?;
        let name_len = reader.read_u16::<LittleEndian>()?;
        let extra_len = reader.read_u16::<LittleEndian>()?;

        Ok(Self {
            version_needed,
            flags,
            method,
            modified: DosDateTime { date, time },
            crc32,
            compressed_size,
            uncompressed_size,
            file_name: read_bytes(reader, name_len)?,
            extra_field: read_bytes(reader, extra_len)?,
        })
    }
}

/// Central directory entry describing one archived file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirectoryHeader {
    /// Version made by (host system in the high byte)
    pub version_made_by: u16,
    /// Version needed to extract
    pub version_needed: u16,
    /// General purpose bit flag
    pub flags: u16,
    /// Compression method id
    pub method: u16,
    /// Last modification time
    pub modified: DosDateTime,
    /// CRC-32 of the uncompressed data
    pub crc32: u32,
    /// Size of the payload as stored
    pub compressed_size: u32,
    /// Size of the payload after decompression
    pub uncompressed_size: u32,
    /// Disk number where the entry starts
    pub disk_number_start: u16,
    /// Internal file attributes
    pub internal_attributes: u16,
    /// External file attributes (Unix mode in the high 16 bits)
    pub external_attributes: u32,
    /// Offset of the local file header from the start of the archive
    pub local_header_offset: u32,
    /// Raw entry name
    pub file_name: Vec<u8>,
    /// Raw extra field
    pub extra_field: Vec<u8>,
    /// Raw entry comment
    pub file_comment: Vec<u8>,
}

impl CentralDirectoryHeader {
    /// Write the header
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(CENTRAL_DIRECTORY_HEADER_SIGNATURE)?;
        writer.write_u16::<LittleEndian>(self.version_made_by)?;
        writer.write_u16::<LittleEndian>(self.version_needed)?;
        writer.write_u16::<LittleEndian>(self.flags)?;
        writer.write_u16::<LittleEndian>(self.method)?;
        writer.write_u16::<LittleEndian>(self.modified.time)?;
        writer.write_u16::<LittleEndian>(self.modified.date)?;
        writer.write_u32::<LittleEndian>(self.crc32)?;
        writer.write_u32::<LittleEndian>(self.compressed_size)?;
        writer.write_u32::<LittleEndian>(self.uncompressed_size)?;
        writer.write_u16::<LittleEndian>(self.file_name.len() as u16)?;
        writer.write_u16::<LittleEndian>(self.extra_field.len() as u16)?;
        writer.write_u16::<LittleEndian>(self.file_comment.len() as u16)?;
        writer.write_u16::<LittleEndian>(self.disk_number_start)?;
        writer.write_u16::<LittleEndian>(self.internal_attributes)?;
        writer.write_u32::<LittleEndian>(self.external_attributes)?;
        writer.write_u32::<LittleEndian>(self.local_header_offset)?;
        writer.write_all(&self.file_name)?;
        writer.write_all(&self.extra_field)?;
        writer.write_all(&self.file_comment)?;
        Ok(())
    }

    /// Read a header positioned at the signature
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let signature = reader.read_u32::<LittleEndian>()?;
        if signature != CENTRAL_DIRECTORY_HEADER_SIGNATURE {
            return Err(Error::invalid_format(format!(
                "Invalid central directory header signature 0x{signature:08X}"
            )));
        }

        let version_made_by = reader.read_u16::<LittleEndian>()?;
        let version_needed = reader.read_u16::<LittleEndian>()?;
        let flags = reader.read_u16::<LittleEndian>()?;
        let method = reader.read_u16::<LittleEndian>()?;
        let time = reader.read_u16::<LittleEndian>()?;
        let date = reader.read_u16::<LittleEndian>()?;
        let crc32 = reader.read_u32::<LittleEndian>()?;
        let compressed_size = reader.read_u32::<LittleEndian>()?;
        let uncompressed_size = reader.read_u32::<LittleEndian>()?;
        let name_len = reader.read_u16::<LittleEndian>()?;
        let extra_len = reader.read_u16::<LittleEndian>()?;
        let comment_len = reader.read_u16::<LittleEndian>()?;
        let disk_number_start = reader.read_u16::<LittleEndian>()?;
        let internal_attributes = reader.read_u16::<LittleEndian>()?;
        let external_attributes = reader.read_u32::<LittleEndian>()?;
        let local_header_offset = reader.read_u32::<LittleEndian>()?;

        Ok(Self {
            version_made_by,
            version_needed,
            flags,
            method,
            modified: DosDateTime { date, time },
            crc32,
            compressed_size,
            uncompressed_size,
            disk_number_start,
            internal_attributes,
            external_attributes,
            local_header_offset,
            file_name: read_bytes(reader, name_len)?,
            extra_field: read_bytes(reader, extra_len)?,
            file_comment: read_bytes(reader, comment_len)?,
        })
    }
}

/// End of central directory record closing the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    /// Number of this disk
    pub disk_number: u16,
    /// Disk where the central directory starts
    pub disk_with_central_directory: u16,
    /// Entries in the central directory on this disk
    pub entries_on_this_disk: u16,
    /// Total entries in the central directory
    pub total_entries: u16,
    /// Size of the central directory in bytes
    pub central_directory_size: u32,
    /// Offset of the central directory from the start of the archive
    pub central_directory_offset: u32,
    /// Archive comment
    pub comment: Vec<u8>,
}

impl EndOfCentralDirectory {
    /// Record for a single-disk archive
    pub fn single_disk(entries: u16, size: u32, offset: u32) -> Self {
        Self {
            disk_number: 0,
            disk_with_central_directory: 0,
            entries_on_this_disk: entries,
            total_entries: entries,
            central_directory_size: size,
            central_directory_offset: offset,
            comment: Vec::new(),
        }
    }

    /// Write the record
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(END_OF_CENTRAL_DIRECTORY_SIGNATURE)?;
        writer.write_u16::<LittleEndian>(self.disk_number)?;
        writer.write_u16::<LittleEndian>(self.disk_with_central_directory)?;
        writer.write_u16::<LittleEndian>(self.entries_on_this_disk)?;
        writer.write_u16::<LittleEndian>(self.total_entries)?;
        writer.write_u32::<LittleEndian>(self.central_directory_size)?;
        writer.write_u32::<LittleEndian>(self.central_directory_offset)?;
        writer.write_u16::<LittleEndian>(self.comment.len() as u16)?;
        writer.write_all(&self.comment)?;
        Ok(())
    }

    /// Read a record positioned at the signature
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let signature = reader.read_u32::<LittleEndian>()?;
        if signature != END_OF_CENTRAL_DIRECTORY_SIGNATURE {
            return Err(Error::invalid_format(
                "Invalid end of central directory signature",
            ));
        }

        let disk_number = reader.read_u16::<LittleEndian>()?;
        let disk_with_central_directory = reader.read_u16::<LittleEndian>()?;
        let entries_on_this_disk = reader.read_u16::<LittleEndian>()?;
        let total_entries = reader.read_u16::<LittleEndian>()?;
        let central_directory_size = reader.read_u32::<LittleEndian>()?;
        let central_directory_offset = reader.read_u32::<LittleEndian>()?;
        let comment_len = reader.read_u16::<LittleEndian>()?;

        Ok(Self {
            disk_number,
            disk_with_central_directory,
            entries_on_this_disk,
            total_entries,
            central_directory_size,
            central_directory_offset,
            comment: read_bytes(reader, comment_len)?,
        })
    }

    /// Locate and parse the record by scanning backwards from the end
    ///
    /// The record sits in the last `22 + 65535` bytes; a candidate signature
    /// only counts if its comment length reaches exactly to the end of the
    /// file. Returns the record together with its offset.
    pub fn find_and_read<R: Read + Seek>(reader: &mut R) -> Result<(Self, u64)> {
        let file_length = reader.seek(SeekFrom::End(0))?;
        if file_length < END_OF_CENTRAL_DIRECTORY_SIZE {
            return Err(Error::invalid_format(format!(
                "File of {file_length} bytes is too small to be a zip archive"
            )));
        }

        let tail_length = file_length.min(END_OF_CENTRAL_DIRECTORY_SIZE + u64::from(u16::MAX));
        let tail_start = file_length - tail_length;
        reader.seek(SeekFrom::Start(tail_start))?;
        let mut tail = vec![0u8; tail_length as usize];
        reader.read_exact(&mut tail)?;

        let signature = END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes();
        let last_candidate = tail.len() - END_OF_CENTRAL_DIRECTORY_SIZE as usize;

        for pos in (0..=last_candidate).rev() {
            if tail[pos..pos + 4] != signature {
                continue;
            }

            let comment_len = u16::from_le_bytes([tail[pos + 20], tail[pos + 21]]) as usize;
            if pos + END_OF_CENTRAL_DIRECTORY_SIZE as usize + comment_len == tail.len() {
                let record = Self::read(&mut Cursor::new(&tail[pos..]))?;
                return Ok((record, tail_start + pos as u64));
            }
        }

        Err(Error::invalid_format(
            "Could not find end of central directory record",
        ))
    }
}

fn read_bytes<R: Read>(reader: &mut R, len: u16) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; usize::from(len)];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
