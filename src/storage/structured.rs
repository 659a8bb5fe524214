//! Structured binary I/O for the on-disk index files.
//!
//! Every integer is fixed width and little-endian: `u32` for counts, ids,
//! gaps and lengths, `u64` for byte offsets, `f64` for weights. Strings are
//! a `u32` byte length followed by UTF-8 bytes.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{PilumError, Result};

/// A structured file writer for binary data.
pub struct StructWriter<W: Write> {
    writer: W,
    position: u64,
}

impl<W: Write> StructWriter<W> {
    /// Create a new structured file writer.
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            position: 0,
        }
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a u64 value (little-endian).
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.writer.write_u64::<LittleEndian>(value)?;
        self.position += 8;
        Ok(())
    }

    /// Write a f64 value (little-endian).
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.writer.write_f64::<LittleEndian>(value)?;
        self.position += 8;
        Ok(())
    }

    /// Write a length, failing if it does not fit the u32 prefix.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len)
            .map_err(|_| PilumError::storage(format!("length {len} does not fit in u32")))?;
        self.write_u32(len)
    }

    /// Write a string with length prefix.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        self.write_len(bytes.len())?;
        self.writer.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write ascending values as gaps: the first absolute, each next one as
    /// the difference from its predecessor.
    pub fn write_gaps(&mut self, values: &[u32]) -> Result<()> {
        let mut previous = 0u32;
        for &value in values {
            let gap = value.checked_sub(previous).ok_or_else(|| {
                PilumError::storage(format!("values not ascending: {value} after {previous}"))
            })?;
            self.write_u32(gap)?;
            previous = value;
        }
        Ok(())
    }

    /// Get current file position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush and return the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// A structured file reader for binary data.
pub struct StructReader<R: Read + Seek> {
    reader: R,
}

impl<R: Read + Seek> StructReader<R> {
    /// Create a new structured file reader.
    pub fn new(reader: R) -> Self {
        StructReader { reader }
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.reader.read_u32::<LittleEndian>()?)
    }

    /// Read a u64 value (little-endian).
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(self.reader.read_u64::<LittleEndian>()?)
    }

    /// Read a f64 value (little-endian).
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(self.reader.read_f64::<LittleEndian>()?)
    }

    /// Read a string with length prefix.
    pub fn read_string(&mut self) -> Result<String> {
        let length = u64::from(self.read_u32()?);
        let mut bytes = Vec::new();
        let read = self.reader.by_ref().take(length).read_to_end(&mut bytes)?;
        if read as u64 != length {
            return Err(PilumError::storage(format!(
                "string truncated: expected {length} bytes, found {read}"
            )));
        }
        String::from_utf8(bytes).map_err(|e| PilumError::storage(format!("Invalid UTF-8: {e}")))
    }

    /// Read `count` gap-encoded values, undoing the gaps with a running total.
    pub fn read_gaps(&mut self, count: usize) -> Result<Vec<u32>> {
        let mut values = Vec::with_capacity(count.min(1 << 16));
        let mut total = 0u32;
        for _ in 0..count {
            let gap = self.read_u32()?;
            total = total
                .checked_add(gap)
                .ok_or_else(|| PilumError::storage("gap overflows u32"))?;
            values.push(total);
        }
        Ok(values)
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let offset = i64::try_from(count)
            .map_err(|_| PilumError::storage(format!("cannot skip {count} bytes")))?;
        self.reader.seek(SeekFrom::Current(offset))?;
        Ok(())
    }

    /// Move to an absolute byte offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Get current file position.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.reader.stream_position()?)
    }
}
