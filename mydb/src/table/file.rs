//! Fixed-width record file (`<table>.data`).
//!
//! Record `i` starts at byte offset `i * record_size`. Within a record the
//! fields are separated by whitespace and padded with spaces up to the
//! record width. Offsets are the values stored in the column indexes.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::table::TableError;

/// A read-only handle on a table's data file.
pub struct RecordFile {
    path: PathBuf,
    file: File,
    len: u64,
    record_size: u64,
    column_count: usize,
}

impl RecordFile {
    /// Open the data file at `path`.
    ///
    /// Pre-condition: `record_size > 0`.
    pub fn open(path: &Path, record_size: u64, column_count: usize) -> Result<Self, TableError> {
        assert!(record_size > 0, "record size must be positive");

        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file.metadata()?.len();

        if len % record_size != 0 {
            tracing::warn!(
                "{} is {len} bytes, not a multiple of the {record_size}-byte record size; \
                 ignoring the trailing partial record",
                path.display()
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            len,
            record_size,
            column_count,
        })
    }

    /// Number of complete records in the file.
    #[must_use]
    pub const fn record_count(&self) -> u64 {
        self.len / self.record_size
    }

    /// Byte offsets of every record, in file order.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + use<> {
        let record_size = self.record_size;
        (0..self.record_count()).map(move |i| i * record_size)
    }

    /// Read the fields of the record starting at `offset`.
    ///
    /// The whole record must lie inside the file; a trailing partial record
    /// is out of bounds, matching [`record_count`](Self::record_count).
    pub fn read_record(&mut self, offset: u64) -> Result<Vec<String>, TableError> {
        let out_of_bounds = || TableError::OffsetOutOfBounds {
            offset,
            len: self.len,
        };
        let end = offset.checked_add(self.record_size).ok_or_else(out_of_bounds)?;
        if end > self.len {
            return Err(out_of_bounds());
        }

        let width = usize::try_from(self.record_size).map_err(|_| out_of_bounds())?;
        let mut buf = vec![0u8; width];

        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut buf)?;

        let text = String::from_utf8_lossy(&buf);
        let fields: Vec<String> = text
            .split_whitespace()
            .take(self.column_count)
            .map(str::to_owned)
            .collect();

        if fields.len() < self.column_count {
            return Err(TableError::ShortRecord {
                offset,
                expected: self.column_count,
                found: fields.len(),
            });
        }
        Ok(fields)
    }

    /// Offsets of every record whose field at `column` equals `value`.
    ///
    /// Used for columns without an index.
    pub fn scan_equal(&mut self, column: usize, value: &str) -> Result<Vec<u64>, TableError> {
        let mut matches = Vec::new();
        for offset in self.offsets() {
            let record = self.read_record(offset)?;
            if record.get(column).is_some_and(|field| field == value) {
                matches.push(offset);
            }
        }
        tracing::debug!(
            "linear scan of {} for column {column} = {value}: {} match(es)",
            self.path.display(),
            matches.len()
        );
        Ok(matches)
    }
}
