//! Flat-file table storage.
//!
//! A table named `t` lives in a directory as two files:
//!
//! - `t.meta`: record width, column names, and which columns are indexed
//!   (see [`TableMeta`])
//! - `t.data`: fixed-width records addressed by byte offset (see
//!   [`RecordFile`])

mod file;
mod meta;

pub use file::RecordFile;
pub use meta::{Column, MetaError, TableMeta};

use std::fmt;
use std::path::{Path, PathBuf};

/// An opened table: its meta-data plus a handle on its records.
pub struct Table {
    name: String,
    meta: TableMeta,
    records: RecordFile,
}

impl Table {
    /// Open the table `name` stored in `directory`.
    pub fn open(directory: &Path, name: &str) -> Result<Self, TableError> {
        let meta_path = directory.join(format!("{name}.meta"));
        let text = std::fs::read_to_string(&meta_path).map_err(|source| TableError::Open {
            path: meta_path.clone(),
            source,
        })?;
        let meta = TableMeta::parse(&text).map_err(|source| TableError::Meta {
            path: meta_path,
            source,
        })?;

        let data_path = directory.join(format!("{name}.data"));
        let records = RecordFile::open(&data_path, meta.record_size, meta.column_count())?;

        tracing::debug!(
            "opened table {name}: {} columns, {} records of {} bytes",
            meta.column_count(),
            records.record_count(),
            meta.record_size
        );

        Ok(Self {
            name: name.to_owned(),
            meta,
            records,
        })
    }

    /// Name the table was opened under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table's meta-data.
    #[must_use]
    pub const fn meta(&self) -> &TableMeta {
        &self.meta
    }

    /// The table's record file.
    #[allow(clippy::missing_const_for_fn)] // mutable references can't be const
    pub fn records_mut(&mut self) -> &mut RecordFile {
        &mut self.records
    }
}

/// Errors that can occur while reading a table.
#[derive(Debug)]
pub enum TableError {
    /// A table file could not be opened.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The meta file is malformed.
    Meta { path: PathBuf, source: MetaError },
    /// I/O error while reading records.
    Io(std::io::Error),
    /// A record offset lies past the end of the data file.
    OffsetOutOfBounds { offset: u64, len: u64 },
    /// A record holds fewer fields than the table has columns.
    ShortRecord {
        offset: u64,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "couldn't open file '{}': {source}", path.display())
            }
            Self::Meta { path, source } => {
                write!(f, "malformed meta file '{}': {source}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OffsetOutOfBounds { offset, len } => {
                write!(f, "record offset {offset} is beyond end of file ({len} bytes)")
            }
            Self::ShortRecord {
                offset,
                expected,
                found,
            } => write!(
                f,
                "record at offset {offset} has {found} fields, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Io(source) => Some(source),
            Self::Meta { source, .. } => Some(source),
            Self::OffsetOutOfBounds { .. } | Self::ShortRecord { .. } => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
