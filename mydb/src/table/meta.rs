//! Table meta-data (`<table>.meta`).
//!
//! # Format
//!
//! Whitespace-separated tokens:
//!
//! ```text
//! <record size in bytes> <column count>
//! <column name> <0|1>
//! ...
//! ```
//!
//! One `(name, flag)` pair follows per column, in record order. Flag `1`
//! marks a column that gets an in-memory index; `0` leaves it to linear
//! scans.

use std::fmt;

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub indexed: bool,
}

/// Parsed table meta-data.
///
/// # Invariants
///
/// - `record_size > 0`
/// - `columns` is non-empty and holds unique names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    /// Width of one record in the data file, including its line terminator.
    pub record_size: u64,
    /// Columns in the order their fields appear in a record.
    pub columns: Vec<Column>,
}

impl TableMeta {
    /// Parse meta-data text.
    pub fn parse(text: &str) -> Result<Self, MetaError> {
        let mut tokens = text.split_whitespace();

        let record_size = parse_number(tokens.next(), "record size")?;
        if record_size == 0 {
            return Err(MetaError::ZeroRecordSize);
        }
        let declared = usize::try_from(parse_number(tokens.next(), "column count")?)
            .map_err(|_| MetaError::InvalidNumber {
                field: "column count",
                value: "out of range".to_owned(),
            })?;

        let mut columns: Vec<Column> = Vec::with_capacity(declared);
        while let Some(name) = tokens.next() {
            let indexed = match tokens.next() {
                Some("1") => true,
                Some("0") => false,
                Some(flag) => {
                    return Err(MetaError::InvalidFlag {
                        column: name.to_owned(),
                        flag: flag.to_owned(),
                    });
                }
                None => return Err(MetaError::MissingFlag(name.to_owned())),
            };
            if columns.iter().any(|column| column.name == name) {
                return Err(MetaError::DuplicateColumn(name.to_owned()));
            }
            columns.push(Column {
                name: name.to_owned(),
                indexed,
            });
        }

        if columns.is_empty() || columns.len() != declared {
            return Err(MetaError::ColumnCountMismatch {
                declared,
                found: columns.len(),
            });
        }

        Ok(Self {
            record_size,
            columns,
        })
    }

    /// Number of columns per record.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the named column within a record.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Whether `name` is a column of this table.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Indexed columns with their record positions, in record order.
    pub fn indexed_columns(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.indexed)
    }
}

fn parse_number(token: Option<&str>, field: &'static str) -> Result<u64, MetaError> {
    let token = token.ok_or(MetaError::MissingField(field))?;
    token.parse::<u64>().map_err(|_| MetaError::InvalidNumber {
        field,
        value: token.to_owned(),
    })
}

/// Error returned when meta-data text is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// The header ended before a required number.
    MissingField(&'static str),
    /// A header field is not a non-negative integer.
    InvalidNumber { field: &'static str, value: String },
    /// The record size is zero.
    ZeroRecordSize,
    /// A column name is not followed by its index flag.
    MissingFlag(String),
    /// An index flag is neither `0` nor `1`.
    InvalidFlag { column: String, flag: String },
    /// Two columns share a name.
    DuplicateColumn(String),
    /// The header's column count disagrees with the listed columns.
    ColumnCountMismatch { declared: usize, found: usize },
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing {field}"),
            Self::InvalidNumber { field, value } => write!(f, "invalid {field}: '{value}'"),
            Self::ZeroRecordSize => write!(f, "record size must be positive"),
            Self::MissingFlag(column) => write!(f, "column '{column}' has no index flag"),
            Self::InvalidFlag { column, flag } => {
                write!(f, "column '{column}' has index flag '{flag}', expected 0 or 1")
            }
            Self::DuplicateColumn(column) => write!(f, "column '{column}' is listed twice"),
            Self::ColumnCountMismatch { declared, found } => {
                write!(f, "header declares {declared} columns but {found} are listed")
            }
        }
    }
}

impl std::error::Error for MetaError {}
