// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The conversion rule a column's raw text goes through.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Date,
    String,
    Numeric,
}

impl ColumnType {
    /// Exact, case-sensitive match on the layout token.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "date" => Some(ColumnType::Date),
            "string" => Some(ColumnType::String),
            "numeric" => Some(ColumnType::Numeric),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Date => "date",
            ColumnType::String => "string",
            ColumnType::Numeric => "numeric",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single fixed-width column as parsed from a layout file.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct Column {
    pub name: String,
    /// Width in characters, always > 0.
    pub size: usize,
    pub ty: ColumnType,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column(name='{}', size={}, type={})",
            self.name, self.size, self.ty
        )
    }
}

/// Ordered, immutable column specification.
#[derive(Debug, Serialize, PartialEq, Clone, Eq)]
pub struct Layout {
    columns: Vec<Column>,
    #[serde(skip)]
    width: usize,
}

impl Layout {
    /// `width` must be the sum of the column sizes, already checked for overflow.
    pub(crate) fn new(columns: Vec<Column>, width: usize) -> Self {
        Self { columns, width }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sum of all column sizes, i.e. the expected length of every raw line.
    pub fn total_width(&self) -> usize {
        self.width
    }

    /// Column names in order, used as the CSV header row.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Canonical diagnostic form: `[Column(...), Column(...)]`.
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", col)?;
        }
        f.write_str("]")
    }
}
