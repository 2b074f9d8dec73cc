//! Convert fixed-width flat files into CSV.
//!
//! A layout file lists one column per line as `name,size,type`, where type is
//! `date`, `string` or `numeric`. Every input line must be exactly as wide as
//! the sum of the sizes; each slice is then trimmed and converted:
//! dates go from `YYYY-MM-DD` to `DD/MM/YYYY`, numerics become `f64`, strings
//! are kept verbatim (and by default must not contain inner whitespace).
//!
//! ```
//! use fixed2csv::{convert_line, parse_layout, FieldValue};
//!
//! let layout = parse_layout("Birth date,10,date\nName,6,string\nWeight,5,numeric").unwrap();
//! let record = convert_line("1975-01-31Jane   61.1", layout.columns(), layout.total_width()).unwrap();
//!
//! assert_eq!(record[0], FieldValue::Date("31/01/1975".into()));
//! assert_eq!(record[1], FieldValue::Text("Jane".into()));
//! assert_eq!(record[2], FieldValue::Numeric(61.1));
//! ```

pub mod error;
pub mod process;
pub mod schema;

pub use error::{ConvertError, LayoutError};
pub use process::{
    convert_file, convert_line, convert_reader, write_csv, ConversionSummary, ConvertOptions,
    FieldValue, LineConverter, Record, StringRule,
};
pub use schema::{load_layout, parse_layout, Column, ColumnType, Layout};
