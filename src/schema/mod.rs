pub mod layout;
pub mod types;

pub use layout::{load_layout, parse_layout};
pub use types::{Column, ColumnType, Layout};
