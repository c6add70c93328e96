//! Reading and writing content sheets
//!
//! Files are opened only for the duration of a read or a write.

pub mod sheet;

pub use sheet::{read_content, read_content_from, write_scheduled, write_scheduled_to};
