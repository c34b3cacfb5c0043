//! Excel workbook ingestion
//!
//! Decodes `.xlsx`/`.xls` files and converts the first worksheet into the
//! raw cell grid the extractor works on.

mod reader;

pub use reader::{grid_from_bytes, load_grid};
