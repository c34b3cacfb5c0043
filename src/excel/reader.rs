//! Workbook reader implementation - Excel (.xlsx/.xls) → cell grid

use crate::error::{FluxoError, FluxoResult};
use crate::types::{Cell, Grid};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Read the first worksheet of a workbook into a [`Grid`].
///
/// The file bytes are read asynchronously; decoding is synchronous once the
/// bytes are in memory.
pub async fn load_grid<P: AsRef<Path>>(path: P) -> FluxoResult<Grid> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    grid_from_bytes(&bytes)
}

/// Decode workbook bytes and convert the first sheet to a grid.
pub fn grid_from_bytes(bytes: &[u8]) -> FluxoResult<Grid> {
    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| FluxoError::Workbook(format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FluxoError::Workbook("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| FluxoError::Workbook(format!("failed to read sheet '{sheet_name}': {e}")))?;

    debug!(sheet = %sheet_name, rows = range.height(), "decoded first worksheet");
    Ok(grid_from_range(&range))
}

fn grid_from_range(range: &Range<Data>) -> Grid {
    let rows = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Grid::from_rows(rows)
}

/// Fold every calamine cell variant into the three-shape cell union.
///
/// Booleans and ISO date strings become text (they coerce to 0 like any
/// non-numeric text), serial datetimes keep their numeric value, and error
/// cells read as blank.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}
