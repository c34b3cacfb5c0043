//! Cash-flow sheet extraction.
//!
//! Locates the `RECEITAS` / `DESPESAS` (and optional `OUTROS`) label rows
//! and the month-header columns inside a raw cell grid, then walks the
//! month block left to right producing one [`CashflowRecord`] per column.

use crate::error::{FluxoError, FluxoResult};
use crate::types::{CashflowRecord, Cell, Grid};
use tracing::{debug, warn};

/// Year suffixes that mark a header cell as a month column.
pub const YEAR_TOKENS: &[&str] = &["/2024", "/2025"];

const REVENUE_LABEL: &str = "RECEITAS";
const EXPENSE_LABEL: &str = "DESPESAS";
const OTHER_LABEL: &str = "OUTROS";

/// Discovered positions of the labeled rows and the month header.
///
/// Produced by a single fold over the grid; the first occurrence wins for
/// every field. The header row and the month start column are fixed by the
/// same cell (the first month-token cell in scan order), so the two can
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub revenue_row: usize,
    pub expense_row: usize,
    pub other_row: Option<usize>,
    pub header_row: usize,
    pub months_start_col: usize,
}

impl GridLayout {
    /// Scan every cell left to right, top to bottom, recording label rows
    /// and the first month-token cell.
    pub fn discover(grid: &Grid) -> FluxoResult<Self> {
        let mut revenue_row = None;
        let mut expense_row = None;
        let mut other_row = None;
        let mut months = None;

        for (i, row) in grid.rows().iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let label = cell.label();

                if label == REVENUE_LABEL && revenue_row.is_none() {
                    debug!(row = i, "found RECEITAS row");
                    revenue_row = Some(i);
                }
                if label == EXPENSE_LABEL && expense_row.is_none() {
                    debug!(row = i, "found DESPESAS row");
                    expense_row = Some(i);
                }
                if label == OTHER_LABEL && other_row.is_none() {
                    debug!(row = i, "found OUTROS row");
                    other_row = Some(i);
                }
                if months.is_none() && is_month_token(&label) {
                    debug!(row = i, col = j, "found month header");
                    months = Some((i, j));
                }
            }
        }

        let (revenue_row, expense_row) = match (revenue_row, expense_row) {
            (Some(r), Some(e)) => (r, e),
            _ => {
                return Err(FluxoError::Structure(
                    "unrecognized sheet layout: RECEITAS and DESPESAS label rows are required"
                        .to_string(),
                ))
            }
        };

        let (header_row, months_start_col) = months.ok_or_else(|| {
            FluxoError::Structure("could not identify any month columns".to_string())
        })?;

        Ok(Self {
            revenue_row,
            expense_row,
            other_row,
            header_row,
            months_start_col,
        })
    }
}

/// Extract the ordered month series from a raw grid.
///
/// Walks the header row from the month start column. Non-month cells before
/// the first record are skipped (leading blank or label columns); the first
/// non-month cell after a record ends the month block. Rows missing the
/// OUTROS label contribute 0 to every month.
pub fn extract(grid: &Grid) -> FluxoResult<Vec<CashflowRecord>> {
    let layout = GridLayout::discover(grid)?;
    let records = walk_months(grid, &layout);

    if records.is_empty() {
        return Err(FluxoError::NoData(
            "no month data could be extracted from the sheet".to_string(),
        ));
    }

    debug!(months = records.len(), "extraction complete");
    Ok(records)
}

fn walk_months(grid: &Grid, layout: &GridLayout) -> Vec<CashflowRecord> {
    let mut records = Vec::new();

    for col in layout.months_start_col..grid.row_len(layout.header_row) {
        let header = grid.cell(layout.header_row, col);
        if !is_month_token(&header.label()) {
            if records.is_empty() {
                continue;
            }
            break;
        }

        let revenue = parse_value(grid.cell(layout.revenue_row, col));
        let expense = parse_value(grid.cell(layout.expense_row, col));
        let other = layout
            .other_row
            .map_or(0.0, |row| parse_value(grid.cell(row, col)));

        records.push(CashflowRecord::new(header.text(), revenue, expense, other));
    }

    records
}

/// True if a normalized header cell marks a month column.
pub fn is_month_token(label: &str) -> bool {
    YEAR_TOKENS.iter().any(|token| label.contains(token))
}

/// Coerce a cell to a numeric value. Never fails: blanks and malformed
/// text degrade to 0.
///
/// Text cells are cleaned of the `R$` currency marker, whitespace and
/// thousands-separator periods, and the decimal comma becomes a period, so
/// `"R$ 1.234,56"` reads as `1234.56`.
pub fn parse_value(cell: &Cell) -> f64 {
    match cell {
        Cell::Empty => 0.0,
        Cell::Number(n) => *n,
        Cell::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !(*c == 'R' || *c == '$' || *c == '.' || c.is_whitespace()))
                .collect();
            match cleaned.replacen(',', ".", 1).parse::<f64>() {
                Ok(n) => n,
                Err(_) => {
                    if !s.trim().is_empty() {
                        warn!(cell = %s, "cell is not numeric, using 0");
                    }
                    0.0
                }
            }
        }
    }
}
