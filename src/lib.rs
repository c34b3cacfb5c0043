//! Fluxo - monthly cash-flow extraction and analysis
//!
//! This library reads cash-flow workbooks laid out with `RECEITAS`,
//! `DESPESAS` and (optionally) `OUTROS` rows against month columns,
//! normalizes them into an ordered monthly series with a derived balance,
//! and can forward the series to a hosted model for narrative insights.
//!
//! # Features
//!
//! - Label/month-column discovery in unstructured sheets
//! - Brazilian-locale currency coercion (`R$ 1.234,56` → `1234.56`)
//! - Derived per-month balance (`revenue - expense + other`)
//! - Summary statistics and terminal reports
//! - AI insight generation via an OpenAI-compatible gateway
//!
//! # Example
//!
//! ```no_run
//! use fluxo::types::{Cell, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![Cell::Text("Mês".into()), Cell::Text("JAN/2025".into())],
//!     vec![Cell::Text("RECEITAS".into()), Cell::Number(1000.0)],
//!     vec![Cell::Text("DESPESAS".into()), Cell::Number(400.0)],
//! ]);
//!
//! let records = fluxo::extract::extract(&grid)?;
//! assert_eq!(records[0].balance, 600.0);
//! # Ok::<(), fluxo::error::FluxoError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod extract;
pub mod insight;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{FluxoError, FluxoResult};
pub use types::{CashflowRecord, CashflowSummary, Cell, Grid};
