//! AXS Accessibility
//!
//! Table grid reconstruction and header/data-cell association.
//!
//! A data table can declare cells spanning multiple rows and columns. To
//! associate every data cell with the header cells that describe it, the
//! engine first rebuilds the logical two-dimensional grid the markup
//! represents, validates the header block, and then writes `scope`, `id`,
//! and `headers` attributes back onto the cells:
//! - column association links a data cell to the header cells above its
//!   logical column (requires a rectangular header block)
//! - row association links a data cell to header cells earlier in its row
//!
//! Malformed markup never aborts a pass; it only reduces how much
//! association takes place.

pub mod associate;
pub mod cell;
pub mod grid;
pub mod ids;

pub use associate::{FixReport, TableFixer};
pub use cell::{CellHandle, CellInfo, CellKind, CellPool, expand_row, parse_span};
pub use grid::{Matrix, build_matrix, header_is_valid};
pub use ids::IdGenerator;

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Expected a table element, found <{0}>")]
    NotATable(String),
}
