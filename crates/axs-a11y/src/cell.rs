//! Cell pool and span expansion
//!
//! One physical `<td>`/`<th>` becomes one pool entry; matrix slots alias
//! entries through `CellHandle`, so a spanned cell is shared, never copied.

use axs_dom::{DomTree, NodeId};

// Browsers clamp colspan to 1000; astronomically large spans occur in the
// wild and would otherwise size the matrix.
const MAX_SPAN: u32 = 1000;

/// Cell classification, decided once during span expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `<th>`
    Header,
    /// `<td>`
    Data,
}

/// One physical table cell
#[derive(Debug, Clone, Copy)]
pub struct CellInfo {
    /// The cell element
    pub node: NodeId,
    /// Header or data, from the tag
    pub kind: CellKind,
    /// Effective rowspan (always >= 1)
    pub rowspan: u32,
}

/// Index into a `CellPool`
///
/// Handle identity is what "same cell" means for spanned slots, so
/// visited-sets key on it to apply per-cell mutations exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellHandle(u32);

/// Pool of physical cells referenced by matrix slots
#[derive(Debug, Default)]
pub struct CellPool {
    cells: Vec<CellInfo>,
}

impl CellPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, info: CellInfo) -> CellHandle {
        let handle = CellHandle(self.cells.len() as u32);
        self.cells.push(info);
        handle
    }

    pub fn get(&self, handle: CellHandle) -> &CellInfo {
        &self.cells[handle.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parse a `rowspan`/`colspan` attribute value.
///
/// Absent, non-numeric, zero, or negative values all mean "no spanning".
pub fn parse_span(value: Option<&str>) -> u32 {
    let n = value
        .unwrap_or("1")
        .trim()
        .parse::<i64>()
        .unwrap_or(1);
    if n <= 1 {
        1
    } else {
        (n as u64).min(MAX_SPAN as u64) as u32
    }
}

/// Expand one physical row into logical columns.
///
/// Every `td`/`th` child of `row` gets a pool entry; a cell declaring
/// `colspan = n` emits its handle at `n` consecutive positions. Output
/// length equals the sum of effective colspans. Pure read/derive step: no
/// attribute is mutated.
pub fn expand_row(tree: &DomTree, row: NodeId, pool: &mut CellPool) -> Vec<CellHandle> {
    let mut out = Vec::new();
    for cell in tree.children(row) {
        let kind = match tree.tag_name(cell) {
            Some("th") => CellKind::Header,
            Some("td") => CellKind::Data,
            _ => continue,
        };

        let colspan = parse_span(tree.attr(cell, "colspan"));
        let rowspan = parse_span(tree.attr(cell, "rowspan"));
        let handle = pool.alloc(CellInfo {
            node: cell,
            kind,
            rowspan,
        });
        for _ in 0..colspan {
            out.push(handle);
        }
    }
    out
}
