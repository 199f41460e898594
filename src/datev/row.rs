//! Fixed-width DATEV data rows.

use super::columns::{
    BUCHUNGSSTAPEL_COLUMNS_V700, BUCHUNGSSTAPEL_WIDTH, DEBITOREN_KREDITOREN_COLUMNS_V700,
    DEBITOREN_KREDITOREN_WIDTH,
};

/// Record layout of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Buchungsstapel posting (125 columns).
    Booking,
    /// Debitoren/Kreditoren master record (243 columns).
    Partner,
}

impl RecordKind {
    pub fn width(&self) -> usize {
        match self {
            Self::Booking => BUCHUNGSSTAPEL_WIDTH,
            Self::Partner => DEBITOREN_KREDITOREN_WIDTH,
        }
    }

    /// Column label line for this layout.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Booking => &BUCHUNGSSTAPEL_COLUMNS_V700,
            Self::Partner => &DEBITOREN_KREDITOREN_COLUMNS_V700,
        }
    }
}

/// One data row: exactly `kind.width()` cells, unset cells are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatevRow {
    kind: RecordKind,
    cells: Vec<String>,
}

impl DatevRow {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            cells: vec![String::new(); kind.width()],
        }
    }

    /// Set a cell. Positions come from the `*_field` constants, which are
    /// checked against the column tables, so an out-of-range index is a bug.
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        assert!(
            index < self.cells.len(),
            "column {index} out of range for {:?} record",
            self.kind
        );
        self.cells[index] = value.into();
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}
