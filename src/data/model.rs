use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a raw recording table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring what the acquisition exports put
/// into each column. Kept as a small tagged union so the "malformed cell"
/// path of the aggregator is an explicit, testable branch instead of an
/// implicit coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    /// Anything that arrived as text; may still be a printed number.
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric coercion used by the aggregator. `Integer` and `Float`
    /// always succeed; `Text` succeeds only when it parses as a float;
    /// `Null` never does.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawRow / RawTable – one recorded file as a table of rows
// ---------------------------------------------------------------------------

/// One row of a recording table: an ordered sequence of loosely-typed cells.
/// Valid rows carry at least four cells, with the MBN amplitude sample at
/// column index 1.
pub type RawRow = Vec<CellValue>;

/// Column index of the MBN amplitude sample within a row.
pub const AMPLITUDE_COLUMN: usize = 1;

/// Minimum cell count for a row to be considered well-formed.
pub const MIN_ROW_CELLS: usize = 4;

/// The full contents of one recorded file, as produced by the loader.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        RawTable { rows }
    }

    /// Number of rows (including malformed ones).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
