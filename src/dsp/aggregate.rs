use thiserror::Error;

use crate::data::model::{RawTable, AMPLITUDE_COLUMN, MIN_ROW_CELLS};

// ---------------------------------------------------------------------------
// Row Aggregator: raw tables → averaged signals
// ---------------------------------------------------------------------------

/// Why a table was rejected.  Rejection is recoverable: the batch continues
/// and the rejected table leaves no placeholder in the output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableRejection {
    #[error("extracted {found} samples, expected {rows} rows x {channels} channels")]
    ShapeMismatch {
        found: usize,
        rows: usize,
        channels: usize,
    },
}

/// Average every accepted table into one signal of length `rows`.
///
/// Each table's amplitude column (index 1) is extracted from every
/// well-formed row (at least four cells, numeric-coercible amplitude) and
/// laid out column-major: channel `b` occupies sample indices
/// `[b*rows, (b+1)*rows)`.  Sample `i` of the output is the mean across the
/// `channels` blocks.
///
/// A table whose extracted sample count is not exactly `rows * channels` is
/// skipped with a diagnostic; the output stays dense (no placeholder), so
/// output indices track accepted tables, not the original table list.
pub fn average_tables(tables: &[RawTable], rows: usize, channels: usize) -> Vec<Vec<f64>> {
    let mut signals = Vec::with_capacity(tables.len());

    for (table_no, table) in tables.iter().enumerate() {
        match average_table(table, rows, channels) {
            Ok(signal) => signals.push(signal),
            Err(reason) => log::warn!("table {table_no}: {reason}, skipping"),
        }
    }

    signals
}

/// Aggregate one table, or report why its shape does not match.
pub fn average_table(
    table: &RawTable,
    rows: usize,
    channels: usize,
) -> Result<Vec<f64>, TableRejection> {
    let samples = extract_amplitudes(table);
    if samples.len() != rows * channels {
        return Err(TableRejection::ShapeMismatch {
            found: samples.len(),
            rows,
            channels,
        });
    }

    let mut signal = Vec::with_capacity(rows);
    for i in 0..rows {
        let sum: f64 = (0..channels).map(|b| samples[b * rows + i]).sum();
        signal.push(sum / channels as f64);
    }
    Ok(signal)
}

/// Flatten the amplitude column of all well-formed rows, in row order.
/// Malformed rows (too few cells, or a non-numeric amplitude cell) are
/// silently excluded.
fn extract_amplitudes(table: &RawTable) -> Vec<f64> {
    table
        .rows
        .iter()
        .filter(|row| row.len() >= MIN_ROW_CELLS)
        .filter_map(|row| row[AMPLITUDE_COLUMN].as_f64())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RawRow};

    fn row(amplitude: f64) -> RawRow {
        vec![
            CellValue::Integer(0),
            CellValue::Float(amplitude),
            CellValue::Float(0.0),
            CellValue::Integer(1),
        ]
    }

    fn table_of(amplitudes: &[f64]) -> RawTable {
        RawTable::new(amplitudes.iter().map(|&a| row(a)).collect())
    }

    #[test]
    fn mean_of_identical_channels_is_the_constant() {
        // 4 channels x 3 rows, every sample = 7.5.
        let table = table_of(&[7.5; 12]);
        let signals = average_tables(&[table], 3, 4);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0], vec![7.5, 7.5, 7.5]);
    }

    #[test]
    fn column_major_averaging() {
        // 2 channels x 2 rows: channel 0 = [1, 2], channel 1 = [3, 6].
        let table = table_of(&[1.0, 2.0, 3.0, 6.0]);
        let signals = average_tables(&[table], 2, 2);
        assert_eq!(signals[0], vec![2.0, 4.0]);
    }

    #[test]
    fn short_rows_are_discarded_before_the_shape_check() {
        let mut rows: Vec<RawRow> = (0..4).map(|_| row(1.0)).collect();
        rows.insert(2, vec![CellValue::Integer(9), CellValue::Float(99.0)]);
        let signals = average_tables(&[RawTable::new(rows)], 2, 2);
        assert_eq!(signals, vec![vec![1.0, 1.0]]);
    }

    #[test]
    fn non_numeric_amplitude_makes_the_row_unusable() {
        let mut rows: Vec<RawRow> = (0..4).map(|_| row(2.0)).collect();
        rows[1][AMPLITUDE_COLUMN] = CellValue::Text("saturated".into());
        // Only 3 usable rows remain -> shape mismatch -> table skipped.
        let signals = average_tables(&[RawTable::new(rows)], 2, 2);
        assert!(signals.is_empty());
    }

    #[test]
    fn skipped_tables_leave_no_gap() {
        let good = table_of(&[1.0, 1.0, 1.0, 1.0]);
        let bad = table_of(&[1.0; 3]); // wrong sample count
        let signals = average_tables(&[bad.clone(), good.clone(), bad], 2, 2);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0], vec![1.0, 1.0]);
    }

    #[test]
    fn empty_batch_yields_empty_matrix() {
        assert!(average_tables(&[], 100, 5).is_empty());
    }

    #[test]
    fn rejection_reports_the_shape_it_found() {
        let err = average_table(&table_of(&[1.0; 3]), 2, 2).unwrap_err();
        assert_eq!(
            err,
            TableRejection::ShapeMismatch {
                found: 3,
                rows: 2,
                channels: 2,
            }
        );
    }
}
