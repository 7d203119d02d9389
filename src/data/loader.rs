use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, RawRow, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one recording table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – Parquet file with one scalar column per table column
/// * `.csv`     – headerless rows of cells, one table row per record
/// * `.json`    – `[[cell, cell, ...], ...]` (array of row arrays)
///
/// One file corresponds to exactly one recording, i.e. one [`RawTable`].
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema: a top-level array of rows, each row an array of
/// loosely-typed cells:
///
/// ```json
/// [
///   [0, 0.0123, 1.0e-5, 1],
///   [1, 0.0119, 2.0e-5, 1],
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let cells = rec
            .as_array()
            .with_context(|| format!("Row {i} is not a JSON array"))?;
        rows.push(cells.iter().map(json_to_cell).collect::<RawRow>());
    }

    Ok(RawTable::new(rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Integer(*b as i64),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: no header row, one table row per record, cells in column
/// order.  Row widths may vary (the aggregator discards short rows), so the
/// reader runs in flexible mode.
fn load_csv(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

fn parse_csv<R: Read>(input: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(cell_from_str).collect::<RawRow>());
    }

    Ok(RawTable::new(rows))
}

fn cell_from_str(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet recording.
///
/// Expected schema: scalar columns only (ints, floats, strings, bools); each
/// record-batch row becomes one table row with cells in schema order.  Works
/// with files written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let n_rows = batch.num_rows();
        let n_cols = batch.num_columns();

        for row in 0..n_rows {
            let mut cells = RawRow::with_capacity(n_cols);
            for col in 0..n_cols {
                cells.push(extract_cell(batch.column(col), row));
            }
            rows.push(cells);
        }
    }

    Ok(RawTable::new(rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CellValue::Text(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CellValue::Text(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        _ => CellValue::Text(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn csv_rows_parse_into_typed_cells() {
        let input = "0,0.012,1e-5,1\n1,not-a-number,2e-5,1\n2,0.009\n";
        let table = parse_csv(Cursor::new(input)).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0][0], CellValue::Integer(0));
        assert_eq!(table.rows[0][1], CellValue::Float(0.012));
        assert_eq!(table.rows[1][1], CellValue::Text("not-a-number".into()));
        // Short rows survive loading; the aggregator discards them.
        assert_eq!(table.rows[2].len(), 2);
    }

    #[test]
    fn csv_empty_cells_become_null() {
        let table = parse_csv(Cursor::new("1,,3,4\n")).unwrap();
        assert_eq!(table.rows[0][1], CellValue::Null);
    }

    #[test]
    fn json_array_of_rows_parses() {
        let table = parse_json(r#"[[0, 0.5, null, "ok"], [1, 0.25, 1e-5, 2]]"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][1], CellValue::Float(0.5));
        assert_eq!(table.rows[0][2], CellValue::Null);
        assert_eq!(table.rows[0][3], CellValue::Text("ok".into()));
        assert_eq!(table.rows[1][3], CellValue::Integer(2));
    }

    #[test]
    fn json_top_level_object_is_rejected() {
        assert!(parse_json(r#"{"rows": []}"#).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("recording.db")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
