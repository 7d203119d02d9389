/// Data layer: raw recording tables and file loading.
///
/// Architecture:
/// ```text
///  .parquet / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ RawTable  │  Vec<RawRow>, loosely-typed cells
///   └──────────┘
///        │
///        ▼
///     dsp::aggregate  (column-1 extraction, channel averaging)
/// ```

pub mod loader;
pub mod model;
