/// Data layer: core types, loading, and column extraction.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .xls
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  workbook → CSV text → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  headers, Vec<Row>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  column   │  selectable columns, numeric extraction → Vec<f64>
///   └──────────┘
/// ```

pub mod column;
pub mod loader;
pub mod model;
