/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (fails on missing columns / zero rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<LaunchRecord>, site order, payload bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site selector + payload range → matching records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
