/// Data layer: core types, loading, and year filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ObservationSet
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ObservationSet  │  Vec<Observation>, source column names
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year >= cutoff → transient Vec<Observation>
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
