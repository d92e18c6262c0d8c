/// Data layer: run loading, aggregation, and summary files.
///
/// Architecture:
/// ```text
///  {name}-0.txt, {name}-1.txt, …
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse each file → RunSet (one series per run)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  mean / stderr / cumulative stderr → Summary
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  {name}.txt | .csv | .json
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;
pub mod writer;
