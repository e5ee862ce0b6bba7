/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   dashboard/all_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, check required columns → BikeDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ BikeDataset  │  DataFrame (all columns) + typed bike frame
///   └─────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  duplicates, describe, grouped means → Summaries
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;
