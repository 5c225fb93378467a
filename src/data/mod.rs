/// Data layer: typed tables, loading, filtering, and the KPI math.
///
/// Architecture:
/// ```text
///  fg_by_roof.csv / fg_by_roof_distbins.csv / fg_by_season_roof.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSVs → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  typed rows, one Vec per table
///   └──────────┘
///        │            FilterConfig (roofs, season range, toggles)
///        ▼                 │
///   ┌───────────┐          │
///   │ aggregate  │◄────────┤  weighted per-roof summary / bypass
///   └───────────┘          │
///        │                 │
///        ▼                 │
///   ┌──────────┐           │
///   │   kpi     │◄─────────┘  category lookups, bucket deltas
///   └──────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod model;
