//! Data layer: core types, loading, and per-chart preparation.
//!
//! Architecture:
//! ```text
//!  four CSVs (Shift_JIS / UTF-8)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  decode + parse → WageTables (fatal on any error)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ WageTables │  read-only after startup
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ prepare   │  pure per-chart transforms → fresh derived rows
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod prepare;
