//! Cosecha: soil-to-yield regression and agronomic insight engine.
//!
//! Cosecha ingests tabular soil-sensor measurements (pH, moisture, N/P/K,
//! temperature) paired with observed crop yields, fits a ridge-stabilized
//! linear model over the cohort, and derives per-record yield predictions,
//! fertilizer-deficit recommendations, and narrative summaries.
//!
//! The engine is synchronous and free of shared mutable state: every
//! analysis call fits fresh over the full record set it is given and
//! returns a self-contained report. HTTP routing, file upload, persistent
//! storage, and UI rendering are the caller's concern.
//!
//! # Quick Start
//!
//! ```
//! use cosecha::prelude::*;
//! use chrono::Utc;
//!
//! let records = vec![
//!     SoilRecord {
//!         timestamp: Utc::now(),
//!         location: "Plot-A".to_string(),
//!         ph: 6.5,
//!         moisture: 40.0,
//!         nitrogen: 55.0,
//!         phosphorus: 30.0,
//!         potassium: 160.0,
//!         temperature_c: 22.0,
//!         observed_yield: 3200.0,
//!     },
//!     SoilRecord {
//!         timestamp: Utc::now(),
//!         location: "Plot-B".to_string(),
//!         ph: 5.9,
//!         moisture: 28.0,
//!         nitrogen: 42.0,
//!         phosphorus: 18.0,
//!         potassium: 120.0,
//!         temperature_c: 25.0,
//!         observed_yield: 2650.0,
//!     },
//! ];
//!
//! let report = analyze(&records).unwrap();
//! assert_eq!(report.records.len(), 2);
//! assert!(report.records[1]
//!     .recommended_fertilizer
//!     .contains("kg nitrogen/ha"));
//! assert!(report.mean_predicted_yield.is_some());
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense `Matrix` and `Vector` types with Gauss–Jordan
//!   inversion
//! - [`linear_model`]: Ridge-stabilized OLS regression
//! - [`insight`]: Fertilizer recommendations, narratives, cohort digest
//! - [`record`]: Typed soil records and the numeric-coercion boundary
//! - [`ingest`]: CSV-to-record parsing
//! - [`metrics`]: Regression metrics (R², MSE, RMSE)
//! - [`error`]: Crate-wide error type
//! - [`traits`]: Estimator contract

pub mod error;
pub mod ingest;
pub mod insight;
pub mod linear_model;
pub mod metrics;
pub mod prelude;
pub mod primitives;
pub mod record;
pub mod traits;

pub use error::{CosechaError, Result};
pub use insight::{analyze, AnalysisReport};
pub use linear_model::LinearRegression;
pub use record::SoilRecord;
