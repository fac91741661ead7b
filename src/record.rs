//! Typed soil measurement records.
//!
//! Field layout mirrors the sensor export: six numeric soil measurements
//! plus the observed yield, a location label, and a timestamp. Numeric
//! coercion of non-finite values happens in exactly one place,
//! [`finite_or_zero`], applied at ingestion and at feature extraction so no
//! NaN or infinity ever reaches the linear algebra.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of soil features feeding the regression. Order is fixed for the
/// lifetime of a fit and defines the coefficient-to-feature mapping.
pub const FEATURE_COUNT: usize = 6;

/// Feature names in model order; coefficient `i` aligns with
/// `FEATURE_NAMES[i]`.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "ph",
    "moisture",
    "nitrogen",
    "phosphorus",
    "potassium",
    "temperature_c",
];

/// Maps missing-equivalent values (NaN, ±infinity) to 0.0.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// One soil-sensor measurement with its observed crop yield.
///
/// Produced by the ingestion boundary (or the caller's own parsing layer)
/// and consumed read-only by the engine.
///
/// # Examples
///
/// ```
/// use cosecha::record::SoilRecord;
/// use chrono::Utc;
///
/// let record = SoilRecord {
///     timestamp: Utc::now(),
///     location: "Plot-A".to_string(),
///     ph: 6.5,
///     moisture: 40.0,
///     nitrogen: 55.0,
///     phosphorus: 30.0,
///     potassium: 160.0,
///     temperature_c: 22.0,
///     observed_yield: 3200.0,
/// };
/// assert_eq!(record.features().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilRecord {
    /// When the measurement was taken.
    pub timestamp: DateTime<Utc>,
    /// Field or plot label.
    pub location: String,
    /// Soil pH.
    pub ph: f64,
    /// Soil moisture, percent.
    pub moisture: f64,
    /// Nitrogen, kg/ha.
    pub nitrogen: f64,
    /// Phosphorus, kg/ha.
    pub phosphorus: f64,
    /// Potassium, kg/ha.
    pub potassium: f64,
    /// Soil temperature, degrees Celsius.
    pub temperature_c: f64,
    /// Observed crop yield, kg/ha.
    pub observed_yield: f64,
}

impl SoilRecord {
    /// Extracts the feature vector in fixed model order, coercing
    /// non-finite measurements to 0.
    #[must_use]
    pub fn features(&self) -> Vec<f64> {
        vec![
            finite_or_zero(self.ph),
            finite_or_zero(self.moisture),
            finite_or_zero(self.nitrogen),
            finite_or_zero(self.phosphorus),
            finite_or_zero(self.potassium),
            finite_or_zero(self.temperature_c),
        ]
    }
}

/// A soil record plus the fields derived from one analysis pass.
///
/// The input record is carried unchanged; the engine never mutates it in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedRecord {
    /// The original record, flattened into the serialized output.
    #[serde(flatten)]
    pub record: SoilRecord,
    /// Yield predicted by the shared cohort fit, kg/ha.
    pub predicted_yield: f64,
    /// Fertilizer recommendation text.
    pub recommended_fertilizer: String,
    /// Deterministic narrative summary.
    pub narrative: String,
}
