//! Agronomic insight generation over fitted yield predictions.
//!
//! Consumes a cohort of soil records, fits one shared regression over the
//! whole set, and derives per-record predictions, fertilizer-deficit
//! recommendations, and narrative summaries plus a cohort-level digest.
//! Everything here is deterministic templating over computed values; there
//! is no learned text generation and no state between calls.

use serde::Serialize;

use crate::error::Result;
use crate::linear_model::LinearRegression;
use crate::primitives::{Matrix, Vector};
use crate::record::{finite_or_zero, AnalyzedRecord, SoilRecord};
use crate::traits::Estimator;

/// Recommendation text when no nutrient is below its ideal level.
pub const NO_FERTILIZER_NEEDED: &str = "No additional fertilizer needed";

/// Fixed irrigation reminder appended to every narrative.
const IRRIGATION_REMINDER: &str = "Consider irrigation if moisture < 30%.";

/// Cohort advisories, always emitted regardless of data values.
const LIMING_ADVISORY: &str = "Fields with low pH (<6) may need liming.";
const NITROGEN_ADVISORY: &str = "Monitor nitrogen levels closely for optimal growth.";

/// Ideal nutrient levels (kg/ha) against which deficits are computed.
///
/// A nutrient strictly below its ideal level produces an additive
/// recommendation for the difference; equality produces none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealNutrients {
    /// Ideal nitrogen, kg/ha.
    pub nitrogen: f64,
    /// Ideal phosphorus, kg/ha.
    pub phosphorus: f64,
    /// Ideal potassium, kg/ha.
    pub potassium: f64,
}

impl Default for IdealNutrients {
    fn default() -> Self {
        Self {
            nitrogen: 50.0,
            phosphorus: 25.0,
            potassium: 150.0,
        }
    }
}

/// Result of one analysis pass over a record cohort.
///
/// Constructed fresh per call and handed to the caller; the engine retains
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Input records with predictions, recommendations, and narratives
    /// attached.
    pub records: Vec<AnalyzedRecord>,
    /// Cohort-level insight strings.
    pub insights: Vec<String>,
    /// Mean predicted yield across the cohort; `None` for empty input.
    pub mean_predicted_yield: Option<f64>,
}

impl AnalysisReport {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            insights: Vec::new(),
            mean_predicted_yield: None,
        }
    }
}

/// Analyzes a cohort of soil records with the default nutrient ideals.
///
/// Fits one regression over the full record set, predicts per record with
/// the shared coefficients, and derives recommendations and narratives.
///
/// # Examples
///
/// ```
/// use cosecha::insight::analyze;
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
///
/// let report = analyze(&[record]).unwrap();
/// assert_eq!(report.records.len(), 1);
/// assert!(report.mean_predicted_yield.is_some());
/// ```
///
/// # Errors
///
/// Propagates `SingularMatrix` for pathological cohorts whose Gram matrix
/// stays singular after ridge regularization.
pub fn analyze(records: &[SoilRecord]) -> Result<AnalysisReport> {
    analyze_with(records, &IdealNutrients::default())
}

/// Analyzes a cohort against caller-supplied nutrient ideals.
///
/// Empty input returns an empty report without ever fitting a model.
///
/// # Errors
///
/// Same failure modes as [`analyze`].
pub fn analyze_with(records: &[SoilRecord], ideal: &IdealNutrients) -> Result<AnalysisReport> {
    if records.is_empty() {
        return Ok(AnalysisReport::empty());
    }

    let rows: Vec<Vec<f64>> = records.iter().map(SoilRecord::features).collect();
    let x = Matrix::from_rows(&rows)?;
    let y = Vector::from_vec(
        records
            .iter()
            .map(|r| finite_or_zero(r.observed_yield))
            .collect(),
    );

    // One shared fit for the whole cohort; every record is predicted with
    // the same coefficient vector.
    let mut model = LinearRegression::new();
    model.fit(&x, &y)?;

    let mut analyzed = Vec::with_capacity(records.len());
    for (record, features) in records.iter().zip(&rows) {
        let predicted_yield = model.predict_row(features)?;
        let recommended_fertilizer = recommend_fertilizer(record, ideal);
        let narrative = compose_narrative(record, predicted_yield, &recommended_fertilizer);
        analyzed.push(AnalyzedRecord {
            record: record.clone(),
            predicted_yield,
            recommended_fertilizer,
            narrative,
        });
    }

    let mean_yield =
        analyzed.iter().map(|r| r.predicted_yield).sum::<f64>() / analyzed.len() as f64;
    let insights = vec![
        format!("Average predicted yield: {mean_yield:.0} kg/ha."),
        LIMING_ADVISORY.to_string(),
        NITROGEN_ADVISORY.to_string(),
    ];

    Ok(AnalysisReport {
        records: analyzed,
        insights,
        mean_predicted_yield: Some(mean_yield),
    })
}

/// Builds the fertilizer recommendation from nutrient deficits.
///
/// Deficits are formatted to one decimal place and joined with ", ". The
/// threshold is exclusive of equality: a nutrient exactly at its ideal
/// level is not deficient.
fn recommend_fertilizer(record: &SoilRecord, ideal: &IdealNutrients) -> String {
    let levels = [
        ("nitrogen", finite_or_zero(record.nitrogen), ideal.nitrogen),
        (
            "phosphorus",
            finite_or_zero(record.phosphorus),
            ideal.phosphorus,
        ),
        ("potassium", finite_or_zero(record.potassium), ideal.potassium),
    ];

    let parts: Vec<String> = levels
        .iter()
        .filter(|(_, level, target)| level < target)
        .map(|(name, level, target)| format!("Add {:.1} kg {name}/ha", target - level))
        .collect();

    if parts.is_empty() {
        NO_FERTILIZER_NEEDED.to_string()
    } else {
        parts.join(", ")
    }
}

/// Composes the per-record narrative. Pure formatting over values the
/// pipeline already computed.
fn compose_narrative(record: &SoilRecord, predicted_yield: f64, recommendation: &str) -> String {
    format!(
        "Analysis for {}: Predicted yield is {:.0} kg/ha based on soil conditions \
         (pH: {}, moisture: {}%). {}. {}",
        record.location,
        predicted_yield,
        record.ph,
        record.moisture,
        recommendation,
        IRRIGATION_REMINDER
    )
}
