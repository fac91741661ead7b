//! CSV ingestion of soil records.
//!
//! The parsing boundary where loose tabular data becomes typed
//! [`SoilRecord`]s. Missing, unparseable, or non-finite numeric cells
//! coerce to 0 here, so the engine downstream never sees a hole. Headers
//! are matched case-insensitively against the canonical column names.

use std::io;

use chrono::{DateTime, Utc};
use csv::StringRecord;

use crate::error::Result;
use crate::record::{finite_or_zero, SoilRecord};

/// Reads soil records from CSV data.
///
/// Expected columns: `timestamp`, `location`, `ph`, `moisture`,
/// `nitrogen`, `phosphorus`, `potassium`, `temperature_c`,
/// `observed_yield`. Any may be absent; numeric gaps become 0, a missing
/// location becomes a generated `Plot-{row}` label, and a missing or
/// unparseable timestamp becomes the current time.
///
/// # Examples
///
/// ```
/// use cosecha::ingest::records_from_csv;
///
/// let csv = "location,ph,moisture,nitrogen,phosphorus,potassium,temperature_c,observed_yield\n\
///            Plot-A,6.5,40,55,30,160,22,3200\n";
/// let records = records_from_csv(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].location, "Plot-A");
/// assert_eq!(records[0].nitrogen, 55.0);
/// ```
///
/// # Errors
///
/// Returns `Csv` for malformed CSV structure and `Io` for read failures.
pub fn records_from_csv<R: io::Read>(reader: R) -> Result<Vec<SoilRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(record_from_row(&headers, &row, idx));
    }
    Ok(records)
}

fn record_from_row(headers: &StringRecord, row: &StringRecord, idx: usize) -> SoilRecord {
    let field = |name: &str| -> Option<&str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|i| row.get(i))
            .filter(|value| !value.is_empty())
    };
    let numeric = |name: &str| -> f64 {
        field(name)
            .and_then(|value| value.parse::<f64>().ok())
            .map(finite_or_zero)
            .unwrap_or(0.0)
    };

    let location = field("location")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Plot-{}", idx + 1));
    let timestamp = field("timestamp")
        .and_then(|value| value.parse::<DateTime<Utc>>().ok())
        .unwrap_or_else(Utc::now);

    SoilRecord {
        timestamp,
        location,
        ph: numeric("ph"),
        moisture: numeric("moisture"),
        nitrogen: numeric("nitrogen"),
        phosphorus: numeric("phosphorus"),
        potassium: numeric("potassium"),
        temperature_c: numeric("temperature_c"),
        observed_yield: numeric("observed_yield"),
    }
}
