//! CSV Import
//!
//! Loads heat-meter valve readings from CSV exports. Meter vendors disagree
//! on header naming and timestamp formats, so columns are matched against a
//! set of known aliases and timestamps against a ladder of formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashSet;
use std::path::Path;

use crate::store::ValveSample;

/// Errors from CSV import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no timestamp column found (expected sample_time, cloud_received_time, or any header containing \"time\")")]
    NoTimestampColumn,
}

/// Result of a CSV import operation
#[derive(Debug)]
pub struct ImportSummary {
    /// Parsed samples, ready for the store
    pub samples: Vec<ValveSample>,
    /// Data rows encountered, including skipped ones
    pub rows_read: usize,
    /// Rows converted into samples
    pub rows_imported: usize,
    /// Rows dropped for unreadable structure or timestamps
    pub rows_skipped: usize,
    /// Exact duplicate rows dropped
    pub duplicates_dropped: usize,
    /// Per-row error messages, truncated after 100 entries
    pub errors: Vec<String>,
}

/// Measurement columns recognized in valve CSV exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    T1RemoteK,
    T2EmbeddedK,
    DeltaTK,
    FlowVolumeTotalM3,
    OperatingHours,
}

/// Resolved positions of the columns we care about
struct ColumnMap {
    timestamp: usize,
    device: Option<usize>,
    fields: Vec<(usize, Field)>,
}

/// CSV importer for valve readings
pub struct CsvImporter {
    default_device_id: String,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvImporter {
    /// Create an importer with the standard default device ID
    pub fn new() -> Self {
        Self {
            default_device_id: "default_device".to_string(),
        }
    }

    /// Set the device ID used for rows without a device column
    pub fn with_default_device(mut self, device_id: &str) -> Self {
        self.default_device_id = device_id.to_string();
        self
    }

    /// Import readings from a CSV file
    pub fn import_path(&self, path: &Path) -> Result<ImportSummary, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;
        self.import_reader(reader)
    }

    /// Import readings from a CSV string (useful for testing)
    pub fn import_str(&self, csv_data: &str) -> Result<ImportSummary, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        self.import_reader(reader)
    }

    fn import_reader<R: std::io::Read>(
        &self,
        mut reader: csv::Reader<R>,
    ) -> Result<ImportSummary, ImportError> {
        let headers = reader.headers()?.clone();
        let columns = resolve_columns(&headers)?;

        let mut samples = Vec::new();
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut rows_read = 0;
        let mut rows_skipped = 0;
        let mut duplicates_dropped = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            // Header occupies line 1
            let actual_line = line_num + 2;
            rows_read += 1;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_skipped += 1;
                    continue;
                }
            };

            let key: Vec<String> = record.iter().map(str::to_string).collect();
            if !seen.insert(key) {
                duplicates_dropped += 1;
                continue;
            }

            let ts_str = record.get(columns.timestamp).unwrap_or("").trim();
            let sample_time = match parse_timestamp(ts_str) {
                Some(ts) => ts,
                None => {
                    errors.push(format!(
                        "Line {}: unparseable timestamp {:?}",
                        actual_line, ts_str
                    ));
                    rows_skipped += 1;
                    continue;
                }
            };

            let device_id = columns
                .device
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(&self.default_device_id)
                .to_string();

            let mut sample = ValveSample::new(device_id, sample_time);
            for &(idx, field) in &columns.fields {
                let value = record.get(idx).and_then(parse_measurement);
                match field {
                    Field::T1RemoteK => sample.t1_remote_k = value,
                    Field::T2EmbeddedK => sample.t2_embedded_k = value,
                    Field::DeltaTK => sample.delta_t_k = value,
                    Field::FlowVolumeTotalM3 => sample.flow_volume_total_m3 = value,
                    Field::OperatingHours => sample.operating_hours = value,
                }
            }

            samples.push(sample);
        }

        // Truncate errors if too many
        if errors.len() > 100 {
            let total = errors.len();
            errors.truncate(100);
            errors.push(format!("... and {} more errors", total - 100));
        }

        let rows_imported = samples.len();
        Ok(ImportSummary {
            samples,
            rows_read,
            rows_imported,
            rows_skipped,
            duplicates_dropped,
            errors,
        })
    }
}

/// Locate the timestamp, device, and measurement columns in the header row
fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnMap, ImportError> {
    let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let timestamp = lower
        .iter()
        .position(|h| h == "sample_time")
        .or_else(|| lower.iter().position(|h| h == "cloud_received_time"))
        .or_else(|| lower.iter().position(|h| h.contains("time")))
        .ok_or(ImportError::NoTimestampColumn)?;

    let device = lower
        .iter()
        .position(|h| h == "device_id")
        .or_else(|| lower.iter().position(|h| h == "device"));

    let mut fields = Vec::new();
    for (idx, header) in lower.iter().enumerate() {
        if idx == timestamp || Some(idx) == device {
            continue;
        }
        if let Some(field) = field_for_header(header) {
            fields.push((idx, field));
        }
    }

    Ok(ColumnMap {
        timestamp,
        device,
        fields,
    })
}

/// Map a lowercased header onto a measurement field
fn field_for_header(header: &str) -> Option<Field> {
    match header {
        "t1_remote_k" | "t1" => Some(Field::T1RemoteK),
        // The historical export spells it "embeded"
        "t2_embeded_k" | "t2_embedded_k" | "t2" => Some(Field::T2EmbeddedK),
        "deltat_k" | "delta_t_k" | "deltat" | "delta_t" => Some(Field::DeltaTK),
        "flow_volume_total_m3" | "flow_volume" | "flow" => Some(Field::FlowVolumeTotalM3),
        "operatinghours" | "operating_hours" => Some(Field::OperatingHours),
        _ => None,
    }
}

/// Parse a timestamp string, trying the formats seen in meter exports
fn parse_timestamp(ts_str: &str) -> Option<DateTime<Utc>> {
    if ts_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    // Date-only rows land on midnight
    if let Ok(date) = NaiveDate::parse_from_str(ts_str, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Parse a measurement cell; non-finite and non-numeric values become None
fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_import_with_aliased_headers() {
        let csv_data = "device_id,sample_time,T1_remote_K,T2_embeded_K,DeltaT_K,Flow_Volume,OperatingHours
meter-1,2024-01-15T08:00:00Z,301.5,281.2,20.3,1542.7,8760";

        let result = CsvImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_imported, 1);
        let sample = &result.samples[0];
        assert_eq!(sample.device_id, "meter-1");
        assert_eq!(sample.sample_time.hour(), 8);
        assert_eq!(sample.t1_remote_k, Some(301.5));
        assert_eq!(sample.t2_embedded_k, Some(281.2));
        assert_eq!(sample.delta_t_k, Some(20.3));
        assert_eq!(sample.flow_volume_total_m3, Some(1542.7));
        assert_eq!(sample.operating_hours, Some(8760.0));
    }

    #[test]
    fn test_duplicate_rows_dropped() {
        let csv_data = "sample_time,T1
2024-01-15 08:00:00,301.5
2024-01-15 08:00:00,301.5
2024-01-15 09:00:00,301.5";

        let result = CsvImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_read, 3);
        assert_eq!(result.rows_imported, 2);
        assert_eq!(result.duplicates_dropped, 1);
    }

    #[test]
    fn test_non_finite_values_become_none() {
        let csv_data = "sample_time,T1,DeltaT_K
2024-01-15 08:00:00,inf,nan
2024-01-15 09:00:00,-inf,garbage";

        let result = CsvImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_imported, 2);
        for sample in &result.samples {
            assert_eq!(sample.t1_remote_k, None);
            assert_eq!(sample.delta_t_k, None);
        }
    }

    #[test]
    fn test_rows_with_bad_timestamps_are_skipped() {
        let csv_data = "sample_time,T1
not-a-date,301.5
2024-01-15 08:00:00,302.5";

        let result = CsvImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_read, 2);
        assert_eq!(result.rows_imported, 1);
        assert_eq!(result.rows_skipped, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Line 2"));
        assert_eq!(result.samples[0].t1_remote_k, Some(302.5));
    }

    #[test]
    fn test_missing_device_column_uses_default() {
        let csv_data = "sample_time,T1
2024-01-15 08:00:00,301.5";

        let result = CsvImporter::new().import_str(csv_data).unwrap();
        assert_eq!(result.samples[0].device_id, "default_device");

        let result = CsvImporter::new()
            .with_default_device("plant-7")
            .import_str(csv_data)
            .unwrap();
        assert_eq!(result.samples[0].device_id, "plant-7");
    }

    #[test]
    fn test_timestamp_falls_back_to_cloud_received_time() {
        let csv_data = "cloud_received_time,T1
2024-01-15 08:00:00,301.5";

        let result = CsvImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_imported, 1);
        assert_eq!(result.samples[0].sample_time.hour(), 8);
    }

    #[test]
    fn test_any_time_header_is_accepted() {
        let csv_data = "MeasurementTime,T1
2024-01-15 08:00:00,301.5";

        let result = CsvImporter::new().import_str(csv_data).unwrap();
        assert_eq!(result.rows_imported, 1);
    }

    #[test]
    fn test_no_timestamp_column_is_an_error() {
        let csv_data = "device_id,T1
meter-1,301.5";

        let result = CsvImporter::new().import_str(csv_data);
        assert!(matches!(result, Err(ImportError::NoTimestampColumn)));
    }

    #[test]
    fn test_date_only_timestamps_land_on_midnight() {
        let csv_data = "sample_time,T1
2024-01-15,301.5";

        let result = CsvImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_imported, 1);
        assert_eq!(result.samples[0].sample_time.hour(), 0);
    }

    #[test]
    fn test_import_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "device,sample_time,T1").unwrap();
        writeln!(file, "meter-1,2024-01-15T08:00:00Z,301.5").unwrap();
        writeln!(file, "meter-2,2024-01-15T09:00:00Z,").unwrap();
        file.flush().unwrap();

        let result = CsvImporter::new().import_path(file.path()).unwrap();

        assert_eq!(result.rows_imported, 2);
        assert_eq!(result.samples[0].device_id, "meter-1");
        assert_eq!(result.samples[1].device_id, "meter-2");
        assert_eq!(result.samples[1].t1_remote_k, None);
    }
}
