use crate::{error::StabilityError, generator::builder::format_quantity};
use chrono::NaiveDateTime;
use csv::Writer;
use serde::Serialize;
use stability_schemas::record::SampleRecord;
use std::fs;
use std::path::Path;
use tracing::info;

/// LabKey sample type column headers, in export order. Must match the
/// `SampleRow` renames.
pub const HEADERS: [&str; 15] = [
    "Parent",
    "Description",
    "Label",
    "Micro Label",
    "Sample Date",
    "Time Point",
    "Time Point Units",
    "Conc. (mg/mL)",
    "Storage Temp",
    "DS Temperature",
    "Formulation",
    "Experiment Id",
    "Storage Vial Orientation Conditions",
    "Transportation",
    "Stability Freeze Thaw Count",
];

/// One exported row. Field names are the LabKey sample type's column headers.
#[derive(Debug, Serialize)]
struct SampleRow<'a> {
    #[serde(rename = "Parent")]
    parent: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Label")]
    label: &'a str,
    #[serde(rename = "Micro Label")]
    micro_label: &'a str,
    #[serde(rename = "Sample Date")]
    sample_date: String,
    #[serde(rename = "Time Point")]
    time_point: String,
    #[serde(rename = "Time Point Units")]
    time_point_units: &'static str,
    #[serde(rename = "Conc. (mg/mL)")]
    concentration: String,
    #[serde(rename = "Storage Temp")]
    storage_temp: &'a str,
    #[serde(rename = "DS Temperature")]
    ds_temperature: &'a str,
    #[serde(rename = "Formulation")]
    formulation: &'a str,
    #[serde(rename = "Experiment Id")]
    experiment_id: &'a str,
    #[serde(rename = "Storage Vial Orientation Conditions")]
    vial_orientation: &'static str,
    #[serde(rename = "Transportation")]
    transportation: &'static str,
    #[serde(rename = "Stability Freeze Thaw Count")]
    freeze_thaw_count: String,
}

impl<'a> From<&'a SampleRecord> for SampleRow<'a> {
    fn from(sample: &'a SampleRecord) -> Self {
        Self {
            parent: &sample.parent,
            description: &sample.description,
            label: &sample.label,
            micro_label: &sample.micro_label,
            sample_date: sample.sample_date.format("%Y-%m-%d").to_string(),
            time_point: sample.time_point.map(format_quantity).unwrap_or_default(),
            time_point_units: sample.time_point_unit.map_or("", |u| u.as_str()),
            concentration: format_quantity(sample.concentration),
            storage_temp: sample.storage_temp().unwrap_or(""),
            ds_temperature: sample.ds_temperature().unwrap_or(""),
            formulation: &sample.formulation,
            experiment_id: &sample.experiment_id,
            vial_orientation: sample.vial_orientation().map_or("", |o| o.as_str()),
            transportation: sample.transportation.map_or("", |t| t.label()),
            freeze_thaw_count: sample
                .freeze_thaw_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// `stability_samples_{experiment_id}_{YYYYmmdd_HHMMSS}.{ext}`
pub fn export_file_name(
    experiment_id: &str,
    generated_at: NaiveDateTime,
    format: ExportFormat,
) -> String {
    format!(
        "stability_samples_{}_{}.{}",
        experiment_id,
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Writes samples as CSV, one row per sample, headed by the LabKey column names.
/// The header row is written even when no sample is.
pub struct CsvSampleWriter {
    path: String,
    writer: Writer<fs::File>,
    rows: usize,
}

impl CsvSampleWriter {
    pub fn new(path: &Path) -> Result<Self, StabilityError> {
        let display = path.display().to_string();
        let writer =
            Writer::from_path(path).map_err(|e| StabilityError::CsvError(display.clone(), e))?;
        Ok(Self {
            path: display,
            writer,
            rows: 0,
        })
    }

    pub fn write_sample(&mut self, sample: &SampleRecord) -> Result<(), StabilityError> {
        self.writer
            .serialize(SampleRow::from(sample))
            .map_err(|e| StabilityError::CsvError(self.path.clone(), e))?;
        self.rows += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), StabilityError> {
        // serialize() emits the header with the first row only
        if self.rows == 0 {
            self.writer
                .write_record(HEADERS)
                .map_err(|e| StabilityError::CsvError(self.path.clone(), e))?;
        }
        self.writer
            .flush()
            .map_err(|e| StabilityError::FileIO(self.path.clone(), e))
    }
}

/// Writes every sample to `path` in the given format.
pub fn write_samples(
    path: &Path,
    samples: &[SampleRecord],
    format: ExportFormat,
) -> Result<(), StabilityError> {
    match format {
        ExportFormat::Csv => {
            let mut writer = CsvSampleWriter::new(path)?;
            for sample in samples {
                writer.write_sample(sample)?;
            }
            writer.finish()?;
        }
        ExportFormat::Json => {
            let rows: Vec<SampleRow<'_>> = samples.iter().map(SampleRow::from).collect();
            let file = fs::File::create(path)
                .map_err(|e| StabilityError::FileIO(path.display().to_string(), e))?;
            serde_json::to_writer_pretty(file, &rows)?;
        }
    }
    info!(path = %path.display(), samples = samples.len(), "Exported samples");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stability_schemas::{
        record::StorageCondition,
        vocabulary::{TimeUnit, TransportLeg, VialOrientation},
    };

    fn sample(micro_label: &str) -> SampleRecord {
        SampleRecord {
            parent: "P1".to_string(),
            description: format!("mAb1 SrcA, F1, 100 mg/mL, {}", micro_label),
            label: format!("mAb1 SrcA, F1, 100 mg/mL, {}", micro_label),
            micro_label: micro_label.to_string(),
            sample_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time_point: None,
            time_point_unit: None,
            concentration: 100.0,
            storage: StorageCondition::Unassigned,
            formulation: "F1".to_string(),
            experiment_id: "EXP1".to_string(),
            transportation: None,
            freeze_thaw_count: None,
        }
    }

    #[test]
    fn test_export_file_name() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        assert_eq!(
            export_file_name("EXP1", at, ExportFormat::Csv),
            "stability_samples_EXP1_20240305_140709.csv"
        );
        assert_eq!(
            export_file_name("EXP1", at, ExportFormat::Json),
            "stability_samples_EXP1_20240305_140709.json"
        );
    }

    #[test]
    fn test_csv_has_labkey_headers_and_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");

        let mut pull = sample("2-8°C, 1m upright");
        pull.time_point = Some(1.0);
        pull.time_point_unit = Some(TimeUnit::Month);
        pull.storage = StorageCondition::DrugProduct {
            temperature: "2-8°C".to_string(),
            vial_orientation: Some(VialOrientation::Upright),
        };
        let mut ft = sample("3X FT");
        ft.freeze_thaw_count = Some(3);

        write_samples(&path, &[pull, ft], ExportFormat::Csv).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, HEADERS);
        assert_eq!(headers[7], "Conc. (mg/mL)");
        assert_eq!(headers[12], "Storage Vial Orientation Conditions");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][4], "2024-01-01");
        assert_eq!(&rows[0][5], "1");
        assert_eq!(&rows[0][6], "month");
        assert_eq!(&rows[0][7], "100");
        assert_eq!(&rows[0][8], "2-8°C");
        assert_eq!(&rows[0][9], "");
        assert_eq!(&rows[0][12], "upright");
        assert_eq!(&rows[1][5], "");
        assert_eq!(&rows[1][8], "");
        assert_eq!(&rows[1][14], "3");
    }

    #[test]
    fn test_empty_csv_still_has_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_samples(&path, &[], ExportFormat::Csv).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), HEADERS.join(","));
        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 15);
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_json_uses_labkey_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.json");
        let mut ctrl = sample("ctrl");
        ctrl.transportation = Some(TransportLeg::Control);

        write_samples(&path, &[ctrl], ExportFormat::Json).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["Micro Label"], "ctrl");
        assert_eq!(value[0]["Transportation"], "Control");
        assert_eq!(value[0]["Time Point"], "");
    }
}
