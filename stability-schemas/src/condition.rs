//! Defines the stability design of a study: the time points samples are pulled
//! at, the storage conditions they are held under, and which combinations of
//! the two are actually planned.

use crate::vocabulary::{TimeUnit, VialOrientation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distinguishes drug product from drug substance studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyType {
    DrugProduct,
    DrugSubstance,
}

impl StudyType {
    pub fn abbreviation(self) -> &'static str {
        match self {
            StudyType::DrugProduct => "DP",
            StudyType::DrugSubstance => "DS",
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// A scheduled pull point (e.g., 3 months).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub value: f64,
    #[serde(default)]
    pub unit: Option<TimeUnit>,
}

impl TimePoint {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    /// A zero (or unfilled) time point stands for "no time point" and yields no samples.
    pub fn is_scheduled(&self) -> bool {
        self.value > 0.0
    }
}

/// A drug product storage condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpTemperature {
    pub label: String,
    #[serde(default)]
    pub vial_orientation: Option<VialOrientation>,
    /// Vials stored beyond the planned pulls. Negative counts are treated as zero.
    #[serde(default)]
    pub extra_vials: i32,
}

impl DpTemperature {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            vial_orientation: None,
            extra_vials: 0,
        }
    }

    pub fn with_orientation(mut self, orientation: VialOrientation) -> Self {
        self.vial_orientation = Some(orientation);
        self
    }

    pub fn with_extra_vials(mut self, count: i32) -> Self {
        self.extra_vials = count;
        self
    }
}

/// A drug substance storage condition. Bulk substance is held in bags, so
/// there is no vial orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsTemperature {
    pub label: String,
    #[serde(default, alias = "extra_bags")]
    pub extra_vials: i32,
}

impl DsTemperature {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extra_vials: 0,
        }
    }

    pub fn with_extra_vials(mut self, count: i32) -> Self {
        self.extra_vials = count;
        self
    }
}

/// The storage conditions of one study. The variant carries the study type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "study_type", content = "temperatures", rename_all = "snake_case")]
pub enum StorageConditions {
    DrugProduct(Vec<DpTemperature>),
    DrugSubstance(Vec<DsTemperature>),
}

/// A study-type independent view of one storage condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionEntry<'a> {
    pub label: &'a str,
    pub vial_orientation: Option<VialOrientation>,
    pub extra_vials: i32,
}

impl StorageConditions {
    pub fn study_type(&self) -> StudyType {
        match self {
            StorageConditions::DrugProduct(_) => StudyType::DrugProduct,
            StorageConditions::DrugSubstance(_) => StudyType::DrugSubstance,
        }
    }

    /// Conditions in entry order, with the orientation left empty for drug substance.
    pub fn entries(&self) -> Vec<ConditionEntry<'_>> {
        match self {
            StorageConditions::DrugProduct(temps) => temps
                .iter()
                .map(|t| ConditionEntry {
                    label: &t.label,
                    vial_orientation: t.vial_orientation,
                    extra_vials: t.extra_vials,
                })
                .collect(),
            StorageConditions::DrugSubstance(temps) => temps
                .iter()
                .map(|t| ConditionEntry {
                    label: &t.label,
                    vial_orientation: None,
                    extra_vials: t.extra_vials,
                })
                .collect(),
        }
    }
}

/// Planned pulls, indexed `[time point][condition]`.
///
/// Rows and columns may be shorter than the time point and condition lists;
/// missing cells read as not selected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMatrix(pub Vec<Vec<bool>>);

impl SelectionMatrix {
    pub fn new(rows: Vec<Vec<bool>>) -> Self {
        Self(rows)
    }

    /// Every condition selected at every time point.
    pub fn full(time_points: usize, conditions: usize) -> Self {
        Self(vec![vec![true; conditions]; time_points])
    }

    pub fn is_selected(&self, time_index: usize, condition_index: usize) -> bool {
        self.0
            .get(time_index)
            .and_then(|row| row.get(condition_index))
            .copied()
            .unwrap_or(false)
    }
}

/// Everything the generator needs to expand one formulation of a DP or DS study.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityDesign {
    pub time_points: Vec<TimePoint>,
    pub conditions: StorageConditions,
    pub selection: SelectionMatrix,
}

impl StabilityDesign {
    pub fn study_type(&self) -> StudyType {
        self.conditions.study_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_out_of_bounds_reads_false() {
        let selection = SelectionMatrix::new(vec![vec![true], vec![true, false, true]]);
        assert!(selection.is_selected(0, 0));
        assert!(!selection.is_selected(0, 1));
        assert!(selection.is_selected(1, 2));
        assert!(!selection.is_selected(1, 3));
        assert!(!selection.is_selected(2, 0));
    }

    #[test]
    fn test_zero_time_point_is_not_scheduled() {
        assert!(!TimePoint::new(0.0, TimeUnit::Month).is_scheduled());
        assert!(TimePoint::new(0.5, TimeUnit::Week).is_scheduled());
    }

    #[test]
    fn test_ds_entries_have_no_orientation() {
        let conditions = StorageConditions::DrugSubstance(vec![
            DsTemperature::new("-70°C").with_extra_vials(2),
            DsTemperature::new("2-8°C"),
        ]);
        let entries = conditions.entries();
        assert_eq!(conditions.study_type(), StudyType::DrugSubstance);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].extra_vials, 2);
        assert!(entries.iter().all(|e| e.vial_orientation.is_none()));
    }

    #[test]
    fn test_dp_temperature_parses_from_yaml() {
        let yaml = "label: 2-8°C\nvial_orientation: inverted\nextra_vials: 3\n";
        let temp: DpTemperature = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(temp.label, "2-8°C");
        assert_eq!(temp.vial_orientation, Some(VialOrientation::Inverted));
        assert_eq!(temp.extra_vials, 3);
    }

    #[test]
    fn test_ds_temperature_accepts_extra_bags() {
        let temp: DsTemperature = serde_yaml::from_str("label: 25°C\nextra_bags: 1\n").unwrap();
        assert_eq!(temp.extra_vials, 1);
    }
}
