use crate::vocabulary::{TimeUnit, TransportLeg, VialOrientation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a sample is stored. Drug product and drug substance temperatures go
/// to different LabKey columns, so a record can only ever hold one of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageCondition {
    /// T0, freeze/thaw and transportation samples.
    #[default]
    Unassigned,
    DrugProduct {
        temperature: String,
        vial_orientation: Option<VialOrientation>,
    },
    DrugSubstance {
        temperature: String,
    },
}

impl StorageCondition {
    pub fn storage_temp(&self) -> Option<&str> {
        match self {
            StorageCondition::DrugProduct { temperature, .. } => Some(temperature.as_str()),
            _ => None,
        }
    }

    pub fn ds_temperature(&self) -> Option<&str> {
        match self {
            StorageCondition::DrugSubstance { temperature } => Some(temperature.as_str()),
            _ => None,
        }
    }

    pub fn vial_orientation(&self) -> Option<VialOrientation> {
        match self {
            StorageCondition::DrugProduct {
                vial_orientation, ..
            } => *vial_orientation,
            _ => None,
        }
    }
}

/// One row of the sample list handed to the LIMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub parent: String,
    pub description: String,
    pub label: String,
    pub micro_label: String,
    pub sample_date: NaiveDate,
    pub time_point: Option<f64>,
    pub time_point_unit: Option<TimeUnit>,
    /// mg/mL
    pub concentration: f64,
    pub storage: StorageCondition,
    pub formulation: String,
    pub experiment_id: String,
    pub transportation: Option<TransportLeg>,
    pub freeze_thaw_count: Option<u32>,
}

impl SampleRecord {
    pub fn storage_temp(&self) -> Option<&str> {
        self.storage.storage_temp()
    }

    pub fn ds_temperature(&self) -> Option<&str> {
        self.storage.ds_temperature()
    }

    pub fn vial_orientation(&self) -> Option<VialOrientation> {
        self.storage.vial_orientation()
    }
}
