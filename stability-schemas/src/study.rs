use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Concentration used when a study request does not state one.
pub const DEFAULT_CONCENTRATION_MG_ML: f64 = 100.0;

/// Study-wide metadata shared by every sample generated in a session.
///
/// All text fields are required to be non-empty before anything is generated;
/// the check is made by the input collector, not by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyContext {
    /// The experiment identifier the samples are registered under (e.g., "EXP-2024-017").
    pub experiment_id: String,
    /// The molecule under study (e.g., "mAb1").
    pub molecule: String,
    /// The material source or lot (e.g., "SrcA").
    pub source: String,
    /// The parent sample id used when a formulation does not override it.
    #[serde(rename = "parent_sample_id")]
    pub default_parent_sample_id: String,
    /// The date written into every sample's "Sample Date" column.
    #[serde(default = "today")]
    pub creation_date: NaiveDate,
    /// The concentration in mg/mL used when a formulation does not override it.
    #[serde(rename = "concentration", default = "default_concentration")]
    pub default_concentration: f64,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_concentration() -> f64 {
    DEFAULT_CONCENTRATION_MG_ML
}

/// A formulation entered on one of the study tabs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Formulation {
    pub name: String,
    /// Overrides the study's parent sample id when non-empty.
    #[serde(default, rename = "parent")]
    pub parent_override: Option<String>,
    /// Overrides the study's concentration when present and positive.
    #[serde(default, rename = "concentration")]
    pub concentration_override: Option<f64>,
}

impl Formulation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_override = Some(parent.into());
        self
    }

    pub fn with_concentration(mut self, concentration: f64) -> Self {
        self.concentration_override = Some(concentration);
        self
    }
}
