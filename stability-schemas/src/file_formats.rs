use crate::{
    condition::{DpTemperature, DsTemperature, SelectionMatrix, TimePoint},
    study::{Formulation, StudyContext},
    vocabulary::DEFAULT_DP_TEMPERATURES,
};
use serde::Deserialize;

/// A complete study request: the study metadata plus any of the four study tabs.
#[derive(Debug, Deserialize)]
pub struct StudyRequestFile {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub study: StudyContext,
    #[serde(default)]
    pub dp_stability: Option<DpStabilityTab>,
    #[serde(default)]
    pub ds_stability: Option<DsStabilityTab>,
    #[serde(default)]
    pub freeze_thaw: Option<FreezeThawTab>,
    #[serde(default)]
    pub transportation: Option<TransportationTab>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DpStabilityTab {
    #[serde(default)]
    pub formulations: Vec<Formulation>,
    #[serde(default = "default_dp_temperatures")]
    pub temperatures: Vec<DpTemperature>,
    #[serde(default)]
    pub time_points: Vec<TimePoint>,
    #[serde(default)]
    pub selection: SelectionMatrix,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DsStabilityTab {
    #[serde(default)]
    pub formulations: Vec<Formulation>,
    #[serde(default)]
    pub temperatures: Vec<DsTemperature>,
    #[serde(default)]
    pub time_points: Vec<TimePoint>,
    #[serde(default)]
    pub selection: SelectionMatrix,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FreezeThawTab {
    #[serde(default)]
    pub formulations: Vec<Formulation>,
    #[serde(default = "default_cycles")]
    pub cycles: Vec<FreezeThawCycle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FreezeThawCycle {
    pub count: u32,
    #[serde(default = "included")]
    pub include: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportationTab {
    #[serde(default)]
    pub formulations: Vec<Formulation>,
    #[serde(default)]
    pub surfactants: Vec<String>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_dp_temperatures() -> Vec<DpTemperature> {
    DEFAULT_DP_TEMPERATURES
        .iter()
        .map(|label| DpTemperature::new(*label))
        .collect()
}

fn default_cycles() -> Vec<FreezeThawCycle> {
    (1..=4)
        .map(|count| FreezeThawCycle {
            count,
            include: true,
        })
        .collect()
}

fn included() -> bool {
    true
}
