//! Controlled vocabularies of the LabKey sample type the generated lists are
//! imported into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage temperatures accepted for drug product studies.
pub const STORAGE_TEMPERATURES: &[&str] = &[
    "-70°C", "-50°C", "-30°C", "≤-30°C", "-20°C", "2-8°C", "4°C", "5°C", "25°C", "30°C", "40°C",
    "LN2", "RT",
];

/// Storage temperatures accepted for drug substance studies.
pub const DS_TEMPERATURES: &[&str] = &[
    "-70°C",
    "-70°C w/5day 30°C",
    "-50°C",
    "-50°C w/5day 30°C",
    "2-8°C",
    "25°C",
];

/// Conditions preselected on a new drug product study.
pub const DEFAULT_DP_TEMPERATURES: &[&str] = &["-20°C", "2-8°C", "25°C"];

pub fn is_storage_temperature(label: &str) -> bool {
    STORAGE_TEMPERATURES.contains(&label)
}

pub fn is_ds_temperature(label: &str) -> bool {
    DS_TEMPERATURES.contains(&label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VialOrientation {
    Upright,
    Inverted,
}

impl VialOrientation {
    pub fn as_str(self) -> &'static str {
        match self {
            VialOrientation::Upright => "upright",
            VialOrientation::Inverted => "inverted",
        }
    }
}

impl fmt::Display for VialOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }

    /// The one-letter suffix appended to the time value in a micro label ("1m").
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Week => "w",
            TimeUnit::Month => "m",
            TimeUnit::Year => "y",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One shipment leg of a transportation study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportLeg {
    #[serde(rename = "Control")]
    Control,
    #[serde(rename = "Transport Rep 1")]
    Rep1,
    #[serde(rename = "Transport Rep 2")]
    Rep2,
    #[serde(rename = "Transport Rep 3")]
    Rep3,
}

impl TransportLeg {
    /// Every leg, in the order samples are generated.
    pub const ALL: [TransportLeg; 4] = [
        TransportLeg::Control,
        TransportLeg::Rep1,
        TransportLeg::Rep2,
        TransportLeg::Rep3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransportLeg::Control => "Control",
            TransportLeg::Rep1 => "Transport Rep 1",
            TransportLeg::Rep2 => "Transport Rep 2",
            TransportLeg::Rep3 => "Transport Rep 3",
        }
    }

    pub fn micro_label(self) -> &'static str {
        match self {
            TransportLeg::Control => "ctrl",
            TransportLeg::Rep1 => "trans1",
            TransportLeg::Rep2 => "trans2",
            TransportLeg::Rep3 => "trans3",
        }
    }
}

impl fmt::Display for TransportLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
