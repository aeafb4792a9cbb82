//! Turns study request tabs into generator calls.
//!
//! Each `collect_*` function is one "Generate" action: it checks the study
//! fields and the tab, normalizes the tab's inputs, and returns every sample
//! for the tab or an error. Callers append the result to a session only on
//! success, so a blocked action never leaves a partial batch behind.

use crate::{
    error::StabilityError,
    generator::{generate_freeze_thaw, generate_stability, generate_transportation},
};
use stability_schemas::{
    condition::{DpTemperature, DsTemperature, StabilityDesign, StorageConditions},
    file_formats::{DpStabilityTab, DsStabilityTab, FreezeThawTab, TransportationTab},
    record::SampleRecord,
    study::{Formulation, StudyContext},
    vocabulary::{is_ds_temperature, is_storage_temperature},
};
use std::fmt;
use tracing::{info, warn};

/// The four study tabs of a request, in the order they are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabKind {
    DpStability,
    DsStability,
    FreezeThaw,
    Transportation,
}

impl TabKind {
    pub const ALL: [TabKind; 4] = [
        TabKind::DpStability,
        TabKind::DsStability,
        TabKind::FreezeThaw,
        TabKind::Transportation,
    ];
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TabKind::DpStability => "DP stability",
            TabKind::DsStability => "DS stability",
            TabKind::FreezeThaw => "freeze/thaw",
            TabKind::Transportation => "transportation",
        };
        f.write_str(name)
    }
}

/// Fails with the names of every required study field that is blank.
pub fn check_study(context: &StudyContext) -> Result<(), StabilityError> {
    let mut missing = Vec::new();
    if context.experiment_id.trim().is_empty() {
        missing.push("experiment_id");
    }
    if context.molecule.trim().is_empty() {
        missing.push("molecule");
    }
    if context.source.trim().is_empty() {
        missing.push("source");
    }
    if context.default_parent_sample_id.trim().is_empty() {
        missing.push("parent_sample_id");
    }
    if !(context.default_concentration > 0.0) {
        missing.push("concentration");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        warn!(?missing, "Study information is incomplete");
        Err(StabilityError::MissingStudyFields(missing))
    }
}

/// Form limits. Inputs beyond them are clamped with a warning, never rejected.
pub const MAX_FORMULATIONS: usize = 12;
pub const MAX_TEMPERATURES: usize = 8;
pub const MAX_DP_TIME_POINTS: usize = 20;
pub const MAX_DS_TIME_POINTS: usize = 14;
pub const MAX_EXTRA_VIALS: i32 = 10;
pub const MAX_CYCLE_CONDITIONS: usize = 10;
pub const MIN_CYCLE_COUNT: u32 = 1;
pub const MAX_CYCLE_COUNT: u32 = 20;
pub const MAX_SURFACTANTS: usize = 10;

/// Keeps the formulations that have a name, with non-positive concentration
/// overrides cleared.
pub fn named_formulations(formulations: &[Formulation]) -> Vec<Formulation> {
    formulations
        .iter()
        .filter(|f| !f.name.is_empty())
        .map(|f| Formulation {
            concentration_override: f.concentration_override.filter(|c| *c > 0.0),
            ..f.clone()
        })
        .collect()
}

/// The first `max` items of `items`.
fn capped<T: Clone>(what: &'static str, items: &[T], max: usize) -> Vec<T> {
    if items.len() > max {
        warn!(what, given = items.len(), max, "Too many entries; extra entries ignored");
    }
    items.iter().take(max).cloned().collect()
}

/// Clamps an extra-vial count into `0..=MAX_EXTRA_VIALS`.
pub fn clamp_extra_vials(label: &str, count: i32) -> i32 {
    let clamped = count.clamp(0, MAX_EXTRA_VIALS);
    if clamped != count {
        warn!(%label, given = count, used = clamped, "Extra vial count out of range");
    }
    clamped
}

/// Clamps a freeze/thaw cycle count into `MIN_CYCLE_COUNT..=MAX_CYCLE_COUNT`.
pub fn clamp_cycle_count(count: u32) -> u32 {
    let clamped = count.clamp(MIN_CYCLE_COUNT, MAX_CYCLE_COUNT);
    if clamped != count {
        warn!(given = count, used = clamped, "Freeze/thaw cycle count out of range");
    }
    clamped
}

fn require_formulations(
    tab: TabKind,
    formulations: &[Formulation],
) -> Result<Vec<Formulation>, StabilityError> {
    let named = named_formulations(formulations);
    if named.is_empty() {
        warn!(%tab, "No formulation provided");
        return Err(StabilityError::NoFormulations(tab));
    }
    Ok(capped("formulation", &named, MAX_FORMULATIONS))
}

fn expand_formulations(
    context: &StudyContext,
    formulations: &[Formulation],
    design: &StabilityDesign,
) -> Vec<SampleRecord> {
    formulations
        .iter()
        .flat_map(|f| generate_stability(context, f, design))
        .collect()
}

pub fn collect_dp(
    context: &StudyContext,
    tab: &DpStabilityTab,
) -> Result<Vec<SampleRecord>, StabilityError> {
    check_study(context)?;
    let formulations = require_formulations(TabKind::DpStability, &tab.formulations)?;

    let temperatures: Vec<DpTemperature> = capped("temperature", &tab.temperatures, MAX_TEMPERATURES)
        .into_iter()
        .map(|t| DpTemperature {
            extra_vials: clamp_extra_vials(&t.label, t.extra_vials),
            ..t
        })
        .collect();
    for temp in temperatures.iter().filter(|t| !is_storage_temperature(&t.label)) {
        warn!(label = %temp.label, "Storage temperature is not in the LabKey vocabulary");
    }

    let design = StabilityDesign {
        time_points: capped("time point", &tab.time_points, MAX_DP_TIME_POINTS),
        conditions: StorageConditions::DrugProduct(temperatures),
        selection: tab.selection.clone(),
    };
    let samples = expand_formulations(context, &formulations, &design);
    info!(formulations = formulations.len(), samples = samples.len(), "Generated DP samples");
    Ok(samples)
}

pub fn collect_ds(
    context: &StudyContext,
    tab: &DsStabilityTab,
) -> Result<Vec<SampleRecord>, StabilityError> {
    check_study(context)?;
    let formulations = require_formulations(TabKind::DsStability, &tab.formulations)?;

    let temperatures: Vec<DsTemperature> = capped("temperature", &tab.temperatures, MAX_TEMPERATURES)
        .into_iter()
        .map(|t| DsTemperature {
            extra_vials: clamp_extra_vials(&t.label, t.extra_vials),
            ..t
        })
        .collect();
    for temp in temperatures.iter().filter(|t| !is_ds_temperature(&t.label)) {
        warn!(label = %temp.label, "DS temperature is not in the LabKey vocabulary");
    }

    let design = StabilityDesign {
        time_points: capped("time point", &tab.time_points, MAX_DS_TIME_POINTS),
        conditions: StorageConditions::DrugSubstance(temperatures),
        selection: tab.selection.clone(),
    };
    let samples = expand_formulations(context, &formulations, &design);
    info!(formulations = formulations.len(), samples = samples.len(), "Generated DS samples");
    Ok(samples)
}

pub fn collect_freeze_thaw(
    context: &StudyContext,
    tab: &FreezeThawTab,
) -> Result<Vec<SampleRecord>, StabilityError> {
    check_study(context)?;
    let formulations = require_formulations(TabKind::FreezeThaw, &tab.formulations)?;
    let cycles: Vec<u32> = capped("cycle condition", &tab.cycles, MAX_CYCLE_CONDITIONS)
        .iter()
        .filter(|c| c.include)
        .map(|c| clamp_cycle_count(c.count))
        .collect();
    if cycles.is_empty() {
        warn!("No freeze/thaw cycle included");
        return Err(StabilityError::NoFreezeThawCycles);
    }

    let samples = generate_freeze_thaw(context, &formulations, &cycles);
    info!(formulations = formulations.len(), cycles = cycles.len(), "Generated F/T samples");
    Ok(samples)
}

pub fn collect_transportation(
    context: &StudyContext,
    tab: &TransportationTab,
) -> Result<Vec<SampleRecord>, StabilityError> {
    check_study(context)?;
    let formulations = require_formulations(TabKind::Transportation, &tab.formulations)?;
    let surfactants: Vec<String> = capped("surfactant", &tab.surfactants, MAX_SURFACTANTS)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    let samples = generate_transportation(context, &formulations, &surfactants);
    info!(
        formulations = formulations.len(),
        surfactants = surfactants.len(),
        samples = samples.len(),
        "Generated transportation samples"
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stability_schemas::{
        condition::{SelectionMatrix, TimePoint},
        file_formats::FreezeThawCycle,
        vocabulary::TimeUnit,
    };

    fn context() -> StudyContext {
        StudyContext {
            experiment_id: "EXP1".to_string(),
            molecule: "mAb1".to_string(),
            source: "SrcA".to_string(),
            default_parent_sample_id: "P1".to_string(),
            creation_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            default_concentration: 100.0,
        }
    }

    #[test]
    fn test_check_study_lists_missing_fields() {
        let mut ctx = context();
        ctx.molecule = String::new();
        ctx.default_parent_sample_id = "  ".to_string();

        match check_study(&ctx) {
            Err(StabilityError::MissingStudyFields(missing)) => {
                assert_eq!(missing, vec!["molecule", "parent_sample_id"]);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
        assert!(check_study(&context()).is_ok());
    }

    #[test]
    fn test_named_formulations_drops_blank_names() {
        let formulations = vec![
            Formulation::new(""),
            Formulation::new("F1").with_concentration(0.0),
            Formulation::new("F2").with_concentration(20.0),
        ];
        let named = named_formulations(&formulations);
        assert_eq!(named.len(), 2);
        assert_eq!(named[0].concentration_override, None);
        assert_eq!(named[1].concentration_override, Some(20.0));
    }

    #[test]
    fn test_dp_tab_without_formulation_is_blocked() {
        let tab = DpStabilityTab {
            formulations: vec![Formulation::new("")],
            temperatures: vec![DpTemperature::new("25°C")],
            time_points: vec![TimePoint::new(1.0, TimeUnit::Month)],
            selection: SelectionMatrix::full(1, 1),
        };
        assert!(matches!(
            collect_dp(&context(), &tab),
            Err(StabilityError::NoFormulations(TabKind::DpStability))
        ));
    }

    #[test]
    fn test_dp_tab_expands_every_formulation() {
        let tab = DpStabilityTab {
            formulations: vec![Formulation::new("F1"), Formulation::new("F2")],
            temperatures: vec![DpTemperature::new("25°C"), DpTemperature::new("40°C")],
            time_points: vec![TimePoint::new(1.0, TimeUnit::Month)],
            selection: SelectionMatrix::full(1, 2),
        };
        let samples = collect_dp(&context(), &tab).unwrap();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[0].formulation, "F1");
        assert_eq!(samples[3].formulation, "F2");
        assert_eq!(samples[3].micro_label, "t0");
    }

    #[test]
    fn test_freeze_thaw_requires_an_included_cycle() {
        let tab = FreezeThawTab {
            formulations: vec![Formulation::new("F1")],
            cycles: vec![FreezeThawCycle {
                count: 5,
                include: false,
            }],
        };
        assert!(matches!(
            collect_freeze_thaw(&context(), &tab),
            Err(StabilityError::NoFreezeThawCycles)
        ));
    }

    #[test]
    fn test_freeze_thaw_skips_excluded_cycles() {
        let tab = FreezeThawTab {
            formulations: vec![Formulation::new("F1")],
            cycles: vec![
                FreezeThawCycle { count: 1, include: true },
                FreezeThawCycle { count: 2, include: false },
                FreezeThawCycle { count: 5, include: true },
            ],
        };
        let samples = collect_freeze_thaw(&context(), &tab).unwrap();
        let labels: Vec<&str> = samples.iter().map(|s| s.micro_label.as_str()).collect();
        assert_eq!(labels, vec!["1X FT", "5X FT"]);
    }

    #[test]
    fn test_transportation_ignores_blank_surfactants() {
        let tab = TransportationTab {
            formulations: vec![Formulation::new("F1")],
            surfactants: vec![String::new(), "PS80".to_string()],
        };
        let samples = collect_transportation(&context(), &tab).unwrap();
        assert_eq!(samples.len(), 8);
    }

    #[test]
    fn test_extra_vials_are_clamped_to_form_limit() {
        let tab = DpStabilityTab {
            formulations: vec![Formulation::new("F1")],
            temperatures: vec![
                DpTemperature::new("25°C").with_extra_vials(5000),
                DpTemperature::new("40°C").with_extra_vials(-2),
            ],
            time_points: vec![],
            selection: SelectionMatrix::default(),
        };
        let samples = collect_dp(&context(), &tab).unwrap();
        assert_eq!(samples.len(), 1 + MAX_EXTRA_VIALS as usize);
        assert_eq!(samples.last().unwrap().micro_label, "25°C, extra10");
    }

    #[test]
    fn test_ds_lists_are_capped() {
        let tab = DsStabilityTab {
            formulations: (1..=15).map(|i| Formulation::new(format!("DS{}", i))).collect(),
            temperatures: (0..10).map(|_| DsTemperature::new("2-8°C")).collect(),
            time_points: (1..=20).map(|m| TimePoint::new(m as f64, TimeUnit::Month)).collect(),
            selection: SelectionMatrix::full(20, 10),
        };
        let samples = collect_ds(&context(), &tab).unwrap();
        let per_formulation = 1 + MAX_DS_TIME_POINTS * MAX_TEMPERATURES;
        assert_eq!(samples.len(), MAX_FORMULATIONS * per_formulation);
        assert_eq!(samples.last().unwrap().formulation, "DS12");
        assert_eq!(samples.last().unwrap().micro_label, "2-8°C, 14m DS");
    }

    #[test]
    fn test_cycle_counts_are_clamped() {
        let tab = FreezeThawTab {
            formulations: vec![Formulation::new("F1")],
            cycles: vec![
                FreezeThawCycle { count: 0, include: true },
                FreezeThawCycle { count: 50, include: true },
            ],
        };
        let samples = collect_freeze_thaw(&context(), &tab).unwrap();
        let labels: Vec<&str> = samples.iter().map(|s| s.micro_label.as_str()).collect();
        assert_eq!(labels, vec!["1X FT", "20X FT"]);
        assert_eq!(samples[1].freeze_thaw_count, Some(20));
    }

    #[test]
    fn test_cycle_conditions_and_surfactants_are_capped() {
        let ft = FreezeThawTab {
            formulations: vec![Formulation::new("F1")],
            cycles: (1..=12).map(|count| FreezeThawCycle { count, include: true }).collect(),
        };
        assert_eq!(collect_freeze_thaw(&context(), &ft).unwrap().len(), MAX_CYCLE_CONDITIONS);

        let trans = TransportationTab {
            formulations: vec![Formulation::new("F1")],
            surfactants: (1..=12).map(|i| format!("S{}", i)).collect(),
        };
        let samples = collect_transportation(&context(), &trans).unwrap();
        assert_eq!(samples.len(), 4 * (1 + MAX_SURFACTANTS));
    }

    #[test]
    fn test_incomplete_study_blocks_every_tab() {
        let mut ctx = context();
        ctx.experiment_id = String::new();
        let tab = TransportationTab {
            formulations: vec![Formulation::new("F1")],
            surfactants: vec![],
        };
        assert!(matches!(
            collect_transportation(&ctx, &tab),
            Err(StabilityError::MissingStudyFields(_))
        ));
    }
}
