use super::builder::{format_quantity, ResolvedFormulation, SampleBuilder};
use stability_schemas::{
    condition::{ConditionEntry, StabilityDesign, StudyType, TimePoint},
    record::{SampleRecord, StorageCondition},
    study::{Formulation, StudyContext},
    vocabulary::TransportLeg,
};
use tracing::debug;

/// Expands one formulation of a DP or DS study into its sample list.
///
/// Samples come out in a fixed order: the T0 sample, then one sample per
/// selected (time point, condition) pair walking time points first, then the
/// extra vials of each condition.
pub fn generate_stability(
    context: &StudyContext,
    formulation: &Formulation,
    design: &StabilityDesign,
) -> Vec<SampleRecord> {
    let resolved = ResolvedFormulation::resolve(context, formulation);
    let study_type = design.study_type();
    let conditions = design.conditions.entries();
    let mut samples = Vec::new();

    let t0_unit = design.time_points.first().and_then(|t| t.unit);
    samples.push(
        SampleBuilder::new(context, &resolved, t0_micro_label(study_type))
            .time_point(0.0, t0_unit)
            .build(),
    );

    for (i, time_point) in design.time_points.iter().enumerate() {
        if !time_point.is_scheduled() {
            continue;
        }
        for (j, condition) in conditions.iter().enumerate() {
            if condition.label.is_empty() || !design.selection.is_selected(i, j) {
                continue;
            }
            samples.push(
                SampleBuilder::new(
                    context,
                    &resolved,
                    timed_micro_label(study_type, condition.label, time_point),
                )
                .time_point(time_point.value, time_point.unit)
                .storage(storage_for(study_type, condition))
                .build(),
            );
        }
    }

    for condition in conditions.iter().filter(|c| !c.label.is_empty()) {
        for k in 1..=condition.extra_vials.max(0) {
            samples.push(
                SampleBuilder::new(context, &resolved, format!("{}, extra{}", condition.label, k))
                    .storage(storage_for(study_type, condition))
                    .build(),
            );
        }
    }

    debug!(
        formulation = %resolved.name,
        study_type = %study_type,
        samples = samples.len(),
        "Generated stability samples"
    );
    samples
}

/// One sample per formulation and freeze/thaw cycle count, formulation-major.
pub fn generate_freeze_thaw(
    context: &StudyContext,
    formulations: &[Formulation],
    cycles: &[u32],
) -> Vec<SampleRecord> {
    let mut samples = Vec::with_capacity(formulations.len() * cycles.len());
    for formulation in formulations {
        let resolved = ResolvedFormulation::resolve(context, formulation);
        for &cycle in cycles {
            samples.push(
                SampleBuilder::new(context, &resolved, format!("{}X FT", cycle))
                    .freeze_thaw_count(cycle)
                    .build(),
            );
        }
    }
    debug!(samples = samples.len(), "Generated freeze/thaw samples");
    samples
}

/// One sample per transport leg for each formulation, then again for each
/// surfactant variant of that formulation.
pub fn generate_transportation(
    context: &StudyContext,
    formulations: &[Formulation],
    surfactants: &[String],
) -> Vec<SampleRecord> {
    let mut samples = Vec::new();
    for formulation in formulations {
        let base = ResolvedFormulation::resolve(context, formulation);
        push_transport_legs(&mut samples, context, &base);

        for surfactant in surfactants {
            let variant = base.with_name_suffix(surfactant);
            push_transport_legs(&mut samples, context, &variant);
        }
    }
    debug!(samples = samples.len(), "Generated transportation samples");
    samples
}

fn push_transport_legs(
    samples: &mut Vec<SampleRecord>,
    context: &StudyContext,
    formulation: &ResolvedFormulation,
) {
    for leg in TransportLeg::ALL {
        samples.push(
            SampleBuilder::new(context, formulation, leg.micro_label())
                .transportation(leg)
                .build(),
        );
    }
}

fn t0_micro_label(study_type: StudyType) -> &'static str {
    match study_type {
        StudyType::DrugProduct => "t0",
        StudyType::DrugSubstance => "t0, DS",
    }
}

fn timed_micro_label(study_type: StudyType, temperature: &str, time_point: &TimePoint) -> String {
    let suffix = time_point.unit.map_or("", |u| u.suffix());
    let label = format!("{}, {}{}", temperature, format_quantity(time_point.value), suffix);
    match study_type {
        StudyType::DrugProduct => label,
        StudyType::DrugSubstance => format!("{} DS", label),
    }
}

fn storage_for(study_type: StudyType, condition: &ConditionEntry<'_>) -> StorageCondition {
    match study_type {
        StudyType::DrugProduct => StorageCondition::DrugProduct {
            temperature: condition.label.to_string(),
            vial_orientation: condition.vial_orientation,
        },
        StudyType::DrugSubstance => StorageCondition::DrugSubstance {
            temperature: condition.label.to_string(),
        },
    }
}
