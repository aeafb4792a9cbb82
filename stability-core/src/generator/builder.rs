use stability_schemas::{
    record::{SampleRecord, StorageCondition},
    study::{Formulation, StudyContext},
    vocabulary::{TimeUnit, TransportLeg},
};

/// A formulation with its parent sample and concentration settled against the
/// study defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFormulation {
    pub name: String,
    pub parent: String,
    pub concentration: f64,
}

impl ResolvedFormulation {
    /// The override parent wins when non-empty; the override concentration wins
    /// when present and positive.
    pub fn resolve(context: &StudyContext, formulation: &Formulation) -> Self {
        let parent = formulation
            .parent_override
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&context.default_parent_sample_id)
            .to_string();
        let concentration = formulation
            .concentration_override
            .filter(|c| *c > 0.0)
            .unwrap_or(context.default_concentration);

        Self {
            name: formulation.name.clone(),
            parent,
            concentration,
        }
    }

    /// The same formulation with `suffix` appended to its name, as used for
    /// surfactant variants ("F1" + "PS80" = "F1PS80").
    pub fn with_name_suffix(&self, suffix: &str) -> Self {
        Self {
            name: format!("{}{}", self.name, suffix),
            ..self.clone()
        }
    }
}

/// Renders a number the way it appears in labels: `100`, `1.5`, `0.25`.
pub fn format_quantity(value: f64) -> String {
    format!("{}", value)
}

/// `"{molecule} {source}, {formulation}, {conc} mg/mL, {micro_label} {orientation}"`,
/// trimmed at the end so an empty orientation leaves no trailing space.
pub fn sample_label(
    context: &StudyContext,
    formulation: &ResolvedFormulation,
    micro_label: &str,
    vial_orientation: &str,
) -> String {
    format!(
        "{} {}, {}, {} mg/mL, {} {}",
        context.molecule,
        context.source,
        formulation.name,
        format_quantity(formulation.concentration),
        micro_label,
        vial_orientation
    )
    .trim_end()
    .to_string()
}

/// A fluent builder for a single `SampleRecord`.
///
/// Everything not set explicitly stays empty, which is what the LIMS import
/// expects for T0, extra-vial, freeze/thaw and transportation rows.
pub struct SampleBuilder<'a> {
    context: &'a StudyContext,
    formulation: &'a ResolvedFormulation,
    micro_label: String,
    time_point: Option<f64>,
    time_point_unit: Option<TimeUnit>,
    storage: StorageCondition,
    transportation: Option<TransportLeg>,
    freeze_thaw_count: Option<u32>,
}

impl<'a> SampleBuilder<'a> {
    pub fn new(
        context: &'a StudyContext,
        formulation: &'a ResolvedFormulation,
        micro_label: impl Into<String>,
    ) -> Self {
        Self {
            context,
            formulation,
            micro_label: micro_label.into(),
            time_point: None,
            time_point_unit: None,
            storage: StorageCondition::Unassigned,
            transportation: None,
            freeze_thaw_count: None,
        }
    }

    pub fn time_point(mut self, value: f64, unit: Option<TimeUnit>) -> Self {
        self.time_point = Some(value);
        self.time_point_unit = unit;
        self
    }

    pub fn storage(mut self, storage: StorageCondition) -> Self {
        self.storage = storage;
        self
    }

    pub fn transportation(mut self, leg: TransportLeg) -> Self {
        self.transportation = Some(leg);
        self
    }

    pub fn freeze_thaw_count(mut self, cycles: u32) -> Self {
        self.freeze_thaw_count = Some(cycles);
        self
    }

    pub fn build(self) -> SampleRecord {
        let orientation = self
            .storage
            .vial_orientation()
            .map_or("", |o| o.as_str());
        let label = sample_label(self.context, self.formulation, &self.micro_label, orientation);

        SampleRecord {
            parent: self.formulation.parent.clone(),
            description: label.clone(),
            label,
            micro_label: self.micro_label,
            sample_date: self.context.creation_date,
            time_point: self.time_point,
            time_point_unit: self.time_point_unit,
            concentration: self.formulation.concentration,
            storage: self.storage,
            formulation: self.formulation.name.clone(),
            experiment_id: self.context.experiment_id.clone(),
            transportation: self.transportation,
            freeze_thaw_count: self.freeze_thaw_count,
        }
    }
}
