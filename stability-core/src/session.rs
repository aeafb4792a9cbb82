use stability_schemas::record::SampleRecord;

/// The running sample list of one user session.
///
/// Generated samples are appended in the order they were produced. Nothing is
/// deduplicated: generating the same formulation twice lists it twice.
#[derive(Debug, Default, Clone)]
pub struct SampleSession {
    samples: Vec<SampleRecord>,
}

impl SampleSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a generated batch and returns how many samples it added.
    pub fn extend(&mut self, batch: Vec<SampleRecord>) -> usize {
        let added = batch.len();
        self.samples.extend(batch);
        added
    }

    /// Discards every accumulated sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> &[SampleRecord] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
