use anyhow::{Context, Result};
use stability_schemas::file_formats::StudyRequestFile;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Loads a study request from a YAML file.
pub fn load_request(path: &Path) -> Result<StudyRequestFile> {
    info!(path = %path.display(), "Loading study request");

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read study request: {:?}", path))?;
    let request: StudyRequestFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

    debug!(
        schema_version = %request.schema_version,
        experiment_id = %request.study.experiment_id,
        dp = request.dp_stability.is_some(),
        ds = request.ds_stability.is_some(),
        freeze_thaw = request.freeze_thaw.is_some(),
        transportation = request.transportation.is_some(),
        "Study request loaded"
    );
    Ok(request)
}
