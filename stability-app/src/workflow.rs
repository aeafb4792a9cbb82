use stability_core::{
    collector::{self, TabKind},
    session::SampleSession,
};
use stability_schemas::file_formats::StudyRequestFile;
use tracing::{info, warn};

/// What one tab contributed to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum TabOutcome {
    Generated(usize),
    Blocked(String),
    NotRequested,
}

/// Runs the selected tabs of a request in form order, appending each tab's
/// samples to `session`. A blocked tab is reported and skipped; the other tabs
/// still run.
pub fn run_tabs(
    request: &StudyRequestFile,
    selected: &[TabKind],
    session: &mut SampleSession,
) -> Vec<(TabKind, TabOutcome)> {
    let study = &request.study;
    let mut outcomes = Vec::new();

    for tab in TabKind::ALL {
        if !selected.contains(&tab) {
            continue;
        }
        let result = match tab {
            TabKind::DpStability => request
                .dp_stability
                .as_ref()
                .map(|t| collector::collect_dp(study, t)),
            TabKind::DsStability => request
                .ds_stability
                .as_ref()
                .map(|t| collector::collect_ds(study, t)),
            TabKind::FreezeThaw => request
                .freeze_thaw
                .as_ref()
                .map(|t| collector::collect_freeze_thaw(study, t)),
            TabKind::Transportation => request
                .transportation
                .as_ref()
                .map(|t| collector::collect_transportation(study, t)),
        };

        let outcome = match result {
            Some(Ok(batch)) => TabOutcome::Generated(session.extend(batch)),
            Some(Err(e)) => {
                warn!(%tab, error = %e, "Generation blocked");
                TabOutcome::Blocked(e.to_string())
            }
            None => TabOutcome::NotRequested,
        };
        outcomes.push((tab, outcome));
    }

    info!(total = session.len(), "Sample generation finished");
    outcomes
}

/// Builds the end-of-run summary shown on stdout.
pub fn summary_report(
    request: &StudyRequestFile,
    outcomes: &[(TabKind, TabOutcome)],
    session: &SampleSession,
) -> String {
    let mut report = String::new();
    report.push_str("\n--- [Stability Sample Summary] ---\n");
    report.push_str("========================================\n");
    report.push_str(&format!(
        "Experiment: {} | {} {}\n",
        request.study.experiment_id, request.study.molecule, request.study.source
    ));
    for (tab, outcome) in outcomes {
        let line = match outcome {
            TabOutcome::Generated(n) => format!("  - {:<16} {:>5} samples\n", tab.to_string(), n),
            TabOutcome::Blocked(reason) => {
                format!("  - {:<16} blocked: {}\n", tab.to_string(), reason)
            }
            TabOutcome::NotRequested => format!("  - {:<16} not in request\n", tab.to_string()),
        };
        report.push_str(&line);
    }
    report.push_str("----------------------------------------\n");
    report.push_str(&format!("Total Samples: {}\n", session.len()));
    report.push_str("========================================\n");
    report
}
