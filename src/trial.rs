use tracing::debug;

use crate::errors::SweepError;
use crate::parse::timings_for_marker;
use crate::runner::TrialRunner;
use crate::types::TrialSpec;

pub const DEFAULT_REPEATS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub min_seconds: f64,
    /// Value each run contributed, in run order.
    pub trials: Vec<f64>,
}

/// Run `spec` `repeats` times and keep the smallest timing.
///
/// The first run seeds the minimum with the last timing line it printed.
/// Every timing line of the later runs is compared against the running
/// minimum. A run that prints no marker line fails the whole group.
pub fn min_timing<R>(
    runner: &mut R,
    spec: &TrialSpec,
    repeats: usize,
) -> Result<TrialOutcome, SweepError>
where
    R: TrialRunner + ?Sized,
{
    if repeats == 0 {
        return Err(SweepError::InvalidConfig {
            detail: "repeats must be at least 1".to_string(),
        });
    }

    let marker = spec.marker();
    let mut min_seconds = f64::INFINITY;
    let mut trials = Vec::with_capacity(repeats);

    for run in 0..repeats {
        let lines = runner.run_trial(spec)?;
        let values = timings_for_marker(&lines, marker)?;

        let candidate = if run == 0 {
            values.last().copied()
        } else {
            values.iter().copied().reduce(f64::min)
        };
        let run_value = candidate.ok_or_else(|| SweepError::MarkerNotFound {
            marker: marker.to_string(),
            spec: *spec,
        })?;

        debug!(%spec, run, seconds = run_value, "trial parsed");
        min_seconds = min_seconds.min(run_value);
        trials.push(run_value);
    }

    Ok(TrialOutcome {
        min_seconds,
        trials,
    })
}
