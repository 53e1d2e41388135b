use chrono::Utc;
use tracing::{info, warn};

use crate::errors::SweepError;
use crate::runner::TrialRunner;
use crate::trial::{DEFAULT_REPEATS, min_timing};
use crate::types::{GroupResult, SweepReport, TrialSpec};

/// First cutoff exponent (2^4 = 16).
pub const DEFAULT_CUTOFF_START: u32 = 4;
/// Exclusive upper cutoff exponent; the last cutoff is 2^13 = 8192.
pub const DEFAULT_CUTOFF_END: u32 = 14;
pub const DEFAULT_PROCS: [u32; 7] = [2, 3, 4, 7, 12, 17, 22];
pub const DEFAULT_SIZE: u32 = 1;

/// Powers of two `2^start .. 2^end` (end exclusive).
pub fn cutoff_values(start_exp: u32, end_exp: u32) -> Vec<u64> {
    (start_exp..end_exp).map(|exp| 1u64 << exp).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub cutoffs: Vec<u64>,
    pub procs: Vec<u32>,
    pub size: u32,
    pub repeats: usize,
    /// Record a failed group and move on instead of aborting the sweep.
    pub keep_going: bool,
}

impl Default for SweepPlan {
    fn default() -> Self {
        SweepPlan {
            cutoffs: cutoff_values(DEFAULT_CUTOFF_START, DEFAULT_CUTOFF_END),
            procs: DEFAULT_PROCS.to_vec(),
            size: DEFAULT_SIZE,
            repeats: DEFAULT_REPEATS,
            keep_going: false,
        }
    }
}

impl SweepPlan {
    /// Every group in sweep order: cutoff-major, process count minor.
    pub fn specs(&self) -> impl Iterator<Item = TrialSpec> + '_ {
        self.cutoffs.iter().flat_map(move |&cutoff| {
            self.procs.iter().map(move |&procs| TrialSpec {
                cutoff,
                procs,
                size: self.size,
            })
        })
    }

    pub fn group_count(&self) -> usize {
        self.cutoffs.len() * self.procs.len()
    }
}

/// Progress notifications emitted while the sweep runs.
#[derive(Debug)]
pub enum SweepEvent<'a> {
    CutoffStarted(u64),
    GroupFinished(&'a GroupResult),
}

/// Run every group of `plan` in order, one blocking trial at a time.
///
/// Without `keep_going` the first failing group aborts the sweep with its error.
pub fn run_sweep<R, F>(
    runner: &mut R,
    plan: &SweepPlan,
    mut on_event: F,
) -> Result<Vec<GroupResult>, SweepError>
where
    R: TrialRunner + ?Sized,
    F: FnMut(SweepEvent<'_>),
{
    let mut groups = Vec::with_capacity(plan.group_count());

    for &cutoff in &plan.cutoffs {
        on_event(SweepEvent::CutoffStarted(cutoff));

        for &procs in &plan.procs {
            let spec = TrialSpec {
                cutoff,
                procs,
                size: plan.size,
            };

            let group = match min_timing(&mut *runner, &spec, plan.repeats) {
                Ok(outcome) => {
                    info!(%spec, seconds = outcome.min_seconds, "group finished");
                    GroupResult {
                        cutoff,
                        procs,
                        size: plan.size,
                        min_seconds: Some(outcome.min_seconds),
                        trials: outcome.trials,
                        error: None,
                    }
                }
                Err(err) if plan.keep_going => {
                    warn!(
                        %spec,
                        command = %runner.describe(&spec),
                        error = %err,
                        "group failed, continuing"
                    );
                    GroupResult {
                        cutoff,
                        procs,
                        size: plan.size,
                        min_seconds: None,
                        trials: Vec::new(),
                        error: Some(err.to_string()),
                    }
                }
                Err(err) => return Err(err),
            };

            on_event(SweepEvent::GroupFinished(&group));
            groups.push(group);
        }
    }

    Ok(groups)
}

pub fn build_report(plan: &SweepPlan, command: String, groups: Vec<GroupResult>) -> SweepReport {
    SweepReport {
        generated_at: Utc::now(),
        command,
        repeats: plan.repeats,
        size: plan.size,
        groups,
    }
}
