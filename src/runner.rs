use crate::errors::SweepError;
use crate::types::TrialSpec;

/// Runs one benchmark trial and returns the captured output lines.
///
/// `ShellRunner` is the real implementation. Any
/// `FnMut(&TrialSpec) -> Result<Vec<String>, SweepError>` closure also works,
/// which lets tests script the output of each trial.
pub trait TrialRunner {
    fn run_trial(&mut self, spec: &TrialSpec) -> Result<Vec<String>, SweepError>;

    /// Human-readable description of what a trial executes.
    fn describe(&self, spec: &TrialSpec) -> String {
        spec.to_string()
    }
}

impl<F> TrialRunner for F
where
    F: FnMut(&TrialSpec) -> Result<Vec<String>, SweepError> + ?Sized,
{
    fn run_trial(&mut self, spec: &TrialSpec) -> Result<Vec<String>, SweepError> {
        self(spec)
    }
}
