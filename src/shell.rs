use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::errors::SweepError;
use crate::runner::TrialRunner;
use crate::types::{TrialSpec, shell_escape_single_quote};

/// Runs trials through `sh -c`, piping the build tool's output through
/// `grep <marker>` into a result file and reading that file back.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    /// Build tool invocation, e.g. `make`. Inserted into the shell line verbatim.
    pub command: String,
    pub target: String,
    pub workdir: PathBuf,
    /// Relative paths are resolved against `workdir`.
    pub result_file: PathBuf,
}

impl ShellRunner {
    /// The full shell line for one trial:
    /// `make test ARG1=<cutoff> ARG2=<procs> ARG3=<size> | grep -a '<marker>' > result.txt`
    ///
    /// `-a` keeps grep from collapsing a timing line with stray non-UTF-8
    /// bytes into "Binary file matches".
    pub fn command_line(&self, spec: &TrialSpec) -> String {
        format!(
            "{} {} ARG1={} ARG2={} ARG3={} | grep -a {} > {}",
            self.command,
            self.target,
            spec.cutoff,
            spec.procs,
            spec.size,
            shell_escape_single_quote(spec.marker()),
            shell_escape_single_quote(&self.result_file.to_string_lossy()),
        )
    }

    pub fn result_path(&self) -> PathBuf {
        self.workdir.join(&self.result_file)
    }
}

impl TrialRunner for ShellRunner {
    fn run_trial(&mut self, spec: &TrialSpec) -> Result<Vec<String>, SweepError> {
        let line = self.command_line(spec);
        debug!(command = %line, workdir = %self.workdir.display(), "running trial");

        // grep exits non-zero when nothing matched; an empty result file
        // reports that more precisely than the exit status.
        let status = Command::new("sh")
            .arg("-c")
            .arg(&line)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| SweepError::CommandSpawn {
                command: line.clone(),
                source,
            })?;
        trace!(%status, "trial command exited");

        let path = self.result_path();
        let bytes =
            std::fs::read(&path).map_err(|source| SweepError::ResultRead { path, source })?;

        // Only the `(s)` field has to be well formed; undecodable bytes
        // elsewhere on the line are replaced.
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn describe(&self, spec: &TrialSpec) -> String {
        self.command_line(spec)
    }
}
