use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

/// Benchmark problem size. The selector passed to the build tool is an
/// integer; 0 picks SizeA and anything else picks SizeB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemSize {
    A,
    B,
}

impl ProblemSize {
    pub fn from_selector(selector: u32) -> Self {
        if selector == 0 {
            ProblemSize::A
        } else {
            ProblemSize::B
        }
    }

    /// Text the benchmark prints on its timing line for this size.
    pub fn marker(self) -> &'static str {
        match self {
            ProblemSize::A => "Run:SizeA",
            ProblemSize::B => "Run:SizeB",
        }
    }
}

/// One (cutoff, process count, size) combination handed to the build tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSpec {
    pub cutoff: u64,
    pub procs: u32,
    /// Raw selector, forwarded verbatim as ARG3.
    pub size: u32,
}

impl TrialSpec {
    pub fn problem_size(&self) -> ProblemSize {
        ProblemSize::from_selector(self.size)
    }

    pub fn marker(&self) -> &'static str {
        self.problem_size().marker()
    }
}

impl fmt::Display for TrialSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cutoff={} procs={} size={}",
            self.cutoff, self.procs, self.size
        )
    }
}

/// Outcome of one (cutoff, procs) group: the minimum over its trials, or the
/// error that stopped it when running with keep-going.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResult {
    pub cutoff: u64,
    pub procs: u32,
    pub size: u32,
    pub min_seconds: Option<f64>,
    pub trials: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GroupResult {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub repeats: usize,
    pub size: u32,
    pub groups: Vec<GroupResult>,
}

impl SweepReport {
    pub fn failures(&self) -> usize {
        self.groups.iter().filter(|g| g.failed()).count()
    }
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Default,
    Json,
}

/// Wraps a string in single quotes, escaping internal single quotes as `'\''`.
pub fn shell_escape_single_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}
