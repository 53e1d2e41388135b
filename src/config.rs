use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::SweepError;
use crate::shell::ShellRunner;
use crate::sweep::{
    DEFAULT_CUTOFF_END, DEFAULT_CUTOFF_START, DEFAULT_PROCS, DEFAULT_SIZE, SweepPlan,
    cutoff_values,
};
use crate::trial::DEFAULT_REPEATS;

pub const LOCAL_CONFIG_NAME: &str = "sweepmin.toml";

/// Settings from one source (config file or command line). Unset fields fall
/// through to the next source and finally to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSettings {
    pub command: Option<String>,
    pub target: Option<String>,
    pub workdir: Option<PathBuf>,
    pub result_file: Option<PathBuf>,
    pub cutoff_start: Option<u32>,
    pub cutoff_end: Option<u32>,
    pub procs: Option<Vec<u32>>,
    pub size: Option<u32>,
    pub repeats: Option<usize>,
    pub keep_going: Option<bool>,
}

impl PartialSettings {
    /// Layer `over` on top of `self`; fields set in `over` win.
    pub fn merge(self, over: PartialSettings) -> PartialSettings {
        PartialSettings {
            command: over.command.or(self.command),
            target: over.target.or(self.target),
            workdir: over.workdir.or(self.workdir),
            result_file: over.result_file.or(self.result_file),
            cutoff_start: over.cutoff_start.or(self.cutoff_start),
            cutoff_end: over.cutoff_end.or(self.cutoff_end),
            procs: over.procs.or(self.procs),
            size: over.size.or(self.size),
            repeats: over.repeats.or(self.repeats),
            keep_going: over.keep_going.or(self.keep_going),
        }
    }

    /// Fill remaining gaps with defaults and validate.
    pub fn resolve(self) -> Result<Settings, SweepError> {
        let settings = Settings {
            command: self.command.unwrap_or_else(|| "make".to_string()),
            target: self.target.unwrap_or_else(|| "test".to_string()),
            workdir: self.workdir.unwrap_or_else(|| PathBuf::from(".")),
            result_file: self
                .result_file
                .unwrap_or_else(|| PathBuf::from("result.txt")),
            cutoff_start: self.cutoff_start.unwrap_or(DEFAULT_CUTOFF_START),
            cutoff_end: self.cutoff_end.unwrap_or(DEFAULT_CUTOFF_END),
            procs: self.procs.unwrap_or_else(|| DEFAULT_PROCS.to_vec()),
            size: self.size.unwrap_or(DEFAULT_SIZE),
            repeats: self.repeats.unwrap_or(DEFAULT_REPEATS),
            keep_going: self.keep_going.unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub command: String,
    pub target: String,
    pub workdir: PathBuf,
    pub result_file: PathBuf,
    pub cutoff_start: u32,
    pub cutoff_end: u32,
    pub procs: Vec<u32>,
    pub size: u32,
    pub repeats: usize,
    pub keep_going: bool,
}

impl Settings {
    fn validate(&self) -> Result<(), SweepError> {
        let invalid = |detail: String| Err(SweepError::InvalidConfig { detail });

        if self.command.trim().is_empty() {
            return invalid("command must not be empty".to_string());
        }
        if self.cutoff_start >= self.cutoff_end {
            return invalid(format!(
                "cutoff_start ({}) must be below cutoff_end ({})",
                self.cutoff_start, self.cutoff_end
            ));
        }
        if self.cutoff_end > 64 {
            return invalid(format!(
                "cutoff_end ({}) must be at most 64",
                self.cutoff_end
            ));
        }
        if self.procs.is_empty() {
            return invalid("procs must list at least one process count".to_string());
        }
        if self.procs.contains(&0) {
            return invalid("process counts must be positive".to_string());
        }
        if self.repeats == 0 {
            return invalid("repeats must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn plan(&self) -> SweepPlan {
        SweepPlan {
            cutoffs: cutoff_values(self.cutoff_start, self.cutoff_end),
            procs: self.procs.clone(),
            size: self.size,
            repeats: self.repeats,
            keep_going: self.keep_going,
        }
    }

    pub fn runner(&self) -> ShellRunner {
        ShellRunner {
            command: self.command.clone(),
            target: self.target.clone(),
            workdir: self.workdir.clone(),
            result_file: self.result_file.clone(),
        }
    }
}

/// Pick the config file to load: an explicit path always wins, then
/// `./sweepmin.toml`, then `<config dir>/sweepmin/config.toml`.
pub fn locate_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = cwd.join(LOCAL_CONFIG_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("sweepmin").join("config.toml"))
        .filter(|path| path.is_file())
}

pub fn load_config(path: &Path) -> Result<PartialSettings, SweepError> {
    let text = std::fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|e| SweepError::ConfigParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}
