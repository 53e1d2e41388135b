use std::path::PathBuf;

use crate::types::TrialSpec;

#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("Failed to start benchmark command `{command}`: {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to read result file {path}: {source}")]
    ResultRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No line containing \"{marker}\" in output for {spec}")]
    MarkerNotFound { marker: String, spec: TrialSpec },

    #[error("Could not parse timing from line {line:?}: {detail}")]
    TimingParse { line: String, detail: String },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}
