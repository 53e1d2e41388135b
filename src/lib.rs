pub mod config;
pub mod display;
pub mod errors;
pub mod parse;
pub mod runner;
pub mod shell;
pub mod sweep;
pub mod trial;
pub mod types;
