use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser};
use owo_colors::{OwoColorize, Stream};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sweepmin::config::{self, PartialSettings};
use sweepmin::display;
use sweepmin::sweep::{self, SweepEvent};
use sweepmin::types::OutputFormat;

#[derive(Parser)]
#[command(
    name = "sweepmin",
    version,
    about = "Sweep a benchmark over cutoff and process-count values, printing the best of N runs"
)]
struct Cli {
    /// Config file (default: ./sweepmin.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Build tool to invoke
    #[arg(long)]
    command: Option<String>,

    /// Build tool target that runs the benchmark
    #[arg(long)]
    target: Option<String>,

    /// Directory the build tool runs in
    #[arg(short = 'C', long)]
    workdir: Option<PathBuf>,

    /// File the filtered timing lines are written to
    #[arg(long)]
    result_file: Option<PathBuf>,

    /// First cutoff exponent (cutoff = 2^N)
    #[arg(long)]
    cutoff_start: Option<u32>,

    /// Cutoff exponent to stop before
    #[arg(long)]
    cutoff_end: Option<u32>,

    /// Process counts, comma separated
    #[arg(long, value_delimiter = ',')]
    procs: Option<Vec<u32>>,

    /// Problem size selector (0 = SizeA, otherwise SizeB)
    #[arg(long)]
    size: Option<u32>,

    /// Runs per group; the minimum is reported
    #[arg(long)]
    repeats: Option<usize>,

    /// Report failed groups as nan and continue
    #[arg(long, overrides_with = "no_keep_going")]
    keep_going: bool,

    /// Stop at the first failed group, even if the config file says otherwise
    #[arg(long, overrides_with = "keep_going")]
    no_keep_going: bool,

    #[arg(long, default_value = "default")]
    format: OutputFormat,

    #[arg(long)]
    json: bool,

    /// Print the commands that would run and exit
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> PartialSettings {
        PartialSettings {
            command: self.command.clone(),
            target: self.target.clone(),
            workdir: self.workdir.clone(),
            result_file: self.result_file.clone(),
            cutoff_start: self.cutoff_start,
            cutoff_end: self.cutoff_end,
            procs: self.procs.clone(),
            size: self.size,
            repeats: self.repeats,
            keep_going: match (self.keep_going, self.no_keep_going) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let file_settings = match config::locate_config(cli.config.as_deref(), &cwd) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            config::load_config(&path)?
        }
        None => PartialSettings::default(),
    };
    let settings = file_settings.merge(cli.overrides()).resolve()?;

    let plan = settings.plan();
    let mut runner = settings.runner();

    if cli.dry_run {
        let lines = plan
            .specs()
            .map(|spec| (spec.cutoff, runner.command_line(&spec)));
        print!("{}", display::format_dry_run(lines));
        return Ok(());
    }

    let json = cli.json || matches!(cli.format, OutputFormat::Json);

    let groups = sweep::run_sweep(&mut runner, &plan, |event| {
        if json {
            return;
        }
        match event {
            SweepEvent::CutoffStarted(cutoff) => {
                println!("{}", display::format_cutoff_header(cutoff))
            }
            SweepEvent::GroupFinished(group) => println!("{}", display::format_group(group)),
        }
    })?;

    let total = groups.len();
    let report = sweep::build_report(
        &plan,
        format!("{} {}", settings.command, settings.target),
        groups,
    );
    if json {
        print!("{}", display::format_json(&report)?);
    }

    let failures = report.failures();
    if failures > 0 {
        anyhow::bail!("{} of {} groups failed", failures, total);
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!(
            "{} {}",
            "error:".if_supports_color(Stream::Stderr, |s| s.red()),
            err
        );
        process::exit(1);
    }
}
