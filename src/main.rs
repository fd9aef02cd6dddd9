//! Runs the reference three-body simulation and prints its reports.

use gravity_sim::{Real, Simulation, SimulationConfig, utils};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ftlog::LevelFilter;

use std::io::{BufWriter, Write};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of integration steps.
    #[arg(short('n'), long, default_value_t = SimulationConfig::DEFAULT_STEPS)]
    steps: usize,

    /// Number of interior reports spread over the run.
    #[arg(short('r'), long, default_value_t = SimulationConfig::DEFAULT_REPORTS)]
    reports: usize,

    /// Significant digits printed for every number.
    #[arg(short('d'), long, default_value_t = gravity_sim::report::DEFAULT_DIGITS)]
    digits: usize,

    /// Time step, as a decimal literal.
    #[arg(long, default_value = "0.01")]
    dt: String,

    /// Compute pair forces on all cores.
    #[arg(short('p'), long)]
    parallel: bool,

    /// Verbosity of the log written to stderr.
    #[arg(short('l'), long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = utils::configure_logger(args.log_level.into())
        .map_err(anyhow::Error::msg)
        .context("failed to configure logger")?;

    let config = SimulationConfig {
        dt: args.dt.parse::<Real>().context("invalid --dt")?,
        total_steps: args.steps,
        reports: args.reports,
        report_digits: args.digits,
        parallel: args.parallel,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::with_config(config).context("failed to set up simulation")?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = sim.run(&mut out).context("simulation failed")?;
    out.flush()?;

    ftlog::info!("Wrote {} reports over {} steps", summary.reports, summary.steps);
    Ok(())
}
