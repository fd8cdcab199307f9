use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    aggregate::AggregateArg, association::AssociationArg, generate_sample::GenerateSampleArg,
    report::ReportArg, risk::RiskArg, survival::SurvivalArg,
};

mod aggregate;
mod association;
mod generate_sample;
mod report;
mod risk;
mod survival;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,

    #[clap(flatten)]
    global: GlobalArg,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct GlobalArg {
    /// Analysis configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write JSON output to this file instead of stdout
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Log debug messages (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a synthetic employee snapshot
    GenerateSample(#[clap(flatten)] GenerateSampleArg),
    /// Attrition metrics grouped by one or more attributes
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Test the association between an attribute and attrition
    Test(#[clap(flatten)] AssociationArg),
    /// Score current employees and list those at high risk
    Risk(#[clap(flatten)] RiskArg),
    /// Tenure survival curve and critical retention windows
    Survival(#[clap(flatten)] SurvivalArg),
    /// Run every analysis and bundle the results
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.global.verbose);
    match args.mode {
        Mode::GenerateSample(arg) => generate_sample::run(&arg, &args.global)?,
        Mode::Aggregate(arg) => aggregate::run(&arg, &args.global)?,
        Mode::Test(arg) => association::run(&arg, &args.global)?,
        Mode::Risk(arg) => risk::run(&arg, &args.global)?,
        Mode::Survival(arg) => survival::run(&arg, &args.global)?,
        Mode::Report(arg) => report::run(&arg, &args.global)?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
