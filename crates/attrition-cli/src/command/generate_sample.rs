use attrition_analysis::sample;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{command::GlobalArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateSampleArg {
    /// Number of employees to generate
    #[arg(long, default_value_t = 500)]
    num_employees: usize,
    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &GenerateSampleArg, global: &GlobalArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);
    let employees = sample::generate(&mut rng, arg.num_employees);
    tracing::info!(
        seed,
        employees = employees.len(),
        departed = employees.iter().filter(|e| e.attrition).count(),
        "generated sample snapshot"
    );
    Output::save_json(&employees, global.output.as_deref())
}
