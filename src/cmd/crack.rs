use super::{resolve_params, ModelSource, TextInput};
use crate::reports;
use cipherforge::config::SearchParams;
use cipherforge::error::CfResult;
use cipherforge::optimizer::{CoolingSchedule, Optimizer, ProgressCallback};
use clap::{ArgMatches, Args};
use std::fs;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub input: TextInput,

    #[command(flatten)]
    pub params: SearchParams,

    /// JSON file with search parameters; explicit flags override it
    #[arg(long = "params")]
    pub params_file: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Wall-clock limit in seconds
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    /// Known plaintext, for reporting accuracy
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Print the full outcome as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

struct CliLogger;
impl ProgressCallback for CliLogger {
    fn on_progress(&self, chain: usize, iteration: u64, temperature: f64, best_score: f64) -> bool {
        if iteration % 5_000 == 0 {
            info!(
                "Chain {:2} | It {:7} | T {:9.3} | Best: {:.1}",
                chain, iteration, temperature, best_score
            );
        }
        true
    }
}

pub fn run(args: CrackArgs, source: ModelSource, matches: &ArgMatches) -> CfResult<()> {
    let params = resolve_params(&args.params, args.params_file.as_deref(), matches)?;
    let ciphertext = args.input.read()?;
    let model = source.load(params.ngram)?;

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    let schedule = CoolingSchedule::from(&params);
    info!(
        "🔥 Annealing {} chain(s), n={}, T {} -> {} (~{} iterations), seed {}",
        params.chains,
        params.ngram,
        params.temp_max,
        params.temp_min,
        schedule.planned_iterations(),
        seed
    );

    let mut optimizer = Optimizer::new(model, params.clone())?;
    if let Some(t) = args.time {
        optimizer = optimizer.with_max_time(Duration::from_secs(t));
    }

    let mut outcome = optimizer.run(&ciphertext, seed, &CliLogger)?;

    if let Some(path) = &args.reference {
        let reference = fs::read_to_string(path)?;
        outcome.score_against(&reference);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        reports::print_outcome(&outcome);
        println!("\n{}", outcome.best.plaintext);
    }
    Ok(())
}
