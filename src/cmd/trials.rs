use super::{resolve_params, ModelSource};
use crate::reports;
use cipherforge::config::SearchParams;
use cipherforge::error::CfResult;
use cipherforge::optimizer::runner::{self, TrialSummary};
use cipherforge::scorer::NgramOrder;
use clap::{ArgMatches, Args};
use std::fs;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct TrialsArgs {
    /// Plaintext to encrypt and recover on every trial
    #[arg(short, long)]
    pub input: String,

    #[arg(short = 'n', long, default_value_t = 10)]
    pub trials: usize,

    /// Append one summary row per n-gram order to this CSV file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Repeat the experiment for every n-gram order
    #[arg(long, default_value_t = false)]
    pub all_orders: bool,

    #[command(flatten)]
    pub params: SearchParams,

    #[arg(long = "params")]
    pub params_file: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: TrialsArgs, source: ModelSource, matches: &ArgMatches) -> CfResult<()> {
    let base = resolve_params(&args.params, args.params_file.as_deref(), matches)?;
    let plaintext = fs::read_to_string(&args.input)?;
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));

    let orders: Vec<NgramOrder> = if args.all_orders {
        NgramOrder::iter().collect()
    } else {
        vec![base.ngram]
    };

    let mut summaries: Vec<TrialSummary> = Vec::new();
    for order in orders {
        let params = SearchParams {
            ngram: order,
            ..base.clone()
        };
        let model = source.load(order)?;
        let summary = runner::run_trials(model, &plaintext, &params, args.trials, seed)?;

        info!(
            "📊 n={}: {}/{} runs at >= {:.0}% accuracy (avg {:.3}, {:.2}s)",
            order,
            summary.successes,
            summary.runs,
            runner::SUCCESS_THRESHOLD * 100.0,
            summary.average_accuracy,
            summary.average_time
        );

        if let Some(path) = &args.output {
            summary.append_csv(path)?;
        }
        summaries.push(summary);
    }

    reports::print_trial_summaries(&summaries);
    if let Some(path) = &args.output {
        info!("💾 Appended {} row(s) to {}", summaries.len(), path);
    }
    Ok(())
}
