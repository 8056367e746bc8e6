use crate::cipher;
use crate::config::SearchParams;
use crate::error::{CfResult, CipherForgeError};
use crate::key::Key;
use crate::optimizer::{Annealer, SearchOutcome};
use crate::scorer::{metrics, LanguageModel, NgramOrder};
use fastrand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Accuracy a trial must reach to count as a successful recovery.
pub const SUCCESS_THRESHOLD: f64 = 0.9;

/// A trait for receiving updates during a search.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, chain: usize, iteration: u64, temperature: f64, best_score: f64) -> bool;
}

/// Callback that never interrupts.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: u64, _: f64, _: f64) -> bool {
        true
    }
}

pub struct Optimizer {
    model: Arc<LanguageModel>,
    params: SearchParams,
    max_time: Option<Duration>,
}

impl Optimizer {
    pub fn new(model: Arc<LanguageModel>, params: SearchParams) -> CfResult<Self> {
        params.validate()?;
        if model.order() != params.ngram {
            return Err(CipherForgeError::InvalidConfiguration(format!(
                "language model has order {} but the search asks for {}",
                model.order(),
                params.ngram
            )));
        }
        Ok(Self {
            model,
            params,
            max_time: None,
        })
    }

    pub fn with_max_time(mut self, limit: Duration) -> Self {
        self.max_time = Some(limit);
        self
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Runs `params.chains` independent chains in parallel. Chain `i`
    /// draws from `Rng::with_seed(seed + i)`. The highest-scoring outcome
    /// wins; ties go to the lowest chain index.
    pub fn run<CB: ProgressCallback>(
        &self,
        ciphertext: &str,
        seed: u64,
        callback: &CB,
    ) -> CfResult<SearchOutcome> {
        let deadline = self.max_time.map(|limit| Instant::now() + limit);

        let chains = (0..self.params.chains)
            .map(|i| {
                let rng = Rng::with_seed(seed.wrapping_add(i as u64));
                Annealer::new(self.model.clone(), ciphertext, &self.params, rng)
                    .map(|a| a.with_chain(i))
            })
            .collect::<CfResult<Vec<_>>>()?;

        let outcomes: Vec<SearchOutcome> = chains
            .into_par_iter()
            .map(|a| a.run(callback, deadline))
            .collect();

        let mut best: Option<SearchOutcome> = None;
        for outcome in outcomes {
            match &best {
                Some(b) if outcome.best.score <= b.best.score => {}
                _ => best = Some(outcome),
            }
        }

        // chains >= 1 is checked by validate()
        best.ok_or_else(|| CipherForgeError::InvalidConfiguration("no chains ran".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    pub trial: usize,
    pub key: Key,
    pub accuracy: f64,
    pub score: f64,
    pub iterations: u64,
    pub seconds: f64,
}

/// Aggregate over repeated encrypt-then-crack trials of one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSummary {
    pub message: String,
    pub length: usize,
    pub ngram: NgramOrder,
    pub average_time: f64,
    pub average_accuracy: f64,
    /// Trials recovering every character.
    pub perfect: usize,
    /// Trials at or above [`SUCCESS_THRESHOLD`].
    pub successes: usize,
    pub runs: usize,
    #[serde(skip)]
    pub results: Vec<TrialResult>,
}

impl TrialSummary {
    fn from_results(plaintext: &str, ngram: NgramOrder, results: Vec<TrialResult>) -> Self {
        let runs = results.len();
        let denom = runs.max(1) as f64;
        let message = if plaintext.chars().count() > 60 {
            format!("{}...", plaintext.chars().take(60).collect::<String>())
        } else {
            plaintext.to_string()
        };

        Self {
            message,
            length: plaintext.chars().count(),
            ngram,
            average_time: results.iter().map(|r| r.seconds).sum::<f64>() / denom,
            average_accuracy: results.iter().map(|r| r.accuracy).sum::<f64>() / denom,
            perfect: results.iter().filter(|r| r.accuracy >= 1.0).count(),
            successes: results
                .iter()
                .filter(|r| r.accuracy >= SUCCESS_THRESHOLD)
                .count(),
            runs,
            results,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.successes as f64 / self.runs as f64
        }
    }

    /// Appends one row, writing the header first when the file is new
    /// or empty.
    pub fn append_csv<P: AsRef<Path>>(&self, path: P) -> CfResult<()> {
        let path = path.as_ref();
        let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        wtr.serialize(self)?;
        wtr.flush()?;

        debug!("Appended trial summary to {:?}", path);
        Ok(())
    }
}

/// Encrypts `plaintext` under a fresh random key per trial, cracks it and
/// measures accuracy and wall time. Trials run in parallel; trial `i`
/// derives everything from `seed + i`.
pub fn run_trials(
    model: Arc<LanguageModel>,
    plaintext: &str,
    params: &SearchParams,
    trials: usize,
    seed: u64,
) -> CfResult<TrialSummary> {
    let optimizer = Optimizer::new(model, params.clone())?;
    let plaintext = plaintext.trim().to_lowercase();

    info!(
        "🔁 Running {} trials (n={}, {} chars)",
        trials,
        params.ngram,
        plaintext.len()
    );

    let results = (0..trials)
        .into_par_iter()
        .map(|trial| -> CfResult<TrialResult> {
            let mut rng = Rng::with_seed(seed.wrapping_add(trial as u64));
            let key = Key::random(&mut rng);
            let ciphertext = cipher::encrypt(&plaintext, &key);

            let start = Instant::now();
            let outcome = optimizer.run(&ciphertext, rng.u64(..), &NoProgress)?;
            let seconds = start.elapsed().as_secs_f64();

            let accuracy = metrics::accuracy(&plaintext, &outcome.best.plaintext);
            debug!(
                "   trial {:>3}: accuracy {:.3} in {:.2}s",
                trial, accuracy, seconds
            );

            Ok(TrialResult {
                trial,
                key,
                accuracy,
                score: outcome.best.score,
                iterations: outcome.iterations,
                seconds,
            })
        })
        .collect::<CfResult<Vec<_>>>()?;

    Ok(TrialSummary::from_results(&plaintext, params.ngram, results))
}
