pub mod mutation;
pub mod runner;
pub mod schedule;

pub use self::runner::{NoProgress, Optimizer, ProgressCallback};
pub use self::schedule::CoolingSchedule;

use crate::alphabet::LETTER_COUNT;
use crate::cipher;
use crate::config::SearchParams;
use crate::error::{CfResult, CipherForgeError};
use crate::key::Key;
use crate::scorer::{metrics, LanguageModel, NgramCounter};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use strum_macros::Display;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initializing,
    Searching,
    Terminated,
}

/// Why a chain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Temperature fell to `temp_min`.
    Cooled,
    IterationCap,
    TimeLimit,
    Aborted,
}

/// The chain's current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: Key,
    pub plaintext: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub key: Key,
    pub plaintext: String,
    pub score: f64,
    pub iteration_found: u64,
    /// Only known when a reference plaintext was supplied.
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub iteration: u64,
    pub temperature: f64,
    pub key: Key,
    pub score: f64,
    pub plaintext: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestUpdate {
    pub iteration: u64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best: BestRecord,
    pub history: Vec<BestUpdate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceEntry>,
    pub iterations: u64,
    pub accepted: u64,
    pub final_temperature: f64,
    pub termination: Termination,
    pub insufficient_signal: bool,
    pub chain: usize,
}

impl SearchOutcome {
    /// Fills in the best record's accuracy against a known plaintext.
    pub fn score_against(&mut self, reference: &str) {
        self.best.accuracy = Some(metrics::accuracy(reference, &self.best.plaintext));
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted as f64 / self.iterations as f64
        }
    }
}

/// One simulated-annealing chain over the key space.
///
/// The ciphertext is restricted to the model's alphabet once up front;
/// every proposal is decrypted symbol-wise into a scratch buffer and
/// scored with a reused counter. Plaintext strings are only built for
/// best-so-far updates and trace snapshots.
pub struct Annealer {
    model: Arc<LanguageModel>,
    schedule: CoolingSchedule,
    report_stride: u64,
    collect_trace: bool,
    max_iterations: Option<u64>,
    rng: Rng,
    chain: usize,

    ciphertext: String,
    cipher_symbols: Vec<u8>,
    scratch: Vec<u8>,
    counter: NgramCounter,

    state: SearchState,
    current_key: Key,
    current_score: f64,
    best: BestRecord,
    history: Vec<BestUpdate>,
    trace: Vec<TraceEntry>,

    iteration: u64,
    accepted: u64,
    temperature: f64,
    termination: Option<Termination>,
    insufficient_signal: bool,
}

impl Annealer {
    pub fn new(
        model: Arc<LanguageModel>,
        ciphertext: &str,
        params: &SearchParams,
        mut rng: Rng,
    ) -> CfResult<Self> {
        params.validate()?;
        if model.order() != params.ngram {
            return Err(CipherForgeError::InvalidConfiguration(format!(
                "language model has order {} but the search asks for {}",
                model.order(),
                params.ngram
            )));
        }

        let cipher_symbols = model.alphabet().restrict(ciphertext);
        let insufficient_signal = cipher_symbols.len() < params.ngram.n();
        if insufficient_signal {
            warn!(
                "⚠️  Ciphertext has {} modeled symbols, fewer than n={}. The result carries no signal.",
                cipher_symbols.len(),
                params.ngram.n()
            );
        }

        let current_key = mutation::seed_key(params.seed_policy, ciphertext, &model, &mut rng);
        let schedule = CoolingSchedule::from(params);
        let counter = model.counter();

        let mut annealer = Self {
            scratch: vec![0; cipher_symbols.len()],
            model,
            schedule,
            report_stride: params.report_stride,
            collect_trace: params.trace,
            max_iterations: params.max_iterations,
            rng,
            chain: 0,
            ciphertext: ciphertext.to_string(),
            cipher_symbols,
            counter,
            state: SearchState::Initializing,
            current_key,
            current_score: 0.0,
            best: BestRecord {
                key: current_key,
                plaintext: String::new(),
                score: 0.0,
                iteration_found: 0,
                accuracy: None,
            },
            history: Vec::new(),
            trace: Vec::new(),
            iteration: 0,
            accepted: 0,
            temperature: schedule.temp_max,
            termination: None,
            insufficient_signal,
        };

        annealer.current_score = annealer.evaluate(&current_key);
        annealer.best.score = annealer.current_score;
        annealer.best.plaintext = cipher::decrypt(&annealer.ciphertext, &current_key);
        annealer.history.push(BestUpdate {
            iteration: 0,
            score: annealer.current_score,
        });
        if annealer.collect_trace {
            annealer.snapshot();
        }

        debug!(
            "Chain {} seeded with {} (score {:.2}, planned {} iterations)",
            annealer.chain,
            current_key,
            annealer.current_score,
            schedule.planned_iterations()
        );

        annealer.state = SearchState::Searching;
        Ok(annealer)
    }

    pub fn with_chain(mut self, chain: usize) -> Self {
        self.chain = chain;
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn best(&self) -> &BestRecord {
        &self.best
    }

    pub fn current(&self) -> Candidate {
        Candidate {
            key: self.current_key,
            plaintext: cipher::decrypt(&self.ciphertext, &self.current_key),
            score: self.current_score,
        }
    }

    pub fn insufficient_signal(&self) -> bool {
        self.insufficient_signal
    }

    /// Decrypts the restricted ciphertext under `key` and scores it.
    #[inline(always)]
    fn evaluate(&mut self, key: &Key) -> f64 {
        for (dst, &src) in self.scratch.iter_mut().zip(self.cipher_symbols.iter()) {
            *dst = if (src as usize) < LETTER_COUNT {
                key.preimage(src)
            } else {
                src
            };
        }
        self.model.score_with(&self.scratch, &mut self.counter)
    }

    fn snapshot(&mut self) {
        self.trace.push(TraceEntry {
            iteration: self.iteration,
            temperature: self.temperature,
            key: self.current_key,
            score: self.current_score,
            plaintext: cipher::decrypt(&self.ciphertext, &self.current_key),
        });
    }

    /// Stops the chain early. The best-so-far record is kept.
    pub fn terminate(&mut self, reason: Termination) {
        if self.state != SearchState::Terminated {
            self.state = SearchState::Terminated;
            self.termination = Some(reason);
        }
    }

    /// Performs one iteration and returns the resulting state.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Searching {
            return self.state;
        }

        let temperature = self.schedule.temperature(self.iteration);
        self.temperature = temperature;
        if self.schedule.is_cold(temperature) {
            self.terminate(Termination::Cooled);
            return self.state;
        }
        if self.max_iterations.is_some_and(|cap| self.iteration >= cap) {
            self.terminate(Termination::IterationCap);
            return self.state;
        }

        let (i, j) = mutation::propose_swap(&mut self.rng);
        if i == j {
            // Identical key, delta 0: accepted, never strictly better.
            self.accepted += 1;
        } else {
            let proposal = self.current_key.swap(i, j);
            let score = self.evaluate(&proposal);
            let delta = score - self.current_score;

            // Metropolis criterion
            if delta >= 0.0 || self.rng.f64() < (delta / temperature).exp() {
                self.current_key = proposal;
                self.current_score = score;
                self.accepted += 1;

                if score > self.best.score {
                    self.best.key = proposal;
                    self.best.score = score;
                    self.best.iteration_found = self.iteration;
                    self.best.plaintext = cipher::decrypt(&self.ciphertext, &proposal);
                    self.history.push(BestUpdate {
                        iteration: self.iteration,
                        score,
                    });
                }
            }
        }

        self.iteration += 1;
        if self.collect_trace && self.iteration % self.report_stride == 0 {
            self.snapshot();
        }

        self.state
    }

    /// Steps until termination, reporting every `report_stride`
    /// iterations. A callback returning `false` or a passed `deadline`
    /// stop the chain with the best-so-far record intact.
    pub fn run<CB: ProgressCallback + ?Sized>(
        mut self,
        callback: &CB,
        deadline: Option<Instant>,
    ) -> SearchOutcome {
        while self.step() == SearchState::Searching {
            if self.iteration % self.report_stride != 0 {
                continue;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                self.terminate(Termination::TimeLimit);
                break;
            }
            let keep_going =
                callback.on_progress(self.chain, self.iteration, self.temperature, self.best.score);
            if !keep_going {
                self.terminate(Termination::Aborted);
                break;
            }
        }
        self.finish()
    }

    /// Consumes the chain. Anything still searching is treated as aborted.
    pub fn finish(mut self) -> SearchOutcome {
        self.terminate(Termination::Aborted);

        debug!(
            "Chain {} stopped ({}) after {} iterations at T={:.4}, best {:.2} @ {}",
            self.chain,
            self.termination.unwrap_or(Termination::Aborted),
            self.iteration,
            self.temperature,
            self.best.score,
            self.best.iteration_found
        );

        SearchOutcome {
            best: self.best,
            history: self.history,
            trace: self.trace,
            iterations: self.iteration,
            accepted: self.accepted,
            final_temperature: self.temperature,
            termination: self.termination.unwrap_or(Termination::Aborted),
            insufficient_signal: self.insufficient_signal,
            chain: self.chain,
        }
    }
}
