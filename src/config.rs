use crate::error::{CfResult, CipherForgeError};
use crate::scorer::NgramOrder;
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// How the annealer picks its starting key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    Random,
    #[default]
    FrequencyRank,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// N-gram order used for scoring (1, 2 or 3)
    #[arg(long, value_enum, default_value_t = NgramOrder::Bigram)]
    pub ngram: NgramOrder,

    #[arg(long, default_value_t = 1000.0)]
    pub temp_max: f64,
    #[arg(long, default_value_t = 1.0)]
    pub temp_min: f64,
    /// Exponential decay rate of the cooling schedule
    #[arg(long, default_value_t = 1.5e-4)]
    pub tau: f64,

    #[arg(long, value_enum, default_value_t = SeedPolicy::FrequencyRank)]
    pub seed_policy: SeedPolicy,

    /// Trace snapshot and progress interval, in iterations
    #[arg(long, default_value_t = 100)]
    pub report_stride: u64,
    #[arg(long, default_value_t = false)]
    pub trace: bool,

    /// Hard cap on iterations, on top of the cooling schedule
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Independent chains; the best one wins
    #[arg(long, default_value_t = 1)]
    pub chains: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            ngram: NgramOrder::Bigram,
            temp_max: 1000.0,
            temp_min: 1.0,
            tau: 1.5e-4,
            seed_policy: SeedPolicy::FrequencyRank,
            report_stride: 100,
            trace: false,
            max_iterations: None,
            chains: 1,
        }
    }
}

impl SearchParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Fails fast on anything that would make the schedule meaningless.
    pub fn validate(&self) -> CfResult<()> {
        let bad = |msg: String| Err(CipherForgeError::InvalidConfiguration(msg));

        if !(self.temp_max.is_finite() && self.temp_max > 0.0) {
            return bad(format!("temp_max must be positive, got {}", self.temp_max));
        }
        if !(self.temp_min.is_finite() && self.temp_min > 0.0) {
            return bad(format!("temp_min must be positive, got {}", self.temp_min));
        }
        if self.temp_min >= self.temp_max {
            return bad(format!(
                "temp_min ({}) must be below temp_max ({})",
                self.temp_min, self.temp_max
            ));
        }
        if !(self.tau.is_finite() && self.tau > 0.0) {
            return bad(format!("tau must be positive, got {}", self.tau));
        }
        if self.report_stride == 0 {
            return bad("report_stride must be at least 1".to_string());
        }
        if self.chains == 0 {
            return bad("chains must be at least 1".to_string());
        }
        Ok(())
    }

    /// Copies over only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(ngram, "ngram");
        update_if_present!(temp_max, "temp_max");
        update_if_present!(temp_min, "temp_min");
        update_if_present!(tau, "tau");
        update_if_present!(seed_policy, "seed_policy");
        update_if_present!(report_stride, "report_stride");
        update_if_present!(trace, "trace");
        update_if_present!(max_iterations, "max_iterations");
        update_if_present!(chains, "chains");
    }
}
