#![allow(dead_code)]

use cipherforge::alphabet::Alphabet;
use cipherforge::config::SearchParams;
use cipherforge::scorer::{LanguageModel, NgramOrder};
use std::fs;
use std::sync::Arc;

pub const CORPUS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/corpus/reference.txt");
pub const SAMPLE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/corpus/sample_plaintext.txt"
);

pub fn corpus() -> String {
    fs::read_to_string(CORPUS_PATH).expect("reference corpus is missing")
}

pub fn sample_plaintext() -> String {
    fs::read_to_string(SAMPLE_PATH)
        .expect("sample plaintext is missing")
        .trim()
        .to_string()
}

pub fn model(order: NgramOrder) -> Arc<LanguageModel> {
    Arc::new(LanguageModel::build(&corpus(), order, Alphabet::default()).unwrap())
}

/// A short schedule for tests that exercise mechanics, not convergence.
pub fn quick_params(order: NgramOrder) -> SearchParams {
    SearchParams {
        ngram: order,
        temp_max: 50.0,
        temp_min: 1.0,
        tau: 5e-3,
        report_stride: 10,
        ..SearchParams::default()
    }
}
