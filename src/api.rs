use crate::cipher;
use crate::config::SearchParams;
use crate::error::CfResult;
use crate::key::{Key, KeySpec};
use crate::optimizer::{NoProgress, Optimizer, SearchOutcome};
use crate::scorer::LanguageModel;
use fastrand::Rng;
use std::sync::Arc;
use tracing::info;

/// Service: Encrypt with a user-supplied key spec. Returns the key that
/// was actually used, which matters when a random key was requested.
pub fn encrypt_message(text: &str, spec: &KeySpec, rng: &mut Rng) -> CfResult<(String, Key)> {
    let key = spec.to_key(rng)?;
    Ok((cipher::encrypt(text, &key), key))
}

/// Service: Decrypt with a known key.
pub fn decrypt_message(text: &str, key: &Key) -> String {
    cipher::decrypt(text, key)
}

/// Service: Recover the plaintext of a substitution ciphertext.
///
/// Configuration problems surface here, before any chain starts. When a
/// reference plaintext is given, the best record carries its accuracy.
pub fn crack(
    ciphertext: &str,
    model: Arc<LanguageModel>,
    params: &SearchParams,
    seed: u64,
    reference: Option<&str>,
) -> CfResult<SearchOutcome> {
    let optimizer = Optimizer::new(model, params.clone())?;
    let mut outcome = optimizer.run(ciphertext, seed, &NoProgress)?;

    if let Some(reference) = reference {
        outcome.score_against(reference);
    }

    info!(
        "🔓 Best score {:.2} at iteration {} ({})",
        outcome.best.score, outcome.best.iteration_found, outcome.termination
    );
    Ok(outcome)
}
