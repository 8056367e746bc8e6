pub mod crack;
pub mod decrypt;
pub mod encrypt;
pub mod ngrams;
pub mod trials;

use cipherforge::alphabet::Alphabet;
use cipherforge::config::SearchParams;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::scorer::{loader, LanguageModel, NgramOrder};
use clap::{ArgMatches, Args};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Text given inline or read from a file.
#[derive(Args, Debug, Clone)]
pub struct TextInput {
    /// Message text
    #[arg(conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the message from a file instead
    #[arg(short, long)]
    pub input: Option<String>,
}

impl TextInput {
    pub fn read(&self) -> CfResult<String> {
        match (&self.text, &self.input) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => Ok(fs::read_to_string(path)?),
            (None, None) => Err(CipherForgeError::InvalidConfiguration(
                "no message given (pass TEXT or --input FILE)".to_string(),
            )),
        }
    }
}

/// Where the reference statistics come from.
pub struct ModelSource<'a> {
    pub corpus: &'a str,
    pub table: Option<&'a str>,
}

impl ModelSource<'_> {
    /// Prefers the cached TSV table when it exists, else builds from the corpus.
    pub fn load(&self, order: NgramOrder) -> CfResult<Arc<LanguageModel>> {
        let alphabet = Alphabet::default();

        if let Some(path) = self.table {
            if !Path::new(path).exists() {
                warn!("⚠️  N-gram table '{}' not found. Building from corpus.", path);
            } else {
                match loader::load_table_from_file(path, order, alphabet) {
                    Ok(table) => return Ok(Arc::new(LanguageModel::from_table(table)?)),
                    Err(CipherForgeError::CorpusUnavailable(msg)) => {
                        warn!("⚠️  {} ({}). Building from corpus.", msg, path);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        let text = loader::load_corpus_text(self.corpus)?;
        let model = LanguageModel::build(&text, order, alphabet)?;
        info!(
            "🧮 Built {}-gram model: {} distinct n-grams",
            order,
            model.table().len()
        );
        Ok(Arc::new(model))
    }
}

/// A JSON parameter file is the base; flags typed on the command line win.
pub fn resolve_params(
    cli_params: &SearchParams,
    file: Option<&str>,
    matches: &ArgMatches,
) -> CfResult<SearchParams> {
    let params = match file {
        Some(path) => {
            info!("⚙️  Loading search parameters from: {}", path);
            let mut file_params = SearchParams::load_from_file(path)?;
            file_params.merge_from_cli(cli_params, matches);
            file_params
        }
        None => cli_params.clone(),
    };
    params.validate()?;
    Ok(params)
}
