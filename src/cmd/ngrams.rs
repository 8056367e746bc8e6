use crate::reports;
use cipherforge::alphabet::Alphabet;
use cipherforge::error::CfResult;
use cipherforge::scorer::{loader, NgramOrder, NgramTable};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct NgramsArgs {
    /// Destination of the TSV cache
    #[arg(short, long)]
    pub output: String,

    #[arg(long, value_enum, default_value_t = NgramOrder::Bigram)]
    pub ngram: NgramOrder,

    /// Show the most frequent n-grams
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

pub fn run(args: NgramsArgs, corpus: &str) -> CfResult<()> {
    let text = loader::load_corpus_text(corpus)?;
    let table = NgramTable::from_text(&text, args.ngram, Alphabet::default());

    loader::save_table_to_file(&table, &args.output)?;
    reports::print_ngram_table(&table, args.top);
    Ok(())
}
