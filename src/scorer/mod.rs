pub mod frequency;
pub mod loader;
pub mod metrics;
pub mod table;

pub use self::table::{NgramOrder, NgramTable};

use crate::alphabet::{Alphabet, LETTER_COUNT};
use crate::error::{CfResult, CipherForgeError};
use tracing::debug;

/// Reference-corpus language model.
///
/// Scores text by
/// `sum over distinct n-grams g of (1 + count(g)) * ln(1 + corpus(g))`,
/// so an n-gram the corpus never saw contributes exactly zero and no
/// score is ever negative.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    table: NgramTable,
    /// Dense `ln(1 + corpus count)` per n-gram id.
    log_weights: Vec<f64>,
    letter_counts: [u64; LETTER_COUNT],
}

impl LanguageModel {
    /// Builds the corpus table from raw reference text.
    pub fn build(corpus: &str, order: NgramOrder, alphabet: Alphabet) -> CfResult<Self> {
        let symbols = alphabet.restrict(corpus);
        let table = NgramTable::from_symbols(&symbols, order, alphabet);

        let mut letter_counts = [0u64; LETTER_COUNT];
        for &s in &symbols {
            if (s as usize) < LETTER_COUNT {
                letter_counts[s as usize] += 1;
            }
        }

        Self::assemble(table, letter_counts)
    }

    /// Wraps a prebuilt (e.g. cached) table. Letter counts come from the
    /// table's first-symbol marginals.
    pub fn from_table(table: NgramTable) -> CfResult<Self> {
        let letter_counts = table.letter_counts();
        Self::assemble(table, letter_counts)
    }

    fn assemble(table: NgramTable, letter_counts: [u64; LETTER_COUNT]) -> CfResult<Self> {
        if table.is_empty() {
            return Err(CipherForgeError::CorpusUnavailable(format!(
                "reference corpus yields no {}-grams",
                table.order()
            )));
        }

        let mut log_weights = vec![0.0; table.order().id_space(&table.alphabet())];
        for (id, count) in table.iter() {
            if let Some(slot) = log_weights.get_mut(id as usize) {
                *slot = (1.0 + count as f64).ln();
            }
        }

        debug!(
            "Language model ready: order={} distinct={} total={}",
            table.order(),
            table.len(),
            table.total()
        );

        Ok(Self {
            table,
            log_weights,
            letter_counts,
        })
    }

    pub fn order(&self) -> NgramOrder {
        self.table.order()
    }

    pub fn alphabet(&self) -> Alphabet {
        self.table.alphabet()
    }

    pub fn table(&self) -> &NgramTable {
        &self.table
    }

    /// Letter frequencies of the reference corpus, for rank seeding.
    pub fn letter_counts(&self) -> &[u64; LETTER_COUNT] {
        &self.letter_counts
    }

    /// `ln(1 + corpus count)` for an n-gram id; 0 when unseen.
    #[inline(always)]
    pub fn log_weight(&self, id: u32) -> f64 {
        self.log_weights.get(id as usize).copied().unwrap_or(0.0)
    }

    pub fn counter(&self) -> NgramCounter {
        NgramCounter::new(self.order(), self.alphabet())
    }

    pub fn score(&self, text: &str) -> f64 {
        self.score_symbols(&self.alphabet().restrict(text))
    }

    /// Scores already-restricted symbols.
    pub fn score_symbols(&self, symbols: &[u8]) -> f64 {
        let mut counter = self.counter();
        self.score_with(symbols, &mut counter)
    }

    /// Hot-path scoring that reuses `counter` between calls.
    #[inline(always)]
    pub fn score_with(&self, symbols: &[u8], counter: &mut NgramCounter) -> f64 {
        counter.count(symbols);
        let mut score = 0.0;
        for &id in &counter.touched {
            let weight = self.log_weight(id);
            if weight > 0.0 {
                score += (1.0 + counter.counts[id as usize] as f64) * weight;
            }
        }
        score
    }
}

/// Dense scratch counter for candidate n-grams.
///
/// Only the touched slots are cleared between calls, so counting a
/// candidate costs O(text length) regardless of the id space.
#[derive(Debug, Clone)]
pub struct NgramCounter {
    order: NgramOrder,
    base: u32,
    counts: Vec<u32>,
    touched: Vec<u32>,
}

impl NgramCounter {
    pub fn new(order: NgramOrder, alphabet: Alphabet) -> Self {
        Self {
            order,
            base: alphabet.size() as u32,
            counts: vec![0; order.id_space(&alphabet)],
            touched: Vec::new(),
        }
    }

    pub fn count(&mut self, symbols: &[u8]) {
        for &id in &self.touched {
            self.counts[id as usize] = 0;
        }
        self.touched.clear();

        let counts = &mut self.counts;
        let touched = &mut self.touched;
        table::for_each_ngram(symbols, self.order, self.base, |id| {
            let slot = &mut counts[id as usize];
            if *slot == 0 {
                touched.push(id);
            }
            *slot += 1;
        });
    }

    /// Number of distinct n-grams in the last counted text.
    pub fn distinct(&self) -> usize {
        self.touched.len()
    }

    pub fn get(&self, id: u32) -> u32 {
        self.counts.get(id as usize).copied().unwrap_or(0)
    }
}
