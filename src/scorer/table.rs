use crate::alphabet::{Alphabet, LETTER_COUNT};
use crate::error::{CfResult, CipherForgeError};
use clap::ValueEnum;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Length of the contiguous symbol windows the model counts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    ValueEnum,
)]
pub enum NgramOrder {
    #[strum(to_string = "1", serialize = "unigram")]
    #[serde(rename = "1")]
    #[value(name = "1", alias = "unigram")]
    Unigram,
    #[default]
    #[strum(to_string = "2", serialize = "bigram")]
    #[serde(rename = "2")]
    #[value(name = "2", alias = "bigram")]
    Bigram,
    #[strum(to_string = "3", serialize = "trigram")]
    #[serde(rename = "3")]
    #[value(name = "3", alias = "trigram")]
    Trigram,
}

impl NgramOrder {
    pub fn n(self) -> usize {
        match self {
            NgramOrder::Unigram => 1,
            NgramOrder::Bigram => 2,
            NgramOrder::Trigram => 3,
        }
    }

    pub fn from_len(n: usize) -> CfResult<Self> {
        match n {
            1 => Ok(NgramOrder::Unigram),
            2 => Ok(NgramOrder::Bigram),
            3 => Ok(NgramOrder::Trigram),
            _ => Err(CipherForgeError::InvalidConfiguration(format!(
                "unsupported n-gram order {} (expected 1, 2 or 3)",
                n
            ))),
        }
    }

    /// Number of distinct ids an n-gram of this order can take.
    pub fn id_space(self, alphabet: &Alphabet) -> usize {
        alphabet.size().pow(self.n() as u32)
    }
}

/// Calls `f` with the id of every window of `order` symbols, in order.
#[inline(always)]
pub fn for_each_ngram<F: FnMut(u32)>(symbols: &[u8], order: NgramOrder, base: u32, mut f: F) {
    let n = order.n();
    if symbols.len() < n {
        return;
    }
    for window in symbols.windows(n) {
        let id = window.iter().fold(0u32, |acc, &s| acc * base + s as u32);
        f(id);
    }
}

/// Sparse n-gram counts.
///
/// N-grams are stored under their base-|alphabet| id, which keeps
/// trigram tables small: most of the 19683 combinations never occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NgramTable {
    order: NgramOrder,
    alphabet: Alphabet,
    counts: FnvHashMap<u32, u64>,
    total: u64,
}

impl NgramTable {
    pub fn new(order: NgramOrder, alphabet: Alphabet) -> Self {
        Self {
            order,
            alphabet,
            counts: FnvHashMap::default(),
            total: 0,
        }
    }

    pub fn from_text(text: &str, order: NgramOrder, alphabet: Alphabet) -> Self {
        Self::from_symbols(&alphabet.restrict(text), order, alphabet)
    }

    pub fn from_symbols(symbols: &[u8], order: NgramOrder, alphabet: Alphabet) -> Self {
        let mut table = Self::new(order, alphabet);
        let base = alphabet.size() as u32;
        for_each_ngram(symbols, order, base, |id| table.add_id(id, 1));
        table
    }

    pub(crate) fn add_id(&mut self, id: u32, count: u64) {
        *self.counts.entry(id).or_default() += count;
        self.total += count;
    }

    pub fn order(&self) -> NgramOrder {
        self.order
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn get_id(&self, id: u32) -> u64 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Count for a literal n-gram such as `"th"`. Strings of the wrong
    /// length or with unmodeled characters count 0.
    pub fn get(&self, gram: &str) -> u64 {
        self.encode(gram).map(|id| self.get_id(id)).unwrap_or(0)
    }

    pub fn encode(&self, gram: &str) -> Option<u32> {
        let base = self.alphabet.size() as u32;
        let mut id = 0u32;
        let mut len = 0;
        for c in gram.chars() {
            id = id * base + self.alphabet.encode(c)? as u32;
            len += 1;
        }
        (len == self.order.n()).then_some(id)
    }

    pub fn decode(&self, mut id: u32) -> String {
        let base = self.alphabet.size() as u32;
        let mut symbols = vec![0u8; self.order.n()];
        for slot in symbols.iter_mut().rev() {
            *slot = (id % base) as u8;
            id /= base;
        }
        symbols.iter().map(|&s| self.alphabet.decode(s)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    /// Entries sorted by descending count, ties by id.
    pub fn sorted(&self) -> Vec<(u32, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }

    /// Letter counts taken from the first symbol of every n-gram.
    /// Exact for unigram tables, a close marginal otherwise.
    pub fn letter_counts(&self) -> [u64; LETTER_COUNT] {
        let base = self.alphabet.size() as u32;
        let shift = base.pow(self.order.n() as u32 - 1);
        let mut counts = [0u64; LETTER_COUNT];
        for (id, count) in self.iter() {
            let first = (id / shift) as usize;
            if first < LETTER_COUNT {
                counts[first] += count;
            }
        }
        counts
    }
}
