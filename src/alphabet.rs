use serde::{Deserialize, Serialize};

/// Number of letters a substitution key permutes.
pub const LETTER_COUNT: usize = 26;

/// Dense index of the space symbol when the alphabet models it.
pub const SPACE_INDEX: u8 = LETTER_COUNT as u8;

/// The symbol set the language model works over.
///
/// Letters are case-folded onto indices `0..26`; the space character,
/// when modeled, takes index `26`. Every other character is dropped by
/// [`Alphabet::restrict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    include_space: bool,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::with_space()
    }
}

impl Alphabet {
    pub const fn letters() -> Self {
        Self {
            include_space: false,
        }
    }

    pub const fn with_space() -> Self {
        Self {
            include_space: true,
        }
    }

    pub fn includes_space(&self) -> bool {
        self.include_space
    }

    pub fn size(&self) -> usize {
        if self.include_space {
            LETTER_COUNT + 1
        } else {
            LETTER_COUNT
        }
    }

    #[inline(always)]
    pub fn encode(&self, c: char) -> Option<u8> {
        if c.is_ascii_alphabetic() {
            Some(c.to_ascii_lowercase() as u8 - b'a')
        } else if c == ' ' && self.include_space {
            Some(SPACE_INDEX)
        } else {
            None
        }
    }

    pub fn decode(&self, symbol: u8) -> char {
        if symbol == SPACE_INDEX {
            ' '
        } else {
            (b'a' + symbol) as char
        }
    }

    /// Case-folds `text` and keeps only modeled symbols.
    pub fn restrict(&self, text: &str) -> Vec<u8> {
        text.chars().filter_map(|c| self.encode(c)).collect()
    }
}
