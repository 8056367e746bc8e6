use crate::error::{CfResult, CipherForgeError};

/// Columnar transposition keyed by a word with distinct characters.
///
/// The message is written row by row under the keyword and the columns
/// are read out in the sorted order of the keyword's characters. The
/// last row may be short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnarTransposition {
    /// Column indices in read-out order.
    order: Vec<usize>,
}

impl ColumnarTransposition {
    pub fn new(keyword: &str) -> CfResult<Self> {
        let chars: Vec<char> = keyword.trim().chars().collect();
        if chars.is_empty() {
            return Err(CipherForgeError::MalformedKey(
                "transposition keyword is empty".to_string(),
            ));
        }
        for (i, c) in chars.iter().enumerate() {
            if chars[..i].contains(c) {
                return Err(CipherForgeError::MalformedKey(format!(
                    "transposition keyword repeats '{}'",
                    c
                )));
            }
        }

        let mut order: Vec<usize> = (0..chars.len()).collect();
        order.sort_by_key(|&i| chars[i]);
        Ok(Self { order })
    }

    pub fn width(&self) -> usize {
        self.order.len()
    }

    fn column_len(&self, col: usize, total: usize) -> usize {
        let width = self.width();
        total / width + usize::from(col < total % width)
    }

    pub fn encrypt(&self, message: &str) -> String {
        let chars: Vec<char> = message.chars().collect();
        let width = self.width();
        let mut out = String::with_capacity(message.len());
        for &col in &self.order {
            for c in chars.iter().skip(col).step_by(width) {
                out.push(*c);
            }
        }
        out
    }

    pub fn decrypt(&self, message: &str) -> String {
        let chars: Vec<char> = message.chars().collect();
        let total = chars.len();
        let width = self.width();

        let mut columns: Vec<&[char]> = vec![&chars[..0]; width];
        let mut cursor = 0;
        for &col in &self.order {
            let len = self.column_len(col, total);
            columns[col] = &chars[cursor..cursor + len];
            cursor += len;
        }

        let mut out = String::with_capacity(message.len());
        for row in 0..total.div_ceil(width) {
            for column in &columns {
                if let Some(c) = column.get(row) {
                    out.push(*c);
                }
            }
        }
        out
    }
}
