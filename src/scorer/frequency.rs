use crate::alphabet::LETTER_COUNT;
use crate::key::Key;

pub fn letter_counts(text: &str) -> [u64; LETTER_COUNT] {
    let mut counts = [0u64; LETTER_COUNT];
    for c in text.chars().filter(char::is_ascii_alphabetic) {
        counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1;
    }
    counts
}

/// Letters ordered by descending count. Ties keep alphabetical order.
pub fn letter_ranks(counts: &[u64; LETTER_COUNT]) -> [u8; LETTER_COUNT] {
    let mut ranks = *Key::identity().forward();
    ranks.sort_by(|&a, &b| counts[b as usize].cmp(&counts[a as usize]));
    ranks
}

/// Closed-form unigram guess: the r-th most frequent corpus letter is
/// assumed to encrypt to the r-th most frequent ciphertext letter.
pub fn rank_key(ciphertext: &str, corpus_counts: &[u64; LETTER_COUNT]) -> Key {
    let plain_ranks = letter_ranks(corpus_counts);
    let cipher_ranks = letter_ranks(&letter_counts(ciphertext));

    let mut forward = [0u8; LETTER_COUNT];
    for (&plain, &cipher) in plain_ranks.iter().zip(cipher_ranks.iter()) {
        forward[plain as usize] = cipher;
    }
    // Both rank arrays are permutations of 0..26.
    Key::from_mapping(forward).unwrap_or_else(|_| Key::identity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher;

    #[test]
    fn ties_keep_alphabetical_order() {
        let counts = [0u64; LETTER_COUNT];
        assert_eq!(letter_ranks(&counts), *Key::identity().forward());

        let mut counts = [1u64; LETTER_COUNT];
        counts[25] = 5;
        let ranks = letter_ranks(&counts);
        assert_eq!(ranks[0], 25);
        assert_eq!(ranks[1], 0);
    }

    #[test]
    fn rank_key_recovers_distinct_frequencies() {
        // Every letter has a distinct frequency, so ranking is exact.
        let mut plain = String::new();
        for (i, c) in ('a'..='z').enumerate() {
            plain.extend(std::iter::repeat(c).take(i + 1));
            plain.push(' ');
        }
        let key = Key::caesar(7).unwrap();
        let ciphertext = cipher::encrypt(&plain, &key);
        let guess = rank_key(&ciphertext, &letter_counts(&plain));
        assert_eq!(guess, key);
    }
}
