use crate::alphabet::LETTER_COUNT;
use crate::config::SeedPolicy;
use crate::key::Key;
use crate::scorer::{frequency, LanguageModel};
use fastrand::Rng;

/// Two key positions drawn uniformly with replacement. Equal positions
/// are a legal (no-op) proposal.
#[inline(always)]
pub fn propose_swap(rng: &mut Rng) -> (usize, usize) {
    (rng.usize(0..LETTER_COUNT), rng.usize(0..LETTER_COUNT))
}

/// Starting key for a chain.
pub fn seed_key(policy: SeedPolicy, ciphertext: &str, model: &LanguageModel, rng: &mut Rng) -> Key {
    match policy {
        SeedPolicy::Random => Key::random(rng),
        SeedPolicy::FrequencyRank => frequency::rank_key(ciphertext, model.letter_counts()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::scorer::NgramOrder;

    #[test]
    fn proposals_stay_in_range_and_cover_the_key() {
        let mut rng = Rng::with_seed(3);
        let mut seen = [false; LETTER_COUNT];
        for _ in 0..2000 {
            let (i, j) = propose_swap(&mut rng);
            assert!(i < LETTER_COUNT && j < LETTER_COUNT);
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn frequency_seed_ignores_the_rng() {
        let model =
            LanguageModel::build("eeee tttt aaa oo i", NgramOrder::Bigram, Alphabet::default())
                .unwrap();
        let a = seed_key(SeedPolicy::FrequencyRank, "xxxx", &model, &mut Rng::with_seed(1));
        let b = seed_key(SeedPolicy::FrequencyRank, "xxxx", &model, &mut Rng::with_seed(2));
        assert_eq!(a, b);
        // most frequent corpus letter maps to the most frequent cipher letter
        assert_eq!(a.image(4), 23);
    }
}
