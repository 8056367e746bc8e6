use cipherforge::alphabet::Alphabet;
use cipherforge::cipher::transposition::ColumnarTransposition;
use cipherforge::cipher;
use cipherforge::key::Key;
use cipherforge::scorer::{LanguageModel, NgramOrder};
use fastrand::Rng;
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_key()(seed in any::<u64>()) -> Key {
        Key::random(&mut Rng::with_seed(seed))
    }
}

prop_compose! {
    fn arb_keyword()(len in 1usize..12, seed in any::<u64>()) -> String {
        let mut letters: Vec<char> = ('a'..='z').collect();
        Rng::with_seed(seed).shuffle(&mut letters);
        letters.into_iter().take(len).collect()
    }
}

fn arb_order() -> impl Strategy<Value = NgramOrder> {
    prop_oneof![
        Just(NgramOrder::Unigram),
        Just(NgramOrder::Bigram),
        Just(NgramOrder::Trigram),
    ]
}

proptest! {
    #[test]
    fn decrypt_inverts_encrypt(text in "\\PC{0,200}", key in arb_key()) {
        let ct = cipher::encrypt(&text, &key);
        prop_assert_eq!(cipher::decrypt(&ct, &key), text);
    }

    #[test]
    fn identity_key_is_a_no_op(text in "[ -~]{0,120}") {
        prop_assert_eq!(cipher::encrypt(&text, &Key::identity()), text);
    }

    #[test]
    fn random_keys_are_bijections(key in arb_key()) {
        let mut seen = [false; 26];
        for c in 0..26u8 {
            let image = key.image(c);
            prop_assert!(!seen[image as usize]);
            seen[image as usize] = true;
            prop_assert_eq!(key.preimage(image), c);
        }
    }

    #[test]
    fn swaps_preserve_bijection(key in arb_key(), i in 0usize..26, j in 0usize..26) {
        let swapped = key.swap(i, j);
        for c in 0..26u8 {
            prop_assert_eq!(swapped.preimage(swapped.image(c)), c);
        }
        prop_assert_eq!(swapped.swap(i, j), key);
    }

    #[test]
    fn transposition_round_trips(keyword in arb_keyword(), text in "\\PC{0,150}") {
        let t = ColumnarTransposition::new(&keyword).unwrap();
        prop_assert_eq!(t.decrypt(&t.encrypt(&text)), text);
    }

    #[test]
    fn scores_are_never_negative(
        corpus in "[a-z ]{3,200}",
        text in "[a-zA-Z ,.!]{0,200}",
        order in arb_order()
    ) {
        if let Ok(model) = LanguageModel::build(&corpus, order, Alphabet::default()) {
            let score = model.score(&text);
            prop_assert!(score >= 0.0);
            prop_assert!(score.is_finite());
        }
    }

    #[test]
    fn hot_path_agrees_with_text_scoring(text in "[a-zA-Z ,.]{0,200}", key in arb_key()) {
        let model = LanguageModel::build(
            "the quick brown fox jumps over the lazy dog",
            NgramOrder::Bigram,
            Alphabet::default(),
        ).unwrap();
        let plain = cipher::decrypt(&text, &key);
        let symbols: Vec<u8> = Alphabet::default()
            .restrict(&text)
            .into_iter()
            .map(|s| if s < 26 { key.preimage(s) } else { s })
            .collect();
        prop_assert_eq!(model.score_symbols(&symbols), model.score(&plain));
    }
}
