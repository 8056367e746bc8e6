use cipherforge::alphabet::Alphabet;
use cipherforge::error::CipherForgeError;
use cipherforge::scorer::loader::{
    load_corpus_text, load_table_from_file, load_table_tsv, save_table_to_file, save_table_tsv,
};
use cipherforge::scorer::{LanguageModel, NgramOrder, NgramTable};
use std::fs::File;
use std::io::{Cursor, Write};

#[test]
fn cached_table_reloads_identically() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("bigrams.tsv");

    let table = NgramTable::from_text(
        "the cat and the hat, then the end",
        NgramOrder::Bigram,
        Alphabet::default(),
    );
    save_table_to_file(&table, &path).unwrap();
    let loaded = load_table_from_file(&path, NgramOrder::Bigram, Alphabet::default()).unwrap();

    assert_eq!(loaded, table);
    assert_eq!(loaded.get("e "), table.get("e "));
}

#[test]
fn space_is_written_literally() {
    let table = NgramTable::from_text("a b", NgramOrder::Bigram, Alphabet::default());
    let mut buf = Vec::new();
    save_table_tsv(&table, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("a \t1"));
    assert!(text.contains(" b\t1"));
}

#[test]
fn bad_rows_are_skipped() {
    let tsv = "th\t100\nthe\t50\nq!\t3\nhe\tlots\nhe\t80\nlonely\n";
    let table = load_table_tsv(Cursor::new(tsv), NgramOrder::Bigram, Alphabet::default()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("th"), 100);
    assert_eq!(table.get("he"), 80);
    assert_eq!(table.total(), 180);
}

#[test]
fn table_of_the_wrong_order_is_unavailable() {
    let tsv = "abc\t10\nbcd\t5\n";
    let err = load_table_tsv(Cursor::new(tsv), NgramOrder::Bigram, Alphabet::default());
    assert!(matches!(err, Err(CipherForgeError::CorpusUnavailable(_))));
}

#[test]
fn missing_corpus_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_corpus_text(dir.path().join("nope.txt"));
    assert!(matches!(err, Err(CipherForgeError::CorpusUnavailable(_))));
}

#[test]
fn corpus_without_letters_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digits.txt");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "1234 5678 !!!").unwrap();

    let err = load_corpus_text(&path);
    assert!(matches!(err, Err(CipherForgeError::CorpusUnavailable(_))));
}

#[test]
fn unigram_cache_restores_letter_counts() {
    let corpus = "eeee ttt aa o";
    let table = NgramTable::from_text(corpus, NgramOrder::Unigram, Alphabet::default());
    let mut buf = Vec::new();
    save_table_tsv(&table, &mut buf).unwrap();

    let loaded = load_table_tsv(Cursor::new(buf), NgramOrder::Unigram, Alphabet::default()).unwrap();
    let model = LanguageModel::from_table(loaded).unwrap();
    let built = LanguageModel::build(corpus, NgramOrder::Unigram, Alphabet::default()).unwrap();
    assert_eq!(model.letter_counts(), built.letter_counts());
}
