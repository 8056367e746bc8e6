use crate::alphabet::Alphabet;
use crate::error::{CfResult, CipherForgeError};
use crate::scorer::table::{NgramOrder, NgramTable};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Reads the reference corpus. A missing file, an unreadable one, or
/// text without a single letter is `CorpusUnavailable`.
pub fn load_corpus_text<P: AsRef<Path>>(path: P) -> CfResult<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        CipherForgeError::CorpusUnavailable(format!("could not read {:?}: {}", path, e))
    })?;

    if !text.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(CipherForgeError::CorpusUnavailable(format!(
            "{:?} contains no letters",
            path
        )));
    }

    info!("📚 Loaded corpus {:?} ({} chars)", path, text.len());
    Ok(text)
}

/// Writes `ngram<TAB>count` rows, most frequent first.
pub fn save_table_tsv<W: Write>(table: &NgramTable, writer: W) -> CfResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    for (id, count) in table.sorted() {
        wtr.write_record([table.decode(id), count.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_table_to_file<P: AsRef<Path>>(table: &NgramTable, path: P) -> CfResult<()> {
    let file = fs::File::create(path.as_ref())?;
    save_table_tsv(table, file)?;
    info!(
        "💾 Wrote {} {}-grams to {:?}",
        table.len(),
        table.order(),
        path.as_ref()
    );
    Ok(())
}

/// Reads a cached table. Rows of the wrong order, with unmodeled
/// symbols or unparsable counts are skipped.
pub fn load_table_tsv<R: Read>(
    reader: R,
    order: NgramOrder,
    alphabet: Alphabet,
) -> CfResult<NgramTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = NgramTable::new(order, alphabet);
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }

        let Some(id) = table.encode(&rec[0]) else {
            debug!("   [Row {}] skipping n-gram {:?}", row_idx + 1, &rec[0]);
            skipped += 1;
            continue;
        };

        match rec[1].trim().parse::<u64>() {
            Ok(count) => table.add_id(id, count),
            Err(_) => {
                debug!("   [Row {}] bad count {:?}", row_idx + 1, &rec[1]);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!("   Skipped {} rows in n-gram table.", skipped);
    }

    if table.is_empty() {
        return Err(CipherForgeError::CorpusUnavailable(format!(
            "n-gram table holds no {}-grams",
            order
        )));
    }
    Ok(table)
}

pub fn load_table_from_file<P: AsRef<Path>>(
    path: P,
    order: NgramOrder,
    alphabet: Alphabet,
) -> CfResult<NgramTable> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| {
        CipherForgeError::CorpusUnavailable(format!("could not open {:?}: {}", path, e))
    })?;
    let table = load_table_tsv(file, order, alphabet)?;
    info!("📚 Loaded {} {}-grams from {:?}", table.len(), order, path);
    Ok(table)
}
