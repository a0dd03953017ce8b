use crate::core::models::document::ResultDocument;
use crate::engine::error::EngineError;
use tracing::debug;

const SUFFIX_LEN: u32 = 4;
const ALPHABET_LEN: usize = 26;

/// Four-letter base-26 file suffix for chunk `index`: `aaaa`, `aaab`, ...
pub fn chunk_suffix(index: usize) -> Result<String, EngineError> {
    if index >= ALPHABET_LEN.pow(SUFFIX_LEN) {
        return Err(EngineError::TooManyChunks(index));
    }
    let mut letters = [b'a'; SUFFIX_LEN as usize];
    let mut rest = index;
    for slot in letters.iter_mut().rev() {
        *slot = b'a' + (rest % ALPHABET_LEN) as u8;
        rest /= ALPHABET_LEN;
    }
    Ok(letters.iter().map(|&b| b as char).collect())
}

/// Splits `doc` into consecutive documents of at most `chunk_size` records, each
/// carrying the original header. A document without records yields no chunks.
pub fn split(doc: &ResultDocument, chunk_size: usize) -> Result<Vec<ResultDocument>, EngineError> {
    if chunk_size == 0 {
        return Err(EngineError::InvalidChunkSize);
    }
    let chunks = doc
        .records()
        .chunks(chunk_size)
        .map(|records| doc.with_records(records.to_vec()))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(chunks = chunks.len(), chunk_size, "Split result document.");
    Ok(chunks)
}

/// Concatenates the records of `docs` under the header of the first document.
pub fn merge(docs: &[ResultDocument]) -> Result<ResultDocument, EngineError> {
    let (head, tail) = docs.split_first().ok_or(EngineError::NothingToMerge)?;
    let mut records = head.records().to_vec();
    for doc in tail {
        if doc.dialect() != head.dialect() {
            return Err(EngineError::DialectMismatch {
                expected: head.dialect(),
                found: doc.dialect(),
            });
        }
        records.extend_from_slice(doc.records());
    }
    debug!(documents = docs.len(), records = records.len(), "Merged result documents.");
    Ok(head.with_records(records)?)
}
