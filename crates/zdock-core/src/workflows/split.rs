use super::error::WorkflowError;
use super::load_document;
use crate::core::io::traits::FileFormat;
use crate::core::io::zdock::ZdockFile;
use crate::core::models::document::ResultDocument;
use crate::engine::split::{chunk_suffix, merge, split};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_SPLIT_PREFIX: &str = "zdsplit.";

/// Writes the records of a result file in chunks of `chunk_size` to
/// `prefix` + `aaaa`, `aaab`, ...; one chunk holds every record when no size is given.
///
/// Returns the paths written, in chunk order.
#[instrument(skip_all, name = "split_workflow")]
pub fn run_split(
    result_path: &Path,
    chunk_size: Option<usize>,
    prefix: &str,
) -> Result<Vec<PathBuf>, WorkflowError> {
    let doc = load_document(result_path)?;
    let chunk_size = chunk_size.unwrap_or_else(|| doc.num_predictions().max(1));
    let chunks = split(&doc, chunk_size)?;

    let mut written = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let path = PathBuf::from(format!("{prefix}{}", chunk_suffix(index)?));
        write_document(chunk, &path)?;
        written.push(path);
    }
    info!(chunks = written.len(), chunk_size, "Split result file.");
    Ok(written)
}

/// Joins the records of several result files under the header of the first.
#[instrument(skip_all, name = "unsplit_workflow")]
pub fn run_unsplit<P: AsRef<Path>>(paths: &[P]) -> Result<ResultDocument, WorkflowError> {
    let docs = paths
        .iter()
        .map(|path| load_document(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let merged = merge(&docs)?;
    info!(
        files = docs.len(),
        records = merged.num_predictions(),
        "Joined result files."
    );
    Ok(merged)
}

fn write_document(doc: &ResultDocument, path: &Path) -> Result<(), WorkflowError> {
    let write_error = |source| WorkflowError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    ZdockFile::write_to(doc, &mut writer)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
