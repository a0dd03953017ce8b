pub mod centroids;
pub mod filter;
pub mod ligand;
pub mod multimer;
pub mod prune;
pub mod split;

use crate::error::Result;
use std::io::{self, BufWriter, Write};
use zdockpp::core::io::traits::FileFormat;
use zdockpp::core::io::zdock::ZdockFile;
use zdockpp::core::models::document::ResultDocument;
use zdockpp::workflows::error::WorkflowError;

/// Runs `write` against a buffered stdout and flushes it.
pub(crate) fn with_stdout<F>(write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<io::StdoutLock<'static>>) -> std::result::Result<(), WorkflowError>,
{
    let mut out = BufWriter::new(io::stdout().lock());
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

pub(crate) fn print_document(doc: &ResultDocument) -> Result<()> {
    with_stdout(|out| Ok(ZdockFile::write_to(doc, out)?))
}
