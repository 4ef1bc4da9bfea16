pub mod builder;
pub mod writer;

pub use builder::{GeneratedLists, ListBuilder};
pub use writer::write_lists;

use crate::cert::CertificateDecoder;
use crate::utils::errors::Result;
use crate::utils::paths::ListPaths;
use chrono::Utc;

/// Build both lists from the publishers tree and write them out.
///
/// Nothing is written unless every publisher and certificate was processed.
pub fn generate(paths: &ListPaths, decoder: &dyn CertificateDecoder) -> Result<GeneratedLists> {
    let lists = ListBuilder::new(paths, decoder).build(Utc::now())?;
    write_lists(paths, &lists)?;
    Ok(lists)
}
