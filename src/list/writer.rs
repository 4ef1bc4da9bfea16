use crate::list::GeneratedLists;
use crate::utils::errors::{ListError, Result};
use crate::utils::paths::ListPaths;
use std::fs;
use std::path::{Path, PathBuf};

/// Write both artifacts. Each one is staged in a sibling `.tmp` file and only
/// renamed into place once both have been written in full.
pub fn write_lists(paths: &ListPaths, lists: &GeneratedLists) -> Result<()> {
    fs::create_dir_all(paths.output_dir())?;

    let json = serde_json::to_string_pretty(&lists.directory)?;
    let targets = [
        (paths.pem_list(), lists.bundle.as_str()),
        (paths.json_list(), json.as_str()),
    ];

    // Catch a blocked target before the first rename replaces anything
    for (target, _) in &targets {
        if target.is_dir() {
            return Err(ListError::Config(format!(
                "Output path is a directory: {}",
                target.display()
            )));
        }
    }

    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(targets.len());
    for (target, content) in &targets {
        let temp = ListPaths::temp_path(target);
        if let Err(e) = fs::write(&temp, content) {
            let _ = fs::remove_file(&temp);
            discard(&staged);
            return Err(e.into());
        }
        staged.push((temp, target.as_path()));
    }

    for (temp, target) in &staged {
        if let Err(e) = fs::rename(temp, target) {
            discard(&staged);
            return Err(e.into());
        }
    }

    tracing::info!("The PEM list has been created into {}", paths.pem_list().display());
    tracing::info!("The JSON list has been created into {}", paths.json_list().display());
    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp, _) in staged {
        if temp.exists() {
            if let Err(e) = fs::remove_file(temp) {
                tracing::warn!("Failed to remove temporary file {}: {}", temp.display(), e);
            }
        }
    }
}
