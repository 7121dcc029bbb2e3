use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{write_site, LocalDescriptor, ProjectName};
use crate::error::Result;

pub const DESCRIPTOR_FILE: &str = "config.json";

/// Save `doc` as `<root>/<project>/index.html` plus `config.json`.
///
/// The directory is created if missing and reused if present; existing files
/// are overwritten. Nothing is rolled back if the descriptor write fails.
/// Returns the absolute path of the project directory.
pub fn publish(root: &Path, doc: &str, project: &ProjectName) -> Result<PathBuf> {
    let dir = std::path::absolute(root.join(project.as_str()))?;
    fs::create_dir_all(&dir)?;
    write_site(&dir, doc, DESCRIPTOR_FILE, &LocalDescriptor::new(project))?;
    info!(path = %dir.display(), "Site written");
    Ok(dir)
}
