use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use tracing::debug;

use crate::article::{self, ArticleRecord};

/// Blank article page used to author new stories; never listed.
pub const TEMPLATE_FILE: &str = "template-materia.html";

/// Collect one record per article page under `dir`, descending into every
/// subdirectory. Order follows the directory listing and is not
/// guaranteed; the driver's sort defines the final order. A missing or
/// unreadable root is an operator error and propagates.
pub fn collect_articles(
    dir: &Path,
    site_root: &Path,
) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let mut records = Vec::new();
    visit(dir, site_root, &mut records)?;
    Ok(records)
}

fn visit(
    dir: &Path,
    site_root: &Path,
    records: &mut Vec<ArticleRecord>,
) -> Result<(), Box<dyn Error>> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            visit(&path, site_root, records)?;
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.ends_with(".html") || name == TEMPLATE_FILE {
            continue;
        }

        let markup = fs::read_to_string(&path)?;
        let mod_time_ms = mtime_millis(&entry.metadata()?)?;
        debug!("article page found: {}", path.display());
        records.push(article::extract(&markup, &path, mod_time_ms, site_root));
    }
    Ok(())
}

fn mtime_millis(meta: &fs::Metadata) -> Result<i64, Box<dyn Error>> {
    let modified = meta.modified()?;
    Ok(modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0))
}
