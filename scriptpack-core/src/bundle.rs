//! Source bundling: ordered reads joined into one byte body.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read `files` under `dir` in order and join their raw contents with a
/// single `\n` between consecutive files (none after the last).
///
/// Contents are used exactly as read: no per-file trailing-newline
/// normalization, no encoding pass. From here on the body is an opaque byte
/// sequence. A missing or unreadable file fails the whole bundle.
pub fn concat_sources(dir: &Path, files: &[String]) -> Result<Vec<u8>> {
    let mut parts = Vec::with_capacity(files.len());

    for name in files {
        let path = dir.join(name);
        let data =
            fs::read(&path).with_context(|| format!("reading source {}", path.display()))?;
        tracing::debug!(source = %path.display(), bytes = data.len(), "read source");
        parts.push(data);
    }

    Ok(parts.join(&b'\n'))
}
