//! Report output helpers.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// Write items as a prettified JSON array.
pub fn write_json_pretty<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

/// Write items as newline-delimited JSON (NDJSON).
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    for item in items {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}
