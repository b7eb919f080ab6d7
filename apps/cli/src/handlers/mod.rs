pub mod admin;
pub mod query;

use serde::Serialize;
use std::io::Write;

/// Writes `value` to stdout as pretty JSON followed by a newline.
pub fn emit<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
