//! Service-Discovery Document Writer
//!
//! Serializes target groups to pretty-printed JSON and writes them where the
//! configuration points. File output goes through a `<path>.tmp` sibling and
//! a rename, so a consumer re-reading the file never observes a partial
//! document; stdout output is written directly and flushed.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::OutputTarget;
use crate::discovery::TargetGroup;
use crate::error::Result;

/// Writes the accumulated target groups to the configured destination.
///
/// The document is always a well-formed JSON array, `[]` included. File
/// output gets a trailing newline; stdout output does not.
pub fn write_targets(groups: &[TargetGroup], output: &OutputTarget) -> Result<()> {
    let body = serde_json::to_string_pretty(groups)?;

    match output {
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            write_atomically(path, &body)?;
            info!("Wrote {} target groups to {}", groups.len(), path.display());
        }
    }

    Ok(())
}

/// Full write to a temp sibling, then rename onto the final path. The prior
/// file stays untouched until the rename commits.
fn write_atomically(path: &Path, body: &str) -> Result<()> {
    let tmp = tmp_path(path);

    {
        let mut file = File::create(&tmp)?;
        file.write_all(body.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut buf = path.as_os_str().to_os_string();
    buf.push(".tmp");
    PathBuf::from(buf)
}
