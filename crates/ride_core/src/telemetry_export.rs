//! JSON export of manager snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::telemetry::ManagerSnapshot;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn snapshot_to_json(snapshot: &ManagerSnapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write `snapshot` as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_snapshot_json(
    snapshot: &ManagerSnapshot,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(
        path = %path.display(),
        drivers = snapshot.drivers.len(),
        rides = snapshot.rides.len(),
        "snapshot exported"
    );
    Ok(())
}
