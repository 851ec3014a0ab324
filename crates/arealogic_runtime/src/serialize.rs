//! Compiled logic export using `MessagePack`.
//!
//! A [`LogicBundle`] packs the compiled rules and tables together with the
//! area table their deferred area-entry checks refer to.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use arealogic_foundation::{Error, ErrorKind, Result};
use arealogic_language::{AreaTable, CompiledLogic};
use serde::{Deserialize, Serialize};

/// Everything a consumer needs to evaluate compiled rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicBundle {
    /// Rules, entrances, refills and doors.
    pub logic: CompiledLogic,
    /// Thresholds for `area(...)` checks.
    pub areas: AreaTable,
}

impl LogicBundle {
    /// Bundles compiled logic with an area table.
    #[must_use]
    pub fn new(logic: CompiledLogic, areas: AreaTable) -> Self {
        Self { logic, areas }
    }
}

/// Serializes a bundle to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(bundle: &LogicBundle) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(bundle)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a bundle from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<LogicBundle> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} '{}': {e}",
        path.display()
    )))
}

/// Saves a bundle to a file, creating or overwriting it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(bundle: &LogicBundle, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(bundle)?;

    let file = File::create(path).map_err(|e| io_error("create file", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to file", path, &e))?;
    writer
        .flush()
        .map_err(|e| io_error("flush file", path, &e))?;

    Ok(())
}

/// Loads a bundle from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<LogicBundle> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open file", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read file", path, &e))?;

    from_bytes(&bytes)
}
