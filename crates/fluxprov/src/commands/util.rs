//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CliError;

/// What create/read/update/delete print and what read/update/delete take.
///
/// `id` is `null` once the resource is absent (deleted, or gone on read).
#[derive(Debug, Serialize, Deserialize)]
pub struct StateDoc<A> {
    pub id: Option<String>,
    pub attrs: A,
}

/// Read and parse a JSON document from a file, or stdin for `-`.
pub fn read_json(path: &Path) -> Result<Value, CliError> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read a state document, requiring an id.
pub fn read_state(path: &Path) -> Result<(String, Value), CliError> {
    let doc: StateDoc<Value> = serde_json::from_value(read_json(path)?)?;
    let id = doc.id.ok_or_else(|| CliError::Validation {
        field: "state.id".into(),
        reason: "the resource is absent; create it first".into(),
    })?;
    Ok((id, doc.attrs))
}
