use crate::commands::{CmdMessage, CmdResult, Export};
use crate::error::{CrmError, Result};
use crate::records::RecordStore;
use crate::store::KeyValueStore;
use std::fs;
use std::path::Path;

/// Produces the persisted blob verbatim under `filename`, the name reported back to the user.
pub fn run<S: KeyValueStore>(store: &RecordStore<S>, filename: &str) -> Result<CmdResult> {
    let export = Export {
        filename: filename.to_string(),
        contents: store.blob()?,
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Data exported to {}", filename)));
    Ok(result.with_export(export))
}

pub fn write_file(export: &Export, path: &Path) -> Result<()> {
    fs::write(path, &export.contents).map_err(CrmError::Io)
}
