use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CrmError, Result};
use crate::records::RecordStore;
use crate::store::KeyValueStore;
use std::fs;
use std::path::Path;

/// Replaces every customer with the records in `raw`.
pub fn run<S: KeyValueStore>(store: &mut RecordStore<S>, raw: &str) -> Result<CmdResult> {
    store.replace_all(raw)?;

    let mut result = CmdResult::default().with_listed_customers(store.records().to_vec());
    result.add_message(CmdMessage::success(format!(
        "Data imported ({} customers)",
        store.records().len()
    )));
    Ok(result)
}

/// Reads an import file as text. Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(CrmError::Io)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::TempDir;

    #[test]
    fn replaces_collection() {
        let fixture = StoreFixture::new().with_customers(3);
        let mut store = RecordStore::open(fixture.store).unwrap();

        let result = run(&mut store, "X|||||||2025-01-01\nY|||||||2025-01-02").unwrap();

        assert_eq!(result.listed_customers.len(), 2);
        assert_eq!(store.records()[1].customer_name, "Y");
        assert_eq!(result.messages[0], CmdMessage::success("Data imported (2 customers)"));
    }

    #[test]
    fn empty_import_clears_everything() {
        let fixture = StoreFixture::new().with_customers(2);
        let mut store = RecordStore::open(fixture.store).unwrap();

        run(&mut store, "").unwrap();

        assert!(store.records().is_empty());
        let reloaded = RecordStore::open(store.backend().clone()).unwrap();
        assert!(reloaded.records().is_empty());
    }

    #[test]
    fn read_file_is_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, [b'A', 0xff, b'|', b'B']).unwrap();

        let text = read_file(&path).unwrap();
        assert_eq!(text, "A\u{FFFD}|B");
    }

    #[test]
    fn read_file_missing_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_file(&dir.path().join("nope.txt")),
            Err(CrmError::Io(_))
        ));
    }
}
