use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::backend::interface::{BackendError, LedgerStore, Result};
use crate::core::Ledger;

/// Single-file JSON persistence. The document has two top-level
/// fields, `chain` and `balances`; a missing field deserializes to its
/// empty default, a missing file is an empty ledger.
pub struct JsonStore {
    path: PathBuf
}

impl JsonStore {
    pub fn new(path: impl AsRef<Path>) -> JsonStore {
        return JsonStore { path: path.as_ref().to_owned() };
    }

    pub fn path(&self) -> &Path {
        return &self.path;
    }

    fn parent_dir(&self) -> &Path {
        return self.path.parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
    }
}

impl LedgerStore for JsonStore {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            debug!("no store at {}, starting with an empty ledger", self.path.display());
            return Ok(Ledger::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let ledger: Ledger = serde_json::from_str(&content)
            .map_err(BackendError::CorruptStore)?;

        debug!("loaded {} entries from {}", ledger.len(), self.path.display());
        return Ok(ledger);
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let payload = serde_json::to_string_pretty(ledger)
            .map_err(|err| BackendError::Io(err.into()))?;

        // write next to the target and rename over it, so a reader
        // never observes a truncated document
        let mut staged = NamedTempFile::new_in(self.parent_dir())?;
        staged.write_all(payload.as_bytes())?;
        staged.persist(&self.path)
            .map_err(|err| BackendError::Io(err.error))?;

        debug!("saved {} entries to {}", ledger.len(), self.path.display());
        return Ok(());
    }
}


#[cfg(test)]
mod tests {
    use crate::backend::{BackendError, JsonStore, LedgerStore};
    use crate::core::{Entry, Ledger};

    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn store_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[fixture]
    fn ledger_json() -> serde_json::Value {
        json!({
            "chain": [
                {
                    "id": "11111111-2222-3333-4444-555555555555",
                    "timestamp": 1700000000,
                    "kind": "Mined",
                    "account": "Alice",
                    "reward": 2,
                    "fingerprint": "deadbeefdeadbeef"
                },
                {
                    "id": "99999999-8888-7777-6666-555555555555",
                    "timestamp": 1700000001,
                    "kind": "Transferred",
                    "sender": "Alice",
                    "receiver": "Bob",
                    "amount": 1,
                    "fingerprint": "deadbeefdeadbeef"
                }
            ],
            "balances": {
                "Alice": 1,
                "Bob": 1
            }
        })
    }

    #[rstest]
    fn missing_file_loads_as_empty_ledger(store_dir: TempDir) {
        let store = JsonStore::new(store_dir.path().join("ledger.json"));
        let ledger = store.load().unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.balances().is_empty());
    }

    #[rstest]
    fn save_then_load_roundtrips(store_dir: TempDir) {
        let store = JsonStore::new(store_dir.path().join("ledger.json"));

        let mut ledger = Ledger::new();
        ledger.append(Entry::mined("Alice", 2));
        ledger.append(Entry::transferred("Alice", "Bob", 1));
        store.save(&ledger).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, ledger);
        assert!(reloaded.is_consistent());
    }

    #[rstest]
    fn malformed_syntax_is_fatal(store_dir: TempDir) {
        let path = store_dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonStore::new(&path).load();
        assert!(matches!(result, Err(BackendError::CorruptStore(..))));
    }

    #[rstest]
    fn wrong_typed_field_is_fatal(store_dir: TempDir) {
        let path = store_dir.path().join("ledger.json");
        fs::write(&path, r#"{"chain": 5, "balances": {}}"#).unwrap();

        let result = JsonStore::new(&path).load();
        assert!(matches!(result, Err(BackendError::CorruptStore(..))));
    }

    #[rstest]
    #[case::empty_document("{}")]
    #[case::only_chain(r#"{"chain": []}"#)]
    #[case::only_balances(r#"{"balances": {}}"#)]
    fn missing_top_level_fields_default_to_empty(store_dir: TempDir, #[case] content: &str) {
        let path = store_dir.path().join("ledger.json");
        fs::write(&path, content).unwrap();

        let ledger = JsonStore::new(&path).load().unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.balances().is_empty());
    }

    #[rstest]
    fn save_replaces_previous_content(store_dir: TempDir) {
        let store = JsonStore::new(store_dir.path().join("ledger.json"));

        let mut first = Ledger::new();
        first.append(Entry::mined("Alice", 1));
        store.save(&first).unwrap();

        let mut second = Ledger::new();
        second.append(Entry::mined("Bob", 7));
        store.save(&second).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, second);
        assert_eq!(reloaded.balance("Alice"), 0);
        assert_eq!(reloaded.balance("Bob"), 7);
    }

    #[rstest]
    fn ledger_document_shape(ledger_json: serde_json::Value, store_dir: TempDir) {
        let path = store_dir.path().join("ledger.json");
        fs::write(&path, ledger_json.to_string()).unwrap();
        let store = JsonStore::new(&path);

        let ledger = store.load().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.balance("Alice"), 1);
        assert_eq!(ledger.balance("Bob"), 1);

        store.save(&ledger).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, ledger_json);
    }

    #[rstest]
    fn fingerprints_survive_the_store(store_dir: TempDir) {
        let store = JsonStore::new(store_dir.path().join("ledger.json"));

        let mut ledger = Ledger::new();
        ledger.append(Entry::mined("Alice", 2));
        ledger.append(Entry::transferred("Alice", "Bob", 1));
        store.save(&ledger).unwrap();

        let reloaded = store.load().unwrap();
        for entry in reloaded.entries() {
            assert!(entry.verify(), "fingerprint mismatch after reload: {}", entry.id());
        }
    }
}
