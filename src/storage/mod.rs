use log::debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::blockchain::Block;
use crate::error::Result;
use crate::transaction::Transaction;

/// Audit snapshot written next to the chain file. Never read back.
#[derive(Serialize)]
struct TransactionDump<'a> {
    pending: &'a [Transaction],
    confirmed: &'a [Transaction],
}

/// Flat-file persistence: the chain as a pretty-printed JSON array of blocks,
/// plus a write-only transaction dump.
#[derive(Debug, Clone)]
pub struct JsonStore {
    chain_path: PathBuf,
    dump_path: PathBuf,
}

impl JsonStore {
    pub fn new(chain_path: impl Into<PathBuf>, dump_path: impl Into<PathBuf>) -> Self {
        Self {
            chain_path: chain_path.into(),
            dump_path: dump_path.into(),
        }
    }

    pub fn chain_path(&self) -> &Path {
        &self.chain_path
    }

    /// Overwrite the chain file with the full block list.
    pub fn save(&self, blocks: &[Block]) -> Result<()> {
        write_pretty(&self.chain_path, blocks)?;
        debug!(
            "saved {} blocks to {}",
            blocks.len(),
            self.chain_path.display()
        );
        Ok(())
    }

    /// Read the chain file in order. A missing file is an empty chain; any
    /// other failure (unreadable, malformed, unknown fields) is an error.
    pub fn load(&self) -> Result<Vec<Block>> {
        let bytes = match fs::read(&self.chain_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let blocks: Vec<Block> = serde_json::from_slice(&bytes)?;
        debug!(
            "loaded {} blocks from {}",
            blocks.len(),
            self.chain_path.display()
        );
        Ok(blocks)
    }

    pub fn dump_transaction_logs(
        &self,
        pending: &[Transaction],
        confirmed: &[Transaction],
    ) -> Result<()> {
        write_pretty(&self.dump_path, &TransactionDump { pending, confirmed })
    }
}

/// Serialize with 4-space indentation, then swap the file in with a rename so
/// a crash mid-write never leaves a truncated chain behind.
fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, &buf)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::JsonStore;
    use crate::blockchain::{Block, Blockchain, pow};
    use crate::error::LedgerError;
    use crate::transaction::Transaction;
    use serde_json::{Number, Value};
    use std::fs;

    fn store(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(
            dir.path().join("blockchain.json"),
            dir.path().join("transaction_dump.json"),
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_reproduces_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let mut bc = Blockchain::new();
        for txs in [
            vec![Transaction::new("A", "B", 10.into())],
            vec![],
            vec![
                Transaction::new("é", "B", Number::from_f64(0.25).unwrap()),
                Transaction::new("A", "B", 10.into()),
            ],
        ] {
            let proof = pow::solve(bc.last_block().unwrap().proof);
            bc.seal_block(proof, None, txs).unwrap();
        }

        store.save(bc.blocks()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, bc.blocks());

        let reloaded = Blockchain::from_blocks(loaded).unwrap();
        assert!(reloaded.is_valid_chain());
        assert_eq!(
            reloaded.last_block().unwrap().hash(),
            bc.last_block().unwrap().hash()
        );
    }

    #[test]
    fn save_overwrites_with_indented_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.save(&[Block::genesis(), Block::genesis()]).unwrap();
        store.save(&[Block::genesis()]).unwrap();

        let text = fs::read_to_string(store.chain_path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"index\": 1,"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        fs::write(store.chain_path(), "[{\"index\": 1}]").unwrap();
        assert!(matches!(store.load(), Err(LedgerError::Json(_))));
    }

    #[test]
    fn unknown_block_field_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        fs::write(
            store.chain_path(),
            r#"[{"index":1,"timestamp":1.0,"transactions":[],"proof":100,"previous_hash":"1","nonce":0}]"#,
        )
        .unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn dump_holds_pending_and_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let pending = vec![Transaction::new("A", "B", 1.into())];
        let confirmed = vec![
            Transaction::new("C", "D", 2.into()),
            Transaction::new("E", "F", 3.into()),
        ];
        store.dump_transaction_logs(&pending, &confirmed).unwrap();

        let text = fs::read_to_string(dir.path().join("transaction_dump.json")).unwrap();
        let dump: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(dump["pending"].as_array().unwrap().len(), 1);
        assert_eq!(dump["confirmed"][1]["sender"], "E");
    }
}
