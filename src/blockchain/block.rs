use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, hash};
use crate::transaction::Transaction;

/// A sealed block. Field order here is the order written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), sub-second precision
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            GENESIS_PROOF,
            GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 of this block's canonical form.
    pub fn hash(&self) -> String {
        hash::digest(self)
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_uses_fixed_constants() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, 100);
        assert_eq!(b.previous_hash, "1");
        assert!(b.transactions.is_empty());
        assert!(b.timestamp > 0.0);
    }

    #[test]
    fn hash_changes_when_tampered() {
        let mut b = Block::new(2, vec![Transaction::new("A", "B", 1.into())], 7, "prev".into());
        let old = b.hash();
        b.transactions.push(Transaction::new("x", "y", 1.into()));
        assert_ne!(old, b.hash());
    }

    #[test]
    fn serializes_fields_in_file_order() {
        let b = Block {
            index: 1,
            timestamp: 2.25,
            transactions: vec![],
            proof: 100,
            previous_hash: "1".into(),
        };
        assert_eq!(
            serde_json::to_string(&b).unwrap(),
            r#"{"index":1,"timestamp":2.25,"transactions":[],"proof":100,"previous_hash":"1"}"#
        );
    }
}
