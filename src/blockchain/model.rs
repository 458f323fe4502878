use log::warn;

use super::{Block, GENESIS_PREVIOUS_HASH, pow};
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// Append-only, never-empty sequence of sealed blocks.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
        }
    }

    /// Rebuild from persisted blocks. An empty list yields a fresh genesis
    /// chain; indices that don't run 1..=n are rejected.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Ok(Self::new());
        }
        for (pos, block) in blocks.iter().enumerate() {
            let expected = pos as u64 + 1;
            if block.index != expected {
                return Err(LedgerError::CorruptChain(format!(
                    "block at position {pos} has index {}, expected {expected}",
                    block.index
                )));
            }
        }
        let bc = Self { chain: blocks };
        if !bc.is_valid_chain() {
            warn!("loaded chain fails linkage/proof checks; keeping it as-is");
        }
        Ok(bc)
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Append a block holding `transactions`. `previous_hash` defaults to the
    /// hash of the current last block.
    pub fn seal_block(
        &mut self,
        proof: u64,
        previous_hash: Option<String>,
        transactions: Vec<Transaction>,
    ) -> Result<Block> {
        let previous_hash = match previous_hash {
            Some(h) => h,
            None => self.last_block()?.hash(),
        };
        let block = Block::new(self.chain.len() as u64 + 1, transactions, proof, previous_hash);
        self.chain.push(block.clone());
        Ok(block)
    }

    /// Every confirmed transaction, in block order then in-block order.
    pub fn all_confirmed_transactions(&self) -> Vec<Transaction> {
        self.chain
            .iter()
            .flat_map(|b| b.transactions.iter().cloned())
            .collect()
    }

    /// Check indices, hash linkage and proofs of the whole chain.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if genesis.index != 1 || genesis.previous_hash != GENESIS_PREVIOUS_HASH {
            return false;
        }

        self.chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            current.index == prev.index + 1
                && current.previous_hash == prev.hash()
                && pow::verify(prev.proof, current.proof)
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
