use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Number;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::blockchain::{
    Block, Blockchain, DEFAULT_REWARD_RECIPIENT, REWARD_AMOUNT, REWARD_SENDER, pow,
};
use crate::error::{LedgerError, Result};
use crate::storage::JsonStore;
use crate::transaction::{Transaction, TransactionPool};

struct LedgerState {
    chain: Blockchain,
    pool: TransactionPool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionLogs {
    pub pending: Vec<Transaction>,
    pub confirmed: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStatus {
    pub valid: bool,
    pub length: usize,
}

/// Owns the chain and the pending pool and serializes every write to them.
///
/// Lock order is `mining` -> `store` -> `state`; `state` is never held while
/// waiting on another lock or while searching for a proof.
pub struct LedgerService {
    state: Mutex<LedgerState>,
    /// Single slot: at most one `mine()` in flight.
    mining: Mutex<()>,
    store: Mutex<JsonStore>,
    shutdown: CancellationToken,
}

impl LedgerService {
    /// Load the persisted chain, or start from genesis if there is none.
    /// Load failures propagate.
    pub fn open(store: JsonStore) -> Result<Self> {
        let chain = Blockchain::from_blocks(store.load()?)?;
        info!(
            "ledger opened from {} with {} blocks",
            store.chain_path().display(),
            chain.len()
        );
        Ok(Self {
            state: Mutex::new(LedgerState {
                chain,
                pool: TransactionPool::new(),
            }),
            mining: Mutex::new(()),
            store: Mutex::new(store),
            shutdown: CancellationToken::new(),
        })
    }

    /// Queue a transaction; returns the index of the block it should land in.
    pub fn submit_transaction(
        &self,
        sender: String,
        recipient: String,
        amount: Number,
    ) -> Result<u64> {
        let next_index = {
            let mut st = self.state.lock().expect("mutex poisoned");
            st.pool.add(Transaction::new(sender, recipient, amount));
            debug!("transaction queued (pending: {})", st.pool.len());
            st.chain.last_block()?.index + 1
        };
        self.persist();
        Ok(next_index)
    }

    /// Solve the next proof, add the reward for `recipient`, seal every
    /// pending transaction into a new block and persist.
    ///
    /// The chain lock is released during the proof search so reads stay
    /// responsive; the mining slot keeps other miners out meanwhile.
    pub fn mine(&self, recipient: &str) -> Result<Block> {
        let _slot = self.mining.lock().expect("mutex poisoned");

        let last = {
            let st = self.state.lock().expect("mutex poisoned");
            st.chain.last_block()?.clone()
        };

        let proof = pow::solve_cancellable(last.proof, &self.shutdown)
            .ok_or(LedgerError::MiningCancelled)?;

        // Linked to the block the proof was solved against, before the
        // reward joins the pool.
        let previous_hash = last.hash();

        let recipient = match recipient.trim() {
            "" => DEFAULT_REWARD_RECIPIENT,
            name => name,
        };

        let block = {
            let mut st = self.state.lock().expect("mutex poisoned");
            st.pool.add(Transaction::new(
                REWARD_SENDER,
                recipient,
                REWARD_AMOUNT.into(),
            ));
            let transactions = st.pool.drain();
            st.chain.seal_block(proof, Some(previous_hash), transactions)?
        };

        info!(
            "block {} sealed: proof={} txs={}",
            block.index,
            block.proof,
            block.transactions.len()
        );
        self.persist();
        Ok(block)
    }

    pub fn get_chain(&self) -> Vec<Block> {
        let st = self.state.lock().expect("mutex poisoned");
        st.chain.blocks().to_vec()
    }

    pub fn get_transaction_logs(&self) -> TransactionLogs {
        let st = self.state.lock().expect("mutex poisoned");
        TransactionLogs {
            pending: st.pool.peek_all(),
            confirmed: st.chain.all_confirmed_transactions(),
        }
    }

    /// Validity and length read from the same snapshot.
    pub fn chain_status(&self) -> ChainStatus {
        let st = self.state.lock().expect("mutex poisoned");
        ChainStatus {
            valid: st.chain.is_valid_chain(),
            length: st.chain.len(),
        }
    }

    /// Write the chain file and the transaction dump from one snapshot.
    pub fn flush(&self) -> Result<()> {
        let store = self.store.lock().expect("mutex poisoned");
        let (blocks, logs) = {
            let st = self.state.lock().expect("mutex poisoned");
            (
                st.chain.blocks().to_vec(),
                TransactionLogs {
                    pending: st.pool.peek_all(),
                    confirmed: st.chain.all_confirmed_transactions(),
                },
            )
        };
        store.save(&blocks)?;
        store.dump_transaction_logs(&logs.pending, &logs.confirmed)?;
        debug!("flushed {} blocks", blocks.len());
        Ok(())
    }

    /// Token cancelled at shutdown; also aborts an in-flight proof search.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Save after a write. Failures are logged; memory stays authoritative
    /// and the next save retries.
    fn persist(&self) {
        let store = self.store.lock().expect("mutex poisoned");
        let blocks = {
            let st = self.state.lock().expect("mutex poisoned");
            st.chain.blocks().to_vec()
        };
        if let Err(e) = store.save(&blocks) {
            warn!("saving chain failed: {e}");
        }
    }
}
