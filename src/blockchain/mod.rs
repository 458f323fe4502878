pub mod block;
pub mod hash;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::Blockchain;

/// Required prefix of the proof-of-work digest (fixed difficulty).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Genesis block proof.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` sentinel of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender of the mining reward transaction.
pub const REWARD_SENDER: &str = "fbank_blockchain";

/// Recipient used when the miner gives a blank name.
pub const DEFAULT_REWARD_RECIPIENT: &str = "your_address";

/// Mining reward amount.
pub const REWARD_AMOUNT: u64 = 1;
