use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A value transfer between two identifiers.
///
/// No identity beyond its fields; duplicates are allowed. `amount` keeps the
/// JSON numeric form it was submitted with so integer amounts stay integers
/// in both the persisted file and the hash preimage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: Number) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}
