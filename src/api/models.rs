use actix_web::ResponseError;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::blockchain::Block;
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// Body of every 400 caused by an absent request field.
pub const MISSING_VALUES: &str = "Missing values";

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/// Fields are optional so an absent one can be answered with
/// [`MISSING_VALUES`] instead of an extractor error.
#[derive(Deserialize)]
pub struct MineRequest {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged",
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct TransactionsResponse {
    pub pending_transactions: Vec<Transaction>,
    pub confirmed_transactions: Vec<Transaction>,
}

/* ---------- Errors ---------- */

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::MiningCancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
