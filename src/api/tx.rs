use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{MISSING_VALUES, NewTxRequest, NewTxResponse, TransactionsResponse};
use crate::ledger::LedgerService;

/// Queue a transaction for the next block.
#[post("/transactions/new")]
pub async fn post_transaction(
    ledger: web::Data<LedgerService>,
    body: web::Json<NewTxRequest>,
) -> actix_web::Result<HttpResponse> {
    let NewTxRequest {
        sender: Some(sender),
        recipient: Some(recipient),
        amount: Some(amount),
    } = body.into_inner()
    else {
        return Ok(HttpResponse::BadRequest().body(MISSING_VALUES));
    };

    debug!("POST /transactions/new - {sender} -> {recipient} ({amount})");
    let index = web::block(move || ledger.submit_transaction(sender, recipient, amount)).await??;

    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
    }))
}

/// Pending pool plus every confirmed transaction.
#[get("/transactions")]
pub async fn get_transactions(ledger: web::Data<LedgerService>) -> impl Responder {
    let logs = ledger.get_transaction_logs();
    HttpResponse::Ok().json(TransactionsResponse {
        pending_transactions: logs.pending,
        confirmed_transactions: logs.confirmed,
    })
}
