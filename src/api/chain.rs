use actix_web::{HttpRequest, HttpResponse, Responder, get, route, web};
use log::{debug, info};

use super::models::{ChainResponse, MISSING_VALUES, MineRequest, MineResponse, ValidateResponse};
use crate::ledger::LedgerService;

/// Get the full blockchain.
#[get("/chain")]
pub async fn get_chain(ledger: web::Data<LedgerService>) -> impl Responder {
    let chain = ledger.get_chain();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Re-check linkage and proofs of the whole chain.
#[get("/chain/valid")]
pub async fn validate_chain(ledger: web::Data<LedgerService>) -> impl Responder {
    let status = ledger.chain_status();
    HttpResponse::Ok().json(ValidateResponse {
        valid: status.valid,
        length: status.length,
    })
}

/// Mine a new block from the pending pool, rewarding `name`.
/// GET is kept for older clients that sent the body with a GET.
#[route("/mine", method = "POST", method = "GET")]
pub async fn mine_block(
    http: HttpRequest,
    ledger: web::Data<LedgerService>,
    req: web::Json<MineRequest>,
) -> actix_web::Result<HttpResponse> {
    let Some(name) = req.into_inner().name else {
        return Ok(HttpResponse::BadRequest().body(MISSING_VALUES));
    };

    let method = http.method().clone();
    debug!("{method} /mine - requested by {name:?}");
    // PoW is CPU-bound; keep it off the async workers.
    let block = web::block(move || ledger.mine(&name)).await??;
    info!("{method} /mine - forged block {}", block.index);

    Ok(HttpResponse::Ok().json(MineResponse::from(block)))
}
