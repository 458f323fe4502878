mod chain;
pub mod models;
mod tx;

use actix_web::web::ServiceConfig;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(chain::get_chain)
        .service(chain::validate_chain)
        .service(chain::mine_block)
        .service(tx::post_transaction)
        .service(tx::get_transactions);
}
