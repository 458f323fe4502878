mod api;
mod blockchain;
mod config;
mod error;
mod ledger;
mod lifecycle;
mod storage;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};
use std::io;
use std::sync::Arc;

use config::Config;
use ledger::LedgerService;
use storage::JsonStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();

    let store = JsonStore::new(&cfg.chain_file, &cfg.dump_file);
    let ledger = LedgerService::open(store).map_err(|e| {
        error!("cannot load {}: {e}", cfg.chain_file.display());
        io::Error::other(e)
    })?;
    let ledger = Arc::new(ledger);

    info!("⛓️ Starting ledger API at http://{}:{}", cfg.host, cfg.port);

    let data = web::Data::from(ledger.clone());
    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(api::init_routes))
        .disable_signals()
        .shutdown_timeout(cfg.shutdown_timeout.as_secs())
        .bind((cfg.host.as_str(), cfg.port))?
        .run();

    let saver = actix_web::rt::spawn(lifecycle::save_periodically(
        ledger.clone(),
        cfg.save_interval,
        ledger.shutdown_token(),
    ));

    let handle = server.handle();
    let timeout = cfg.shutdown_timeout;
    actix_web::rt::spawn(async move {
        lifecycle::wait_for_signal().await;
        lifecycle::shutdown(ledger, saver, timeout, handle).await;
    });

    server.await
}
