#[macro_use]
extern crate log;
#[macro_use]
extern crate phf;

use std::error::Error;

use tonic::transport::Server;
use tonic::{Request, Status};
use tonic_reflection::server::Builder;

use crate::cache::{NoCache, TtlCache};
use crate::config::Config;
use crate::interceptor::logger::LoggerLayer;
use crate::repository::Repository;
use crate::shelf::{SharedShelf, Shelf};
use crate::store::sheets::GoogleSheets;

mod cache;
mod config;
mod data;
mod error;
mod interceptor;
mod repository;
mod service;
mod shelf;
mod store;
mod util;

#[cfg(test)]
mod test;

pub mod proto {
    tonic::include_proto!("mangashelf");

    pub(crate) const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("descriptor");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    // Get env vars
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let store = GoogleSheets::new(
        &config.sheets_base_url,
        &config.spreadsheet_id,
        config.credentials.clone(),
    )?;
    let repository = if config.cache_ttl.is_zero() {
        Repository::new(store, NoCache, &config.worksheet)
    } else {
        Repository::new(store, TtlCache::new(config.cache_ttl), &config.worksheet)
    };
    let shelf = Shelf::new(repository).shared();

    info!(
        "Running server on {} for worksheet '{}' (cache ttl {:?})",
        config.addr, config.worksheet, config.cache_ttl
    );

    Server::builder()
        .layer(LoggerLayer)
        .layer(tonic::service::interceptor(move |req| intercept(req, shelf.clone())))
        .add_service(service::collection::server())
        .add_service(
            Builder::configure()
                .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
                .build_v1()?,
        )
        .serve(config.addr)
        .await?;

    Ok(())
}

fn intercept(mut req: Request<()>, shelf: SharedShelf) -> Result<Request<()>, Status> {
    req.extensions_mut().insert(shelf);

    Ok(req)
}
