use std::{net::SocketAddr, sync::Arc};

use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use devcamper_api::{
    application::{
        http::server::http_server::{router, state},
        logger::init_logger,
    },
    args::Args,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port).parse()?;
    let tls = match (&args.server.tls_cert, &args.server.tls_key) {
        (Some(cert), Some(key)) => {
            let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
            Some(RustlsConfig::from_pem_file(cert, key).await?)
        }
        _ => None,
    };

    let state = state(args.clone()).await?;
    let router = router(state)?;

    info!("devcamper api listening on {}", addr);
    match tls {
        Some(config) => {
            axum_server::bind_rustls(addr, config)
                .serve(router.into_make_service())
                .await?
        }
        None => {
            axum_server::bind(addr)
                .serve(router.into_make_service())
                .await?
        }
    }

    Ok(())
}
