mod config;
mod spa;
mod tls;

use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;

use crate::config::Config;

/* ---------- logs : RUST_LOG prioritaire --------------------------------- */
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=info"))
        .init();
}

/* ---------- main -------------------------------------------------------- */
#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let cfg = Config::from_env()?;
    info!("fichiers servis depuis {}", cfg.dist_dir.display());

    let dist_dir = cfg.dist_dir.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|c| spa::configure(c, &dist_dir))
    });

    let server = match &cfg.tls {
        Some(files) => {
            info!("HTTPS sur {}", cfg.bind_addr);
            server.bind_rustls_0_23(cfg.bind_addr, tls::rustls_config(files)?)
        }
        None => {
            info!("HTTP sur {}", cfg.bind_addr);
            server.bind(cfg.bind_addr)
        }
    }
    .with_context(|| format!("impossible d'écouter sur {}", cfg.bind_addr))?;

    server.run().await.context("arrêt du serveur")
}
