//! Fichiers de `dist/` + repli sur `index.html` pour les routes du client.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, dist_dir: &Path) {
    let index: PathBuf = dist_dir.join("index.html");

    cfg.service(
        Files::new("/", dist_dir)
            .index_file("index.html")
            // /profile/42, /dashboard… n'existent pas sur disque : le routeur du client s'en charge
            .default_handler(fn_service(move |req: ServiceRequest| {
                let index = index.clone();
                async move {
                    let (req, _) = req.into_parts();
                    let file = NamedFile::open_async(index).await?;
                    let res = file.into_response(&req);
                    Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
                }
            })),
    );
}
