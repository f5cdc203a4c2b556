use std::fs;

use anyhow::{Context, Result};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::ServerConfig;
use rustls_pemfile::{certs, pkcs8_private_keys};

use crate::config::TlsFiles;

pub fn rustls_config(files: &TlsFiles) -> Result<ServerConfig> {
    // ── PEM → DER ───────────────────────────────────────────────────────────
    let cert_pem = fs::read(&files.cert)
        .with_context(|| format!("lecture de {}", files.cert.display()))?;
    let key_pem = fs::read(&files.key)
        .with_context(|| format!("lecture de {}", files.key.display()))?;

    let chain: Vec<CertificateDer<'static>> = certs(&mut &*cert_pem)
        .collect::<Result<_, _>>()
        .context("certificat illisible")?;
    let key = pkcs8_private_keys(&mut &*key_pem)
        .next()
        .context("aucune clé PKCS#8")?
        .context("clé PKCS#8 illisible")?;

    // ── config rustls, aucun client-auth ───────────────────────────────────
    ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(chain, PrivateKeyDer::Pkcs8(key))
        .context("configuration TLS")
}
