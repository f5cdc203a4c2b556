//! Paramètres du serveur statique, lus une fois au démarrage.

use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result, bail};

pub const DEFAULT_BIND: &str = "0.0.0.0:8444";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key:  PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub dist_dir:  PathBuf,
    /// `None` : HTTP simple.
    pub tls:       Option<TlsFiles>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind_addr = bind
            .parse()
            .with_context(|| format!("BIND_ADDR invalide : {bind}"))?;

        // dossier généré par `trunk build`
        let dist_dir = get("DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../frontend/dist"));

        let tls = match (get("TLS_CERT"), get("TLS_KEY")) {
            (Some(cert), Some(key)) => Some(TlsFiles { cert: cert.into(), key: key.into() }),
            (None, None) => None,
            _ => bail!("TLS_CERT et TLS_KEY vont ensemble"),
        };

        Ok(Self { bind_addr, dist_dir, tls })
    }
}
