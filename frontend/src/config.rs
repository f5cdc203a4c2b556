//! Configuration figée à la compilation (`trunk build` lit l'environnement).

/* URL de base de l'API */
const DEFAULT_API_BASE: &str = "https://play.godmoon.fr:27205/api";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base:  String,
    pub log_level: log::Level,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("SUNLIGHT_API_BASE"), option_env!("SUNLIGHT_LOG"))
    }

    fn from_values(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base = api_base
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let default_level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
        let log_level = log_level
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_level);

        Self { api_base, log_level }
    }

    /// URL publique d'une photo de profil.
    pub fn profile_picture_url(&self, file: &str) -> String {
        format!("{}/profile-picture/{file}", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        let cfg = AppConfig::from_values(None, Some("bavard"));
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert!(cfg.log_level == log::Level::Debug || cfg.log_level == log::Level::Info);
    }

    #[test]
    fn trims_trailing_slash_and_reads_level() {
        let cfg = AppConfig::from_values(Some("http://127.0.0.1:3000/api/"), Some("warn"));
        assert_eq!(cfg.api_base, "http://127.0.0.1:3000/api");
        assert_eq!(cfg.log_level, log::Level::Warn);
        assert_eq!(
            cfg.profile_picture_url("42.png"),
            "http://127.0.0.1:3000/api/profile-picture/42.png"
        );
    }
}
