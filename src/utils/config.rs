use std::env;
use std::path::PathBuf;

const DEFAULT_SESSION_DIR: &str = ".ubermelon";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Tracing filter directive, read before `Config` so config loading is logged.
pub fn log_directive_from_env(verbose: bool) -> String {
    dotenv::dotenv().ok();
    select_log_directive(
        verbose,
        env::var("RUST_LOG").ok().as_deref(),
        env::var("LOG_LEVEL").ok().as_deref(),
    )
}

/// `--verbose` wins, then `RUST_LOG`, then `LOG_LEVEL`, then `info`.
pub fn select_log_directive(verbose: bool, rust_log: Option<&str>, log_level: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .or(log_level)
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_string()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub session_dir: PathBuf,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            catalog_path: env::var("UBERMELON_CATALOG")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            session_dir: env::var("UBERMELON_SESSION_DIR")
                .unwrap_or(DEFAULT_SESSION_DIR.to_string())
                .into(),
            log_level: env::var("LOG_LEVEL").unwrap_or(DEFAULT_LOG_LEVEL.to_string()),
            environment: env::var("APP_ENV").unwrap_or("development".to_string()),
        };

        tracing::debug!("Config: loaded for {} environment", config.environment);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.session_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UBERMELON_SESSION_DIR is empty"));
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(anyhow::anyhow!(
                    "UBERMELON_CATALOG points at a missing file: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            environment: "development".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn test_log_directive_precedence() {
        assert_eq!(select_log_directive(true, Some("warn"), Some("error")), "debug");
        assert_eq!(select_log_directive(false, Some("warn"), Some("error")), "warn");
        assert_eq!(select_log_directive(false, None, Some("error")), "error");
        assert_eq!(select_log_directive(false, None, None), "info");
        assert_eq!(select_log_directive(false, Some("  "), None), "info");
    }

    #[test]
    fn test_missing_catalog_file_rejected() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/definitely/not/here/melons.txt")),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_session_dir_rejected() {
        let config = Config {
            session_dir: PathBuf::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
