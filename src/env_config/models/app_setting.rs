use super::{app_config::AppConfig, app_env::AppEnv};
use crate::env_config::error::ConfigError;
use std::path::Path;

#[derive(Debug)]
pub struct AppSettings {
    pub app_config: AppConfig,
    pub app_env: AppEnv,
}

impl AppSettings {
    /// Environment variables first, then `config/<env>.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = AppEnv::new()?;
        let app_config = AppConfig::new(&app_env.env)?;
        Ok(Self { app_config, app_env })
    }

    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let app_env = AppEnv::new()?;
        let app_config = AppConfig::from_dir(config_dir, &app_env.env)?;
        Ok(Self { app_config, app_env })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_shipped_config_dir() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        let settings = AppSettings::load_from(&dir).unwrap();
        assert!(settings.app_config.upstream.timeout_ms > 0);
    }

    #[test]
    fn test_missing_config_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppSettings::load_from(dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        let message = err.to_string();
        assert!(message.starts_with("failed to read config file "));
        assert!(message.contains(&dir.path().display().to_string()));
    }
}
