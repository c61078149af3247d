use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub dock: DockConfig,
    pub bridge: BridgeConfig,
    pub dry_run: DryRunConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DockConfig {
    /// Сколько держится блокировка после клика по иконке
    pub debounce_ms: u64,
    /// dock.json с закреплёнными приложениями (используется в dry-run)
    #[serde(default)]
    pub pinned_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    pub mode: String,
    /// Запросить список закреплённых приложений у хоста при старте
    pub request_on_start: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DryRunConfig {
    pub push_interval_ms: u64,
    /// Эмулировать клик каждые N пушей (0 - никогда)
    pub click_every: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            dock: DockConfig {
                debounce_ms: 450,
                pinned_file: None,
            },
            bridge: BridgeConfig {
                mode: "stdio".to_string(),
                request_on_start: true,
            },
            dry_run: DryRunConfig {
                push_interval_ms: 2000,
                click_every: 3,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("OPENDOCK_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        if self.dock.debounce_ms == 0 {
            anyhow::bail!("debounce_ms должно быть больше 0");
        }

        match self.bridge.mode.as_str() {
            "stdio" | "dry_run" => {}
            _ => anyhow::bail!("Неверный режим моста: {}", self.bridge.mode),
        }

        if self.dry_run.push_interval_ms < 100 {
            anyhow::bail!("push_interval_ms должно быть минимум 100");
        }

        Ok(())
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.dock.debounce_ms)
    }
}
