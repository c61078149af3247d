use super::{PinnedApp, RunningWindow};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Входящее сообщение: пуш от хоста или клик из слоя отрисовки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundEvent {
    DockData { apps: Vec<PinnedApp> },
    RunningWindows { windows: Vec<RunningWindow> },
    Click { index: usize },
}

impl InboundEvent {
    /// Разбор одной строки JSON-lines в сыром виде. Пустые строки
    /// пропускаются, не-UTF-8 байты дают ошибку JSON
    pub fn parse_line(line: &[u8]) -> Result<Option<Self>> {
        let line = line.trim_ascii();
        if line.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(line)?))
    }
}
