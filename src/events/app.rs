use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Закреплённое приложение. Идентичность - строка запуска `exec`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinnedApp {
    pub name: String,
    #[serde(default, alias = "icon_path")]
    pub icon: String,
    #[serde(alias = "command")]
    pub exec: String,
}

impl PinnedApp {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            exec: exec.into(),
        }
    }

    #[cfg(test)]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

impl fmt::Display for PinnedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.exec)
    }
}

/// Читает dock.json: массив `{name, icon, exec}`
pub fn load_pinned_apps<P: AsRef<Path>>(path: P) -> Result<Vec<PinnedApp>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let apps: Vec<PinnedApp> = serde_json::from_str(&raw)?;
    Ok(apps)
}
