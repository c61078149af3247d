use super::matcher;
use crate::events::{PinnedApp, RunningWindow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Отображаемый статус иконки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockStatus {
    None,
    Running,
    Active,
}

impl DockStatus {
    /// Оптимистичный статус сразу после клика: фокус переключается,
    /// незапущенное приложение показывается как запущенное
    pub fn after_click(self) -> DockStatus {
        match self {
            DockStatus::Active => DockStatus::Running,
            DockStatus::Running => DockStatus::Active,
            DockStatus::None => DockStatus::Running,
        }
    }

    fn of_window(window: &RunningWindow) -> DockStatus {
        if window.focused {
            DockStatus::Active
        } else {
            DockStatus::Running
        }
    }
}

impl fmt::Display for DockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockStatus::None => write!(f, "none"),
            DockStatus::Running => write!(f, "running"),
            DockStatus::Active => write!(f, "active"),
        }
    }
}

/// Источник иконки: закреплённое приложение или чужое окно
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntrySource {
    App(PinnedApp),
    Window(RunningWindow),
}

/// Одна иконка панели. Пересобирается целиком при каждой сверке
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockEntry {
    #[serde(flatten)]
    pub source: EntrySource,
    pub status: DockStatus,
    pub pinned: bool,
    /// Окно, найденное для закреплённого приложения
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_handle: Option<u64>,
}

impl DockEntry {
    fn pinned(app: &PinnedApp, classification: Classification<'_>) -> Self {
        Self {
            source: EntrySource::App(app.clone()),
            status: classification.status,
            pinned: true,
            matched_handle: classification.window.map(|w| w.handle),
        }
    }

    fn unpinned(window: &RunningWindow) -> Self {
        Self {
            source: EntrySource::Window(window.clone()),
            status: DockStatus::of_window(window),
            pinned: false,
            matched_handle: None,
        }
    }
}

impl fmt::Display for DockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            EntrySource::App(app) => write!(f, "{} <{}>", app, self.status),
            EntrySource::Window(window) => write!(f, "{} <{}, unpinned>", window, self.status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub status: DockStatus,
    pub window: Option<&'a RunningWindow>,
}

/// Статус закреплённого приложения по первому подходящему окну
pub fn classify<'a>(app: &PinnedApp, windows: &'a [RunningWindow]) -> Classification<'a> {
    let window = matcher::first_match(app, windows);
    let status = window.map_or(DockStatus::None, DockStatus::of_window);
    Classification { status, window }
}

/// Полный порядок иконок: закреплённые в порядке закрепления,
/// затем незакреплённые окна в порядке хоста
pub fn build_entries(apps: &[PinnedApp], windows: &[RunningWindow]) -> Vec<DockEntry> {
    let pinned = apps
        .iter()
        .map(|app| DockEntry::pinned(app, classify(app, windows)));

    let unpinned = windows
        .iter()
        .filter(|window| !matcher::is_pinned(window, apps))
        .map(DockEntry::unpinned);

    pinned.chain(unpinned).collect()
}
