//! Сопоставление окна с закреплённым приложением.
//!
//! Эвристика нарочно нестрогая: строка запуска и класс окна совпадают, если
//! одна содержит другую без учёта регистра. Так обёртка-скрипт `firefox-esr`
//! находит окно класса `Firefox`, а `code` находит `code-oss`.

use crate::events::{PinnedApp, RunningWindow};

/// Совпадает ли окно с приложением. Пустые строки не совпадают ни с чем
pub fn matches(app: &PinnedApp, window: &RunningWindow) -> bool {
    if app.exec.is_empty() || window.class.is_empty() {
        return false;
    }

    let exec = app.exec.to_lowercase();
    let class = window.class.to_lowercase();
    exec.contains(&class) || class.contains(&exec)
}

/// Первое подходящее окно в порядке, заданном хостом
pub fn first_match<'a>(app: &PinnedApp, windows: &'a [RunningWindow]) -> Option<&'a RunningWindow> {
    windows.iter().find(|window| matches(app, window))
}

/// Принадлежит ли окно хотя бы одному закреплённому приложению
pub fn is_pinned(window: &RunningWindow, apps: &[PinnedApp]) -> bool {
    apps.iter().any(|app| matches(app, window))
}
