use super::r#trait::HostBridgeTrait;
use super::wait_for_release;
use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{load_pinned_apps, HostCommand, PinnedApp, RunningWindow};
use crate::services::dock::{ClickOutcome, DockEngine, DockEntry, DockOutput, DockStatus, SystemClock};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

/// Вывод в лог вместо настоящей отрисовки и настоящего хоста
struct LogOutput;

impl DockOutput for LogOutput {
    fn render(&mut self, entries: &[DockEntry]) {
        info!("[DRY RUN] Отрисовка панели: {} иконок", entries.len());
        for (index, entry) in entries.iter().enumerate() {
            info!("[DRY RUN]   #{} {}", index, entry);
        }
    }

    fn set_status(&mut self, index: usize, status: DockStatus) {
        info!("[DRY RUN] Иконка #{} -> {}", index, status);
    }

    fn send(&mut self, command: HostCommand) {
        info!("[DRY RUN] Команда хосту: {}", command);
    }
}

pub struct DryRunBridge {
    config: Arc<Config>,
    engine: DockEngine<SystemClock>,
}

impl DryRunBridge {
    pub fn new(config: Arc<Config>) -> Self {
        let engine = DockEngine::new(SystemClock, config.debounce_interval());
        Self { config, engine }
    }

    fn pinned_apps(&self) -> Vec<PinnedApp> {
        match &self.config.dock.pinned_file {
            Some(path) => load_pinned_apps(path).unwrap_or_else(|e| {
                warn!("Не удалось прочитать {:?}: {}, используем встроенный список", path, e);
                default_apps()
            }),
            None => default_apps(),
        }
    }

    async fn run_impl(mut self) -> Result<()> {
        info!("Dry-run режим - мост с хостом работает в режиме эмуляции");

        let mut out = LogOutput;
        if self.config.bridge.request_on_start {
            self.engine.request_dock_apps(&mut out);
        }
        let apps = self.pinned_apps();
        self.engine.on_pinned_apps(apps, &mut out);

        let scenes = fake_scenes();
        let click_every = self.config.dry_run.click_every;
        let mut pushes: u32 = 0;
        let mut interval = interval(Duration::from_millis(self.config.dry_run.push_interval_ms));

        loop {
            let deadline = self.engine.lock_deadline();

            tokio::select! {
                _ = interval.tick() => {
                    let windows = &scenes[pushes as usize % scenes.len()];
                    let outcome = self.engine.on_push(windows, &mut out);
                    debug_if_enabled!("Dry-run: пуш #{} -> {:?}", pushes, outcome);
                    pushes = pushes.wrapping_add(1);

                    if click_every > 0 && pushes % click_every == 0 && !self.engine.entries().is_empty() {
                        let index = pushes as usize % self.engine.entries().len();
                        info!("Dry-run: эмулируем клик по иконке #{}", index);
                        if let ClickOutcome::Dispatched { command, status, release_at: Some(at) } =
                            self.engine.on_click(index, &mut out)
                        {
                            let left = at.saturating_duration_since(std::time::Instant::now());
                            debug_if_enabled!("Dry-run: {} ({}), блокировка ещё {}мс", command, status, left.as_millis());
                        }
                    }
                }
                _ = wait_for_release(deadline) => {
                    self.engine.expire_lock();
                }
            }
        }
    }
}

fn default_apps() -> Vec<PinnedApp> {
    vec![
        PinnedApp::new("Firefox", "firefox"),
        PinnedApp::new("Terminal", "xterm"),
        PinnedApp::new("Files", "nautilus"),
    ]
}

/// Поочерёдные состояния оконного менеджера; последнее повторяет
/// предыдущее, чтобы было видно пропуск пересборки
fn fake_scenes() -> Vec<Vec<RunningWindow>> {
    let firefox = RunningWindow::new(0x1a00003, "Firefox").with_name("Mozilla Firefox");
    let xterm = RunningWindow::new(0x2200008, "XTerm").with_name("xterm - dry_run");
    let gimp = RunningWindow::new(0x3c00011, "Gimp").with_name("GNU Image Manipulation Program");

    vec![
        vec![firefox.clone().focused(true), xterm.clone()],
        vec![firefox.clone(), xterm.clone().focused(true)],
        vec![firefox.clone(), xterm.clone(), gimp.clone().focused(true)],
        vec![firefox, xterm, gimp.focused(true)],
    ]
}

#[async_trait::async_trait]
impl HostBridgeTrait for DryRunBridge {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_scenes_cover_unpinned_and_repeat() {
        let scenes = fake_scenes();
        let apps = default_apps();

        assert!(scenes[2].iter().any(|w| !apps.iter().any(|a| a.exec.eq_ignore_ascii_case(&w.class))));
        assert_eq!(scenes[2], scenes[3]);
    }

    #[test]
    fn test_missing_pinned_file_falls_back() {
        let mut config = Config::default();
        config.dock.pinned_file = Some("/nonexistent/dock.json".into());

        let bridge = DryRunBridge::new(Arc::new(config));
        assert_eq!(bridge.pinned_apps(), default_apps());
    }
}
