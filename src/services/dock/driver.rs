use super::classifier::{build_entries, DockEntry, DockStatus, EntrySource};
use super::clock::Clock;
use super::debounce::DebounceLock;
use super::fingerprint::{fingerprint, FingerprintGate};
use crate::events::{HostCommand, InboundEvent, PinnedApp, RunningWindow};
use crate::{debug_if_enabled, trace_if_enabled};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Куда движок отдаёт результат: отрисовка и команды хосту
pub trait DockOutput {
    /// Полная замена списка иконок
    fn render(&mut self, entries: &[DockEntry]);
    /// Оптимистичная смена статуса одной иконки
    fn set_status(&mut self, index: usize, status: DockStatus);
    /// Команда хосту, без ожидания ответа
    fn send(&mut self, command: HostCommand);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Locked,
    Unchanged,
    Rendered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Dispatched {
        command: HostCommand,
        status: DockStatus,
        /// Момент снятия блокировки, если её взвёл этот клик
        release_at: Option<Instant>,
    },
}

/// Сверка закреплённых приложений с окнами хоста.
///
/// Состояние (закреплённые приложения, последний снимок, блокировка)
/// принадлежит движку; все вызовы идут из одного цикла событий.
pub struct DockEngine<C: Clock> {
    clock: C,
    pinned: Vec<PinnedApp>,
    gate: FingerprintGate,
    lock: DebounceLock,
    entries: Vec<DockEntry>,
}

impl<C: Clock> DockEngine<C> {
    pub fn new(clock: C, debounce: Duration) -> Self {
        Self {
            clock,
            pinned: Vec::new(),
            gate: FingerprintGate::default(),
            lock: DebounceLock::new(debounce),
            entries: Vec::new(),
        }
    }

    pub fn handle(&mut self, event: InboundEvent, out: &mut impl DockOutput) {
        match event {
            InboundEvent::DockData { apps } => {
                self.on_pinned_apps(apps, out);
            }
            InboundEvent::RunningWindows { windows } => {
                self.on_push(&windows, out);
            }
            InboundEvent::Click { index } => {
                self.on_click(index, out);
            }
        }
    }

    pub fn request_dock_apps(&self, out: &mut impl DockOutput) {
        out.send(HostCommand::GetDockApps);
    }

    /// Замена списка закреплённых приложений. Снимок сбрасывается, а затем
    /// выполняется пуш с пустым списком окон: иконки появляются сразу,
    /// статусы подтянутся со следующим пушем хоста
    pub fn on_pinned_apps(&mut self, apps: Vec<PinnedApp>, out: &mut impl DockOutput) -> PushOutcome {
        info!("Получено {} закреплённых приложений", apps.len());
        self.pinned = apps;
        self.gate.reset();
        self.on_push(&[], out)
    }

    pub fn on_push(&mut self, windows: &[RunningWindow], out: &mut impl DockOutput) -> PushOutcome {
        if self.lock.is_locked(self.clock.now()) {
            trace_if_enabled!("Пуш проигнорирован: блокировка после клика");
            return PushOutcome::Locked;
        }

        let snapshot = fingerprint(windows, &self.pinned);
        if self.gate.should_skip(&snapshot) {
            trace_if_enabled!("Пуш проигнорирован: состояние не изменилось");
            return PushOutcome::Unchanged;
        }

        let entries = build_entries(&self.pinned, windows);
        debug_if_enabled!(
            "Пересборка панели: {} иконок ({} окон, {} закреплённых)",
            entries.len(),
            windows.len(),
            self.pinned.len()
        );

        out.render(&entries);
        self.entries = entries;
        self.gate.commit(snapshot);
        PushOutcome::Rendered
    }

    /// Клик по иконке: блокировка, оптимистичный статус, команда хосту.
    /// Порядок побочных эффектов фиксирован
    pub fn on_click(&mut self, index: usize, out: &mut impl DockOutput) -> ClickOutcome {
        let Some(entry) = self.entries.get(index) else {
            warn!("Клик по несуществующей иконке #{} (всего {})", index, self.entries.len());
            return ClickOutcome::Ignored;
        };

        let release_at = self.lock.arm(self.clock.now());
        if release_at.is_none() {
            debug_if_enabled!("Блокировка уже активна, таймер не продлевается");
        }

        let status = entry.status.after_click();
        out.set_status(index, status);

        let command = click_command(entry);
        info!("Клик по {}: {}", entry, command);
        out.send(command.clone());

        ClickOutcome::Dispatched {
            command,
            status,
            release_at,
        }
    }

    /// Срабатывание таймера блокировки
    pub fn expire_lock(&mut self) -> bool {
        let expired = self.lock.expire(self.clock.now());
        if expired {
            debug_if_enabled!("Блокировка снята");
        }
        expired
    }

    pub fn lock_deadline(&self) -> Option<Instant> {
        self.lock.deadline()
    }

    #[cfg(test)]
    pub fn is_locked(&mut self) -> bool {
        self.lock.is_locked(self.clock.now())
    }

    pub fn entries(&self) -> &[DockEntry] {
        &self.entries
    }
}

fn click_command(entry: &DockEntry) -> HostCommand {
    match &entry.source {
        EntrySource::App(app) if entry.status == DockStatus::None => HostCommand::LaunchApp {
            command: app.exec.clone(),
        },
        EntrySource::App(app) => HostCommand::FocusAppByCommand {
            command: app.exec.clone(),
        },
        EntrySource::Window(window) => HostCommand::FocusApp {
            handle: window.handle,
        },
    }
}
