//! Блокировка входящих пушей после клика.
//!
//! Пока хост не успел прислать новое состояние оконного менеджера, его пуши
//! отражают мир до клика. Блокировка прячет этот интервал: клик её взводит,
//! снимается она только по истечении таймера. Повторный клик таймер не
//! продлевает и не перезапускает.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(450);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked { until: Instant },
}

#[derive(Debug)]
pub struct DebounceLock {
    state: LockState,
    interval: Duration,
}

impl Default for DebounceLock {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl DebounceLock {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: LockState::Unlocked,
            interval,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Взвести блокировку. Возвращает момент снятия, если таймер запущен
    /// этим вызовом; `None`, если блокировка уже стояла
    pub fn arm(&mut self, now: Instant) -> Option<Instant> {
        self.expire(now);
        match self.state {
            LockState::Locked { .. } => None,
            LockState::Unlocked => {
                let until = now + self.interval;
                self.state = LockState::Locked { until };
                Some(until)
            }
        }
    }

    /// Срабатывание таймера. `true`, если блокировка снята этим вызовом
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            LockState::Locked { until } if now >= until => {
                self.state = LockState::Unlocked;
                true
            }
            _ => false,
        }
    }

    pub fn is_locked(&mut self, now: Instant) -> bool {
        self.expire(now);
        matches!(self.state, LockState::Locked { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            LockState::Locked { until } => Some(until),
            LockState::Unlocked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_starts_unlocked() {
        let mut lock = DebounceLock::default();
        assert_eq!(lock.state(), LockState::Unlocked);
        assert!(!lock.is_locked(Instant::now()));
        assert_eq!(lock.deadline(), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let t0 = Instant::now();
        let mut lock = DebounceLock::default();

        assert_eq!(lock.arm(t0), Some(t0 + 450 * MS));
        assert!(lock.is_locked(t0));
        assert!(lock.is_locked(t0 + 449 * MS));
        assert!(!lock.expire(t0 + 449 * MS));

        assert!(lock.expire(t0 + 450 * MS));
        assert!(!lock.is_locked(t0 + 450 * MS));
        assert!(!lock.expire(t0 + 451 * MS));
    }

    #[test]
    fn test_second_arm_does_not_extend() {
        let t0 = Instant::now();
        let mut lock = DebounceLock::default();

        lock.arm(t0);
        assert_eq!(lock.arm(t0 + 300 * MS), None);
        assert_eq!(lock.deadline(), Some(t0 + 450 * MS));
        assert!(!lock.is_locked(t0 + 450 * MS));
    }

    #[test]
    fn test_rearm_after_expiry() {
        let t0 = Instant::now();
        let mut lock = DebounceLock::new(Duration::from_millis(100));

        lock.arm(t0);
        // Таймер уже истёк, хотя expire() никто не вызывал
        assert_eq!(lock.arm(t0 + 150 * MS), Some(t0 + 250 * MS));
        assert!(lock.is_locked(t0 + 200 * MS));
    }
}
