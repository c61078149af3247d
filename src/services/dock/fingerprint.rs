use crate::events::{PinnedApp, RunningWindow};

/// Снимок входных данных сверки. Нужен только для сравнения на равенство,
/// порядок элементов учитывается
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    windows: Vec<RunningWindow>,
    apps: Vec<PinnedApp>,
}

pub fn fingerprint(windows: &[RunningWindow], apps: &[PinnedApp]) -> Fingerprint {
    Fingerprint {
        windows: windows.to_vec(),
        apps: apps.to_vec(),
    }
}

pub fn should_skip(new: &Fingerprint, last: Option<&Fingerprint>) -> bool {
    last.is_some_and(|last| last == new)
}

/// Последний применённый снимок. `None` - "ещё ничего не видели"
#[derive(Debug, Default)]
pub struct FingerprintGate {
    last: Option<Fingerprint>,
}

impl FingerprintGate {
    pub fn should_skip(&self, new: &Fingerprint) -> bool {
        should_skip(new, self.last.as_ref())
    }

    /// Вызывается только после успешной пересборки
    pub fn commit(&mut self, new: Fingerprint) {
        self.last = Some(new);
    }

    /// Следующий пуш гарантированно вызовет пересборку
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> Vec<RunningWindow> {
        vec![
            RunningWindow::new(1, "firefox").focused(true),
            RunningWindow::new(2, "gimp"),
        ]
    }

    #[test]
    fn test_identical_input_is_skipped() {
        let apps = vec![PinnedApp::new("Firefox", "firefox")];
        let mut gate = FingerprintGate::default();

        let first = fingerprint(&windows(), &apps);
        assert!(!gate.should_skip(&first));
        gate.commit(first);

        assert!(gate.should_skip(&fingerprint(&windows(), &apps)));
    }

    #[test]
    fn test_focus_flag_changes_fingerprint() {
        let apps = vec![PinnedApp::new("Firefox", "firefox")];
        let mut moved = windows();
        moved[1].focused = true;

        assert_ne!(fingerprint(&windows(), &apps), fingerprint(&moved, &apps));
    }

    #[test]
    fn test_order_sensitive() {
        let mut reversed = windows();
        reversed.reverse();
        assert_ne!(fingerprint(&windows(), &[]), fingerprint(&reversed, &[]));
    }

    #[test]
    fn test_pinned_set_part_of_fingerprint() {
        let before = fingerprint(&windows(), &[]);
        let after = fingerprint(&windows(), &[PinnedApp::new("Gimp", "gimp")]);
        assert!(!should_skip(&after, Some(&before)));
    }

    #[test]
    fn test_reset_forces_rebuild() {
        let mut gate = FingerprintGate::default();
        let snapshot = fingerprint(&[], &[]);
        gate.commit(snapshot.clone());
        assert!(gate.should_skip(&snapshot));

        gate.reset();
        assert!(!gate.should_skip(&snapshot));
    }
}
