//! Dock reconciliation engine: responsibility and boundaries
//!
//! Matches host windows to pinned apps, classifies each icon, skips rebuilds
//! when nothing changed and holds off host pushes for a short while after a
//! click. It knows nothing about how bytes reach the host or the screen; that
//! is the job of the bridge adapters, which feed it through `DockOutput`.

mod classifier;
mod clock;
mod debounce;
mod driver;
mod fingerprint;
mod matcher;

pub use self::classifier::{DockEntry, DockStatus};
pub use self::clock::SystemClock;
pub use self::driver::{ClickOutcome, DockEngine, DockOutput};
