pub mod app;
pub mod command;
pub mod inbound;
pub mod window;

pub use app::{load_pinned_apps, PinnedApp};
pub use command::HostCommand;
pub use inbound::InboundEvent;
pub use window::RunningWindow;
