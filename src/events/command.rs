use serde::{Deserialize, Serialize};
use std::fmt;

/// Команда хосту. Отправляется без ожидания ответа
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostCommand {
    LaunchApp { command: String },
    FocusAppByCommand { command: String },
    FocusApp { handle: u64 },
    GetDockApps,
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCommand::LaunchApp { command } => write!(f, "launch_app({})", command),
            HostCommand::FocusAppByCommand { command } => {
                write!(f, "focus_app_by_command({})", command)
            }
            HostCommand::FocusApp { handle } => write!(f, "focus_app({:#x})", handle),
            HostCommand::GetDockApps => write!(f, "get_dock_apps"),
        }
    }
}
