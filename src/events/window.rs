use serde::{Deserialize, Serialize};
use std::fmt;

/// Открытое окно в том виде, в каком его присылает хост
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunningWindow {
    #[serde(alias = "xid")]
    pub handle: u64,
    pub class: String,
    #[serde(default)]
    pub focused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl RunningWindow {
    pub fn new(handle: u64, class: impl Into<String>) -> Self {
        Self {
            handle,
            class: class.into(),
            focused: false,
            name: None,
            icon: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for RunningWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "\"{}\" ({}, {:#x})", name, self.class, self.handle),
            None => write!(f, "{} ({:#x})", self.class, self.handle),
        }
    }
}
