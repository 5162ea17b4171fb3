use serde::{Deserialize, Serialize};

/// A running client process as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramProcess {
    pub pid: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

impl TelegramProcess {
    pub fn new(pid: u32, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            path: path.into(),
        }
    }
}
