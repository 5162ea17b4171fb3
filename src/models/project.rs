use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Telegram,
    Chrome,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Telegram => "telegram",
            ProjectKind::Chrome => "chrome",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: ProjectKind,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub app_type: String,
    #[serde(default)]
    pub ref_link: String,
    #[serde(default)]
    pub mixed: String,
}

impl Project {
    /// Fill derived defaults: `appName` falls back to the name and
    /// `refLink` / `link` mirror each other when one is missing.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        if self.app_name.trim().is_empty() {
            self.app_name = self.name.clone();
        }
        if self.ref_link.is_empty() {
            self.ref_link = self.link.clone();
        }
        if self.link.is_empty() {
            self.link = self.ref_link.clone();
        }
        self
    }
}

/// Input for a new project; id and timestamp are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub kind: ProjectKind,
    pub app_name: Option<String>,
    pub app_type: String,
    pub ref_link: String,
    pub mixed: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub kind: Option<ProjectKind>,
    pub app_name: Option<String>,
    pub app_type: Option<String>,
    pub ref_link: Option<String>,
    pub mixed: Option<String>,
}
