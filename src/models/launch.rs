use serde::{Deserialize, Deserializer, Serialize};

/// Link parameters handed to the host when a project launch opens a mini app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchParams {
    pub api_id: String,
    pub api_hash: String,
    pub phone: String,
    pub app_name: String,
    pub app_type: String,
    pub ref_link: String,
    pub mixed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    #[default]
    Project,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchState {
    pub selected_project: String,
    pub start_range: String,
    pub end_range: String,
    pub is_mix: bool,
    #[serde(deserialize_with = "numbers_only")]
    pub launched_pids: Vec<u32>,
    #[serde(deserialize_with = "numbers_only")]
    pub pending_profiles: Vec<u32>,
    pub batch_size: usize,
    pub launch_params: Option<LaunchParams>,
    pub total_profiles: usize,
    pub launch_mode: LaunchMode,
    pub updated_at: i64,
}

impl Default for LaunchState {
    fn default() -> Self {
        Self {
            selected_project: String::new(),
            start_range: String::new(),
            end_range: String::new(),
            is_mix: false,
            launched_pids: Vec::new(),
            pending_profiles: Vec::new(),
            batch_size: 1,
            launch_params: None,
            total_profiles: 0,
            launch_mode: LaunchMode::Project,
            updated_at: 0,
        }
    }
}

/// Keep entries that are numbers or numeric strings, drop the rest.
fn numbers_only<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u32>, D::Error> {
    let raw = Option::<Vec<serde_json::Value>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect())
}
