use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(deserialize_with = "string_or_number")]
    pub telegram_threads: String,
    pub telegram_folder_path: String,
    #[serde(deserialize_with = "string_or_number")]
    pub chrome_threads: String,
    pub chrome_folder_path: String,
    pub language: String,
    pub theme_effect: String,
    pub theme_snow_speed: f64,
    pub theme_sakura_intensity: f64,
    pub theme_rain_intensity: f64,
    pub theme_leaves_intensity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            telegram_threads: "1".to_string(),
            telegram_folder_path: String::new(),
            chrome_threads: "1".to_string(),
            chrome_folder_path: String::new(),
            language: "uk".to_string(),
            theme_effect: "none".to_string(),
            theme_snow_speed: 1.0,
            theme_sakura_intensity: 1.0,
            theme_rain_intensity: 1.0,
            theme_leaves_intensity: 1.0,
        }
    }
}

impl Settings {
    /// Keys accepted by `settings set`, in display order.
    pub const KEYS: &'static [&'static str] = &[
        "telegramThreads",
        "telegramFolderPath",
        "chromeThreads",
        "chromeFolderPath",
        "language",
        "themeEffect",
    ];

    /// Set a string field by its stored (camelCase) name.
    pub fn set(&mut self, key: &str, value: &str) -> Option<()> {
        let value = value.trim().to_string();
        match key {
            "telegramThreads" => self.telegram_threads = value,
            "telegramFolderPath" => self.telegram_folder_path = value,
            "chromeThreads" => self.chrome_threads = value,
            "chromeFolderPath" => self.chrome_folder_path = value,
            "language" => self.language = value,
            "themeEffect" => self.theme_effect = value,
            _ => return None,
        }
        Some(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "telegramThreads" => Some(&self.telegram_threads),
            "telegramFolderPath" => Some(&self.telegram_folder_path),
            "chromeThreads" => Some(&self.chrome_threads),
            "chromeFolderPath" => Some(&self.chrome_folder_path),
            "language" => Some(&self.language),
            "themeEffect" => Some(&self.theme_effect),
            _ => None,
        }
    }
}

/// Thread counts were written both as strings and as plain numbers.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => "1".to_string(),
    })
}
