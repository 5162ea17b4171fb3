use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepeatRule {
    #[default]
    Never,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Semiannual,
    Yearly,
}

impl RepeatRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatRule::Never => "never",
            RepeatRule::Daily => "daily",
            RepeatRule::Weekly => "weekly",
            RepeatRule::Biweekly => "biweekly",
            RepeatRule::Monthly => "monthly",
            RepeatRule::Quarterly => "quarterly",
            RepeatRule::Semiannual => "semiannual",
            RepeatRule::Yearly => "yearly",
        }
    }

    /// Unknown or missing values collapse to `Never`.
    pub fn normalize(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("daily") => RepeatRule::Daily,
            Some("weekly") => RepeatRule::Weekly,
            Some("biweekly") => RepeatRule::Biweekly,
            Some("monthly") => RepeatRule::Monthly,
            Some("quarterly") => RepeatRule::Quarterly,
            Some("semiannual") => RepeatRule::Semiannual,
            Some("yearly") => RepeatRule::Yearly,
            _ => RepeatRule::Never,
        }
    }

    pub fn repeats(&self) -> bool {
        !matches!(self, RepeatRule::Never)
    }
}

impl<'de> Deserialize<'de> for RepeatRule {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(d)?;
        Ok(RepeatRule::normalize(raw.as_ref().and_then(|v| v.as_str())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub remind_at: i64,
    #[serde(default)]
    pub reminded_at: Option<i64>,
    #[serde(default)]
    pub repeat_rule: RepeatRule,
}

impl Reminder {
    pub fn is_due(&self, now: i64) -> bool {
        self.remind_at > 0 && self.remind_at <= now && self.reminded_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

/// Partial reminder update; outer `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub remind_at: Option<i64>,
    pub reminded_at: Option<Option<i64>>,
    pub repeat_rule: Option<RepeatRule>,
}
