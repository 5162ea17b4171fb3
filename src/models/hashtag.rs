use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagMeta {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub link: String,
}
