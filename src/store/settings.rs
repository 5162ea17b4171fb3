use super::{Store, keys};
use crate::core::helpers::normalize_hashtag;
use crate::errors::{AppError, AppResult};
use crate::models::hashtag::HashtagMeta;
use crate::models::settings::Settings;
use crate::models::user::User;

impl Store {
    // ---- settings ----

    /// Stored fields over defaults.
    pub fn settings(&self) -> AppResult<Settings> {
        self.read(keys::SETTINGS, Settings::default())
    }

    pub fn save_settings(&self, settings: &Settings) -> AppResult<()> {
        self.write(keys::SETTINGS, settings)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> AppResult<Settings> {
        let mut settings = self.settings()?;
        settings.set(key, value).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown setting '{}' (expected one of: {})",
                key,
                Settings::KEYS.join(", ")
            ))
        })?;
        self.save_settings(&settings)?;
        Ok(settings)
    }

    // ---- auth ----

    pub fn auth_user(&self) -> AppResult<Option<User>> {
        let user: Option<User> = self.read(keys::AUTH_USER, None)?;
        Ok(user.filter(|u| !u.id.trim().is_empty() && !u.name.trim().is_empty()))
    }

    pub fn save_auth_user(&self, user: &User) -> AppResult<()> {
        if user.id.trim().is_empty() || user.name.trim().is_empty() {
            return Err(AppError::Validation("user id and name are required".into()));
        }
        self.write(keys::AUTH_USER, user)
    }

    pub fn clear_auth_user(&self) -> AppResult<()> {
        self.write(keys::AUTH_USER, &Option::<User>::None)
    }

    pub fn auth_onboarding_seen(&self) -> AppResult<bool> {
        self.read(keys::AUTH_ONBOARDING_SEEN, false)
    }

    pub fn set_auth_onboarding_seen(&self, seen: bool) -> AppResult<()> {
        self.write(keys::AUTH_ONBOARDING_SEEN, &seen)
    }

    // ---- hashtag meta ----

    pub fn hashtag_meta(&self) -> AppResult<Vec<HashtagMeta>> {
        let meta: Vec<HashtagMeta> = self.read_list(keys::HASHTAG_META)?;
        Ok(meta
            .into_iter()
            .map(|m| HashtagMeta {
                tag: m.tag.trim().to_lowercase(),
                link: m.link,
            })
            .filter(|m| !m.tag.is_empty())
            .collect())
    }

    /// An empty link removes the entry.
    pub fn set_hashtag_link(&self, tag: &str, link: &str) -> AppResult<()> {
        let tag = normalize_hashtag(tag);
        if tag.is_empty() {
            return Err(AppError::Validation("hashtag is empty".into()));
        }
        let mut meta = self.hashtag_meta()?;
        meta.retain(|m| m.tag != tag);
        if !link.trim().is_empty() {
            meta.push(HashtagMeta {
                tag,
                link: link.trim().to_string(),
            });
        }
        self.write(keys::HASHTAG_META, &meta)
    }
}
