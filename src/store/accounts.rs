use super::{Store, keys};
use crate::core::helpers::normalize_hashtags;
use crate::errors::{AppError, AppResult};
use crate::models::account::{Account, AccountMeta, AccountStatus};
use crate::models::next_id;
use std::collections::BTreeMap;

impl Store {
    pub fn accounts(&self) -> AppResult<Vec<Account>> {
        self.read_list(keys::ACCOUNTS)
    }

    pub fn save_accounts(&self, accounts: &[Account]) -> AppResult<()> {
        self.write(keys::ACCOUNTS, accounts)
    }

    pub fn account(&self, id: i64) -> AppResult<Account> {
        self.accounts()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Account #{}", id)))
    }

    /// Adds an account with the next free id.
    pub fn add_account(&self, name: &str, status: Option<AccountStatus>) -> AppResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("account name is empty".into()));
        }
        let mut accounts = self.accounts()?;
        let mut created = Account::new(next_id(accounts.iter().map(|a| a.id)), name);
        created.status = status.unwrap_or_default();
        accounts.push(created.clone());
        self.save_accounts(&accounts)?;
        Ok(created)
    }

    /// Apply `f` to one account and persist the list.
    fn modify_account<F>(&self, id: i64, f: F) -> AppResult<Account>
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.accounts()?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Account #{}", id)))?;
        f(account);
        let updated = account.clone();
        self.save_accounts(&accounts)?;
        Ok(updated)
    }

    pub fn update_account_notes(
        &self,
        id: i64,
        notes: &str,
        scope: Option<&str>,
    ) -> AppResult<Account> {
        let updated = self.modify_account(id, |a| a.notes = Some(notes.to_string()))?;
        if let Some(scope) = scope.filter(|s| !s.is_empty()) {
            self.upsert_account_meta(scope, id, |m| m.notes = Some(notes.to_string()))?;
        }
        Ok(updated)
    }

    pub fn update_account_display_name(
        &self,
        id: i64,
        display_name: &str,
        scope: Option<&str>,
    ) -> AppResult<Account> {
        let value = display_name.trim().to_string();
        let updated = self.modify_account(id, |a| a.display_name = Some(value.clone()))?;
        if let Some(scope) = scope.filter(|s| !s.is_empty()) {
            self.upsert_account_meta(scope, id, |m| m.display_name = Some(value))?;
        }
        Ok(updated)
    }

    pub fn update_account_status(&self, id: i64, status: AccountStatus) -> AppResult<Account> {
        self.modify_account(id, |a| a.status = status)
    }

    pub fn set_account_hashtags(
        &self,
        id: i64,
        tags: &[String],
        scope: Option<&str>,
    ) -> AppResult<Account> {
        let normalized = normalize_hashtags(tags.iter().map(String::as_str));
        let updated = self.modify_account(id, |a| a.hashtags = normalized.clone())?;
        if let Some(scope) = scope.filter(|s| !s.is_empty()) {
            self.upsert_account_meta(scope, id, |m| m.hashtags = Some(normalized))?;
        }
        Ok(updated)
    }

    pub fn delete_account(&self, id: i64) -> AppResult<bool> {
        let accounts = self.accounts()?;
        let next: Vec<Account> = accounts.iter().filter(|a| a.id != id).cloned().collect();
        if next.len() == accounts.len() {
            return Ok(false);
        }
        self.save_accounts(&next)?;
        Ok(true)
    }

    // ---- account meta ----

    fn all_account_meta(&self) -> AppResult<Vec<AccountMeta>> {
        self.read_list(keys::ACCOUNT_META)
    }

    /// Entries of `scope`; legacy entries without a scope fill the gaps.
    pub fn account_meta_map(&self, scope: &str) -> AppResult<BTreeMap<i64, AccountMeta>> {
        let meta = self.all_account_meta()?;
        let mut map = BTreeMap::new();

        for item in meta.iter().filter(|m| m.scope == scope) {
            map.insert(item.id, item.clone());
        }
        for item in meta.iter().filter(|m| m.scope.trim().is_empty()) {
            map.entry(item.id).or_insert_with(|| AccountMeta {
                scope: scope.to_string(),
                ..item.clone()
            });
        }

        Ok(map)
    }

    pub fn save_account_meta_map(
        &self,
        scope: &str,
        map: &BTreeMap<i64, AccountMeta>,
    ) -> AppResult<()> {
        let mut next: Vec<AccountMeta> = self
            .all_account_meta()?
            .into_iter()
            .filter(|m| m.scope != scope)
            .collect();
        next.extend(map.values().cloned().map(|m| AccountMeta {
            scope: scope.to_string(),
            ..m
        }));
        self.write(keys::ACCOUNT_META, &next)
    }

    pub fn upsert_account_meta<F>(&self, scope: &str, id: i64, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut AccountMeta),
    {
        let mut map = self.account_meta_map(scope)?;
        let entry = map
            .entry(id)
            .or_insert_with(|| AccountMeta::empty(scope, id));
        f(entry);
        self.save_account_meta_map(scope, &map)
    }

    /// Snapshot the user-facing fields of `accounts` into `scope` and drop
    /// the legacy unscoped entries.
    pub fn sync_account_meta(&self, scope: &str, accounts: &[Account]) -> AppResult<()> {
        let mut map = self.account_meta_map(scope)?;
        for a in accounts {
            map.insert(
                a.id,
                AccountMeta {
                    scope: scope.to_string(),
                    id: a.id,
                    display_name: a.display_name.clone(),
                    notes: a.notes.clone(),
                    hashtags: Some(a.hashtags.clone()),
                },
            );
        }
        self.save_account_meta_map(scope, &map)?;

        let scoped: Vec<AccountMeta> = self
            .all_account_meta()?
            .into_iter()
            .filter(|m| !m.scope.trim().is_empty())
            .collect();
        self.write(keys::ACCOUNT_META, &scoped)
    }
}
