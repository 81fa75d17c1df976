//! Account repository implementation over the JSON document store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use tastetales_core::{coerce_id, Account, AccountRepository, Error, Result};

use crate::document::DocumentStore;
use crate::password;

/// Flat-file implementation of [`AccountRepository`].
///
/// The backing document is a JSON object mapping usernames (case-sensitive)
/// to account records.
pub struct JsonAccountRepository {
    store: DocumentStore,
}

impl JsonAccountRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<BTreeMap<String, Account>> {
        self.store.load_or(BTreeMap::new())
    }
}

/// Rewrite a favorites list with every coercible id as a JSON integer.
///
/// Mutations always write integers; without this a list could accumulate
/// mixed string/number representations of the same logical id depending on
/// which call path appended it. Entries that are not ids at all are kept
/// untouched rather than dropped.
fn normalize_favorites(favorites: Vec<JsonValue>) -> Vec<JsonValue> {
    favorites
        .into_iter()
        .map(|fid| match coerce_id(&fid) {
            Some(id) => json!(id),
            None => fid,
        })
        .collect()
}

#[async_trait]
impl AccountRepository for JsonAccountRepository {
    async fn list(&self) -> Result<BTreeMap<String, Account>> {
        self.load()
    }

    async fn find(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.load()?.remove(username))
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Account> {
        let mut users = self.load()?;
        if users.contains_key(username) {
            return Err(Error::UsernameTaken(username.to_string()));
        }

        let account = Account {
            password: password::hash_password(password)?,
            display_name: display_name.to_string(),
            favorites: Vec::new(),
        };
        users.insert(username.to_string(), account.clone());
        self.store.save(&users)?;

        tracing::info!(username, "account registered");
        Ok(account)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Account> {
        let users = self.load()?;
        // Unknown user and wrong password take the same exit.
        let account = users.get(username).ok_or(Error::InvalidCredentials)?;
        if !password::verify_password(password, &account.password) {
            return Err(Error::InvalidCredentials);
        }
        Ok(account.clone())
    }

    async fn toggle_favorite(&self, username: &str, recipe_id: i64) -> Result<bool> {
        let mut users = self.load()?;
        // Session identity is an external claim; the account must still exist.
        let account = users
            .get_mut(username)
            .ok_or_else(|| Error::AccountMissing(username.to_string()))?;

        let favorited = if account.is_favorite(recipe_id) {
            account
                .favorites
                .retain(|fid| coerce_id(fid) != Some(recipe_id));
            false
        } else {
            account.favorites.push(json!(recipe_id));
            true
        };
        account.favorites = normalize_favorites(std::mem::take(&mut account.favorites));

        self.store.save(&users)?;
        tracing::debug!(username, recipe_id, favorited, "favorite toggled");
        Ok(favorited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_favorites_coerces_strings_to_integers() {
        let out = normalize_favorites(vec![json!(3), json!("7"), json!(" 12 ")]);
        assert_eq!(out, vec![json!(3), json!(7), json!(12)]);
        assert!(out.iter().all(JsonValue::is_i64));
    }

    #[test]
    fn test_normalize_favorites_keeps_unparseable_entries() {
        let out = normalize_favorites(vec![json!("junk"), json!(5)]);
        assert_eq!(out, vec![json!("junk"), json!(5)]);
    }
}
