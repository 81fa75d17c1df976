//! Repository traits for tastetales abstractions.
//!
//! These traits define the interfaces that concrete store implementations
//! must satisfy, enabling pluggable backends and testability.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Account, CreateRecipeRequest, Recipe};

/// Repository for recipe CRUD and search.
///
/// Implementations hold no in-memory collection state: every operation is a
/// fresh load of the backing document, and every mutation rewrites it whole.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Full collection, in file (insertion) order.
    async fn list(&self) -> Result<Vec<Recipe>>;

    /// Look up a recipe by integer id. Records with unparseable ids are
    /// skipped, not errors.
    async fn find(&self, id: i64) -> Result<Option<Recipe>>;

    /// Filter by category (exact, case-insensitive) then by lowercase
    /// substring across title, description, category, ingredients, tips,
    /// and instructions. Empty arguments mean "no filter".
    async fn search(&self, text: &str, category: &str) -> Result<Vec<Recipe>>;

    /// Validate, assign the next id, persist, and return the new record.
    async fn create(&self, req: CreateRecipeRequest, owner: &str) -> Result<Recipe>;

    /// Remove a recipe. Fails with `NotFound` for unknown ids and
    /// `Forbidden` when `requesting_user` is not the owner; in both cases
    /// the backing file is left untouched.
    async fn delete(&self, id: i64, requesting_user: &str) -> Result<()>;
}

/// Repository for user accounts, keyed by case-sensitive username.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Full username → account map.
    async fn list(&self) -> Result<BTreeMap<String, Account>>;

    /// Look up one account.
    async fn find(&self, username: &str) -> Result<Option<Account>>;

    /// Create an account with a freshly hashed password and no favorites.
    /// Fails with `UsernameTaken` on a key collision.
    async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Account>;

    /// Verify credentials. Unknown username and wrong password fail with
    /// the identical `InvalidCredentials` error.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account>;

    /// Toggle `recipe_id` in the account's favorites. Returns the new
    /// favorited state: `false` after removal, `true` after insertion.
    /// Fails with `AccountMissing` when `username` is not in the store.
    async fn toggle_favorite(&self, username: &str, recipe_id: i64) -> Result<bool>;
}
