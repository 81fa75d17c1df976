//! Core data models for tastetales.
//!
//! These types mirror the on-disk JSON documents exactly: a recipe collection
//! is a JSON array of [`Recipe`] objects, the user store is a JSON object
//! mapping usernames to [`Account`] objects.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Image URL used when a recipe is created without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/600x400?text=No+Image";

// =============================================================================
// RECIPE TYPES
// =============================================================================

/// A single recipe record as persisted in the recipe collection.
///
/// Every field is `#[serde(default)]`-tolerant: documents written by earlier
/// versions of the application may omit fields or carry ids that are not
/// numbers, and loading must not drop such records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Recipe {
    /// Stored id. Usually a positive integer, but legacy documents are not
    /// guaranteed to be well-formed; use [`Recipe::id_i64`] for comparisons.
    #[serde(default)]
    pub id: JsonValue,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tips: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub health: String,
    /// Username of the creator. Set once at creation, never altered.
    #[serde(default)]
    pub owner: Option<String>,
}

impl Recipe {
    /// The record's id coerced to an integer, or `None` when the stored
    /// value is neither a number nor a numeric string. Lookups skip such
    /// records silently rather than failing the whole operation.
    pub fn id_i64(&self) -> Option<i64> {
        coerce_id(&self.id)
    }
}

/// Coerce a stored JSON id value to `i64`.
///
/// Accepts JSON numbers and numeric strings; everything else is `None`.
pub fn coerce_id(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Ingredients as accepted on recipe creation: either an explicit list or a
/// single newline-delimited string (the HTML form sends the latter).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum IngredientsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for IngredientsInput {
    fn default() -> Self {
        IngredientsInput::Text(String::new())
    }
}

impl IngredientsInput {
    /// Normalize to the stored form: each entry trimmed, empties dropped.
    /// Text input is split on newlines first.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            IngredientsInput::List(items) => items
                .iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            IngredientsInput::Text(raw) => raw
                .split('\n')
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }
}

/// Request for creating a new recipe, from either a JSON body or a
/// multipart form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredients: IngredientsInput,
    #[serde(default)]
    pub tips: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub health: String,
    /// Image URL. Empty means "use the placeholder" unless an uploaded file
    /// already produced a URL.
    #[serde(default)]
    pub image: String,
}

// =============================================================================
// ACCOUNT TYPES
// =============================================================================

/// A user account as persisted in the user store, keyed by username.
///
/// The username itself is the map key and is not repeated inside the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Account {
    /// Argon2 password hash. Plaintext never touches the store.
    pub password: String,
    #[serde(default)]
    pub display_name: String,
    /// Favorited recipe ids. Mutations write integers; legacy documents may
    /// still contain numeric strings, so reads coerce via [`coerce_id`].
    #[serde(default)]
    pub favorites: Vec<JsonValue>,
}

impl Account {
    /// Whether `recipe_id` is favorited, comparing ids as integers.
    pub fn is_favorite(&self, recipe_id: i64) -> bool {
        self.favorites
            .iter()
            .any(|fid| coerce_id(fid) == Some(recipe_id))
    }
}
