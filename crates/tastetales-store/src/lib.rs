//! # tastetales-store
//!
//! Flat-file JSON persistence layer for tastetales.
//!
//! This crate provides:
//! - Atomic load/save of a JSON document (temp file + rename)
//! - Repository implementations for recipes and user accounts
//! - Argon2 password hashing for the account store
//!
//! ## Example
//!
//! ```rust,ignore
//! use tastetales_store::Database;
//! use tastetales_core::{CreateRecipeRequest, RecipeRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open("data");
//!
//!     let recipe = db.recipes.create(CreateRecipeRequest {
//!         title: "Soup".to_string(),
//!         description: "Hot soup".to_string(),
//!         category: "Mains".to_string(),
//!         ..Default::default()
//!     }, "alice").await?;
//!
//!     println!("Created recipe: {:?}", recipe.id);
//!     Ok(())
//! }
//! ```

use std::path::Path;

pub mod accounts;
pub mod document;
pub mod password;
pub mod recipes;

// Re-export core types
pub use tastetales_core::*;

pub use accounts::JsonAccountRepository;
pub use document::DocumentStore;
pub use recipes::{filter_recipes, JsonRecipeRepository};

/// File name of the recipe collection inside the data directory.
pub const RECIPES_FILE: &str = "recipes.json";

/// File name of the user store inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// Combined database context with both repositories.
///
/// Holds no open handles or in-memory state; each repository is bound to
/// its document path and reloads it per operation.
pub struct Database {
    /// Recipe repository over `recipes.json`.
    pub recipes: JsonRecipeRepository,
    /// Account repository over `users.json`.
    pub accounts: JsonAccountRepository,
}

impl Database {
    /// Bind the repositories to their documents inside `data_dir`.
    ///
    /// Neither file needs to exist yet; a missing document reads as empty
    /// and is created on first save.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            recipes: JsonRecipeRepository::new(DocumentStore::new(data_dir.join(RECIPES_FILE))),
            accounts: JsonAccountRepository::new(DocumentStore::new(data_dir.join(USERS_FILE))),
        }
    }
}
