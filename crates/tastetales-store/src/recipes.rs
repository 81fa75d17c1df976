//! Recipe repository implementation over the JSON document store.

use async_trait::async_trait;
use serde_json::json;

use tastetales_core::{
    CreateRecipeRequest, Error, Recipe, RecipeRepository, Result, PLACEHOLDER_IMAGE_URL,
};

use crate::document::DocumentStore;

/// Flat-file implementation of [`RecipeRepository`].
///
/// The backing document is a JSON array in insertion order. Nothing is
/// cached: every operation re-reads the file, every mutation rewrites it.
pub struct JsonRecipeRepository {
    store: DocumentStore,
}

impl JsonRecipeRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<Recipe>> {
        self.store.load_or(Vec::new())
    }

    /// Next id to assign: `max(existing) + 1`, `1` for an empty collection,
    /// or `len + 1` when any stored id fails integer extraction.
    fn next_id(recipes: &[Recipe]) -> i64 {
        if recipes.is_empty() {
            return 1;
        }
        match recipes.iter().map(Recipe::id_i64).collect::<Option<Vec<_>>>() {
            Some(ids) => ids.into_iter().max().unwrap_or(0) + 1,
            None => recipes.len() as i64 + 1,
        }
    }
}

/// Apply the search predicate to a loaded collection.
///
/// Category filters first: exact match, case-insensitive, after trimming
/// both sides. Then `text` keeps recipes where its lowercased form appears
/// as a substring of the title, description, category, any ingredient, tips,
/// or instructions. Empty arguments filter nothing. Plain substring
/// containment only; no tokenization, no ranking.
pub fn filter_recipes(recipes: Vec<Recipe>, text: &str, category: &str) -> Vec<Recipe> {
    let category = category.trim().to_lowercase();
    let text = text.to_lowercase();

    let mut filtered = recipes;

    if !category.is_empty() {
        filtered.retain(|r| r.category.trim().to_lowercase() == category);
    }

    if !text.is_empty() {
        filtered.retain(|r| {
            r.title.to_lowercase().contains(&text)
                || r.description.to_lowercase().contains(&text)
                || r.category.to_lowercase().contains(&text)
                || r.ingredients.iter().any(|i| i.to_lowercase().contains(&text))
                || r.tips.to_lowercase().contains(&text)
                || r.instructions.to_lowercase().contains(&text)
        });
    }

    filtered
}

#[async_trait]
impl RecipeRepository for JsonRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>> {
        self.load()
    }

    async fn find(&self, id: i64) -> Result<Option<Recipe>> {
        let recipes = self.load()?;
        Ok(recipes.into_iter().find(|r| r.id_i64() == Some(id)))
    }

    async fn search(&self, text: &str, category: &str) -> Result<Vec<Recipe>> {
        Ok(filter_recipes(self.load()?, text, category))
    }

    async fn create(&self, req: CreateRecipeRequest, owner: &str) -> Result<Recipe> {
        let title = req.title.trim();
        let description = req.description.trim();
        let category = req.category.trim();
        if title.is_empty() || description.is_empty() || category.is_empty() {
            return Err(Error::InvalidInput(
                "title, description and category are required".to_string(),
            ));
        }

        let mut recipes = self.load()?;
        let id = Self::next_id(&recipes);

        let image = req.image.trim();
        let recipe = Recipe {
            id: json!(id),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            image: if image.is_empty() {
                PLACEHOLDER_IMAGE_URL.to_string()
            } else {
                image.to_string()
            },
            ingredients: req.ingredients.normalize(),
            tips: req.tips.trim().to_string(),
            instructions: req.instructions.trim().to_string(),
            health: req.health.trim().to_string(),
            owner: Some(owner.to_string()),
        };

        recipes.push(recipe.clone());
        self.store.save(&recipes)?;

        tracing::info!(id, owner, title = %recipe.title, "recipe created");
        Ok(recipe)
    }

    async fn delete(&self, id: i64, requesting_user: &str) -> Result<()> {
        let mut recipes = self.load()?;
        let index = recipes
            .iter()
            .position(|r| r.id_i64() == Some(id))
            .ok_or(Error::RecipeNotFound(id))?;

        if recipes[index].owner.as_deref() != Some(requesting_user) {
            return Err(Error::Forbidden(format!(
                "recipe {id} is not owned by {requesting_user}"
            )));
        }

        recipes.remove(index);
        self.store.save(&recipes)?;

        tracing::info!(id, requesting_user, "recipe deleted");
        Ok(())
    }
}
