//! Recipe HTTP handlers.

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use tastetales_core::{
    is_allowed_image, sanitize_filename, AccountRepository, CreateRecipeRequest, Error,
    IngredientsInput, Recipe, RecipeRepository,
};

use crate::{ApiError, AppState, AuthUser, MaybeUser};

/// Query parameters for recipe listing/search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
}

/// Recipe detail plus the caller's favorited flag.
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub favorited: bool,
}

/// List recipes, optionally filtered by search text and category.
///
/// # Returns
/// - 200 OK with the matching recipes in insertion order
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.db.recipes.search(&query.search, &query.category).await?;
    Ok(Json(recipes))
}

/// Get one recipe with the caller's favorited flag.
///
/// Anonymous callers, and callers whose account record has gone missing,
/// read as "not favorited".
///
/// # Returns
/// - 200 OK with the recipe
/// - 404 Not Found for an unknown id
pub async fn get_recipe(
    State(state): State<AppState>,
    MaybeUser(username): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let recipe = state
        .db
        .recipes
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {id} not found")))?;

    let favorited = match username {
        Some(username) => state
            .db
            .accounts
            .find(&username)
            .await?
            .map(|account| account.is_favorite(id))
            .unwrap_or(false),
        None => false,
    };

    Ok(Json(RecipeDetail { recipe, favorited }))
}

/// Create a recipe from a JSON body or a multipart form with an optional
/// `image` file part.
///
/// # Returns
/// - 201 Created with the new record (id assigned)
/// - 400 Bad Request when title, description, or category is empty
/// - 401 Unauthorized when not logged in
/// - 500 Internal Server Error when persistence fails
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    request: Request,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let req = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        parse_form(multipart, &state).await?
    } else {
        let Json(body) = Json::<CreateRecipeRequest>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        body
    };

    let recipe = state.db.recipes.create(req, &username).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Delete a recipe the caller owns.
///
/// # Returns
/// - 200 OK with a deletion confirmation
/// - 401 Unauthorized when not logged in
/// - 403 Forbidden when the caller is not the owner
/// - 404 Not Found for an unknown id
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.recipes.delete(id, &username).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// Toggle the recipe in the caller's favorites.
///
/// # Returns
/// - 200 OK with the new favorited state
/// - 400 Bad Request when the session's account record is missing
/// - 401 Unauthorized when not logged in
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let favorited = state.db.accounts.toggle_favorite(&username, id).await?;
    Ok(Json(serde_json::json!({ "favorited": favorited })))
}

/// Collect a multipart form into a [`CreateRecipeRequest`], storing an
/// accepted image upload under the uploads directory.
///
/// A file part named `image` wins when its extension is accepted; otherwise
/// the textual `image` field (if any) is used, and the repository falls back
/// to the placeholder URL when both are absent.
async fn parse_form(mut multipart: Multipart, state: &AppState) -> Result<CreateRecipeRequest, ApiError> {
    let mut req = CreateRecipeRequest::default();
    let mut image_text = String::new();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "image" {
            match field.file_name().map(str::to_string) {
                Some(file_name) if !file_name.is_empty() => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                    upload = Some((file_name, data.to_vec()));
                }
                _ => {
                    image_text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                }
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "title" => req.title = text,
            "description" => req.description = text,
            "category" => req.category = text,
            "ingredients" => req.ingredients = IngredientsInput::Text(text),
            "tips" => req.tips = text,
            "instructions" => req.instructions = text,
            "health" => req.health = text,
            _ => {}
        }
    }

    req.image = match upload {
        Some((file_name, data)) if is_allowed_image(&file_name) => {
            store_upload(state, &file_name, &data)?
        }
        _ => image_text,
    };

    Ok(req)
}

/// Write an accepted upload to disk and return its static URL.
fn store_upload(state: &AppState, file_name: &str, data: &[u8]) -> Result<String, ApiError> {
    let file_name = sanitize_filename(file_name);
    std::fs::create_dir_all(&state.upload_dir).map_err(|e| ApiError::from(Error::Io(e)))?;
    std::fs::write(state.upload_dir.join(&file_name), data)
        .map_err(|e| ApiError::from(Error::Io(e)))?;

    tracing::info!(%file_name, bytes = data.len(), "image upload stored");
    Ok(format!("/static/uploads/{file_name}"))
}
