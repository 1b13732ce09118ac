
use axum::{
    extract::{DefaultBodyLimit, FromRef, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use homecook_recipe_api::{
    filter,
    form::{FormError, ImageUpload, RecipeDraft},
    model::{Difficulty, MasteryLevel, Recipe},
    RecipeApi,
};

use crate::config::Config;

mod jobs;
mod planner;
mod store;
mod views;

use store::RecipeStore;
use views::RecipeView;

type RouteError = (StatusCode, Json<String>);

#[derive(Clone, FromRef)]
struct AppState {
    store: RecipeStore,
}

impl AppState {
    async fn new(config: &Config) -> Self {
        let store = RecipeStore::new(RecipeApi::new(config.upstream.url.as_str()));

        jobs::schedule_cache_refresh(store.clone()).await;

        Self { store }
    }
}

pub async fn make_router(config: &Config) -> Router {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/:id",
            get(show_recipe).put(update_recipe).delete(remove_recipe),
        )
        .route("/api/planner", get(planner::week))
        .route("/api/planner/picker", get(planner::picker))
        .route("/api/planner/entries", post(planner::add_entry))
        .route("/api/planner/entries/:id", delete(planner::remove_entry))
        .route("/api/planner/generate", post(planner::generate))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(AppState::new(config).await)
}

#[derive(Debug, Default, serde::Deserialize)]
struct LibraryQuery {
    search: Option<String>,
}

async fn list_recipes(
    Query(q): Query<LibraryQuery>,
    State(store): State<RecipeStore>,
) -> Result<Json<Vec<Recipe>>, RouteError> {
    let recipes = store.list().await.map_err(|err| {
        tracing::error!("could not load recipes: {err}");
        (StatusCode::BAD_GATEWAY, Json(format!("recipe_load_failed")))
    })?;

    let term = q.search.unwrap_or_default();
    Ok(Json(
        filter::filter_recipes(&recipes, &term)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

async fn show_recipe(
    Path(id): Path<i64>,
    State(store): State<RecipeStore>,
) -> Result<Json<RecipeView>, RouteError> {
    // detail is always fetched fresh, the cache only backs the list
    let recipe = store.api().get_recipe(id).await.map_err(|err| {
        if err.is_not_found() {
            (StatusCode::NOT_FOUND, Json(format!("recipe_not_found")))
        } else {
            tracing::error!("could not load recipe {id}: {err}");
            (StatusCode::BAD_GATEWAY, Json(format!("recipe_load_failed")))
        }
    })?;
    Ok(Json(RecipeView::from(recipe)))
}

async fn create_recipe(
    State(store): State<RecipeStore>,
    multipart: Multipart,
) -> Result<Json<Recipe>, RouteError> {
    let draft = read_recipe_form(multipart).await?;
    let payload = draft.build().map_err(reject_draft)?;

    let recipe = store.save_new(&payload).await.map_err(|err| {
        tracing::error!("could not save recipe: {err}");
        (StatusCode::BAD_GATEWAY, Json(format!("save_failed")))
    })?;
    Ok(Json(recipe))
}

async fn update_recipe(
    Path(id): Path<i64>,
    State(store): State<RecipeStore>,
    multipart: Multipart,
) -> Result<Json<Recipe>, RouteError> {
    let draft = read_recipe_form(multipart).await?;
    let payload = draft.build().map_err(reject_draft)?;

    let recipe = store.save_existing(id, &payload).await.map_err(|err| {
        if err.is_not_found() {
            (StatusCode::NOT_FOUND, Json(format!("recipe_not_found")))
        } else {
            tracing::error!("could not update recipe {id}: {err}");
            (StatusCode::BAD_GATEWAY, Json(format!("save_failed")))
        }
    })?;
    Ok(Json(recipe))
}

async fn remove_recipe(
    Path(id): Path<i64>,
    State(store): State<RecipeStore>,
) -> Result<StatusCode, RouteError> {
    store.remove(id).await.map_err(|err| {
        if err.is_not_found() {
            (StatusCode::NOT_FOUND, Json(format!("recipe_not_found")))
        } else {
            tracing::error!("could not delete recipe {id}: {err}");
            (StatusCode::BAD_GATEWAY, Json(format!("delete_failed")))
        }
    })?;
    Ok(StatusCode::NO_CONTENT)
}

fn reject_draft(err: FormError) -> RouteError {
    let code = match err {
        FormError::NameRequired => "name_required",
        FormError::RatingOutOfRange(_) => "rating_out_of_range",
    };
    (StatusCode::BAD_REQUEST, Json(code.into()))
}

fn unreadable_field(err: axum::extract::multipart::MultipartError) -> RouteError {
    tracing::error!("could not read form field: {err}");
    (StatusCode::BAD_REQUEST, Json(format!("invalid_form")))
}

/// Rebuild the form state from the submitted fields. The repeated
/// `ingredient_name`/`ingredient_amount`, `seasoning` and `step` fields
/// arrive in row order; the image comes as a binary part.
async fn read_recipe_form(mut multipart: Multipart) -> Result<RecipeDraft, RouteError> {
    let mut draft = RecipeDraft::default();

    while let Some(field) = multipart.next_field().await.map_err(unreadable_field)? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload.jpg").to_owned();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_owned();
            let bytes = field.bytes().await.map_err(unreadable_field)?;
            if !bytes.is_empty() {
                draft.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(unreadable_field)?;
        apply_field(&mut draft, &name, value)?;
    }

    Ok(draft)
}

fn apply_field(draft: &mut RecipeDraft, name: &str, value: String) -> Result<(), RouteError> {
    match name {
        "name" => draft.name = value,
        "description" => draft.description = value,
        "tags" => draft.tags = value,
        "cooking_time" => draft.cooking_time = numeric_field("cooking_time", &value)?,
        "servings" => draft.servings = numeric_field("servings", &value)?,
        "rating" => draft.rating = numeric_field("rating", &value)?,
        "difficulty" => {
            draft.difficulty = match value.trim() {
                "" => None,
                v => Some(Difficulty::parse(v).ok_or_else(|| {
                    (StatusCode::BAD_REQUEST, Json(format!("invalid_difficulty")))
                })?),
            }
        }
        "mastery_level" => {
            draft.mastery_level = match value.trim() {
                "" => None,
                v => Some(MasteryLevel::parse(v).ok_or_else(|| {
                    (StatusCode::BAD_REQUEST, Json(format!("invalid_mastery_level")))
                })?),
            }
        }
        "ingredient_name" => {
            let row = draft.add_ingredient();
            draft.update_ingredient_name(row, value);
        }
        // pairs with the ingredient_name sent just before it
        "ingredient_amount" => {
            let row = draft.ingredients.len().saturating_sub(1);
            draft.update_ingredient_amount(row, value);
        }
        "seasoning" => {
            let row = draft.add_seasoning();
            draft.update_seasoning(row, value);
        }
        "step" => {
            let row = draft.add_step();
            draft.update_step(row, value);
        }
        other => tracing::warn!("ignoring unknown form field '{other}'"),
    }
    Ok(())
}

fn numeric_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<Option<T>, RouteError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(format!("invalid_{field}"))))
}
