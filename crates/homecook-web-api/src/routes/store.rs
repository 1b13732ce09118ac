use std::sync::Arc;

use homecook_recipe_api::{form::RecipePayload, ApiError, Recipe, RecipeApi, RecipeQuery};
use tokio::sync::RwLock;

const PAGE_SIZE: u32 = 100;

/// Process-local copy of the recipe list. Everything here is transient and
/// re-fetchable; a mutation never patches the cache, it throws it away and
/// loads the backend's current truth instead.
#[derive(Clone)]
pub(crate) struct RecipeStore {
    api: RecipeApi,
    recipes: Arc<RwLock<Option<Vec<Recipe>>>>,
}

impl RecipeStore {
    pub fn new(api: RecipeApi) -> Self {
        Self {
            api,
            recipes: Arc::new(RwLock::new(None)),
        }
    }

    pub fn api(&self) -> &RecipeApi {
        &self.api
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, ApiError> {
        let data = self.recipes.read().await;

        if let Some(recipes) = data.as_ref() {
            Ok(recipes.clone())
        } else {
            drop(data);
            self.refresh().await
        }
    }

    /// Replace the cache with the full upstream list, page by page.
    pub async fn refresh(&self) -> Result<Vec<Recipe>, ApiError> {
        let mut all = Vec::new();
        loop {
            let page = self
                .api
                .list_recipes(&RecipeQuery::page(all.len() as u32, PAGE_SIZE))
                .await?;
            let filled = page.len() as u32 == PAGE_SIZE;
            all.extend(page);
            if !filled {
                break;
            }
        }

        *self.recipes.write().await = Some(all.clone());
        Ok(all)
    }

    pub async fn save_new(&self, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        let recipe = self.api.create_recipe(payload).await?;
        self.refetch_after_mutation().await;
        Ok(recipe)
    }

    pub async fn save_existing(&self, id: i64, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        let recipe = self.api.update_recipe(id, payload).await?;
        self.refetch_after_mutation().await;
        Ok(recipe)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_recipe(id).await?;
        self.refetch_after_mutation().await;
        Ok(())
    }

    /// The mutation itself already succeeded; a failed refetch only leaves
    /// the cache stale until the next refresh.
    async fn refetch_after_mutation(&self) {
        if let Err(err) = self.refresh().await {
            tracing::error!("could not refetch recipes after mutation: {err}");
        }
    }
}
