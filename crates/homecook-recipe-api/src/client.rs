use chrono::NaiveDate;
use reqwest::multipart;

use crate::form::RecipePayload;
use crate::model::{NewPlan, Plan, PlanGenerated, Recipe, RecipeQuery};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    EncodeList(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the backend answered 404 for the addressed resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Http(err) if err.status().map(|s| s.as_u16()) == Some(404)
        )
    }
}

/// Thin wrapper over the recipe backend's REST surface; one method per
/// endpoint, no business logic, no retries.
#[derive(Debug, Clone)]
pub struct RecipeApi {
    client: reqwest::Client,
    base: String,
}

impl RecipeApi {
    /// `base` is the API root, e.g. `http://127.0.0.1:8000/api`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_owned(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    pub async fn list_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, ApiError> {
        Ok(self
            .client
            .get(self.endpoint("recipes"))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe, ApiError> {
        Ok(self
            .client
            .get(self.endpoint(&format!("recipes/{id}")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        Ok(self
            .client
            .post(self.endpoint("recipes"))
            .multipart(recipe_form(payload)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn update_recipe(&self, id: i64, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        Ok(self
            .client
            .put(self.endpoint(&format!("recipes/{id}")))
            .multipart(recipe_form(payload)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(self.endpoint(&format!("recipes/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Plans whose date falls in `start..=end`.
    pub async fn list_plans(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Plan>, ApiError> {
        Ok(self
            .client
            .get(self.endpoint("plans"))
            .query(&[
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn create_plan(&self, plan: &NewPlan) -> Result<Plan, ApiError> {
        Ok(self
            .client
            .post(self.endpoint("plans"))
            .json(plan)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn delete_plan(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(self.endpoint(&format!("plans/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Ask the backend to randomly fill the coming `days`; the selection
    /// algorithm is entirely its own.
    pub async fn generate_plans(&self, days: u32) -> Result<PlanGenerated, ApiError> {
        Ok(self
            .client
            .post(self.endpoint("plans/generate"))
            .query(&[("days", days)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// The backend takes recipes as multipart: scalar text parts, the three
/// lists and tags JSON-encoded, the image as a binary part.
fn recipe_form(payload: &RecipePayload) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new()
        .text("name", payload.name.clone())
        .text("ingredients", serde_json::to_string(&payload.ingredients)?)
        .text("seasonings", serde_json::to_string(&payload.seasonings)?)
        .text("steps", serde_json::to_string(&payload.steps)?)
        .text("tags", serde_json::to_string(&payload.tags)?);

    if let Some(description) = &payload.description {
        form = form.text("description", description.clone());
    }
    if let Some(minutes) = payload.cooking_time {
        form = form.text("cooking_time", minutes.to_string());
    }
    if let Some(servings) = payload.servings {
        form = form.text("servings", servings.to_string());
    }
    if let Some(difficulty) = payload.difficulty {
        form = form.text("difficulty", difficulty.label());
    }
    if let Some(rating) = payload.rating {
        form = form.text("rating", rating.to_string());
    }
    if let Some(mastery) = payload.mastery_level {
        form = form.text("mastery_level", mastery.as_str());
    }
    if let Some(image) = &payload.image {
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        form = form.part("image", part);
    }

    Ok(form)
}
