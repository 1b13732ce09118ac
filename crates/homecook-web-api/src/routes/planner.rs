use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use homecook_recipe_api::{filter, model::NewPlan, PlanGenerated, WeekWindow};

use super::store::RecipeStore;
use super::views::{PickerEntry, WeekView};
use super::RouteError;

#[derive(Default, Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum RelativeAnchor {
    #[default]
    Today,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum PlannerAnchor {
    Relative(RelativeAnchor),
    Date(NaiveDate),
}

impl PlannerAnchor {
    fn as_window(&self) -> WeekWindow {
        let anchor = match self {
            PlannerAnchor::Relative(RelativeAnchor::Today) => today(),
            PlannerAnchor::Date(d) => *d,
        };
        WeekWindow::of(anchor)
    }
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[derive(Debug, Default, serde::Deserialize)]
pub(super) struct WeekQuery {
    anchor: Option<PlannerAnchor>,
}

pub(super) async fn week(
    Query(q): Query<WeekQuery>,
    State(store): State<RecipeStore>,
) -> Result<Json<WeekView>, RouteError> {
    let window = q
        .anchor
        .unwrap_or(PlannerAnchor::Relative(RelativeAnchor::Today))
        .as_window();
    load_window(&store, window).await
}

async fn load_window(
    store: &RecipeStore,
    window: WeekWindow,
) -> Result<Json<WeekView>, RouteError> {
    let plans = store
        .api()
        .list_plans(window.start(), window.end())
        .await
        .map_err(|err| {
            tracing::error!(
                "could not load plans {}..{}: {err}",
                window.start(),
                window.end()
            );
            (StatusCode::BAD_GATEWAY, Json(format!("plan_load_failed")))
        })?;

    Ok(Json(WeekView::assemble(window, plans, today())))
}

#[derive(Debug, Default, serde::Deserialize)]
pub(super) struct PickerQuery {
    q: Option<String>,
}

pub(super) async fn picker(
    Query(query): Query<PickerQuery>,
    State(store): State<RecipeStore>,
) -> Result<Json<Vec<PickerEntry>>, RouteError> {
    let recipes = store.list().await.map_err(|err| {
        tracing::error!("could not load recipes for the picker: {err}");
        (StatusCode::BAD_GATEWAY, Json(format!("recipe_load_failed")))
    })?;

    let term = query.q.unwrap_or_default();
    Ok(Json(
        filter::filter_by_name(&recipes, &term)
            .into_iter()
            .map(PickerEntry::from)
            .collect(),
    ))
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct NewEntry {
    date: NaiveDate,
    recipe_id: i64,
    #[serde(rename = "type")]
    slot: Option<String>,
}

pub(super) async fn add_entry(
    State(store): State<RecipeStore>,
    Json(entry): Json<NewEntry>,
) -> Result<Json<WeekView>, RouteError> {
    let plan = match entry.slot {
        Some(slot) => NewPlan::with_slot(entry.date, entry.recipe_id, slot),
        None => NewPlan::new(entry.date, entry.recipe_id),
    };

    store.api().create_plan(&plan).await.map_err(|err| {
        tracing::error!(
            "could not schedule recipe {} on {}: {err}",
            plan.recipe_id,
            plan.date
        );
        (StatusCode::BAD_GATEWAY, Json(format!("plan_save_failed")))
    })?;

    // no optimistic update: show whatever the backend now has
    load_window(&store, WeekWindow::of(entry.date)).await
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct RemoveQuery {
    anchor: NaiveDate,
}

pub(super) async fn remove_entry(
    Path(id): Path<i64>,
    Query(q): Query<RemoveQuery>,
    State(store): State<RecipeStore>,
) -> Result<Json<WeekView>, RouteError> {
    store.api().delete_plan(id).await.map_err(|err| {
        tracing::error!("could not delete plan {id}: {err}");
        (StatusCode::BAD_GATEWAY, Json(format!("plan_delete_failed")))
    })?;

    load_window(&store, WeekWindow::of(q.anchor)).await
}

#[derive(Debug, Default, serde::Deserialize)]
pub(super) struct GenerateQuery {
    days: Option<u32>,
}

pub(super) async fn generate(
    Query(q): Query<GenerateQuery>,
    State(store): State<RecipeStore>,
) -> Result<Json<PlanGenerated>, RouteError> {
    let days = q.days.unwrap_or(7);
    let outcome = store.api().generate_plans(days).await.map_err(|err| {
        tracing::error!("could not generate plans for {days} days: {err}");
        (StatusCode::BAD_GATEWAY, Json(format!("generate_failed")))
    })?;

    Ok(Json(outcome))
}
