use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use homecook_recipe_api::{
    model::{Plan, Recipe},
    tags,
    week::{bucket_by_day, week_start, WeekWindow},
};

/// Seven day columns plus the anchors the UI needs for its prev / next /
/// today navigation.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub prev: NaiveDate,
    pub next: NaiveDate,
    pub today: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DayColumn {
    pub date: NaiveDate,
    pub weekday: String,
    pub entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlanEntry {
    pub id: i64,
    pub slot: String,
    pub is_completed: bool,
    pub recipe: RecipeCard,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RecipeCard {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub cooking_time: Option<u32>,
    pub tags: Vec<TagChip>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TagChip {
    pub name: String,
    pub color: &'static str,
}

impl WeekView {
    pub fn assemble(window: WeekWindow, plans: Vec<Plan>, today: NaiveDate) -> Self {
        let buckets = bucket_by_day(window, plans);
        let days = window
            .days()
            .zip(buckets)
            .map(|(date, entries)| DayColumn {
                date,
                weekday: date.weekday().to_string(),
                entries: entries
                    .into_iter()
                    .filter_map(PlanEntry::from_plan)
                    .collect(),
            })
            .collect();

        Self {
            start: window.start(),
            end: window.end(),
            prev: window.prev().start(),
            next: window.next().start(),
            today: week_start(today),
            days,
        }
    }
}

impl PlanEntry {
    fn from_plan(plan: Plan) -> Option<Self> {
        let Some(recipe) = plan.recipe else {
            // the backend did not join the recipe, nothing to render
            tracing::debug!("plan {} has no recipe join, not rendering", plan.id);
            return None;
        };

        Some(Self {
            id: plan.id,
            slot: plan.slot,
            is_completed: plan.is_completed,
            recipe: RecipeCard::from(recipe),
        })
    }
}

impl From<Recipe> for RecipeCard {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image_url: recipe.image_url,
            cooking_time: recipe.cooking_time,
            tags: recipe.tags.into_iter().map(TagChip::new).collect(),
        }
    }
}

impl TagChip {
    fn new(name: String) -> Self {
        let color = tags::tag_color(&name);
        Self { name, color }
    }
}

/// Detail view: the recipe as fetched, with one palette color per tag.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RecipeView {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub tag_colors: Vec<&'static str>,
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        let tag_colors = recipe.tags.iter().map(|t| tags::tag_color(t)).collect();
        Self { recipe, tag_colors }
    }
}

/// What the planner's recipe picker shows per row.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PickerEntry {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub cooking_time: Option<u32>,
}

impl From<&Recipe> for PickerEntry {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image_url: recipe.image_url.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recipe(id: i64, name: &str) -> Recipe {
        let stamp = date(2024, 6, 1).and_hms_opt(8, 0, 0).unwrap();
        Recipe {
            id,
            name: name.into(),
            description: None,
            ingredients: Vec::new(),
            seasonings: Vec::new(),
            steps: Vec::new(),
            cooking_time: Some(20),
            servings: None,
            difficulty: None,
            tags: vec!["家常".into()],
            rating: None,
            mastery_level: None,
            image_url: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn plan(id: i64, day: NaiveDate, recipe: Option<Recipe>) -> Plan {
        Plan {
            id,
            date: day,
            slot: "dinner".into(),
            recipe_id: recipe.as_ref().map(|r| r.id).unwrap_or(0),
            is_completed: false,
            recipe,
        }
    }

    #[test]
    fn scheduled_recipe_lands_in_its_day_column() {
        let window = WeekWindow::of(date(2024, 6, 12));
        let view = WeekView::assemble(
            window,
            vec![plan(1, date(2024, 6, 10), Some(recipe(5, "红烧肉")))],
            date(2024, 6, 12),
        );

        assert_eq!(view.start, date(2024, 6, 10));
        assert_eq!(view.end, date(2024, 6, 16));
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[0].entries.len(), 1);
        assert_eq!(view.days[0].entries[0].recipe.id, 5);
        for day in &view.days[1..] {
            assert!(day.entries.is_empty());
        }
    }

    #[test]
    fn entry_without_recipe_join_is_not_rendered() {
        let window = WeekWindow::of(date(2024, 6, 12));
        let view = WeekView::assemble(
            window,
            vec![
                plan(1, date(2024, 6, 10), None),
                plan(2, date(2024, 6, 10), Some(recipe(5, "红烧肉"))),
            ],
            date(2024, 6, 12),
        );

        let entries = &view.days[0].entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 2);
    }

    #[test]
    fn navigation_anchors_are_one_week_apart() {
        let view = WeekView::assemble(
            WeekWindow::of(date(2024, 6, 12)),
            Vec::new(),
            date(2024, 6, 20),
        );

        assert_eq!(view.prev, date(2024, 6, 3));
        assert_eq!(view.next, date(2024, 6, 17));
        // "today" resets to the current week's Monday, wherever we browsed to
        assert_eq!(view.today, date(2024, 6, 17));
    }

    #[test]
    fn tags_keep_their_palette_color() {
        let view = RecipeView::from(recipe(1, "红烧肉"));
        assert_eq!(view.tag_colors.len(), 1);
        assert_eq!(view.tag_colors[0], tags::tag_color("家常"));
    }
}
