use crate::model::Recipe;

/// Case-insensitive substring search over name, description and tags,
/// recomputed against the full in-memory list on every keystroke.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return recipes.iter().collect();
    }
    recipes
        .iter()
        .filter(|recipe| matches_recipe(recipe, &needle))
        .collect()
}

/// Name-only variant used by the planner's recipe picker.
pub fn filter_by_name<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return recipes.iter().collect();
    }
    recipes
        .iter()
        .filter(|recipe| recipe.name.to_lowercase().contains(&needle))
        .collect()
}

fn matches_recipe(recipe: &Recipe, needle: &str) -> bool {
    recipe.name.to_lowercase().contains(needle)
        || recipe
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn recipe(name: &str, description: Option<&str>, tags: &[&str]) -> Recipe {
        let stamp = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Recipe {
            id: 0,
            name: name.into(),
            description: description.map(Into::into),
            ingredients: Vec::new(),
            seasonings: Vec::new(),
            steps: Vec::new(),
            cooking_time: None,
            servings: None,
            difficulty: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rating: None,
            mastery_level: None,
            image_url: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn library() -> Vec<Recipe> {
        vec![
            recipe("西红柿炒鸡蛋", Some("十分钟快手菜"), &["家常", "快手"]),
            recipe("Mapo Tofu", Some("spicy sichuan classic"), &["川菜"]),
            recipe("清蒸鲈鱼", None, &[]),
        ]
    }

    #[test]
    fn matches_name_description_and_tags() {
        let recipes = library();
        assert_eq!(filter_recipes(&recipes, "西红").len(), 1);
        assert_eq!(filter_recipes(&recipes, "快手").len(), 1);
        assert_eq!(filter_recipes(&recipes, "川菜").len(), 1);
        assert_eq!(filter_recipes(&recipes, "nothing").len(), 0);
    }

    #[test]
    fn matching_ignores_case() {
        let recipes = library();
        assert_eq!(filter_recipes(&recipes, "MAPO").len(), 1);
        assert_eq!(filter_recipes(&recipes, "Sichuan").len(), 1);
    }

    #[test]
    fn empty_term_keeps_everything() {
        let recipes = library();
        assert_eq!(filter_recipes(&recipes, "").len(), recipes.len());
        assert_eq!(filter_by_name(&recipes, "").len(), recipes.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let recipes = library();
        let once: Vec<Recipe> = filter_recipes(&recipes, "家常")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_recipes(&once, "家常");
        assert_eq!(
            once.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
            twice.iter().map(|r| r.name.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn picker_only_looks_at_names() {
        let recipes = library();
        assert_eq!(filter_by_name(&recipes, "sichuan").len(), 0);
        assert_eq!(filter_by_name(&recipes, "mapo").len(), 1);
    }
}
