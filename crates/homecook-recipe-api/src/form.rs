use crate::model::{Difficulty, Ingredient, MasteryLevel, Recipe};
use crate::tags::parse_tags;

/// Editable state of the recipe form. The three repeatable lists are
/// addressed by index and keep their order; blanks survive while editing
/// and are only dropped when the draft is built for submission.
#[derive(Debug, Default, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub rating: Option<u8>,
    pub mastery_level: Option<MasteryLevel>,
    /// free text, comma separated
    pub tags: String,
    pub ingredients: Vec<IngredientField>,
    pub seasonings: Vec<String>,
    pub steps: Vec<String>,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngredientField {
    pub name: String,
    pub amount: String,
}

#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("recipe name is required")]
    NameRequired,
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
}

impl RecipeDraft {
    /// Pre-fill the form for editing an existing recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            cooking_time: recipe.cooking_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            rating: recipe.rating,
            mastery_level: recipe.mastery_level,
            tags: recipe.tags.join(", "),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| IngredientField {
                    name: i.name.clone(),
                    amount: i.amount.clone(),
                })
                .collect(),
            seasonings: recipe.seasonings.clone(),
            steps: recipe.steps.clone(),
            image: None,
        }
    }

    /// Append a blank ingredient row, returning its index.
    pub fn add_ingredient(&mut self) -> usize {
        self.ingredients.push(IngredientField::default());
        self.ingredients.len() - 1
    }

    pub fn update_ingredient_name(&mut self, index: usize, name: impl Into<String>) {
        match self.ingredients.get_mut(index) {
            Some(row) => row.name = name.into(),
            None => tracing::warn!("tried to update nonexistent ingredient {index}"),
        }
    }

    pub fn update_ingredient_amount(&mut self, index: usize, amount: impl Into<String>) {
        match self.ingredients.get_mut(index) {
            Some(row) => row.amount = amount.into(),
            None => tracing::warn!("tried to update nonexistent ingredient {index}"),
        }
    }

    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        } else {
            tracing::warn!("tried to remove nonexistent ingredient {index}");
        }
    }

    pub fn add_seasoning(&mut self) -> usize {
        self.seasonings.push(String::new());
        self.seasonings.len() - 1
    }

    pub fn update_seasoning(&mut self, index: usize, value: impl Into<String>) {
        match self.seasonings.get_mut(index) {
            Some(row) => *row = value.into(),
            None => tracing::warn!("tried to update nonexistent seasoning {index}"),
        }
    }

    pub fn remove_seasoning(&mut self, index: usize) {
        if index < self.seasonings.len() {
            self.seasonings.remove(index);
        } else {
            tracing::warn!("tried to remove nonexistent seasoning {index}");
        }
    }

    pub fn add_step(&mut self) -> usize {
        self.steps.push(String::new());
        self.steps.len() - 1
    }

    pub fn update_step(&mut self, index: usize, value: impl Into<String>) {
        match self.steps.get_mut(index) {
            Some(row) => *row = value.into(),
            None => tracing::warn!("tried to update nonexistent step {index}"),
        }
    }

    pub fn remove_step(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        } else {
            tracing::warn!("tried to remove nonexistent step {index}");
        }
    }

    /// Clean the draft into a submittable payload. Rejects before anything
    /// touches the network: a blank name never leaves the client.
    pub fn build(&self) -> Result<RecipePayload, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::NameRequired);
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(FormError::RatingOutOfRange(rating));
            }
        }

        // an ingredient row is blank when its name is; amount alone says nothing
        let ingredients = self
            .ingredients
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| Ingredient {
                name: row.name.trim().to_owned(),
                amount: row.amount.trim().to_owned(),
            })
            .collect();

        Ok(RecipePayload {
            name: name.to_owned(),
            description: non_blank(&self.description),
            cooking_time: self.cooking_time,
            servings: self.servings,
            difficulty: self.difficulty,
            rating: self.rating,
            mastery_level: self.mastery_level,
            tags: parse_tags(&self.tags),
            ingredients,
            seasonings: drop_blank(&self.seasonings),
            steps: drop_blank(&self.steps),
            image: self.image.clone(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn drop_blank(values: &[String]) -> Vec<String> {
    values.iter().filter_map(|v| non_blank(v)).collect()
}

/// What actually goes over the wire; the client serializes this to the
/// backend's multipart shape.
#[derive(Debug, Clone)]
pub struct RecipePayload {
    pub name: String,
    pub description: Option<String>,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub rating: Option<u8>,
    pub mastery_level: Option<MasteryLevel>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub seasonings: Vec<String>,
    pub steps: Vec<String>,
    pub image: Option<ImageUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_never_builds() {
        let draft = RecipeDraft {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(draft.build().unwrap_err(), FormError::NameRequired);
    }

    #[test]
    fn rating_must_stay_in_range() {
        let mut draft = RecipeDraft {
            name: "红烧肉".into(),
            rating: Some(6),
            ..Default::default()
        };
        assert_eq!(draft.build().unwrap_err(), FormError::RatingOutOfRange(6));

        draft.rating = Some(5);
        assert!(draft.build().is_ok());
    }

    #[test]
    fn blank_rows_are_dropped_in_order() {
        let mut draft = RecipeDraft {
            name: "红烧肉".into(),
            ..Default::default()
        };

        let i = draft.add_ingredient();
        draft.update_ingredient_name(i, "五花肉");
        draft.update_ingredient_amount(i, "500g");
        draft.add_ingredient(); // left blank
        let i = draft.add_ingredient();
        draft.update_ingredient_amount(i, "2个"); // amount without a name is blank too
        let i = draft.add_ingredient();
        draft.update_ingredient_name(i, "冰糖");

        draft.seasonings = vec!["盐".into(), "".into(), "  ".into(), "糖".into()];
        draft.steps = vec!["焯水".into(), " ".into(), "慢炖一小时".into()];

        let payload = draft.build().unwrap();
        assert_eq!(
            payload
                .ingredients
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>(),
            vec!["五花肉", "冰糖"]
        );
        assert_eq!(payload.seasonings, vec!["盐", "糖"]);
        assert_eq!(payload.steps, vec!["焯水", "慢炖一小时"]);
    }

    #[test]
    fn tag_field_splits_on_both_commas() {
        let draft = RecipeDraft {
            name: "红烧肉".into(),
            tags: "家常, 硬菜，下饭 ,".into(),
            ..Default::default()
        };
        assert_eq!(draft.build().unwrap().tags, vec!["家常", "硬菜", "下饭"]);
    }

    #[test]
    fn updates_address_rows_in_place_and_removals_shift() {
        let mut draft = RecipeDraft::default();
        draft.add_seasoning();
        draft.add_seasoning();
        draft.update_seasoning(0, "生抽");
        draft.update_seasoning(1, "老抽");
        draft.remove_seasoning(0);
        assert_eq!(draft.seasonings, vec!["老抽"]);

        // out-of-range indexes are ignored
        draft.update_seasoning(5, "蚝油");
        draft.remove_seasoning(5);
        assert_eq!(draft.seasonings, vec!["老抽"]);
    }

    #[test]
    fn editing_prefills_from_the_recipe() {
        let stamp = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let recipe = Recipe {
            id: 7,
            name: "清蒸鲈鱼".into(),
            description: Some("十五分钟".into()),
            ingredients: vec![Ingredient {
                name: "鲈鱼".into(),
                amount: "1条".into(),
            }],
            seasonings: vec!["蒸鱼豉油".into()],
            steps: vec!["上锅蒸八分钟".into()],
            cooking_time: Some(15),
            servings: Some(2),
            difficulty: Some(Difficulty::Easy),
            tags: vec!["海鲜".into(), "清淡".into()],
            rating: Some(4),
            mastery_level: Some(MasteryLevel::Skilled),
            image_url: None,
            created_at: stamp,
            updated_at: stamp,
        };

        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.tags, "海鲜, 清淡");
        assert_eq!(draft.ingredients.len(), 1);

        let payload = draft.build().unwrap();
        assert_eq!(payload.name, "清蒸鲈鱼");
        assert_eq!(payload.tags, vec!["海鲜", "清淡"]);
        assert_eq!(payload.difficulty, Some(Difficulty::Easy));
    }
}
