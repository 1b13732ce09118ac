use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A recipe as the backend returns it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub seasonings: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    /// minutes
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 1 to 5
    pub rating: Option<u8>,
    pub mastery_level: Option<MasteryLevel>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    /// free text, "200g", "2个", ...
    pub amount: String,
}

/// Difficulty carries the backend's literal labels on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    #[serde(rename = "简单")]
    Easy,
    #[serde(rename = "中等")]
    Medium,
    #[serde(rename = "困难")]
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "简单",
            Self::Medium => "中等",
            Self::Hard => "困难",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "简单" => Some(Self::Easy),
            "中等" => Some(Self::Medium),
            "困难" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    NeverTried,
    Novice,
    Skilled,
    Master,
}

impl MasteryLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NeverTried => "never_tried",
            Self::Novice => "novice",
            Self::Skilled => "skilled",
            Self::Master => "master",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "never_tried" => Some(Self::NeverTried),
            "novice" => Some(Self::Novice),
            "skilled" => Some(Self::Skilled),
            "master" => Some(Self::Master),
            _ => None,
        }
    }
}

/// One scheduled slot on the calendar. `recipe` is the backend's join and
/// may be missing; rendering drops such entries.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Plan {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub slot: String,
    pub recipe_id: i64,
    #[serde(default)]
    pub is_completed: bool,
    pub recipe: Option<Recipe>,
}

/// Create body for `POST /api/plans`.
#[derive(Debug, Serialize, Clone)]
pub struct NewPlan {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub slot: String,
    pub recipe_id: i64,
}

impl NewPlan {
    /// The slot the UI schedules into when none is picked explicitly.
    pub const DEFAULT_SLOT: &'static str = "dinner";

    pub fn new(date: NaiveDate, recipe_id: i64) -> Self {
        Self {
            date,
            slot: Self::DEFAULT_SLOT.into(),
            recipe_id,
        }
    }

    pub fn with_slot(date: NaiveDate, recipe_id: i64, slot: impl Into<String>) -> Self {
        Self {
            date,
            slot: slot.into(),
            recipe_id,
        }
    }
}

/// Ack of `POST /api/plans/generate`; opaque beyond the counters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanGenerated {
    pub message: String,
    pub count: u32,
}

/// Query string of `GET /api/recipes`.
#[derive(Debug, Serialize, Clone)]
pub struct RecipeQuery {
    pub skip: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_level: Option<MasteryLevel>,
}

impl RecipeQuery {
    pub fn page(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit,
            ..Default::default()
        }
    }
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            // the backend's own default page size
            limit: 100,
            tag: None,
            rating: None,
            mastery_level: None,
        }
    }
}
