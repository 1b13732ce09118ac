//! Client side of the recipe backend: wire types, the HTTP client and the
//! pure pieces of the UI (search filter, week window, form assembly, tags).

pub mod client;
pub mod filter;
pub mod form;
pub mod model;
pub mod tags;
pub mod week;

pub use client::{ApiError, RecipeApi};
pub use model::{
    Difficulty, Ingredient, MasteryLevel, NewPlan, Plan, PlanGenerated, Recipe, RecipeQuery,
};
pub use week::WeekWindow;
