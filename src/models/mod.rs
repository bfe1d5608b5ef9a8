//! Data models
//!
//! Plain records shared by the extractor, calculator and matcher.

mod food;
mod nutrition;
mod profile;

pub use food::{FoodRecord, RawId};
pub use nutrition::{NutrientKey, Nutrition};
pub use profile::{ActivityLevel, BmiCategory, Gender, UserProfile};

pub(crate) use profile::positive;
