//! Body metric formulas
//!
//! BMI, Mifflin-St Jeor daily needs, and calorie-to-weight conversion. All
//! functions are pure.

use crate::models::{positive, ActivityLevel, BmiCategory, Gender, UserProfile};
use crate::nutrition::KCAL_PER_KG;

/// Daily intake assumed when the profile cannot produce an estimate
pub const DEFAULT_DAILY_CALORIES: f64 = 2000.0;

/// Body Mass Index, weight(kg) / height(m)^2
///
/// None when either input is zero, negative or not finite.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let weight = positive(Some(weight_kg))?;
    let height_m = positive(Some(height_cm))? / 100.0;
    Some(weight / (height_m * height_m))
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    BmiCategory::from_bmi(bmi)
}

/// Mifflin-St Jeor basal metabolic rate
///
/// Formula: BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + offset
/// - Men: +5
/// - Women: -161
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + offset
}

/// Estimated daily calorie needs, rounded to the nearest kcal
///
/// None when weight, height, age or gender is missing; callers substitute
/// [`DEFAULT_DAILY_CALORIES`]. An unset activity level counts as moderate.
pub fn daily_calorie_needs(profile: &UserProfile) -> Option<f64> {
    let weight = positive(profile.weight_kg)?;
    let height = positive(profile.height_cm)?;
    let age = profile.age_years.filter(|a| *a > 0)?;
    let gender = profile.gender?;

    let activity = profile.activity_level.unwrap_or_default();
    let bmr = basal_metabolic_rate(weight, height, age, gender);
    Some((bmr * activity.factor()).round())
}

/// Daily needs or the 2000 kcal default
pub fn daily_calorie_needs_or_default(profile: &UserProfile) -> f64 {
    daily_calorie_needs(profile).unwrap_or(DEFAULT_DAILY_CALORIES)
}

/// Ratio of the profile's daily needs to the 2000 kcal reference
///
/// Only applies when weight, height and age are known; otherwise 1. Never
/// zero or negative.
pub fn metabolic_factor(profile: &UserProfile) -> f64 {
    if !profile.has_body_metrics() {
        return 1.0;
    }
    let needs = daily_calorie_needs_or_default(profile);
    if needs > 0.0 {
        needs / DEFAULT_DAILY_CALORIES
    } else {
        1.0
    }
}

/// Signed weight change in kg for a calorie surplus (positive) or deficit
pub fn weight_change_kg(calorie_delta: f64, profile: &UserProfile) -> f64 {
    (calorie_delta / KCAL_PER_KG) / metabolic_factor(profile)
}

/// Magnitude of the weight change, for "weight gained" style display
pub fn weight_impact_kg(calorie_delta: f64, profile: &UserProfile) -> f64 {
    weight_change_kg(calorie_delta, profile).abs()
}

/// Activity factor that will be applied for this profile
pub fn activity_factor(profile: &UserProfile) -> f64 {
    profile
        .activity_level
        .unwrap_or(ActivityLevel::Moderate)
        .factor()
}
