//! Body metric tools: BMI, daily calorie needs and weight impact

use serde::Serialize;

use crate::metabolic::calculator::activity_factor;
use crate::metabolic::{
    basal_metabolic_rate, bmi, daily_calorie_needs, daily_calorie_needs_or_default, metabolic_factor,
    compare_weight_impact, weight_change_kg, WeightComparison, DEFAULT_DAILY_CALORIES,
};
use crate::models::{positive, BmiCategory, UserProfile};
use crate::nutrition::round_to;

#[derive(Debug, Serialize)]
pub struct BmiReport {
    /// One decimal
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: &'static str,
    pub recommendation: &'static str,
}

pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<BmiReport, String> {
    let value = bmi(weight_kg, height_cm)
        .ok_or_else(|| "Please enter valid weight and height".to_string())?;
    let category = BmiCategory::from_bmi(value);

    Ok(BmiReport {
        bmi: round_to(value, 1),
        category,
        category_label: category.as_str(),
        recommendation: category.recommendation(),
    })
}

/// BMI report when the profile has both weight and height
pub fn profile_bmi(profile: &UserProfile) -> Option<BmiReport> {
    let weight = positive(profile.weight_kg)?;
    let height = positive(profile.height_cm)?;
    calculate_bmi(weight, height).ok()
}

#[derive(Debug, Serialize)]
pub struct DailyNeedsReport {
    pub daily_calories: f64,
    /// False when the 2000 kcal reference was used
    pub estimated: bool,
    pub bmr: Option<f64>,
    pub activity_factor: f64,
    pub missing_fields: Vec<&'static str>,
}

pub fn daily_needs(profile: &UserProfile) -> DailyNeedsReport {
    let mut missing = Vec::new();
    if positive(profile.weight_kg).is_none() {
        missing.push("weight_kg");
    }
    if positive(profile.height_cm).is_none() {
        missing.push("height_cm");
    }
    if profile.age_years.filter(|a| *a > 0).is_none() {
        missing.push("age_years");
    }
    if profile.gender.is_none() {
        missing.push("gender");
    }

    let needs = daily_calorie_needs(profile);
    let bmr = match (profile.weight_kg, profile.height_cm, profile.age_years, profile.gender) {
        (Some(w), Some(h), Some(a), Some(g)) if needs.is_some() => {
            Some(round_to(basal_metabolic_rate(w, h, a, g), 0))
        }
        _ => None,
    };

    DailyNeedsReport {
        daily_calories: needs.unwrap_or(DEFAULT_DAILY_CALORIES),
        estimated: needs.is_some(),
        bmr,
        activity_factor: activity_factor(profile),
        missing_fields: missing,
    }
}

#[derive(Debug, Serialize)]
pub struct WeightImpactReport {
    pub calories_per_day: f64,
    pub days: u32,
    pub total_calories: f64,
    /// Signed; negative for a deficit
    pub weight_change_kg: f64,
    pub daily_needs_kcal: f64,
    pub metabolic_factor: f64,
    /// Present when an alternative calorie amount was given
    pub comparison: Option<WeightComparison>,
}

/// Weight change from eating `calories` extra per day for `days`
pub fn weight_impact(
    calories: f64,
    days: u32,
    alternative_calories: Option<f64>,
    profile: &UserProfile,
) -> Result<WeightImpactReport, String> {
    if !calories.is_finite() {
        return Err("Calories must be a number".to_string());
    }
    if days == 0 {
        return Err("Days must be at least 1".to_string());
    }

    let total = calories * f64::from(days);
    let comparison = alternative_calories
        .filter(|c| c.is_finite())
        .map(|alt| compare_weight_impact(calories, alt, profile));

    Ok(WeightImpactReport {
        calories_per_day: calories,
        days,
        total_calories: round_to(total, 2),
        weight_change_kg: round_to(weight_change_kg(total, profile), 2),
        daily_needs_kcal: daily_calorie_needs_or_default(profile),
        metabolic_factor: round_to(metabolic_factor(profile), 3),
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender};

    fn full_profile() -> UserProfile {
        UserProfile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age_years: Some(30),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::Moderate),
        }
    }

    #[test]
    fn test_calculate_bmi() {
        let report = calculate_bmi(70.0, 175.0).unwrap();
        assert_eq!(report.bmi, 22.9);
        assert_eq!(report.category, BmiCategory::Normal);
        assert_eq!(report.category_label, "Normal");

        let report = calculate_bmi(95.0, 175.0).unwrap();
        assert_eq!(report.category, BmiCategory::Obese);

        assert!(calculate_bmi(0.0, 175.0).is_err());
    }

    #[test]
    fn test_profile_bmi_needs_both() {
        assert!(profile_bmi(&UserProfile::default()).is_none());
        assert!(profile_bmi(&full_profile()).is_some());
    }

    #[test]
    fn test_daily_needs_full_profile() {
        let report = daily_needs(&full_profile());
        assert!(report.estimated);
        assert_eq!(report.daily_calories, 2556.0);
        assert_eq!(report.bmr, Some(1649.0));
        assert!(report.missing_fields.is_empty());
    }

    #[test]
    fn test_daily_needs_fallback() {
        let profile = UserProfile {
            weight_kg: Some(70.0),
            ..Default::default()
        };
        let report = daily_needs(&profile);
        assert!(!report.estimated);
        assert_eq!(report.daily_calories, 2000.0);
        assert_eq!(report.bmr, None);
        assert_eq!(report.missing_fields, vec!["height_cm", "age_years", "gender"]);
        assert_eq!(report.activity_factor, 1.55);
    }

    #[test]
    fn test_weight_impact_baseline() {
        let report = weight_impact(7700.0 / 30.0, 30, None, &UserProfile::default()).unwrap();
        assert_eq!(report.weight_change_kg, 1.0);
        assert_eq!(report.metabolic_factor, 1.0);
        assert!(report.comparison.is_none());
    }

    #[test]
    fn test_weight_impact_deficit_is_negative() {
        let report = weight_impact(-500.0, 7, None, &UserProfile::default()).unwrap();
        assert!(report.weight_change_kg < 0.0);
    }

    #[test]
    fn test_weight_impact_with_alternative() {
        let report = weight_impact(500.0, 365, Some(300.0), &UserProfile::default()).unwrap();
        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.rows.len(), 5);
        assert_eq!(comparison.calorie_savings, 200.0);
    }

    #[test]
    fn test_weight_impact_rejects_zero_days() {
        assert!(weight_impact(100.0, 0, None, &UserProfile::default()).is_err());
    }
}
