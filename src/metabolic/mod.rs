//! Metabolic calculations
//!
//! BMI, daily calorie needs and weight impact projections.

pub mod calculator;
pub mod projection;

pub use calculator::{
    basal_metabolic_rate, bmi, bmi_category, daily_calorie_needs, daily_calorie_needs_or_default,
    metabolic_factor, weight_change_kg, weight_impact_kg, DEFAULT_DAILY_CALORIES,
};
pub use projection::{
    compare_weight_impact, daily_swap_savings_kg, project_intake, ComparisonRow, IntakeProjection,
    SavingsVerdict, WeightComparison, HORIZONS,
};
