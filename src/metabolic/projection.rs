//! Weight impact projections over time
//!
//! Turns a per-day calorie amount into projected weight change for a few
//! fixed horizons, for a single food and for a food/alternative pair.

use serde::Serialize;

use super::calculator::{daily_calorie_needs_or_default, weight_change_kg, weight_impact_kg, DEFAULT_DAILY_CALORIES};
use crate::models::UserProfile;
use crate::nutrition::round_to;

/// Share of daily needs above which a single food is flagged
pub const HIGH_SHARE_THRESHOLD: f64 = 0.3;

/// Weight differences below this are reported as "Same"
pub const NEGLIGIBLE_KG: f64 = 0.1;

/// Comparison horizons as (label, days)
pub const HORIZONS: [(&str, u32); 5] = [
    ("1 week", 7),
    ("1 month", 30),
    ("3 months", 90),
    ("6 months", 180),
    ("1 year", 365),
];

/// Projected gain from eating one food every day
#[derive(Debug, Clone, Serialize)]
pub struct IntakeProjection {
    pub weekly_gain_kg: f64,
    pub monthly_gain_kg: f64,
    pub daily_needs_kcal: f64,
    pub percent_of_daily_needs: f64,
    pub high_share: bool,
    pub personalized: bool,
}

/// Projection for a food eaten daily; None when it has no calories
pub fn project_intake(calories: f64, profile: &UserProfile) -> Option<IntakeProjection> {
    if !(calories > 0.0) {
        return None;
    }

    let daily_needs = daily_calorie_needs_or_default(profile);
    let share = calories / daily_needs;

    Some(IntakeProjection {
        weekly_gain_kg: round_to(weight_impact_kg(calories * 7.0, profile), 1),
        monthly_gain_kg: round_to(weight_impact_kg(calories * 30.0, profile), 1),
        daily_needs_kcal: daily_needs,
        percent_of_daily_needs: round_to(share * 100.0, 0),
        high_share: share > HIGH_SHARE_THRESHOLD,
        personalized: profile.has_body_metrics(),
    })
}

/// One horizon of a food/alternative comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub period: &'static str,
    pub days: u32,
    pub original_gain_kg: f64,
    pub alternative_gain_kg: f64,
    /// Positive means the alternative leads to less gain
    pub savings_kg: f64,
    /// Unrounded savings; thresholds are applied to this
    #[serde(skip)]
    exact_savings_kg: f64,
}

impl ComparisonRow {
    pub fn is_negligible(&self) -> bool {
        self.exact_savings_kg.abs() <= NEGLIGIBLE_KG
    }
}

/// Overall judgement based on the one-year savings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsVerdict {
    Excellent,
    Smart,
    Similar,
}

impl SavingsVerdict {
    pub fn from_yearly_savings(kg: f64) -> Self {
        if kg > 1.0 {
            SavingsVerdict::Excellent
        } else if kg > NEGLIGIBLE_KG {
            SavingsVerdict::Smart
        } else {
            SavingsVerdict::Similar
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightComparison {
    /// Positive means the alternative has fewer calories
    pub calorie_savings: f64,
    pub rows: Vec<ComparisonRow>,
    pub yearly_savings_kg: f64,
    pub verdict: SavingsVerdict,
}

impl WeightComparison {
    pub fn summary(&self) -> String {
        match self.verdict {
            SavingsVerdict::Excellent => format!(
                "Excellent choice! You could avoid gaining {:.1}kg per year by choosing the alternative daily.",
                self.yearly_savings_kg
            ),
            SavingsVerdict::Smart => format!(
                "Smart choice! You could save {:.1}kg per year with this alternative.",
                self.yearly_savings_kg
            ),
            SavingsVerdict::Similar => {
                "Both foods have similar weight impact when consumed daily.".to_string()
            }
        }
    }
}

/// Compare daily consumption of two foods across all horizons
///
/// Per horizon only the calories above an even share of the 2000 kcal
/// reference (2000 / days) count as excess.
pub fn compare_weight_impact(original_kcal: f64, alternative_kcal: f64, profile: &UserProfile) -> WeightComparison {
    let rows: Vec<ComparisonRow> = HORIZONS
        .iter()
        .map(|(period, days)| {
            let days_f = f64::from(*days);
            let allowance = DEFAULT_DAILY_CALORIES / days_f;
            let original_excess = (original_kcal - allowance).max(0.0);
            let alternative_excess = (alternative_kcal - allowance).max(0.0);

            let original_gain = weight_impact_kg(original_excess * days_f, profile);
            let alternative_gain = weight_impact_kg(alternative_excess * days_f, profile);

            ComparisonRow {
                period: *period,
                days: *days,
                original_gain_kg: round_to(original_gain, 1),
                alternative_gain_kg: round_to(alternative_gain, 1),
                savings_kg: round_to(original_gain - alternative_gain, 1),
                exact_savings_kg: original_gain - alternative_gain,
            }
        })
        .collect();

    let yearly = rows.last().map(|r| r.exact_savings_kg).unwrap_or(0.0);

    WeightComparison {
        calorie_savings: round_to(original_kcal - alternative_kcal, 2),
        rows,
        yearly_savings_kg: round_to(yearly, 1),
        verdict: SavingsVerdict::from_yearly_savings(yearly),
    }
}

/// Signed kg difference from swapping one daily calorie amount for another
pub fn daily_swap_savings_kg(original_kcal: f64, alternative_kcal: f64, days: u32, profile: &UserProfile) -> f64 {
    weight_change_kg((original_kcal - alternative_kcal) * f64::from(days), profile)
}
