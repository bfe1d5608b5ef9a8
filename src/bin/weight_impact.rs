//! Utility to print BMI, daily calorie needs and weight impact as JSON
//!
//! Usage: weight_impact <calories_per_day> [--days N] [--alternative KCAL]
//!        [--weight KG] [--height CM] [--age YEARS] [--gender male|female]
//!        [--activity LEVEL]

use foodswap::models::{ActivityLevel, Gender, UserProfile};
use foodswap::tools::body;

struct Args {
    calories: f64,
    days: u32,
    alternative: Option<f64>,
    profile: UserProfile,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut iter = args.iter();
    let calories = iter
        .next()
        .ok_or("Missing <calories_per_day>")?
        .parse::<f64>()
        .map_err(|e| format!("Invalid calories: {}", e))?;

    let mut parsed = Args {
        calories,
        days: 365,
        alternative: None,
        profile: UserProfile::default(),
    };

    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--days" => parsed.days = value.parse().map_err(|e| invalid(flag, e))?,
            "--alternative" => parsed.alternative = Some(value.parse().map_err(|e| invalid(flag, e))?),
            "--weight" => parsed.profile.weight_kg = Some(value.parse().map_err(|e| invalid(flag, e))?),
            "--height" => parsed.profile.height_cm = Some(value.parse().map_err(|e| invalid(flag, e))?),
            "--age" => parsed.profile.age_years = Some(value.parse().map_err(|e| invalid(flag, e))?),
            "--gender" => {
                parsed.profile.gender = Some(Gender::from_str(value).ok_or_else(|| invalid(flag, value))?)
            }
            "--activity" => {
                parsed.profile.activity_level =
                    Some(ActivityLevel::from_str(value).ok_or_else(|| invalid(flag, value))?)
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(parsed)
}

fn invalid(flag: &str, reason: impl std::fmt::Display) -> String {
    format!("Invalid value for {}: {}", flag, reason)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let impact = body::weight_impact(args.calories, args.days, args.alternative, &args.profile)?;
    let report = serde_json::json!({
        "bmi": body::profile_bmi(&args.profile),
        "daily_needs": body::daily_needs(&args.profile),
        "weight_impact": impact,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
