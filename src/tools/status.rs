//! FoodSwap Status Tool
//!
//! Provides runtime status information about the FoodSwap service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::source::SourceKind;

/// Usage guide for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# FoodSwap Usage Instructions

FoodSwap looks up nutrition facts for a food and suggests lower-calorie
alternatives, with weight impact projections personalized to a body profile.

## Typical Flow

1. `search_food` with a plain food name ("pizza", "cheddar cheese") or a
   brand product. Returns the best match with all nutrients per 100g and up
   to 6 lower-calorie alternatives, each with an `index`.
2. `get_alternative` with one of those indexes. Returns the full nutrition
   card and marks it as the selected alternative.
3. `compare_foods` compares the searched food with the selected alternative
   over 1 week, 1 month, 3 months, 6 months and 1 year of daily eating.

A new `search_food` replaces the previous food, its alternatives and the
selection.

## Profile Fields

`search_food`, `get_alternative`, `compare_foods`, `daily_calorie_needs`
and `weight_impact` accept optional profile fields:

- `weight_kg`, `height_cm`, `age_years`
- `gender`: "male" or "female"
- `activity_level`: "sedentary", "light", "moderate", "active", "very_active"

Without weight, height and age, projections use a 2000 kcal/day reference.
Daily needs use the Mifflin-St Jeor equation and also require gender; the
activity level defaults to moderate.

## Weight Math

- 7700 kcal is treated as 1 kg of body weight.
- Projections scale by daily needs / 2000 when the profile is complete.
- A single food above 30% of daily needs is flagged as a high share.

## Account

`current_user`, `logout`, `get_profile` and `save_profile` talk to the
backend account endpoints. `save_profile` needs at least one field.

## Notes

- Values below 0.1 are reported as 0.
- Missing nutrients are 0, not unknown.
- An empty alternative list is a normal result, not an error.
"#;

/// Runtime status of the FoodSwap service
#[derive(Debug, Clone, Serialize)]
pub struct FoodSwapStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Backend information
    pub backend_url: String,
    pub food_source: &'static str,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    backend_url: String,
    food_source: SourceKind,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(backend_url: impl Into<String>, food_source: SourceKind) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            backend_url: backend_url.into(),
            food_source,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> FoodSwapStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FoodSwapStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            backend_url: self.backend_url.clone(),
            food_source: self.food_source.as_str(),
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_backend() {
        let tracker = StatusTracker::new("http://127.0.0.1:5000", SourceKind::Usda);
        let status = tracker.get_status();
        assert_eq!(status.backend_url, "http://127.0.0.1:5000");
        assert_eq!(status.food_source, "usda");
        assert_eq!(status.process_id, std::process::id());
        assert!(status.started_at <= Utc::now());
    }
}
