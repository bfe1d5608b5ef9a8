//! Lookup session state
//!
//! Holds the current food, its alternatives and the selected alternative.
//! Searches are ticketed so a slow response can never overwrite the result of
//! a newer search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;

use crate::models::FoodRecord;

/// Issued when a search starts; only the newest ticket may commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Snapshot of the session
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    pub current_food: Option<FoodRecord>,
    pub alternatives: Vec<FoodRecord>,
    pub selected: Option<usize>,
}

impl Selection {
    pub fn selected_alternative(&self) -> Option<&FoodRecord> {
        self.selected.and_then(|i| self.alternatives.get(i))
    }
}

#[derive(Default)]
pub struct LookupSession {
    generation: AtomicU64,
    state: Mutex<Selection>,
}

impl LookupSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search, invalidating every earlier ticket
    pub fn begin_search(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Replace the whole selection if `ticket` is still the newest search
    ///
    /// Returns false (and leaves state untouched) for stale tickets.
    pub fn commit(&self, ticket: SearchTicket, food: FoodRecord, alternatives: Vec<FoodRecord>) -> bool {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Checked under the lock so two commits cannot interleave
        if !self.is_current(ticket) {
            tracing::debug!("Dropping stale search result for '{}'", food.name);
            return false;
        }

        *state = Selection {
            current_food: Some(food),
            alternatives,
            selected: None,
        };
        true
    }

    /// Select an alternative by index
    pub fn select(&self, index: usize) -> Option<FoodRecord> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let food = state.alternatives.get(index).cloned()?;
        state.selected = Some(index);
        Some(food)
    }

    pub fn snapshot(&self) -> Selection {
        match self.state.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
