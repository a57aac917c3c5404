//! crates/meal_planner_core/src/join.rs
//!
//! Resolves persisted meals against a batch of dish snapshots.

use crate::domain::{DishSnapshot, MealEntry, MealRecord};
use std::collections::{HashMap, HashSet};
use tracing::warn;
use uuid::Uuid;

/// The joined records plus how many entries had to be dropped.
#[derive(Debug, Default)]
pub struct JoinOutcome {
    pub records: Vec<MealRecord>,
    pub skipped: usize,
}

/// Distinct dish ids referenced by `entries`, in first-seen order.
pub fn distinct_dish_ids(entries: &[MealEntry]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| e.dish_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Pairs each entry with its dish. Entries whose dish is missing are skipped
/// and logged; the rest keep their input order.
pub fn join_meals(entries: Vec<MealEntry>, dishes: Vec<DishSnapshot>) -> JoinOutcome {
    let arena: HashMap<Uuid, DishSnapshot> = dishes.into_iter().map(|d| (d.id, d)).collect();

    let mut outcome = JoinOutcome {
        records: Vec::with_capacity(entries.len()),
        skipped: 0,
    };

    for entry in entries {
        let Some(dish) = arena.get(&entry.dish_id).cloned() else {
            warn!(
                meal_id = %entry.id,
                dish_id = %entry.dish_id,
                "Skipping meal that references a missing dish"
            );
            outcome.skipped += 1;
            continue;
        };

        outcome.records.push(MealRecord {
            meal_id: entry.id,
            date: entry.date,
            meal_type: entry.meal_type,
            dish,
            notes: entry.notes,
            rating: entry.rating,
        });
    }

    outcome
}
