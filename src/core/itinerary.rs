use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::types::item::{seed_itinerary, ActivityDraft, ItineraryItem};

/// In-memory itinerary, one flat list partitioned by day number. Items for a
/// given day form an independently orderable sub-sequence; reordering one day
/// never disturbs the position of any other day's items.
#[derive(Debug, Clone, Default)]
pub struct ItineraryStore {
    items: Vec<ItineraryItem>,
    next_id: u64,
}

impl ItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ItineraryItem>) -> Self {
        let next_id = items
            .iter()
            .filter_map(|item| item.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self { items, next_id }
    }

    /// Store preloaded with the standard Mauritius seed itinerary.
    pub fn seeded() -> Self {
        Self::from_items(seed_itinerary())
    }

    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    /// Ordered view of one day's items, in current storage order.
    pub fn items_for_day(&self, day: u32) -> Vec<&ItineraryItem> {
        self.items.iter().filter(|item| item.day == day).collect()
    }

    /// Sorted, deduplicated day numbers across the whole collection.
    pub fn days_present(&self) -> Vec<u32> {
        self.items
            .iter()
            .map(|item| item.day)
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }

    /// Move the item at `from` to `to` within the given day's sub-sequence.
    ///
    /// Both indices are positions within that day's view, not the global
    /// list. Items belonging to other days keep their exact slots. A locked
    /// item cannot be moved; the store rejects the whole operation.
    pub fn reorder(&mut self, day: u32, from: usize, to: usize) -> Result<()> {
        let slots: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.day == day)
            .map(|(index, _)| index)
            .collect();

        let len = slots.len();
        for index in [from, to] {
            if index >= len {
                return Err(PlannerError::IndexOutOfRange { day, index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let moved = &self.items[slots[from]];
        if moved.is_locked {
            return Err(PlannerError::ItemLocked(moved.id.clone()));
        }
        debug!(target: "lagoon::itinerary", day, from, to, id = %moved.id, "reordering");

        // Splice within the day's view, then write the result back into the
        // same global slots so other days are untouched.
        let mut order = slots.clone();
        let picked = order.remove(from);
        order.insert(to, picked);

        let reordered: Vec<ItineraryItem> = order
            .iter()
            .map(|&index| self.items[index].clone())
            .collect();
        for (slot, item) in slots.into_iter().zip(reordered) {
            self.items[slot] = item;
        }
        Ok(())
    }

    /// Flip the lock flag of the item with the given id. Unknown ids are a
    /// silent no-op.
    pub fn toggle_lock(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.is_locked = !item.is_locked;
        }
    }

    /// Append a new activity to the given day, assigning a fresh unique id.
    pub fn add_activity(&mut self, day: u32, draft: ActivityDraft) -> &ItineraryItem {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.items.push(ItineraryItem {
            id,
            day,
            title: draft.title,
            description: draft.description,
            time: draft.time,
            location: draft.location,
            coordinates: draft.coordinates,
            is_locked: false,
            category: draft.category,
        });
        self.items.last().unwrap()
    }
}
