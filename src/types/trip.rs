use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::itinerary::ItineraryStore;
use crate::types::item::ItineraryItem;

/// Ambient trip preferences captured at onboarding; opaque pass-through
/// context for the assistant, never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripData {
    pub budget: String,
    pub travel_style: String,
    pub group_size: u32,
}

/// Snapshot handed to the assistant bridge alongside a user message.
/// Every field is optional; the prompt degrades gracefully when context
/// is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub itinerary: Option<Vec<ItineraryItem>>,
    pub trip_data: Option<TripData>,
    pub selected_day: Option<u32>,
    pub user_location: Option<Value>,
}

impl ChatContext {
    /// Snapshot a live store plus ambient trip state.
    pub fn snapshot(
        store: &ItineraryStore,
        trip_data: Option<TripData>,
        selected_day: Option<u32>,
    ) -> Self {
        Self {
            itinerary: Some(store.items().to_vec()),
            trip_data,
            selected_day,
            user_location: None,
        }
    }

    /// Rebuild context from client-side persisted strings: a JSON itinerary
    /// array, a JSON trip-data object, and a numeric selected-day string.
    /// Values that fail to parse are dropped with a warning rather than
    /// failing the whole turn.
    pub fn from_stored(
        itinerary: Option<&str>,
        trip_data: Option<&str>,
        selected_day: Option<&str>,
    ) -> Self {
        let itinerary = itinerary.and_then(|raw| {
            serde_json::from_str::<Vec<ItineraryItem>>(raw)
                .map_err(|err| warn!(target: "lagoon::context", "Ignoring stored itinerary: {err}"))
                .ok()
        });
        let trip_data = trip_data.and_then(|raw| {
            serde_json::from_str::<TripData>(raw)
                .map_err(|err| warn!(target: "lagoon::context", "Ignoring stored trip data: {err}"))
                .ok()
        });
        let selected_day = selected_day.and_then(|raw| raw.trim().parse::<u32>().ok());

        Self {
            itinerary,
            trip_data,
            selected_day,
            user_location: None,
        }
    }

    /// Number of itinerary items in the snapshot, 0 when absent.
    pub fn itinerary_count(&self) -> usize {
        self.itinerary.as_ref().map_or(0, Vec::len)
    }
}
