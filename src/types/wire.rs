use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::item::ItineraryItem;
use crate::types::trip::{ChatContext, TripData};

/// Body accepted by `POST /travel-assistant`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub message: String,
    #[serde(default)]
    pub itinerary: Option<Vec<ItineraryItem>>,
    #[serde(default)]
    pub trip_data: Option<TripData>,
    #[serde(default)]
    pub selected_day: Option<u32>,
    #[serde(default)]
    pub user_location: Option<Value>,
}

impl AssistantRequest {
    /// Split the request into the user message and the prompt context.
    pub fn into_parts(self) -> (String, ChatContext) {
        let context = ChatContext {
            itinerary: self.itinerary,
            trip_data: self.trip_data,
            selected_day: self.selected_day,
            user_location: self.user_location,
        };
        (self.message, context)
    }
}

/// Response envelope for `POST /travel-assistant`. The `error` field only
/// appears on the failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response: String,
    pub success: bool,
}

impl AssistantResponse {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            error: None,
            response: response.into(),
            success: true,
        }
    }

    pub fn failed(error: impl Into<String>, apology: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            response: apology.into(),
            success: false,
        }
    }
}

/// One persisted assistant exchange, appended to a per-user unbounded list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub ai_response: String,
    pub context: InteractionContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionContext {
    pub selected_day: Option<u32>,
    pub itinerary_count: usize,
}

impl InteractionRecord {
    pub fn new(
        user_message: impl Into<String>,
        ai_response: impl Into<String>,
        context: &ChatContext,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            context: InteractionContext {
                selected_day: context.selected_day,
                itinerary_count: context.itinerary_count(),
            },
        }
    }
}
