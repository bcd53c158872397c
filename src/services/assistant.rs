use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::services::catalog::{ActivityCatalog, CatalogActivity};
use crate::services::completion::{ChatCompletionRequest, CompletionClient};
use crate::services::preferences::InteractionStore;
use crate::types::trip::ChatContext;
use crate::types::wire::InteractionRecord;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// How many catalog rows are fetched, and how many of those make it into
/// the prompt.
const CATALOG_FETCH_LIMIT: usize = 50;
const CATALOG_PROMPT_LIMIT: usize = 10;

/// Server-side apology returned in failure envelopes.
pub const PROCESSING_APOLOGY: &str = "I'm having trouble processing your request right now. Please try asking something simpler, like 'What should I do today?' or 'Suggest nearby restaurants'.";

/// Text answer relayed from the completion service. `response` is None when
/// the payload carried no content; callers substitute their own fallback.
#[derive(Debug, Clone)]
pub struct AssistantAnswer {
    pub response: Option<String>,
}

/// Pass-through shim between the planner and a hosted completion model:
/// serializes the itinerary/trip snapshot into a prompt, forwards the user
/// message, and relays the text answer. No retry, no backoff, no timeout.
#[derive(Clone)]
pub struct AssistantBridge {
    client: CompletionClient,
    model: String,
    max_tokens: Option<u32>,
    temperature: f64,
    catalog: Option<Arc<dyn ActivityCatalog>>,
    interactions: Option<Arc<dyn InteractionStore>>,
}

impl fmt::Debug for AssistantBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantBridge")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("catalog", &self.catalog.is_some())
            .field("interactions", &self.interactions.is_some())
            .finish()
    }
}

impl AssistantBridge {
    pub fn new(api_key: String) -> Self {
        Self {
            client: CompletionClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: DEFAULT_TEMPERATURE,
            catalog: None,
            interactions: None,
        }
    }

    /// Build a bridge from `OPENAI_API_KEY` / `OPENAI_BASE_URL`, wiring the
    /// catalog and interaction store when `SUPABASE_URL` and
    /// `SUPABASE_ANON_KEY` are both present.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            PlannerError::Config(
                "OPENAI_API_KEY environment variable must be set before creating an AssistantBridge"
                    .to_string(),
            )
        })?;
        let mut bridge = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            bridge.client.set_base_url(base_url);
        }
        if let (Ok(supabase_url), Ok(supabase_key)) =
            (std::env::var("SUPABASE_URL"), std::env::var("SUPABASE_ANON_KEY"))
        {
            bridge = bridge
                .with_catalog(Arc::new(crate::services::catalog::RestActivityCatalog::new(
                    supabase_url.clone(),
                    supabase_key.clone(),
                )))
                .with_interaction_store(Arc::new(
                    crate::services::preferences::RestInteractionStore::new(
                        supabase_url,
                        supabase_key,
                    ),
                ));
        }
        Ok(bridge)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.set_base_url(base_url);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn ActivityCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_interaction_store(mut self, store: Arc<dyn InteractionStore>) -> Self {
        self.interactions = Some(store);
        self
    }

    /// Forward one user message with its context snapshot and relay the
    /// model's answer.
    pub async fn ask(&self, message: &str, context: &ChatContext) -> Result<AssistantAnswer> {
        info!(
            target: "lagoon::assistant",
            itinerary_count = context.itinerary_count(),
            trip_data = context.trip_data.is_some(),
            selected_day = context.selected_day,
            "assistant request"
        );

        let activities = self.fetch_catalog().await;
        let body = ChatCompletionRequest::new(
            self.model.clone(),
            vec![
                json!({"role": "system", "content": system_prompt(context, &activities)}),
                json!({"role": "user", "content": user_prompt(message, context)}),
            ],
        )
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens)
        .into_value();

        let response_json = self.client.chat_completion(&body).await?;
        let response = response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string);
        Ok(AssistantAnswer { response })
    }

    /// Best-effort persistence of one exchange. When a bearer token is
    /// present and resolves to a user, the record is appended on a detached
    /// task; every failure along the way is logged and swallowed.
    pub fn record_interaction(
        &self,
        bearer_token: Option<String>,
        user_message: String,
        ai_response: String,
        context: &ChatContext,
    ) {
        let (Some(store), Some(token)) = (self.interactions.clone(), bearer_token) else {
            return;
        };
        let record = InteractionRecord::new(user_message, ai_response, context);

        tokio::spawn(async move {
            let user_id = match store.resolve_user(&token).await {
                Ok(Some(user_id)) => user_id,
                Ok(None) => return,
                Err(err) => {
                    warn!(target: "lagoon::assistant", "could not resolve user: {err}");
                    return;
                }
            };
            match store.append_interaction(&user_id, record).await {
                Ok(()) => info!(target: "lagoon::assistant", %user_id, "interaction saved"),
                Err(err) => {
                    warn!(target: "lagoon::assistant", "could not save interaction: {err}")
                }
            }
        });
    }

    async fn fetch_catalog(&self) -> Vec<CatalogActivity> {
        let Some(catalog) = &self.catalog else {
            return Vec::new();
        };
        match catalog.list_activities(CATALOG_FETCH_LIMIT).await {
            Ok(activities) => activities,
            Err(err) => {
                warn!(target: "lagoon::assistant", "activity catalog unavailable: {err}");
                Vec::new()
            }
        }
    }
}

fn system_prompt(context: &ChatContext, activities: &[CatalogActivity]) -> String {
    let trip_line = match &context.trip_data {
        Some(trip) => format!(
            "Budget: {}, Style: {}, Group: {} people",
            trip.budget, trip.travel_style, trip.group_size
        ),
        None => "Not available".to_string(),
    };
    let day_line = match context.selected_day {
        Some(day) => day.to_string(),
        None => "Not specified".to_string(),
    };
    let location_line = if context.user_location.is_some() {
        "Available"
    } else {
        "Not available"
    };

    let overview = match &context.itinerary {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| {
                format!(
                    "Day {}: {} at {} ({})",
                    item.day, item.title, item.time, item.location
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "No itinerary provided".to_string(),
    };

    let catalog_block = if activities.is_empty() {
        "Activities database not available".to_string()
    } else {
        activities
            .iter()
            .take(CATALOG_PROMPT_LIMIT)
            .map(CatalogActivity::prompt_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an expert AI travel assistant specializing in Mauritius. You help travelers optimize their itineraries, suggest activities, and provide personalized recommendations.\n\
         \n\
         CURRENT CONTEXT:\n\
         - User's Trip: {trip_line}\n\
         - Current Day Focus: Day {day_line}\n\
         - Itinerary Items: {count} planned activities\n\
         - User Location: {location_line}\n\
         \n\
         CURRENT ITINERARY OVERVIEW:\n\
         {overview}\n\
         \n\
         AVAILABLE MAURITIUS ACTIVITIES DATABASE:\n\
         {catalog_block}\n\
         \n\
         INSTRUCTIONS:\n\
         - Provide specific, actionable travel advice for Mauritius\n\
         - Reference the user's current itinerary when relevant\n\
         - Suggest specific activities from the database when appropriate\n\
         - Consider budget, travel style, and group size\n\
         - Be concise but helpful\n\
         - If suggesting restaurants/activities, mention specific locations and rough costs\n\
         - Help optimize travel routes and timing",
        count = context.itinerary_count(),
    )
}

fn user_prompt(message: &str, context: &ChatContext) -> String {
    let phase = match context.selected_day {
        Some(day) => format!("planning Day {day}"),
        None => "reviewing my itinerary".to_string(),
    };
    format!("{message}\n\nContext: I'm currently {phase} of my Mauritius trip.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::itinerary::ItineraryStore;
    use crate::types::trip::{ChatContext, TripData};

    fn full_context() -> ChatContext {
        ChatContext::snapshot(
            &ItineraryStore::seeded(),
            Some(TripData {
                budget: "mid-range".to_string(),
                travel_style: "adventurous".to_string(),
                group_size: 2,
            }),
            Some(2),
        )
    }

    #[test]
    fn test_system_prompt_embeds_context() {
        let prompt = system_prompt(&full_context(), &[]);
        assert!(prompt.contains("Budget: mid-range, Style: adventurous, Group: 2 people"));
        assert!(prompt.contains("Current Day Focus: Day 2"));
        assert!(prompt.contains("Itinerary Items: 5 planned activities"));
        assert!(prompt.contains("Day 2: Underwater Sea Walk at 09:00 (Blue Bay Marine Park)"));
        assert!(prompt.contains("Activities database not available"));
    }

    #[test]
    fn test_system_prompt_degrades_without_context() {
        let prompt = system_prompt(&ChatContext::default(), &[]);
        assert!(prompt.contains("User's Trip: Not available"));
        assert!(prompt.contains("Current Day Focus: Day Not specified"));
        assert!(prompt.contains("Itinerary Items: 0 planned activities"));
        assert!(prompt.contains("No itinerary provided"));
    }

    #[test]
    fn test_system_prompt_caps_catalog_lines() {
        let activities: Vec<CatalogActivity> = (0..20)
            .map(|index| CatalogActivity {
                title: format!("Activity {index}"),
                category: "activity".to_string(),
                location: "Somewhere".to_string(),
                cost_estimate_usd: None,
            })
            .collect();
        let prompt = system_prompt(&ChatContext::default(), &activities);
        assert!(prompt.contains("Activity 9"));
        assert!(!prompt.contains("Activity 10"));
    }

    #[test]
    fn test_user_prompt_mentions_selected_day() {
        let with_day = user_prompt("where should I eat?", &full_context());
        assert!(with_day.starts_with("where should I eat?"));
        assert!(with_day.contains("planning Day 2"));

        let without_day = user_prompt("hi", &ChatContext::default());
        assert!(without_day.contains("reviewing my itinerary"));
    }
}
