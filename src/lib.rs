//! lagoon-planner: a Mauritius trip-planning toolkit
//!
//! This library provides a day-partitioned itinerary store with reorder and
//! lock semantics, a placeholder-then-replace chat log, an assistant bridge
//! that forwards trip context to a hosted completion model, and the data side
//! of the map view. An optional axum service exposes the assistant endpoint.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lagoon_planner::{AssistantBridge, ChatContext, ChatSession, ItineraryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = ItineraryStore::seeded();
//!     store.reorder(2, 0, 1)?;
//!
//!     let bridge = AssistantBridge::from_env()?;
//!     let mut session = ChatSession::new(bridge);
//!     let context = ChatContext::snapshot(&store, None, Some(2));
//!     let _ = session.send("What should I do on day 2?", &context).await;
//!     for message in session.log().messages() {
//!         println!("[{:?}] {}", message.sender, message.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub mod http;
pub mod map;
pub(crate) mod services;
pub mod types;

pub use crate::core::{
    ChatLog, ChatSession, ItineraryStore, CONNECTION_APOLOGY, FALLBACK_REPLY, GREETING, THINKING,
};
pub use error::{PlannerError, Result};
pub use map::{Bounds, MapView, Marker, ISLAND_CENTER};
pub use services::{
    ActivityCatalog, AssistantAnswer, AssistantBridge, CatalogActivity, InteractionStore,
    MemoryInteractionStore, RestActivityCatalog, RestInteractionStore, StaticActivityCatalog,
    PROCESSING_APOLOGY,
};
pub use types::{
    seed_itinerary, ActivityDraft, AssistantRequest, AssistantResponse, Category, ChatContext,
    ChatMessage, InteractionContext, InteractionRecord, ItineraryItem, Sender, TripData,
};

#[cfg(feature = "cli")]
pub mod cli;
