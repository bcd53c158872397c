pub mod item;
pub mod message;
pub mod trip;
pub mod wire;

pub use item::{seed_itinerary, ActivityDraft, Category, ItineraryItem};
pub use message::{ChatMessage, Sender};
pub use trip::{ChatContext, TripData};
pub use wire::{AssistantRequest, AssistantResponse, InteractionContext, InteractionRecord};
