pub mod chat;
pub mod itinerary;
pub mod session;

pub use chat::{ChatLog, GREETING, THINKING};
pub use itinerary::ItineraryStore;
pub use session::{ChatSession, CONNECTION_APOLOGY, FALLBACK_REPLY};
