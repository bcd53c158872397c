//! External collaborators: the hosted completion API, the activity catalog,
//! and the preference store used for interaction history.

pub mod assistant;
pub mod catalog;
pub mod completion;
pub mod preferences;

pub use assistant::{AssistantAnswer, AssistantBridge, PROCESSING_APOLOGY};
pub use catalog::{ActivityCatalog, CatalogActivity, RestActivityCatalog, StaticActivityCatalog};
pub use completion::{ChatCompletionRequest, CompletionClient};
pub use preferences::{InteractionStore, MemoryInteractionStore, RestInteractionStore};
