use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::types::wire::InteractionRecord;

/// Durable home for assistant exchanges, keyed by authenticated user. Every
/// write here is best-effort: callers log failures and move on, the user
/// never sees them.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Map a bearer token to a user id; None when the token does not
    /// resolve to an authenticated user.
    async fn resolve_user(&self, bearer_token: &str) -> Result<Option<String>>;

    /// Append one exchange to the user's unbounded interaction list.
    async fn append_interaction(&self, user_id: &str, record: InteractionRecord) -> Result<()>;
}

/// Store backed by a Supabase-style backend: auth endpoint for identity,
/// PostgREST upsert for the `user_preferences` row.
#[derive(Clone, Debug)]
pub struct RestInteractionStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PreferencesRow {
    #[serde(default)]
    ai_interactions: Vec<InteractionRecord>,
}

impl RestInteractionStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn current_interactions(&self, user_id: &str) -> Result<Vec<InteractionRecord>> {
        let url = format!(
            "{}/rest/v1/user_preferences?user_id=eq.{user_id}&select=ai_interactions",
            self.base_url
        );
        let mut rows = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PreferencesRow>>()
            .await?;
        Ok(rows.pop().map(|row| row.ai_interactions).unwrap_or_default())
    }
}

#[async_trait]
impl InteractionStore for RestInteractionStore {
    async fn resolve_user(&self, bearer_token: &str) -> Result<Option<String>> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {bearer_token}"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }
        let user = response.json::<AuthUser>().await?;
        Ok(Some(user.id))
    }

    async fn append_interaction(&self, user_id: &str, record: InteractionRecord) -> Result<()> {
        let mut interactions = self.current_interactions(user_id).await?;
        interactions.push(record);

        let url = format!("{}/rest/v1/user_preferences", self.base_url);
        self.client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&json!({
                "user_id": user_id,
                "ai_interactions": interactions,
                "updated_at": Utc::now(),
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// In-memory store for tests and offline sessions. A single fixed token
/// resolves to a single user.
#[derive(Debug, Default)]
pub struct MemoryInteractionStore {
    token: Option<(String, String)>,
    interactions: Mutex<HashMap<String, Vec<InteractionRecord>>>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that resolves `token` to `user_id`.
    pub fn with_user(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: Some((token.into(), user_id.into())),
            interactions: Mutex::new(HashMap::new()),
        }
    }

    pub fn interactions_for(&self, user_id: &str) -> Vec<InteractionRecord> {
        self.interactions
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl InteractionStore for MemoryInteractionStore {
    async fn resolve_user(&self, bearer_token: &str) -> Result<Option<String>> {
        Ok(self
            .token
            .as_ref()
            .filter(|(token, _)| token == bearer_token)
            .map(|(_, user_id)| user_id.clone()))
    }

    async fn append_interaction(&self, user_id: &str, record: InteractionRecord) -> Result<()> {
        self.interactions
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(record);
        Ok(())
    }
}
