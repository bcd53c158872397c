use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One entry from the Mauritius activities database, used only to enrich the
/// assistant's system prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogActivity {
    pub title: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub cost_estimate_usd: Option<f64>,
}

impl CatalogActivity {
    /// Single prompt line, e.g.
    /// `- Seven Colored Earth (activity, Chamarel) - $12`
    pub fn prompt_line(&self) -> String {
        let cost = match self.cost_estimate_usd {
            Some(cost) => format!("${cost}"),
            None => "Price varies".to_string(),
        };
        format!(
            "- {} ({}, {}) - {}",
            self.title, self.category, self.location, cost
        )
    }
}

/// Source of catalog activities for prompt context. Failures here never fail
/// a chat turn; the prompt degrades instead.
#[async_trait]
pub trait ActivityCatalog: Send + Sync {
    async fn list_activities(&self, limit: usize) -> Result<Vec<CatalogActivity>>;
}

/// Catalog backed by a PostgREST-style endpoint
/// (`GET {base}/rest/v1/mauritius_activities?select=*&limit=N`).
#[derive(Clone, Debug)]
pub struct RestActivityCatalog {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestActivityCatalog {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ActivityCatalog for RestActivityCatalog {
    async fn list_activities(&self, limit: usize) -> Result<Vec<CatalogActivity>> {
        let url = format!(
            "{}/rest/v1/mauritius_activities?select=*&limit={limit}",
            self.base_url.trim_end_matches('/')
        );
        let activities = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CatalogActivity>>()
            .await?;
        Ok(activities)
    }
}

/// Fixed in-memory catalog for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticActivityCatalog {
    activities: Vec<CatalogActivity>,
}

impl StaticActivityCatalog {
    pub fn new(activities: Vec<CatalogActivity>) -> Self {
        Self { activities }
    }
}

#[async_trait]
impl ActivityCatalog for StaticActivityCatalog {
    async fn list_activities(&self, limit: usize) -> Result<Vec<CatalogActivity>> {
        Ok(self.activities.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_line_with_and_without_cost() {
        let priced = CatalogActivity {
            title: "Seven Colored Earth".to_string(),
            category: "activity".to_string(),
            location: "Chamarel".to_string(),
            cost_estimate_usd: Some(12.0),
        };
        assert_eq!(
            priced.prompt_line(),
            "- Seven Colored Earth (activity, Chamarel) - $12"
        );

        let unpriced = CatalogActivity {
            cost_estimate_usd: None,
            ..priced
        };
        assert!(unpriced.prompt_line().ends_with("Price varies"));
    }

    #[tokio::test]
    async fn test_static_catalog_respects_limit() {
        let catalog = StaticActivityCatalog::new(vec![
            CatalogActivity {
                title: "A".to_string(),
                category: "activity".to_string(),
                location: "North".to_string(),
                cost_estimate_usd: None,
            },
            CatalogActivity {
                title: "B".to_string(),
                category: "meal".to_string(),
                location: "South".to_string(),
                cost_estimate_usd: Some(5.0),
            },
        ]);
        assert_eq!(catalog.list_activities(1).await.unwrap().len(), 1);
        assert_eq!(catalog.list_activities(10).await.unwrap().len(), 2);
    }
}
