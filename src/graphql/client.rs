use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::app::{Result, SyncError};
use crate::graphql::api_types::{GraphQLResponse, PlayersData, TournamentsData};
use crate::graphql::{
    AssetSource, PlayerRecord, TournamentRecord, PLAYERS_QUERY, TOURNAMENTS_QUERY,
};

/// reqwest-based GraphQL client bound to one endpoint.
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// POST a query document and return the `data` payload.
    pub async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<T> {
        let body = serde_json::json!({ "query": query });

        tracing::debug!("Querying {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Upstream(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let envelope: GraphQLResponse<T> = serde_json::from_slice(&bytes)?;
        envelope.into_data()
    }
}

#[async_trait]
impl AssetSource for GraphQlClient {
    async fn players(&self) -> Result<Vec<PlayerRecord>> {
        let data: PlayersData = self.query(PLAYERS_QUERY).await?;
        Ok(data.get_all_players)
    }

    async fn tournaments(&self) -> Result<Vec<TournamentRecord>> {
        let data: TournamentsData = self.query(TOURNAMENTS_QUERY).await?;
        Ok(data.get_all_tournaments.unwrap_or_default())
    }
}
