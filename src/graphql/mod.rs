//! Upstream data source: the GraphQL backend listing players and tournaments.

pub mod api_types;
pub mod client;

pub use api_types::{EntityId, PlayerRecord, TournamentRecord};
pub use client::GraphQlClient;

use async_trait::async_trait;

use crate::app::Result;

pub const PLAYERS_QUERY: &str = r#"
    query {
      getAllPlayers {
        pgaId
      }
    }
"#;

pub const TOURNAMENTS_QUERY: &str = r#"
    query {
      getAllTournaments {
        id
        avatarUrl
      }
    }
"#;

/// Source of the raw entity lists. Each call issues exactly one upstream query.
#[async_trait]
pub trait AssetSource {
    async fn players(&self) -> Result<Vec<PlayerRecord>>;
    async fn tournaments(&self) -> Result<Vec<TournamentRecord>>;
}
