use serde::Deserialize;

use crate::app::{Result, SyncError};

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    /// Unwrap the payload. A non-empty error list wins over any data present.
    pub fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SyncError::GraphQl(message));
        }

        self.data.ok_or(SyncError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayersData {
    #[serde(rename = "getAllPlayers")]
    pub get_all_players: Vec<PlayerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TournamentsData {
    #[serde(rename = "getAllTournaments", default)]
    pub get_all_tournaments: Option<Vec<TournamentRecord>>,
}

/// Identifier as the backend sends it: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(serde_json::Number),
    Text(String),
}

impl EntityId {
    /// Canonical string form, or `None` for a blank id.
    pub fn normalized(&self) -> Option<String> {
        match self {
            EntityId::Number(n) => Some(n.to_string()),
            EntityId::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "pgaId")]
    pub pga_id: Option<EntityId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentRecord {
    pub id: Option<EntityId>,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
}
