//! Turns upstream entity lists into download tasks.
//!
//! One query per kind, null and blank identifiers dropped, duplicates
//! collapsed onto their first occurrence.

use std::collections::HashSet;
use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::domain::{AssetKind, FetchTask};
use crate::graphql::{AssetSource, EntityId, PlayerRecord, TournamentRecord};

/// Extension every player headshot is stored under
pub const PLAYER_EXTENSION: &str = "webp";

pub struct Resolver {
    source: Arc<dyn AssetSource + Send + Sync>,
    config: Config,
}

impl Resolver {
    pub fn new(source: Arc<dyn AssetSource + Send + Sync>, config: Config) -> Self {
        Self { source, config }
    }

    /// Query the upstream source for `kind` and build its tasks.
    ///
    /// Any upstream failure is returned as-is; there is no partial result.
    pub async fn resolve(&self, kind: AssetKind) -> Result<Vec<FetchTask>> {
        let tasks = match kind {
            AssetKind::Player => {
                let records = self.source.players().await?;
                self.player_tasks(records)
            }
            AssetKind::Tournament => {
                let records = self.source.tournaments().await?;
                self.tournament_tasks(records)
            }
        };

        tracing::debug!("Resolved {} {} tasks", tasks.len(), kind);
        Ok(tasks)
    }

    pub fn player_tasks(&self, records: Vec<PlayerRecord>) -> Vec<FetchTask> {
        let dir = self.config.kind_dir(AssetKind::Player);
        let ids = records
            .into_iter()
            .filter_map(|r| normalize_id(r.pga_id.as_ref()));

        unique_by_id(ids.map(|id| (id, ())))
            .map(|(id, ())| {
                let url = self.config.player_image_url(&id);
                let path = dir.join(format!("{}.{}", id, PLAYER_EXTENSION));
                FetchTask::new(AssetKind::Player, id, url, path)
            })
            .collect()
    }

    pub fn tournament_tasks(&self, records: Vec<TournamentRecord>) -> Vec<FetchTask> {
        let dir = self.config.kind_dir(AssetKind::Tournament);
        let entries = records.into_iter().filter_map(|r| {
            let url = r.avatar_url.filter(|u| !u.trim().is_empty())?;
            let id = normalize_id(r.id.as_ref())?;
            Some((id, url))
        });

        unique_by_id(entries)
            .map(|(id, url)| {
                let ext = extension_from_url(&url, &self.config.default_extension);
                let path = dir.join(format!("{}.{}", id, ext));
                FetchTask::new(AssetKind::Tournament, id, url, path)
            })
            .collect()
    }
}

/// Canonical id usable as a file stem, or `None` if it must be dropped.
fn normalize_id(id: Option<&EntityId>) -> Option<String> {
    let id = id?.normalized()?;
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        tracing::warn!("Ignoring id {:?}: not usable as a file name", id);
        return None;
    }
    Some(id)
}

/// Keep the first entry for each id, in input order.
fn unique_by_id<V>(entries: impl Iterator<Item = (String, V)>) -> impl Iterator<Item = (String, V)> {
    let mut seen = HashSet::new();
    entries.filter(move |(id, _)| seen.insert(id.clone()))
}

/// File extension of the last path segment of `url`, ignoring any query or
/// fragment. Falls back to `default` when the segment has no usable suffix.
pub fn extension_from_url(url: &str, default: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();

    match segment.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext.to_string()
        }
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::app::SyncError;

    fn num(n: i64) -> Option<EntityId> {
        Some(EntityId::Number(n.into()))
    }

    fn text(s: &str) -> Option<EntityId> {
        Some(EntityId::Text(s.to_string()))
    }

    fn player(id: Option<EntityId>) -> PlayerRecord {
        PlayerRecord { pga_id: id }
    }

    fn tournament(id: Option<EntityId>, url: Option<&str>) -> TournamentRecord {
        TournamentRecord {
            id,
            avatar_url: url.map(String::from),
        }
    }

    fn config() -> Config {
        Config {
            output_root: PathBuf::from("out"),
            ..Default::default()
        }
    }

    struct StaticSource {
        players: Vec<PlayerRecord>,
        tournaments: Vec<TournamentRecord>,
        queries: AtomicUsize,
    }

    #[async_trait]
    impl AssetSource for StaticSource {
        async fn players(&self) -> Result<Vec<PlayerRecord>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.players.clone())
        }

        async fn tournaments(&self) -> Result<Vec<TournamentRecord>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.tournaments.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl AssetSource for FailingSource {
        async fn players(&self) -> Result<Vec<PlayerRecord>> {
            Err(SyncError::GraphQl("Unauthorized".into()))
        }

        async fn tournaments(&self) -> Result<Vec<TournamentRecord>> {
            Err(SyncError::MissingData)
        }
    }

    fn resolver_with(players: Vec<PlayerRecord>, tournaments: Vec<TournamentRecord>) -> Resolver {
        let source = StaticSource {
            players,
            tournaments,
            queries: AtomicUsize::new(0),
        };
        Resolver::new(Arc::new(source), config())
    }

    #[test]
    fn test_player_dedup_drops_nulls() {
        let resolver = resolver_with(vec![], vec![]);
        let records = vec![
            player(num(1)),
            player(num(2)),
            player(num(2)),
            player(None),
            player(num(3)),
        ];

        let tasks = resolver.player_tasks(records);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_numeric_and_text_ids_collapse() {
        let resolver = resolver_with(vec![], vec![]);
        let tasks = resolver.player_tasks(vec![player(num(7)), player(text("7")), player(text(""))]);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_player_task_shape() {
        let resolver = resolver_with(vec![], vec![]);
        let tasks = resolver.player_tasks(vec![player(num(101))]);

        let task = &tasks[0];
        assert_eq!(task.kind, AssetKind::Player);
        assert_eq!(task.destination, PathBuf::from("out/images/players/101.webp"));
        assert!(task.source_url.ends_with("/headshots_101"));
    }

    #[test]
    fn test_tournaments_without_url_are_dropped() {
        let resolver = resolver_with(vec![], vec![]);
        let records = vec![
            tournament(text("T1"), Some("https://x/a.jpg")),
            tournament(text("T2"), None),
            tournament(text("T3"), Some("")),
            tournament(None, Some("https://x/b.png")),
            tournament(text("T1"), Some("https://x/other.png")),
        ];

        let tasks = resolver.tournament_tasks(records);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "T1");
        assert_eq!(tasks[0].source_url, "https://x/a.jpg");
        assert_eq!(
            tasks[0].destination,
            PathBuf::from("out/images/tournaments/T1.jpg")
        );
    }

    #[test]
    fn test_unsafe_ids_are_dropped() {
        let resolver = resolver_with(vec![], vec![]);
        let tasks = resolver.player_tasks(vec![player(text("../etc")), player(text(".."))]);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_extension_strips_query() {
        assert_eq!(extension_from_url("https://host/img/abc.png?v=2", "jpg"), "png");
        assert_eq!(extension_from_url("https://host/img/abc.webp#top", "jpg"), "webp");
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(extension_from_url("https://host/img/abc", "jpg"), "jpg");
        assert_eq!(extension_from_url("https://host.example.com/img/", "jpg"), "jpg");
        assert_eq!(extension_from_url("https://host/img/abc.", "jpg"), "jpg");
        assert_eq!(extension_from_url("https://host/v1.2/abc?x=a.b", "jpg"), "jpg");
    }

    #[test]
    fn test_extension_uses_last_dot() {
        assert_eq!(extension_from_url("https://host/a.thumb.jpeg", "jpg"), "jpeg");
    }

    #[tokio::test]
    async fn test_resolve_issues_one_query_per_kind() {
        let source = Arc::new(StaticSource {
            players: vec![player(num(101)), player(num(102))],
            tournaments: vec![tournament(text("T1"), Some("https://x/a.jpg"))],
            queries: AtomicUsize::new(0),
        });
        let resolver = Resolver::new(source.clone(), config());

        let players = resolver.resolve(AssetKind::Player).await.unwrap();
        let tournaments = resolver.resolve(AssetKind::Tournament).await.unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(tournaments.len(), 1);
        assert_eq!(source.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolve_propagates_upstream_failure() {
        let resolver = Resolver::new(Arc::new(FailingSource), config());

        assert!(matches!(
            resolver.resolve(AssetKind::Player).await,
            Err(SyncError::GraphQl(_))
        ));
        assert!(matches!(
            resolver.resolve(AssetKind::Tournament).await,
            Err(SyncError::MissingData)
        ));
    }
}
