use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogPage, GameCard, GameDetails, GameSummary},
    services::{providers::CatalogProvider, resolver::RecommendationSourceResolver},
};

/// Upper bound on a single catalog page
pub const MAX_PAGE_SIZE: usize = 100;

/// Similar-games section of the product page
#[derive(Debug, Clone, Serialize)]
pub struct SimilarGames {
    pub game_id: u64,
    pub games: Vec<GameCard>,
}

/// Lists the catalog, filtered by name and paginated
///
/// The remote API returns the whole catalog; filtering and paging happen here.
pub async fn list_games(
    provider: Arc<dyn CatalogProvider>,
    query: Option<&str>,
    offset: usize,
    limit: usize,
) -> AppResult<CatalogPage> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    let games = provider.list_games().await?;
    Ok(paginate(filter_games(games, query), offset, limit))
}

/// Keeps games whose name contains the query, ignoring case
pub fn filter_games(games: Vec<GameSummary>, query: Option<&str>) -> Vec<GameSummary> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let needle = q.to_lowercase();
            games.into_iter().filter(|g| g.matches(&needle)).collect()
        }
        None => games,
    }
}

pub fn paginate(games: Vec<GameSummary>, offset: usize, limit: usize) -> CatalogPage {
    let total = games.len();
    let page: Vec<GameSummary> = games.into_iter().skip(offset).take(limit).collect();
    let has_more = offset.saturating_add(page.len()) < total;

    CatalogPage {
        games: page,
        total,
        offset,
        has_more,
    }
}

/// Fetches the product page record for a game
pub async fn game_details(
    provider: Arc<dyn CatalogProvider>,
    game_id: u64,
) -> AppResult<GameDetails> {
    provider.game_details(game_id).await
}

/// Games similar to `game_id`; an unavailable source yields an empty list
pub async fn similar_games(resolver: &RecommendationSourceResolver, game_id: u64) -> SimilarGames {
    let games = resolver
        .similar_games(game_id)
        .await
        .iter()
        .map(GameCard::with_tags)
        .collect();

    SimilarGames { game_id, games }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockCatalogProvider;
    use tokio_test::{assert_err, assert_ok};

    fn game(id: u64, name: &str) -> GameSummary {
        GameSummary {
            id,
            name: name.to_string(),
            description: String::new(),
            image_url: String::new(),
            price: None,
            price_label: "Free".to_string(),
            release_date: String::new(),
        }
    }

    fn catalog() -> Vec<GameSummary> {
        vec![
            game(1, "Portal"),
            game(2, "Portal 2"),
            game(3, "Half-Life"),
            game(4, "Dota 2"),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let found = filter_games(catalog(), Some("  PORTAL "));
        let ids: Vec<u64> = found.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        assert_eq!(filter_games(catalog(), Some("   ")).len(), 4);
        assert_eq!(filter_games(catalog(), None).len(), 4);
    }

    #[test]
    fn test_pagination() {
        let first = paginate(catalog(), 0, 3);
        assert_eq!(first.games.len(), 3);
        assert_eq!(first.total, 4);
        assert!(first.has_more);

        let last = paginate(catalog(), 3, 3);
        assert_eq!(last.games.len(), 1);
        assert!(!last.has_more);

        let beyond = paginate(catalog(), 10, 3);
        assert!(beyond.games.is_empty());
        assert!(!beyond.has_more);
    }

    #[tokio::test]
    async fn test_list_games_filters_provider_results() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_list_games().times(1).returning(|| Ok(catalog()));

        let page = assert_ok!(list_games(Arc::new(mock), Some("2"), 0, 12).await);

        let ids: Vec<u64> = page.games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_list_games_rejects_bad_limit_without_upstream_call() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_list_games().times(0);
        let provider: Arc<dyn CatalogProvider> = Arc::new(mock);

        assert_err!(list_games(provider.clone(), None, 0, 0).await);
        assert_err!(list_games(provider, None, 0, MAX_PAGE_SIZE + 1).await);
    }

    #[tokio::test]
    async fn test_list_games_surfaces_upstream_errors() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_list_games()
            .returning(|| Err(AppError::ExternalApi("down".to_string())));

        let result = list_games(Arc::new(mock), None, 0, 12).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
