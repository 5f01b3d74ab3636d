use serde_json::Value;
use std::fmt::Display;

use crate::{
    error::{SourceError, SourceResult},
    models::{RecommendationItem, UserId},
};

/// Fields recommendation endpoints put their items under, in lookup order
pub const RECOMMENDATION_FIELDS: &[&str] = &["recommendations", "items"];

/// Field the similar-games endpoint puts its items under
pub const SIMILAR_GAMES_FIELDS: &[&str] = &["similar_games"];

/// Remote endpoints that answer with a list of recommendation items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ColdStart(UserId),
    CollaborativeUserBased(UserId),
    CollaborativeItemBased(UserId),
    Association(UserId),
    ContentBased(UserId),
    GlobalTopRated,
    GlobalMostPlayed,
    /// Seasonal picks shown to anonymous visitors
    General,
    SimilarGames(u64),
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::ColdStart(id) => format!("/recommendations/cold-start/{}", id),
            Endpoint::CollaborativeUserBased(id) => {
                format!("/recommendations/collaborative/user-based/{}", id)
            }
            Endpoint::CollaborativeItemBased(id) => {
                format!("/recommendations/collaborative/item-based/{}", id)
            }
            Endpoint::Association(id) => format!("/recommendations/association/{}", id),
            Endpoint::ContentBased(id) => format!("/recommendations/content-based/{}", id),
            Endpoint::GlobalTopRated => "/global/top_rated".to_string(),
            Endpoint::GlobalMostPlayed => "/global/most_played".to_string(),
            Endpoint::General => "/recommend/action2025".to_string(),
            Endpoint::SimilarGames(game_id) => {
                format!("/recommendations/collaborative/similar-games/{}", game_id)
            }
        }
    }

    /// Whether the endpoint is keyed by a user and so only valid for authenticated viewers
    pub fn is_personalized(&self) -> bool {
        matches!(
            self,
            Endpoint::ColdStart(_)
                | Endpoint::CollaborativeUserBased(_)
                | Endpoint::CollaborativeItemBased(_)
                | Endpoint::Association(_)
                | Endpoint::ContentBased(_)
        )
    }

    pub fn item_fields(&self) -> &'static [&'static str] {
        match self {
            Endpoint::SimilarGames(_) => SIMILAR_GAMES_FIELDS,
            _ => RECOMMENDATION_FIELDS,
        }
    }

    /// Pulls the item list out of a response body
    pub fn extract_items(&self, body: &Value) -> SourceResult<Vec<RecommendationItem>> {
        extract_items(body, self.item_fields())
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Path of the interaction-existence check for a user
pub fn interaction_check_path(user_id: UserId) -> String {
    format!("/interacciones/{}/check", user_id)
}

/// Reads the first present field of `fields` as an item array.
///
/// A missing field means no items; a non-object body or a non-array field is malformed.
/// Entries that are not JSON objects are skipped.
pub fn extract_items(body: &Value, fields: &[&str]) -> SourceResult<Vec<RecommendationItem>> {
    let object = body
        .as_object()
        .ok_or_else(|| SourceError::Parse("expected a JSON object".to_string()))?;

    let Some((field, value)) = fields
        .iter()
        .find_map(|field| object.get(*field).map(|value| (*field, value)))
    else {
        return Ok(Vec::new());
    };

    let entries = value
        .as_array()
        .ok_or_else(|| SourceError::Parse(format!("field '{}' is not an array", field)))?;

    let items: Vec<RecommendationItem> = entries
        .iter()
        .filter_map(|entry| entry.as_object().cloned().map(RecommendationItem::from))
        .collect();

    if items.len() < entries.len() {
        tracing::debug!(
            field = field,
            skipped = entries.len() - items.len(),
            "Skipped non-object recommendation entries"
        );
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths() {
        let user = UserId(42);
        assert_eq!(
            Endpoint::CollaborativeUserBased(user).path(),
            "/recommendations/collaborative/user-based/42"
        );
        assert_eq!(Endpoint::GlobalTopRated.path(), "/global/top_rated");
        assert_eq!(Endpoint::General.path(), "/recommend/action2025");
        assert_eq!(interaction_check_path(user), "/interacciones/42/check");
    }

    #[test]
    fn test_personalized_endpoints() {
        assert!(Endpoint::Association(UserId(1)).is_personalized());
        assert!(Endpoint::ContentBased(UserId(1)).is_personalized());
        assert!(!Endpoint::GlobalMostPlayed.is_personalized());
        assert!(!Endpoint::General.is_personalized());
    }

    #[test]
    fn test_extract_prefers_recommendations_field() {
        let body = json!({"recommendations": [{"id": 7}], "items": [{"id": 8}]});
        let items = extract_items(&body, RECOMMENDATION_FIELDS).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].game_id(), Some(7));
    }

    #[test]
    fn test_extract_falls_back_to_items_field() {
        let body = json!({"items": [{"id": 8}, {"id": 9}]});
        let items = extract_items(&body, RECOMMENDATION_FIELDS).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_extract_missing_field_is_empty() {
        let body = json!({"message": "nothing here"});
        assert!(extract_items(&body, RECOMMENDATION_FIELDS).unwrap().is_empty());
    }

    #[test]
    fn test_extract_rejects_malformed_bodies() {
        assert!(matches!(
            extract_items(&json!([1, 2]), RECOMMENDATION_FIELDS),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            extract_items(&json!({"recommendations": "nope"}), RECOMMENDATION_FIELDS),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_extract_skips_non_object_entries() {
        let body = json!({"similar_games": [{"appid": 1}, 5, null]});
        let items = Endpoint::SimilarGames(3).extract_items(&body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].game_id(), Some(1));
    }
}
