use std::sync::Arc;

use crate::{
    error::SourceError,
    models::{RecommendationItem, Slot, SlotResult, SourceLabel, UserId, Viewer},
    services::providers::{Endpoint, RecommendationSource},
};

/// Chooses which remote source feeds each home-page slot
///
/// Every slot follows a fixed chain from the most personalized source to the most
/// generic one. Failures never escape: a failed or empty call is the same as an empty
/// list and moves the chain along.
#[derive(Clone)]
pub struct RecommendationSourceResolver {
    source: Arc<dyn RecommendationSource>,
}

impl RecommendationSourceResolver {
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    /// Resolves one slot for the given viewer
    pub async fn resolve(&self, slot: Slot, viewer: &Viewer) -> SlotResult {
        let result = match slot {
            Slot::Featured => self.resolve_featured(viewer).await,
            Slot::Popular => self.resolve_popular(viewer).await,
            Slot::Adventure => self.resolve_adventure(viewer).await,
            Slot::Action => self.resolve_action(viewer).await,
        };

        tracing::info!(
            slot = %slot,
            viewer = %viewer,
            label = %result.label,
            results = result.items.len(),
            "Slot resolved"
        );

        result
    }

    /// Resolves all four slots concurrently, in `Slot::ALL` order
    pub async fn resolve_all(&self, viewer: &Viewer) -> [SlotResult; 4] {
        let (featured, popular, adventure, action) = tokio::join!(
            self.resolve(Slot::Featured, viewer),
            self.resolve(Slot::Popular, viewer),
            self.resolve(Slot::Adventure, viewer),
            self.resolve(Slot::Action, viewer),
        );

        [featured, popular, adventure, action]
    }

    async fn resolve_featured(&self, viewer: &Viewer) -> SlotResult {
        let Viewer::Authenticated(user_id) = viewer else {
            let items = self.attempt(Endpoint::General).await;
            return SlotResult::new(Slot::Featured, SourceLabel::General, items);
        };

        if self.has_interactions(user_id).await {
            let items = self
                .attempt(Endpoint::CollaborativeUserBased(*user_id))
                .await;
            if !items.is_empty() {
                return SlotResult::new(Slot::Featured, SourceLabel::CollaborativeUserBased, items);
            }
            tracing::info!(user_id = %user_id, "No user-based recommendations, falling back to cold-start");
        }

        let items = self.attempt(Endpoint::ColdStart(*user_id)).await;
        SlotResult::new(Slot::Featured, SourceLabel::ColdStart, items)
    }

    async fn resolve_popular(&self, viewer: &Viewer) -> SlotResult {
        let Viewer::Authenticated(user_id) = viewer else {
            let items = self.attempt(Endpoint::GlobalMostPlayed).await;
            return SlotResult::new(Slot::Popular, SourceLabel::General, items);
        };

        let items = self.attempt(Endpoint::Association(*user_id)).await;
        if !items.is_empty() {
            return SlotResult::new(Slot::Popular, SourceLabel::Association, items);
        }

        tracing::info!(user_id = %user_id, "No association recommendations, falling back to top rated");
        let items = self.attempt(Endpoint::GlobalTopRated).await;
        SlotResult::new(Slot::Popular, SourceLabel::TopRatedFallback, items)
    }

    async fn resolve_adventure(&self, viewer: &Viewer) -> SlotResult {
        match viewer {
            Viewer::Authenticated(user_id) => {
                let items = self
                    .attempt(Endpoint::CollaborativeItemBased(*user_id))
                    .await;
                SlotResult::new(Slot::Adventure, SourceLabel::ItemBased, items)
            }
            Viewer::Anonymous => {
                let items = self.attempt(Endpoint::GlobalTopRated).await;
                SlotResult::new(Slot::Adventure, SourceLabel::TopRatedFallback, items)
            }
        }
    }

    // No non-personalized source exists for this slot; it stays empty instead.
    async fn resolve_action(&self, viewer: &Viewer) -> SlotResult {
        let Viewer::Authenticated(user_id) = viewer else {
            return SlotResult::empty(Slot::Action, SourceLabel::General);
        };

        let items = self.attempt(Endpoint::ContentBased(*user_id)).await;
        if items.is_empty() {
            SlotResult::empty(Slot::Action, SourceLabel::General)
        } else {
            SlotResult::new(Slot::Action, SourceLabel::ContentBased, items)
        }
    }

    /// Fetches similar games for the product page, with the same failure policy as slots
    pub async fn similar_games(&self, game_id: u64) -> Vec<RecommendationItem> {
        self.attempt(Endpoint::SimilarGames(game_id)).await
    }

    /// Calls one source, turning any failure into an empty list
    async fn attempt(&self, endpoint: Endpoint) -> Vec<RecommendationItem> {
        match self.source.fetch_items(&endpoint).await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                log_source_failure(&endpoint, &SourceError::Empty);
                Vec::new()
            }
            Err(e) => {
                log_source_failure(&endpoint, &e);
                Vec::new()
            }
        }
    }

    /// Unknown users and failed checks count as "no interactions"
    async fn has_interactions(&self, user_id: &UserId) -> bool {
        match self.source.check_interactions(user_id).await {
            Ok(status) => status.is_returning(),
            Err(e) if e.is_not_found() => {
                tracing::info!(user_id = %user_id, "User unknown to the interaction store");
                false
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    kind = e.kind(),
                    "Interaction check failed, treating user as new"
                );
                false
            }
        }
    }
}

fn log_source_failure(endpoint: &Endpoint, error: &SourceError) {
    match error {
        SourceError::Empty | SourceError::Http { status: 404 } => {
            tracing::info!(endpoint = %endpoint, kind = error.kind(), "Source produced no items");
        }
        _ => {
            tracing::warn!(
                endpoint = %endpoint,
                error = %error,
                kind = error.kind(),
                "Source failed, treating as empty"
            );
        }
    }
}
