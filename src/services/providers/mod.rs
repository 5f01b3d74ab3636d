/// Remote API provider abstraction
///
/// The storefront never computes recommendations or stores users itself: everything
/// comes from the remote API. Two seams split that API by failure policy. Recommendation
/// sources are best-effort and their errors are swallowed by the resolver, while catalog
/// and account calls surface their errors to the client.
use crate::{
    error::{AppResult, SourceResult},
    models::{
        GameDetails, GameSummary, InteractionRequest, InteractionStatus, RecommendationItem,
        RegistrationRequest, Session, UserId,
    },
};

pub mod endpoints;
pub mod remote_api;

pub use endpoints::Endpoint;
pub use remote_api::RemoteApiProvider;

/// Trait for recommendation data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Fetch the item list an endpoint returns
    ///
    /// A well-formed response without the expected field yields an empty list.
    async fn fetch_items(&self, endpoint: &Endpoint) -> SourceResult<Vec<RecommendationItem>>;

    /// Ask whether the user has any recorded interactions
    async fn check_interactions(&self, user_id: &UserId) -> SourceResult<InteractionStatus>;
}

/// Trait for catalog and account operations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch every game in the catalog
    async fn list_games(&self) -> AppResult<Vec<GameSummary>>;

    /// Fetch the full record of one game
    async fn game_details(&self, game_id: u64) -> AppResult<GameDetails>;

    /// Log in by user name
    async fn login(&self, name: &str) -> AppResult<Session>;

    /// Create a new user profile
    async fn register(&self, request: &RegistrationRequest) -> AppResult<Session>;

    /// Record a rating and/or like for a game
    async fn record_interaction(&self, interaction: &InteractionRequest) -> AppResult<()>;
}
