pub mod game;
pub mod item;
pub mod slot;
pub mod user;
pub mod viewer;

pub use game::{CatalogPage, GameCard, GameDetails, GameSummary};
pub use item::RecommendationItem;
pub use slot::{Slot, SlotResult, SourceLabel};
pub use user::{InteractionRequest, LoginRequest, RegistrationRequest, Session};
pub use viewer::{InteractionStatus, UserId, Viewer};
