pub mod accounts;
pub mod catalog;
pub mod home;
pub mod providers;
pub mod resolver;

pub use resolver::RecommendationSourceResolver;
