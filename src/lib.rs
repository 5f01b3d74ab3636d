//! Storefront backend-for-frontend for the game recommendation platform.
//!
//! Resolves the landing page's recommendation slots against the remote API,
//! and proxies the catalog, product and account flows.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
