// cohortal-api: Async Rust client for the Cohortal platform backend and its OIDC issuer

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod admin;
mod aql;
mod cohort;
mod content;
mod profile;
mod project;

pub use auth::{AuthClient, TokenSet, TokenStore};
pub use client::ApiClient;
pub use error::Error;
