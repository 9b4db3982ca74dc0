//! WindAMS Infrastructure - Provider adapters
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: reqwest-backed identity providers and the
//! system clock.

pub mod adapters;
pub mod auth;

pub use adapters::SystemClock;
pub use auth::{
    Auth0Provider, AzureAdProvider, IdentityProvider, credential_facade, decoding_key,
    try_credential_facade,
};
