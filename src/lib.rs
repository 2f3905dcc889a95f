//! Tariff Classification API Library
//!
//! An HTTP adapter that classifies free-text product descriptions into HS
//! (Harmonized System) tariff codes by delegating to a text-generation model.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Classification logic, models and errors.
//! - `integrations`: External service clients.
//! - `anthropic_client`: Anthropic Messages API client.
//! - `app`: Router assembly and middleware.
//! - `classifier`: Prompt construction, upstream call and reply parsing.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request and response models.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and other binaries
pub mod anthropic_client;
pub mod app;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
