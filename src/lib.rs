//! Library crate for pitchside-scoring, exposing modules for binaries and
//! integration tests.

/// Runtime configuration loading.
pub mod config;
/// Persistence layer: store contract, entities, in-memory backend.
pub mod dao;
/// Input and output payloads.
pub mod dto;
/// The cricket scoring engine.
pub mod engine;
/// Service-layer error taxonomy.
pub mod error;
/// Services coordinating engine, persistence, and feed.
pub mod services;
/// Shared application state.
pub mod state;
