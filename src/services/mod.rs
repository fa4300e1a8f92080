//! Service layer coordinating the engine, persistence, and the score feed.

/// Feed broadcast helpers.
pub mod feed_events;
/// Match lifecycle: creation, loading, listing, deletion.
pub mod match_service;
/// Scoring event application with persistence and broadcasting.
pub mod scoring_service;
/// Storage health supervision and deferred-save retries.
pub mod storage_supervisor;
