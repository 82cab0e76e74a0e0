//! Core business logic - framework-agnostic product operations.
//!
//! Everything here takes a `SeaORM` connection and returns crate `Result`s; the
//! HTTP layer in `api` only extracts parameters and serializes the results.

/// Economic flag recalculation for restaurants
pub mod economic;
/// Best-selling products ranking
pub mod popularity;
/// Product listing, lookup, and mutations
pub mod product;
