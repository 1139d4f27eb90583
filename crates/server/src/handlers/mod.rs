//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `slidemix-server`.
//! The handlers are split into logical sub-modules based on their functionality.

// Sub-modules for different handler categories.
pub mod general;
pub mod mixes;
pub mod oembed;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use general::*;
pub use mixes::*;
pub use oembed::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
