//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! file I/O, the remote itinerary source, and CSV export.

pub mod persistence;
pub mod api;
pub mod export;
pub mod source;

pub use persistence::*;
pub use api::*;
pub use export::*;
pub use source::*;
