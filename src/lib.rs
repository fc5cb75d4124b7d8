//! TRIPT - Terminal Trip Planner Library
//!
//! A terminal itinerary planner built in Rust: an editable waypoint list
//! with sorting, filtering, summary aggregation, and granular re-rendering
//! driven by model notifications.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
