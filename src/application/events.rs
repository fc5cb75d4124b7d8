//! Shared vocabulary for presenter/model traffic: action kinds, update
//! granularities, and the notification envelopes carried between them.
//!
//! Every kind is a closed enum matched exhaustively, so adding a new kind is
//! a compile-time-checked change.

use crate::domain::{FilterKind, Waypoint};

/// Re-render granularity attached to every model notification.
///
/// - `Patch`: refresh a single item presenter.
/// - `Minor`: rebuild the whole list, keeping sort/filter state.
/// - `Major`: rebuild the whole list after resetting sort/filter state.
/// - `Init`: initial data became available; leave the loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    Patch,
    Minor,
    Major,
    Init,
}

/// A user-intent mutation, payload included.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Update(Waypoint),
    Add(Waypoint),
    Delete(Waypoint),
}

/// What a presenter hands to `ListPresenter::dispatch_action`: the mutation
/// plus the granularity hint passed through to the model unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub action: UserAction,
    pub update: UpdateType,
}

/// Notification enqueued by the trip model after a mutation. `Patch` carries
/// the fresh snapshot; the full-list granularities carry nothing because the
/// presenter re-reads the model while re-rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    Patch(Waypoint),
    Minor,
    Major,
    Init,
}

/// Notification enqueued by the filter model. Unlike trip-model events it
/// always carries the newly selected kind, which the list presenter adopts
/// into its view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterEvent {
    pub update: UpdateType,
    pub kind: FilterKind,
}
