//! The trip model (waypoint collection, catalogs, CRUD, persistence) and the
//! filter model.
//!
//! Both models hand notifications to the presenter through a queue that the
//! application pumps after every interaction, the single-threaded equivalent
//! of the observer subscription: a mutation enqueues its notification, and
//! the pump delivers it before the next key event is processed.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::application::events::{FilterEvent, ModelEvent, UpdateType};
use crate::domain::{
    Destination, DomainError, DomainResult, FilterKind, ItineraryData, Offer, SortKind, Waypoint,
    WaypointId, services,
};
use crate::infrastructure::FileRepository;

#[derive(Debug, Default)]
pub struct TripModel {
    data: ItineraryData,
    initialized: bool,
    store: Option<PathBuf>,
    outbox: VecDeque<ModelEvent>,
}

impl TripModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model that persists the itinerary to `path` after every mutation.
    pub fn with_store(path: PathBuf) -> Self {
        Self { store: Some(path), ..Self::default() }
    }

    /// Hands the model its initial data and fires INIT. Later calls are
    /// ignored; INIT happens exactly once.
    pub fn load(&mut self, data: ItineraryData) {
        if self.initialized {
            return;
        }
        self.data = data;
        self.initialized = true;
        self.outbox.push_back(ModelEvent::Init);
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.data.waypoints
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.data.waypoints.iter().find(|wp| wp.id == id)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.data.destinations
    }

    pub fn offers(&self) -> &[Offer] {
        &self.data.offers
    }

    pub fn destination_names(&self) -> Vec<&str> {
        self.data.destinations.iter().map(|d| d.name.as_str()).collect()
    }

    /// Full snapshot for view building and summary aggregation.
    pub fn data(&self) -> &ItineraryData {
        &self.data
    }

    /// Pure ordering service, exposed on the model so presenters derive the
    /// visible list entirely through the model's surface.
    pub fn sort_waypoints(&self, waypoints: Vec<Waypoint>, kind: SortKind) -> Vec<Waypoint> {
        services::sort_waypoints(kind, waypoints)
    }

    /// Next pending notification, oldest first.
    pub fn take_event(&mut self) -> Option<ModelEvent> {
        self.outbox.pop_front()
    }

    pub fn update_waypoint(&mut self, update: UpdateType, waypoint: Waypoint) -> DomainResult<()> {
        let Some(pos) = self.data.waypoints.iter().position(|wp| wp.id == waypoint.id) else {
            return Err(DomainError::UnknownWaypoint(waypoint.id));
        };
        let previous = std::mem::replace(&mut self.data.waypoints[pos], waypoint.clone());
        if let Err(err) = self.persist() {
            self.data.waypoints[pos] = previous;
            return Err(err);
        }
        // A change that cannot affect list membership or ordering results
        // in a PATCH even when the caller hinted MINOR.
        let event = if update == UpdateType::Minor && Self::is_cosmetic(&previous, &waypoint) {
            ModelEvent::Patch(waypoint)
        } else {
            Self::envelope(update, waypoint)
        };
        self.outbox.push_back(event);
        Ok(())
    }

    pub fn add_waypoint(&mut self, update: UpdateType, waypoint: Waypoint) -> DomainResult<()> {
        self.data.waypoints.push(waypoint.clone());
        if let Err(err) = self.persist() {
            self.data.waypoints.pop();
            return Err(err);
        }
        self.outbox.push_back(Self::envelope(update, waypoint));
        Ok(())
    }

    pub fn delete_waypoint(&mut self, update: UpdateType, waypoint: Waypoint) -> DomainResult<()> {
        let Some(pos) = self.data.waypoints.iter().position(|wp| wp.id == waypoint.id) else {
            return Err(DomainError::UnknownWaypoint(waypoint.id));
        };
        let removed = self.data.waypoints.remove(pos);
        if let Err(err) = self.persist() {
            self.data.waypoints.insert(pos, removed);
            return Err(err);
        }
        self.outbox.push_back(Self::envelope(update, waypoint));
        Ok(())
    }

    fn persist(&self) -> DomainResult<()> {
        match &self.store {
            Some(path) => FileRepository::save_itinerary(&self.data, path),
            None => Ok(()),
        }
    }

    fn is_cosmetic(previous: &Waypoint, next: &Waypoint) -> bool {
        previous.date_from == next.date_from
            && previous.date_to == next.date_to
            && previous.base_price == next.base_price
    }

    fn envelope(update: UpdateType, waypoint: Waypoint) -> ModelEvent {
        match update {
            UpdateType::Patch => ModelEvent::Patch(waypoint),
            UpdateType::Minor => ModelEvent::Minor,
            UpdateType::Major => ModelEvent::Major,
            UpdateType::Init => ModelEvent::Init,
        }
    }
}

#[derive(Debug, Default)]
pub struct FilterModel {
    active: FilterKind,
    outbox: VecDeque<FilterEvent>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> FilterKind {
        self.active
    }

    pub fn set_filter(&mut self, update: UpdateType, kind: FilterKind) {
        self.active = kind;
        self.outbox.push_back(FilterEvent { update, kind });
    }

    pub fn take_event(&mut self) -> Option<FilterEvent> {
        self.outbox.pop_front()
    }
}
