//! Per-waypoint controller: a display card in Default mode, an edit form in
//! Editing mode, swapped in place on the board.

use crate::application::events::{ActionRequest, UpdateType, UserAction};
use crate::application::render::{ComponentId, Container, Surface};
use crate::application::views::{CardView, FormView, ViewKind};
use crate::domain::{ItineraryData, Waypoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    Editing,
}

#[derive(Debug)]
pub struct ItemPresenter {
    waypoint: Waypoint,
    mode: Mode,
    mounted: Option<ComponentId>,
}

impl ItemPresenter {
    pub fn new(waypoint: Waypoint) -> Self {
        Self { waypoint, mode: Mode::Default, mounted: None }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn component(&self) -> Option<ComponentId> {
        self.mounted
    }

    /// (Re)initializes from a fresh snapshot. The first call mounts the
    /// display card; later calls rebuild the view of whichever mode is
    /// currently active and swap it in place, so a presenter in Editing
    /// mode stays in Editing mode with a form rebuilt from the new
    /// snapshot. Unsaved form input is discarded: external data wins.
    pub fn init(&mut self, waypoint: Waypoint, data: &ItineraryData, surface: &mut Surface) {
        self.waypoint = waypoint;
        self.swap_view(data, surface);
    }

    /// Editing entry. The list presenter owns the single editor slot and
    /// resets the previous holder before granting it, so this only flips
    /// the local mode and swaps the views.
    pub fn begin_edit(&mut self, data: &ItineraryData, surface: &mut Surface) {
        if self.mode == Mode::Editing {
            return;
        }
        self.mode = Mode::Editing;
        self.swap_view(data, surface);
    }

    /// Reverts an open form to the last committed snapshot and returns to
    /// Default; no-op when already Default.
    pub fn reset_view(&mut self, data: &ItineraryData, surface: &mut Surface) {
        if self.mode == Mode::Default {
            return;
        }
        self.mode = Mode::Default;
        self.swap_view(data, surface);
    }

    fn swap_view(&mut self, data: &ItineraryData, surface: &mut Surface) {
        let view = match self.mode {
            Mode::Default => ViewKind::Card(CardView::new(&self.waypoint, data)),
            Mode::Editing => ViewKind::Form(FormView::edit(self.waypoint.clone())),
        };
        self.mounted = match self.mounted.take() {
            None => Some(surface.mount(view, Container::Board)),
            Some(old) => surface.replace(view, old),
        };
    }

    pub fn favorite_request(&self) -> ActionRequest {
        let mut flipped = self.waypoint.clone();
        flipped.is_favorite = !flipped.is_favorite;
        ActionRequest { action: UserAction::Update(flipped), update: UpdateType::Minor }
    }

    pub fn delete_request(&self) -> ActionRequest {
        ActionRequest {
            action: UserAction::Delete(self.waypoint.clone()),
            update: UpdateType::Minor,
        }
    }

    pub fn submit_request(draft: Waypoint) -> ActionRequest {
        ActionRequest { action: UserAction::Update(draft), update: UpdateType::Minor }
    }

    /// Unmounts whatever is on the board for this presenter; safe in any
    /// mode and when already destroyed.
    pub fn destroy(&mut self, surface: &mut Surface) {
        if let Some(id) = self.mounted.take() {
            surface.unmount(id);
        }
    }
}
