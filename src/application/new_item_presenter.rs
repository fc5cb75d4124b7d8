//! Creation-form controller. Participates in the same single-editor
//! protocol as the item presenters; the list presenter owns the slot.

use crate::application::events::{ActionRequest, UpdateType, UserAction};
use crate::application::render::{ComponentId, Container, Position, Surface};
use crate::application::views::{FormView, ViewKind};
use crate::domain::Waypoint;

#[derive(Debug, Default)]
pub struct NewItemPresenter {
    form: Option<ComponentId>,
}

impl NewItemPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn component(&self) -> Option<ComponentId> {
        self.form
    }

    /// Mounts the creation form at the top of the board, seeded with the
    /// draft. Ignored while a form is already open.
    pub fn open(&mut self, draft: Waypoint, surface: &mut Surface) {
        if self.form.is_some() {
            return;
        }
        let view = ViewKind::Form(FormView::create(draft));
        self.form = Some(surface.mount_at(view, Container::Board, Position::Prepend));
    }

    pub fn add_request(draft: Waypoint) -> ActionRequest {
        ActionRequest { action: UserAction::Add(draft), update: UpdateType::Minor }
    }

    /// Same semantics as an item presenter's `reset_view`: discard the
    /// draft and tear the form down. Reached from `reset_edit_sessions`.
    pub fn cancel(&mut self, surface: &mut Surface) {
        self.destroy(surface);
    }

    /// Tears the form down. The create affordance re-enables because the
    /// owner observes `is_open` going false.
    pub fn destroy(&mut self, surface: &mut Surface) {
        if let Some(id) = self.form.take() {
            surface.unmount(id);
        }
    }
}
