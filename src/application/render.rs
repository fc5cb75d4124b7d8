//! Retained component surface: the mount/unmount/replace primitives the
//! presenters drive and the terminal renderer walks each frame.
//!
//! Components are opaque to the presenters apart from their stable
//! `ComponentId`, which is what makes "this update did not touch that
//! component" an observable, testable property.

use super::views::ViewKind;

/// Stable identity of one mounted component. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u64);

/// The fixed slots of the page. `Summary` sits above the `Controls` row,
/// which sits above the `Board` holding cards, forms and placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Summary,
    Controls,
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Append,
    Prepend,
}

#[derive(Debug)]
pub struct Mounted {
    pub id: ComponentId,
    pub view: ViewKind,
}

#[derive(Debug, Default)]
pub struct Surface {
    next_id: u64,
    summary: Vec<Mounted>,
    controls: Vec<Mounted>,
    board: Vec<Mounted>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, container: Container) -> &mut Vec<Mounted> {
        match container {
            Container::Summary => &mut self.summary,
            Container::Controls => &mut self.controls,
            Container::Board => &mut self.board,
        }
    }

    fn fresh_id(&mut self) -> ComponentId {
        self.next_id += 1;
        ComponentId(self.next_id)
    }

    /// Mounts `view` at the end of `container`.
    pub fn mount(&mut self, view: ViewKind, container: Container) -> ComponentId {
        self.mount_at(view, container, Position::Append)
    }

    pub fn mount_at(
        &mut self,
        view: ViewKind,
        container: Container,
        position: Position,
    ) -> ComponentId {
        let id = self.fresh_id();
        let slot = self.slot_mut(container);
        match position {
            Position::Append => slot.push(Mounted { id, view }),
            Position::Prepend => slot.insert(0, Mounted { id, view }),
        }
        id
    }

    /// Removes the component; returns whether it was mounted.
    pub fn unmount(&mut self, id: ComponentId) -> bool {
        for slot in [&mut self.summary, &mut self.controls, &mut self.board] {
            if let Some(pos) = slot.iter().position(|mounted| mounted.id == id) {
                slot.remove(pos);
                return true;
            }
        }
        false
    }

    /// Swaps `old` for a new component in the same position, returning the
    /// new id, or `None` if `old` is not mounted.
    pub fn replace(&mut self, view: ViewKind, old: ComponentId) -> Option<ComponentId> {
        let id = self.fresh_id();
        for slot in [&mut self.summary, &mut self.controls, &mut self.board] {
            if let Some(pos) = slot.iter().position(|mounted| mounted.id == old) {
                slot[pos] = Mounted { id, view };
                return Some(id);
            }
        }
        None
    }

    pub fn components(&self, container: Container) -> &[Mounted] {
        match container {
            Container::Summary => &self.summary,
            Container::Controls => &self.controls,
            Container::Board => &self.board,
        }
    }

    pub fn view(&self, id: ComponentId) -> Option<&ViewKind> {
        [&self.summary, &self.controls, &self.board]
            .into_iter()
            .flatten()
            .find(|mounted| mounted.id == id)
            .map(|mounted| &mounted.view)
    }

    /// Views own their interactive state (form buffers, cursors), so the
    /// input layer mutates them in place through their id.
    pub fn view_mut(&mut self, id: ComponentId) -> Option<&mut ViewKind> {
        [&mut self.summary, &mut self.controls, &mut self.board]
            .into_iter()
            .flatten()
            .find(|mounted| mounted.id == id)
            .map(|mounted| &mut mounted.view)
    }
}
