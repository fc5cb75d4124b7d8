//! The list presenter: owns the item-presenter registry, the sort/filter
//! view state, the loading/content/empty render states, and the single
//! active-editor slot that keeps at most one edit session open.
//!
//! Model and filter notifications arrive through `handle_model_event` and
//! `handle_filter_event`; user intent arrives through the `begin_*`,
//! `submit_active`, `delete_active` and `cancel_active` entry points and is
//! routed to the model as `ActionRequest`s by `dispatch_action`.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::application::events::{ActionRequest, FilterEvent, ModelEvent, UpdateType, UserAction};
use crate::application::item_presenter::ItemPresenter;
use crate::application::model::{FilterModel, TripModel};
use crate::application::new_item_presenter::NewItemPresenter;
use crate::application::render::{ComponentId, Container, Position, Surface};
use crate::application::views::{
    LoadingView, MessageView, SortBarView, SummaryView, ViewKind,
};
use crate::domain::{
    DomainError, DomainResult, FilterKind, SortKind, TripSummary, Waypoint, WaypointId,
    filter_waypoints,
};

/// Who currently holds the one edit session. Held by the list presenter;
/// acquired on edit entry and released on every exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorHandle {
    Item(WaypointId),
    Creator,
}

#[derive(Debug)]
pub struct ListPresenter {
    items: HashMap<WaypointId, ItemPresenter>,
    new_item: NewItemPresenter,
    active_editor: Option<EditorHandle>,
    sort_kind: SortKind,
    filter_kind: FilterKind,
    loading: bool,
    sort_bar: Option<ComponentId>,
    summary: Option<ComponentId>,
    message: Option<ComponentId>,
    loading_view: Option<ComponentId>,
}

impl Default for ListPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ListPresenter {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            new_item: NewItemPresenter::new(),
            active_editor: None,
            sort_kind: SortKind::default(),
            filter_kind: FilterKind::default(),
            loading: true,
            sort_bar: None,
            summary: None,
            message: None,
            loading_view: None,
        }
    }

    /// Entry point: the loading placeholder while the model has no data,
    /// the full content afterwards.
    pub fn init(&mut self, model: &TripModel, surface: &mut Surface, now: NaiveDateTime) {
        self.render(model, surface, now);
    }

    pub fn sort_kind(&self) -> SortKind {
        self.sort_kind
    }

    pub fn filter_kind(&self) -> FilterKind {
        self.filter_kind
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_editor(&self) -> Option<EditorHandle> {
        self.active_editor
    }

    pub fn is_creating(&self) -> bool {
        self.new_item.is_open()
    }

    /// The "New event" affordance is disabled while the creation form is
    /// open or data has not arrived yet.
    pub fn create_enabled(&self) -> bool {
        !self.loading && !self.new_item.is_open()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.items.keys().copied()
    }

    /// Open edit sessions across the whole registry, creation flow
    /// included. The editor slot keeps this at most 1.
    pub fn open_sessions(&self) -> usize {
        let editing = self.items.values().filter(|p| p.is_editing()).count();
        editing + usize::from(self.new_item.is_open())
    }

    /// The board component of the open form, if an edit session is active.
    /// Escape and form keystrokes are routed through this, which scopes
    /// cancellation to exactly the session's lifetime.
    pub fn active_form_id(&self) -> Option<ComponentId> {
        match self.active_editor? {
            EditorHandle::Item(id) => self
                .items
                .get(&id)
                .filter(|p| p.is_editing())
                .and_then(|p| p.component()),
            EditorHandle::Creator => self.new_item.component(),
        }
    }

    /// The filtered-then-sorted projection. Called once per render pass;
    /// the result is reused for cards, the summary and the empty check.
    fn visible_waypoints(&self, model: &TripModel, now: NaiveDateTime) -> Vec<Waypoint> {
        let filtered = filter_waypoints(self.filter_kind, model.waypoints(), now);
        model.sort_waypoints(filtered, self.sort_kind)
    }

    /// Routes a presenter's mutation request to the model, hint unchanged.
    /// The model's result comes back so a failed save can keep its form
    /// open instead of optimistically closing.
    pub fn dispatch_action(&self, request: ActionRequest, model: &mut TripModel) -> DomainResult<()> {
        match request.action {
            UserAction::Update(waypoint) => model.update_waypoint(request.update, waypoint),
            UserAction::Add(waypoint) => model.add_waypoint(request.update, waypoint),
            UserAction::Delete(waypoint) => model.delete_waypoint(request.update, waypoint),
        }
    }

    /// Single entry point for model-driven re-rendering.
    pub fn handle_model_event(
        &mut self,
        event: ModelEvent,
        model: &TripModel,
        surface: &mut Surface,
        now: NaiveDateTime,
    ) {
        match event {
            ModelEvent::Patch(waypoint) => {
                if let Some(presenter) = self.items.get_mut(&waypoint.id) {
                    presenter.init(waypoint, model.data(), surface);
                }
            }
            ModelEvent::Minor => {
                self.clear(surface, false, false);
                self.render(model, surface, now);
            }
            ModelEvent::Major => {
                self.clear(surface, true, true);
                self.render(model, surface, now);
            }
            ModelEvent::Init => {
                self.loading = false;
                if let Some(id) = self.loading_view.take() {
                    surface.unmount(id);
                }
                self.render(model, surface, now);
            }
        }
    }

    /// Filter notifications carry the newly selected kind; the presenter
    /// adopts it and, on MAJOR, resets the sort kind to its default.
    pub fn handle_filter_event(
        &mut self,
        event: FilterEvent,
        model: &TripModel,
        surface: &mut Surface,
        now: NaiveDateTime,
    ) {
        self.filter_kind = event.kind;
        if event.update == UpdateType::Major {
            self.sort_kind = SortKind::default();
        }
        self.clear(surface, false, false);
        self.render(model, surface, now);
    }

    /// No-op on the current kind; otherwise a full clear-and-rerender that
    /// preserves the filter state.
    pub fn handle_sort_change(
        &mut self,
        kind: SortKind,
        model: &TripModel,
        surface: &mut Surface,
        now: NaiveDateTime,
    ) {
        if self.sort_kind == kind || self.loading {
            return;
        }
        self.sort_kind = kind;
        self.clear(surface, false, false);
        self.render(model, surface, now);
    }

    /// Grants the edit session to the given item, resetting whoever held
    /// it first. Re-requesting the current holder is a no-op.
    pub fn begin_edit(&mut self, id: WaypointId, model: &TripModel, surface: &mut Surface) {
        if self.active_editor == Some(EditorHandle::Item(id)) {
            return;
        }
        if !self.items.contains_key(&id) {
            return;
        }
        self.reset_edit_sessions(model, surface);
        if let Some(presenter) = self.items.get_mut(&id) {
            presenter.begin_edit(model.data(), surface);
            self.active_editor = Some(EditorHandle::Item(id));
        }
    }

    /// Returns the current slot holder to Default, discarding its draft,
    /// and releases the slot.
    pub fn reset_edit_sessions(&mut self, model: &TripModel, surface: &mut Surface) {
        match self.active_editor.take() {
            Some(EditorHandle::Item(id)) => {
                if let Some(presenter) = self.items.get_mut(&id) {
                    presenter.reset_view(model.data(), surface);
                }
            }
            Some(EditorHandle::Creator) => {
                self.new_item.cancel(surface);
            }
            None => {}
        }
    }

    /// Starts the create flow: a draft with system defaults, then a
    /// MAJOR-style reset of sort and filter *before* the form opens, so the
    /// new item is guaranteed visible whatever the user had active.
    pub fn begin_create(
        &mut self,
        model: &TripModel,
        filter: &mut FilterModel,
        surface: &mut Surface,
        now: NaiveDateTime,
    ) -> DomainResult<()> {
        if self.loading || self.new_item.is_open() {
            return Ok(());
        }
        let Some(first) = model.destinations().first() else {
            return Err(DomainError::NoDestinations);
        };
        let draft = Waypoint::draft(first.id, now);

        self.sort_kind = SortKind::default();
        filter.set_filter(UpdateType::Major, FilterKind::Everything);
        while let Some(event) = filter.take_event() {
            self.handle_filter_event(event, model, surface, now);
        }

        self.new_item.open(draft, surface);
        self.active_editor = Some(EditorHandle::Creator);
        Ok(())
    }

    /// Finishes whichever form holds the edit session and dispatches the
    /// resulting UPDATE or ADD. Validation and dispatch failures leave the
    /// form open with an inline error.
    pub fn submit_active(&mut self, model: &mut TripModel, surface: &mut Surface) {
        match self.active_editor {
            Some(EditorHandle::Item(id)) => {
                let Some(form_id) = self.active_form_id() else { return };
                let finished = match surface.view_mut(form_id) {
                    Some(ViewKind::Form(form)) => form.finish(),
                    _ => return,
                };
                let Ok(draft) = finished else { return };
                let request = ItemPresenter::submit_request(draft);
                match self.dispatch_action(request, model) {
                    Ok(()) => {
                        self.active_editor = None;
                        if let Some(presenter) = self.items.get_mut(&id) {
                            presenter.reset_view(model.data(), surface);
                        }
                    }
                    Err(err) => Self::set_form_error(surface, form_id, &err),
                }
            }
            Some(EditorHandle::Creator) => {
                let Some(form_id) = self.new_item.component() else { return };
                let finished = match surface.view_mut(form_id) {
                    Some(ViewKind::Form(form)) => form.finish(),
                    _ => return,
                };
                let Ok(draft) = finished else { return };
                let request = NewItemPresenter::add_request(draft);
                match self.dispatch_action(request, model) {
                    Ok(()) => {
                        self.active_editor = None;
                        self.new_item.destroy(surface);
                    }
                    Err(err) => Self::set_form_error(surface, form_id, &err),
                }
            }
            None => {}
        }
    }

    /// Deletes the waypoint behind the open edit form. In the creation
    /// flow this is a cancel: there is nothing to delete yet.
    pub fn delete_active(&mut self, model: &mut TripModel, surface: &mut Surface) {
        match self.active_editor {
            Some(EditorHandle::Item(id)) => {
                let Some(request) = self.items.get(&id).map(|p| p.delete_request()) else {
                    return;
                };
                let form_id = self.active_form_id();
                match self.dispatch_action(request, model) {
                    Ok(()) => {
                        self.active_editor = None;
                        if let Some(presenter) = self.items.get_mut(&id) {
                            presenter.reset_view(model.data(), surface);
                        }
                    }
                    Err(err) => {
                        if let Some(form_id) = form_id {
                            Self::set_form_error(surface, form_id, &err);
                        }
                    }
                }
            }
            Some(EditorHandle::Creator) => self.cancel_active(model, surface),
            None => {}
        }
    }

    /// Escape: discard the open session and return to Default.
    pub fn cancel_active(&mut self, model: &TripModel, surface: &mut Surface) {
        self.reset_edit_sessions(model, surface);
    }

    /// Favorite toggles come from the card, not the form; the failure
    /// lands in the status bar rather than an inline error.
    pub fn toggle_favorite(&mut self, id: WaypointId, model: &mut TripModel) -> DomainResult<()> {
        let Some(request) = self.items.get(&id).map(|p| p.favorite_request()) else {
            return Ok(());
        };
        self.dispatch_action(request, model)
    }

    fn set_form_error(surface: &mut Surface, form_id: ComponentId, err: &DomainError) {
        if let Some(ViewKind::Form(form)) = surface.view_mut(form_id) {
            form.error = Some(err.to_string());
        }
    }

    /// Destroys every item presenter, the creation form, and the list
    /// chrome. Sort/filter kinds are reset only when the flags say so.
    fn clear(&mut self, surface: &mut Surface, reset_sort: bool, reset_filter: bool) {
        for (_, mut presenter) in self.items.drain() {
            presenter.destroy(surface);
        }
        self.new_item.destroy(surface);
        self.active_editor = None;
        if let Some(id) = self.sort_bar.take() {
            surface.unmount(id);
        }
        if let Some(id) = self.summary.take() {
            surface.unmount(id);
        }
        if let Some(id) = self.message.take() {
            surface.unmount(id);
        }
        if let Some(id) = self.loading_view.take() {
            surface.unmount(id);
        }
        if reset_sort {
            self.sort_kind = SortKind::default();
        }
        if reset_filter {
            self.filter_kind = FilterKind::default();
        }
    }

    fn render(&mut self, model: &TripModel, surface: &mut Surface, now: NaiveDateTime) {
        if self.loading {
            if self.loading_view.is_none() {
                self.loading_view =
                    Some(surface.mount(ViewKind::Loading(LoadingView), Container::Board));
            }
            return;
        }

        // One derivation per pass, shared by the empty check, the cards
        // and the summary.
        let visible = self.visible_waypoints(model, now);

        if visible.is_empty() {
            self.message = Some(surface.mount(
                ViewKind::Message(MessageView {
                    text: self.filter_kind.empty_message().to_string(),
                }),
                Container::Board,
            ));
            return;
        }

        self.sort_bar = Some(surface.mount(
            ViewKind::SortBar(SortBarView { active: self.sort_kind }),
            Container::Controls,
        ));

        for waypoint in &visible {
            let mut presenter = ItemPresenter::new(waypoint.clone());
            presenter.init(waypoint.clone(), model.data(), surface);
            self.items.insert(waypoint.id, presenter);
        }

        let summary = TripSummary::compute(&visible, model.data());
        self.summary = Some(surface.mount_at(
            ViewKind::Summary(SummaryView { summary }),
            Container::Summary,
            Position::Prepend,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::views::FormField;
    use crate::domain::ItineraryData;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use std::collections::HashSet;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn pump(presenter: &mut ListPresenter, model: &mut TripModel, surface: &mut Surface) {
        while let Some(event) = model.take_event() {
            presenter.handle_model_event(event, model, surface, noon());
        }
    }

    fn setup() -> (TripModel, FilterModel, ListPresenter, Surface) {
        setup_with(ItineraryData::seed(noon()))
    }

    fn setup_with(data: ItineraryData) -> (TripModel, FilterModel, ListPresenter, Surface) {
        let mut model = TripModel::new();
        let filter = FilterModel::new();
        let mut presenter = ListPresenter::new();
        let mut surface = Surface::new();
        presenter.init(&model, &mut surface, noon());
        model.load(data);
        pump(&mut presenter, &mut model, &mut surface);
        (model, filter, presenter, surface)
    }

    fn board_cards(surface: &Surface) -> Vec<(ComponentId, WaypointId)> {
        surface
            .components(Container::Board)
            .iter()
            .filter_map(|mounted| match &mounted.view {
                ViewKind::Card(card) => Some((mounted.id, card.waypoint_id)),
                _ => None,
            })
            .collect()
    }

    fn day_ordered_ids(model: &TripModel) -> Vec<WaypointId> {
        let mut wps = model.waypoints().to_vec();
        wps.sort_by_key(|wp| wp.date_from);
        wps.iter().map(|wp| wp.id).collect()
    }

    #[test]
    fn test_loading_placeholder_until_init() {
        let model = TripModel::new();
        let mut presenter = ListPresenter::new();
        let mut surface = Surface::new();
        presenter.init(&model, &mut surface, noon());

        assert!(presenter.is_loading());
        let board = surface.components(Container::Board);
        assert_eq!(board.len(), 1);
        assert!(matches!(board[0].view, ViewKind::Loading(_)));
        assert!(surface.components(Container::Controls).is_empty());
        assert!(surface.components(Container::Summary).is_empty());
    }

    #[test]
    fn test_init_event_renders_full_content() {
        let (model, _filter, presenter, surface) = setup();

        assert!(!presenter.is_loading());
        assert_eq!(surface.components(Container::Controls).len(), 1);
        assert_eq!(surface.components(Container::Summary).len(), 1);

        let cards = board_cards(&surface);
        let ids: Vec<WaypointId> = cards.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, day_ordered_ids(&model));

        // The registry mirrors exactly what is rendered.
        let registry: HashSet<WaypointId> = presenter.item_ids().collect();
        let rendered: HashSet<WaypointId> = ids.into_iter().collect();
        assert_eq!(registry, rendered);
    }

    #[test]
    fn test_empty_list_renders_message_without_chrome() {
        let mut data = ItineraryData::seed(noon());
        data.waypoints.clear();
        let (_model, _filter, presenter, surface) = setup_with(data);

        assert!(!presenter.is_loading());
        let board = surface.components(Container::Board);
        assert_eq!(board.len(), 1);
        match &board[0].view {
            ViewKind::Message(message) => {
                assert_eq!(message.text, "Click New Event to create your first point");
            }
            other => panic!("unexpected view: {:?}", other),
        }
        assert!(surface.components(Container::Controls).is_empty());
        assert!(surface.components(Container::Summary).is_empty());
    }

    #[test]
    fn test_empty_filtered_view_uses_filter_message() {
        let mut data = ItineraryData::seed(noon());
        data.waypoints.retain(|wp| wp.date_from < noon());
        let (model, _filter, mut presenter, mut surface) = setup_with(data);

        let event = FilterEvent { update: UpdateType::Major, kind: FilterKind::Future };
        presenter.handle_filter_event(event, &model, &mut surface, noon());

        let board = surface.components(Container::Board);
        assert_eq!(board.len(), 1);
        match &board[0].view {
            ViewKind::Message(message) => {
                assert_eq!(message.text, "There are no future events now");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_single_edit_session_across_items() {
        let (model, _filter, mut presenter, mut surface) = setup();
        let ids = day_ordered_ids(&model);
        let (a, b) = (ids[0], ids[1]);

        presenter.begin_edit(a, &model, &mut surface);
        assert_eq!(presenter.open_sessions(), 1);
        assert_eq!(presenter.active_editor(), Some(EditorHandle::Item(a)));

        presenter.begin_edit(b, &model, &mut surface);
        assert_eq!(presenter.open_sessions(), 1);
        assert_eq!(presenter.active_editor(), Some(EditorHandle::Item(b)));

        // A is back on a card, B is on a form.
        let forms: Vec<WaypointId> = surface
            .components(Container::Board)
            .iter()
            .filter_map(|mounted| match &mounted.view {
                ViewKind::Form(form) => Some(form.waypoint_id()),
                _ => None,
            })
            .collect();
        assert_eq!(forms, vec![b]);
        assert!(board_cards(&surface).iter().any(|(_, id)| *id == a));
    }

    #[test]
    fn test_begin_edit_same_item_is_noop() {
        let (model, _filter, mut presenter, mut surface) = setup();
        let id = day_ordered_ids(&model)[0];

        presenter.begin_edit(id, &model, &mut surface);
        let form_id = presenter.active_form_id();
        presenter.begin_edit(id, &model, &mut surface);

        assert_eq!(presenter.active_form_id(), form_id);
        assert_eq!(presenter.open_sessions(), 1);
    }

    #[test]
    fn test_cancel_active_discards_session() {
        let (model, _filter, mut presenter, mut surface) = setup();
        let id = day_ordered_ids(&model)[0];

        presenter.begin_edit(id, &model, &mut surface);
        presenter.cancel_active(&model, &mut surface);

        assert_eq!(presenter.open_sessions(), 0);
        assert_eq!(presenter.active_editor(), None);
        assert!(board_cards(&surface).iter().any(|(_, card)| *card == id));
    }

    #[test]
    fn test_patch_reinitializes_only_the_target() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let target = day_ordered_ids(&model)[0];

        let before = board_cards(&surface);
        let sort_bar_before = surface.components(Container::Controls)[0].id;
        let summary_before = surface.components(Container::Summary)[0].id;

        presenter.toggle_favorite(target, &mut model).unwrap();
        pump(&mut presenter, &mut model, &mut surface);

        let after = board_cards(&surface);
        assert_eq!(before.len(), after.len());
        for ((id_before, wp), (id_after, _)) in before.iter().zip(after.iter()) {
            if *wp == target {
                assert_ne!(id_before, id_after);
            } else {
                assert_eq!(id_before, id_after);
            }
        }
        assert_eq!(surface.components(Container::Controls)[0].id, sort_bar_before);
        assert_eq!(surface.components(Container::Summary)[0].id, summary_before);

        let flipped = model.waypoint(target).unwrap();
        let shown = after.iter().find(|(_, wp)| *wp == target).unwrap();
        match surface.view(shown.0) {
            Some(ViewKind::Card(card)) => assert_eq!(card.is_favorite, flipped.is_favorite),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_minor_preserves_sort_and_filter() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let event = FilterEvent { update: UpdateType::Major, kind: FilterKind::Future };
        presenter.handle_filter_event(event, &model, &mut surface, noon());
        presenter.handle_sort_change(SortKind::Price, &model, &mut surface, noon());

        let mut moved = model.waypoints()[1].clone();
        moved.date_to = moved.date_to + Duration::hours(1);
        model.update_waypoint(UpdateType::Minor, moved).unwrap();
        pump(&mut presenter, &mut model, &mut surface);

        assert_eq!(presenter.sort_kind(), SortKind::Price);
        assert_eq!(presenter.filter_kind(), FilterKind::Future);
    }

    #[test]
    fn test_major_resets_sort_and_filter() {
        let (model, _filter, mut presenter, mut surface) = setup();
        let event = FilterEvent { update: UpdateType::Major, kind: FilterKind::Past };
        presenter.handle_filter_event(event, &model, &mut surface, noon());
        presenter.handle_sort_change(SortKind::Duration, &model, &mut surface, noon());

        presenter.handle_model_event(ModelEvent::Major, &model, &mut surface, noon());

        assert_eq!(presenter.sort_kind(), SortKind::default());
        assert_eq!(presenter.filter_kind(), FilterKind::default());
    }

    #[test]
    fn test_filter_event_adopts_kind_and_resets_sort() {
        let (model, _filter, mut presenter, mut surface) = setup();
        presenter.handle_sort_change(SortKind::Price, &model, &mut surface, noon());

        let event = FilterEvent { update: UpdateType::Major, kind: FilterKind::Past };
        presenter.handle_filter_event(event, &model, &mut surface, noon());

        assert_eq!(presenter.filter_kind(), FilterKind::Past);
        assert_eq!(presenter.sort_kind(), SortKind::default());
    }

    #[test]
    fn test_redundant_sort_change_is_noop() {
        let (model, _filter, mut presenter, mut surface) = setup();
        let before: Vec<ComponentId> =
            board_cards(&surface).iter().map(|(id, _)| *id).collect();

        presenter.handle_sort_change(SortKind::default(), &model, &mut surface, noon());

        let after: Vec<ComponentId> =
            board_cards(&surface).iter().map(|(id, _)| *id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sort_change_reorders_cards() {
        let (model, _filter, mut presenter, mut surface) = setup();
        presenter.handle_sort_change(SortKind::Price, &model, &mut surface, noon());

        let mut by_price = model.waypoints().to_vec();
        by_price.sort_by(|a, b| b.base_price.cmp(&a.base_price));
        let expected: Vec<WaypointId> = by_price.iter().map(|wp| wp.id).collect();
        let shown: Vec<WaypointId> =
            board_cards(&surface).iter().map(|(_, id)| *id).collect();
        assert_eq!(shown, expected);
    }

    #[test]
    fn test_begin_create_resets_state_before_opening_form() {
        let (model, mut filter, mut presenter, mut surface) = setup();
        let major = FilterEvent { update: UpdateType::Major, kind: FilterKind::Past };
        presenter.handle_filter_event(major, &model, &mut surface, noon());
        presenter.handle_sort_change(SortKind::Price, &model, &mut surface, noon());

        presenter.begin_create(&model, &mut filter, &mut surface, noon()).unwrap();

        assert_eq!(presenter.sort_kind(), SortKind::default());
        assert_eq!(presenter.filter_kind(), FilterKind::Everything);
        assert_eq!(filter.active(), FilterKind::Everything);
        assert!(presenter.is_creating());
        assert!(!presenter.create_enabled());
        assert_eq!(presenter.active_editor(), Some(EditorHandle::Creator));

        // The creation form sits on top of the board.
        let board = surface.components(Container::Board);
        match &board[0].view {
            ViewKind::Form(form) => {
                assert!(form.is_new);
                assert_eq!(form.draft.destination, model.destinations()[0].id);
                assert_eq!(form.draft.date_from, noon());
                assert_eq!(form.draft.date_to, noon());
                assert!(form.draft.offers.is_empty());
                assert!(!form.draft.is_favorite);
            }
            other => panic!("unexpected view: {:?}", other),
        }

        presenter.cancel_active(&model, &mut surface);
        assert!(presenter.create_enabled());
        assert_eq!(presenter.open_sessions(), 0);
    }

    #[test]
    fn test_begin_create_requires_destinations() {
        let mut data = ItineraryData::seed(noon());
        data.destinations.clear();
        data.waypoints.clear();
        let (model, mut filter, mut presenter, mut surface) = setup_with(data);

        let result = presenter.begin_create(&model, &mut filter, &mut surface, noon());
        assert_eq!(result, Err(DomainError::NoDestinations));
        assert!(!presenter.is_creating());
    }

    #[test]
    fn test_begin_create_cancels_open_edit_session() {
        let (model, mut filter, mut presenter, mut surface) = setup();
        let id = day_ordered_ids(&model)[0];
        presenter.begin_edit(id, &model, &mut surface);

        presenter.begin_create(&model, &mut filter, &mut surface, noon()).unwrap();

        assert_eq!(presenter.open_sessions(), 1);
        assert_eq!(presenter.active_editor(), Some(EditorHandle::Creator));
    }

    #[test]
    fn test_submit_edit_updates_model_and_closes_form() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let id = day_ordered_ids(&model)[0];
        presenter.begin_edit(id, &model, &mut surface);

        let form_id = presenter.active_form_id().unwrap();
        if let Some(ViewKind::Form(form)) = surface.view_mut(form_id) {
            form.draft.base_price = 777;
        }
        presenter.submit_active(&mut model, &mut surface);
        pump(&mut presenter, &mut model, &mut surface);

        assert_eq!(model.waypoint(id).unwrap().base_price, 777);
        assert_eq!(presenter.open_sessions(), 0);
        assert_eq!(presenter.active_editor(), None);
    }

    #[test]
    fn test_submit_failure_keeps_form_open_with_error() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let id = day_ordered_ids(&model)[0];
        presenter.begin_edit(id, &model, &mut surface);

        // The waypoint disappears behind the presenter's back, so the
        // dispatched update cannot resolve.
        let snapshot = model.waypoint(id).unwrap().clone();
        model.delete_waypoint(UpdateType::Minor, snapshot).unwrap();

        presenter.submit_active(&mut model, &mut surface);

        assert_eq!(presenter.active_editor(), Some(EditorHandle::Item(id)));
        let form_id = presenter.active_form_id().unwrap();
        match surface.view(form_id) {
            Some(ViewKind::Form(form)) => {
                assert!(form.error.as_deref().unwrap_or("").contains("Unknown waypoint"));
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_form_input_blocks_submit() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let id = day_ordered_ids(&model)[0];
        presenter.begin_edit(id, &model, &mut surface);

        let form_id = presenter.active_form_id().unwrap();
        if let Some(ViewKind::Form(form)) = surface.view_mut(form_id) {
            form.focus_next();
            assert_eq!(form.field, FormField::DateFrom);
            form.input = "garbage".to_string();
        }
        presenter.submit_active(&mut model, &mut surface);

        assert_eq!(presenter.active_editor(), Some(EditorHandle::Item(id)));
        match surface.view(form_id) {
            Some(ViewKind::Form(form)) => assert!(form.error.is_some()),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_delete_active_removes_waypoint() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let ids = day_ordered_ids(&model);
        let id = ids[0];
        presenter.begin_edit(id, &model, &mut surface);

        presenter.delete_active(&mut model, &mut surface);
        pump(&mut presenter, &mut model, &mut surface);

        assert!(model.waypoint(id).is_none());
        assert_eq!(board_cards(&surface).len(), ids.len() - 1);
        assert_eq!(presenter.open_sessions(), 0);
    }

    #[test]
    fn test_create_submit_adds_waypoint() {
        let (mut model, mut filter, mut presenter, mut surface) = setup();
        let count = model.waypoints().len();
        presenter.begin_create(&model, &mut filter, &mut surface, noon()).unwrap();

        let form_id = presenter.active_form_id().unwrap();
        let draft_id = match surface.view_mut(form_id) {
            Some(ViewKind::Form(form)) => {
                form.draft.base_price = 50;
                form.draft.id
            }
            other => panic!("unexpected view: {:?}", other),
        };
        presenter.submit_active(&mut model, &mut surface);
        pump(&mut presenter, &mut model, &mut surface);

        assert_eq!(model.waypoints().len(), count + 1);
        assert!(presenter.create_enabled());
        assert!(board_cards(&surface).iter().any(|(_, id)| *id == draft_id));
    }

    #[test]
    fn test_registry_mirrors_rendered_cards_after_rerender() {
        let (mut model, _filter, mut presenter, mut surface) = setup();
        let mut moved = model.waypoints()[0].clone();
        moved.date_from = moved.date_from + Duration::days(10);
        moved.date_to = moved.date_to + Duration::days(10);
        model.update_waypoint(UpdateType::Minor, moved).unwrap();
        pump(&mut presenter, &mut model, &mut surface);

        let registry: HashSet<WaypointId> = presenter.item_ids().collect();
        let rendered: HashSet<WaypointId> =
            board_cards(&surface).iter().map(|(_, id)| *id).collect();
        assert_eq!(registry, rendered);
    }
}
