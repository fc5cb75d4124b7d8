//! Application root state for the terminal itinerary planner.
//!
//! `App` owns the models, the list presenter, and the component surface,
//! and forwards user intent into the presenter. It also pumps the model
//! notification queues so every dispatched action is re-rendered before the
//! next key event is processed.

use chrono::{Local, NaiveDateTime};

use crate::application::events::UpdateType;
use crate::application::list_presenter::ListPresenter;
use crate::application::model::{FilterModel, TripModel};
use crate::application::render::{Container, Surface};
use crate::application::views::{CardView, FormView, ViewKind};
use crate::domain::{FilterKind, ItineraryData, WaypointId};

#[derive(Debug, Default)]
pub struct App {
    /// The itinerary model; owns the data and fires update notifications
    pub trip_model: TripModel,
    /// The filter model; fires notifications carrying the selected kind
    pub filter_model: FilterModel,
    /// The presenter synchronization engine
    pub list_presenter: ListPresenter,
    /// Retained components the terminal renderer walks each frame
    pub surface: Surface,
    /// Cursor over the board's cards (zero-based, clamped after renders)
    pub selected: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Help screen is displayed
    pub help_open: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// First render; shows the loading placeholder until data arrives.
    pub fn init(&mut self) {
        self.list_presenter.init(&self.trip_model, &mut self.surface, Self::now());
    }

    /// Hands initial data to the model and delivers the INIT notification.
    pub fn load_initial(&mut self, data: ItineraryData) {
        self.trip_model.load(data);
        self.pump();
    }

    /// Drains pending model and filter notifications into the presenter.
    pub fn pump(&mut self) {
        let now = Self::now();
        while let Some(event) = self.trip_model.take_event() {
            self.list_presenter.handle_model_event(
                event,
                &self.trip_model,
                &mut self.surface,
                now,
            );
        }
        while let Some(event) = self.filter_model.take_event() {
            self.list_presenter.handle_filter_event(
                event,
                &self.trip_model,
                &mut self.surface,
                now,
            );
        }
        self.clamp_selection();
    }

    pub fn is_editing(&self) -> bool {
        self.list_presenter.active_editor().is_some()
    }

    /// Waypoint ids of the cards on the board, in display order.
    pub fn card_ids(&self) -> Vec<WaypointId> {
        self.surface
            .components(Container::Board)
            .iter()
            .filter_map(|mounted| match &mounted.view {
                ViewKind::Card(card) => Some(card.waypoint_id),
                _ => None,
            })
            .collect()
    }

    pub fn card_count(&self) -> usize {
        self.surface
            .components(Container::Board)
            .iter()
            .filter(|mounted| matches!(mounted.view, ViewKind::Card(_)))
            .count()
    }

    fn clamp_selection(&mut self) {
        let count = self.card_count();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.card_count() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn selected_waypoint(&self) -> Option<WaypointId> {
        self.card_ids().get(self.selected).copied()
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        self.surface
            .components(Container::Board)
            .iter()
            .filter_map(|mounted| match &mounted.view {
                ViewKind::Card(card) => Some(card),
                _ => None,
            })
            .nth(self.selected)
    }

    pub fn begin_edit_selected(&mut self) {
        if let Some(id) = self.selected_waypoint() {
            self.list_presenter.begin_edit(id, &self.trip_model, &mut self.surface);
        }
    }

    pub fn toggle_favorite_selected(&mut self) {
        if let Some(id) = self.selected_waypoint() {
            if let Err(err) = self.list_presenter.toggle_favorite(id, &mut self.trip_model) {
                self.status_message = Some(err.to_string());
            }
        }
    }

    pub fn begin_create(&mut self) {
        let result = self.list_presenter.begin_create(
            &self.trip_model,
            &mut self.filter_model,
            &mut self.surface,
            Self::now(),
        );
        if let Err(err) = result {
            self.status_message = Some(err.to_string());
        }
        self.clamp_selection();
    }

    pub fn cycle_sort(&mut self) {
        let next = self.list_presenter.sort_kind().next();
        self.list_presenter.handle_sort_change(
            next,
            &self.trip_model,
            &mut self.surface,
            Self::now(),
        );
        self.clamp_selection();
    }

    /// Filter selections always go through the filter model with MAJOR
    /// granularity; the presenter adopts the kind when the event is pumped.
    pub fn set_filter(&mut self, kind: FilterKind) {
        self.filter_model.set_filter(UpdateType::Major, kind);
    }

    pub fn submit_active(&mut self) {
        self.list_presenter.submit_active(&mut self.trip_model, &mut self.surface);
    }

    pub fn delete_active(&mut self) {
        self.list_presenter.delete_active(&mut self.trip_model, &mut self.surface);
    }

    pub fn cancel_active(&mut self) {
        self.list_presenter.cancel_active(&self.trip_model, &mut self.surface);
    }

    /// The open form plus the catalogs its field editing needs.
    pub fn active_form_mut(&mut self) -> Option<(&mut FormView, &ItineraryData)> {
        let id = self.list_presenter.active_form_id()?;
        let data = self.trip_model.data();
        match self.surface.view_mut(id) {
            Some(ViewKind::Form(form)) => Some((form, data)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortKind;
    use chrono::Duration;

    fn loaded_app() -> App {
        let mut app = App::new();
        app.init();
        app.load_initial(ItineraryData::seed(App::now()));
        app
    }

    #[test]
    fn test_app_default() {
        let app = App::new();
        assert_eq!(app.selected, 0);
        assert!(app.status_message.is_none());
        assert!(!app.help_open);
        assert!(app.list_presenter.is_loading());
    }

    #[test]
    fn test_load_initial_renders_content() {
        let app = loaded_app();
        assert!(!app.list_presenter.is_loading());
        assert_eq!(app.card_count(), 3);
        assert!(app.selected_waypoint().is_some());
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = loaded_app();
        app.select_previous();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);
        app.select_next();
        assert_eq!(app.selected, 2);

        // Shrink the visible list; the cursor clamps on the next pump.
        app.set_filter(FilterKind::Past);
        app.pump();
        assert_eq!(app.card_count(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_begin_edit_selected_opens_session() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        app.begin_edit_selected();
        assert!(app.is_editing());
        assert_eq!(
            app.active_form_mut().map(|(form, _)| form.waypoint_id()),
            Some(id)
        );
    }

    #[test]
    fn test_toggle_favorite_selected_round_trip() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        let before = app.trip_model.waypoint(id).unwrap().is_favorite;

        app.toggle_favorite_selected();
        app.pump();

        assert_eq!(app.trip_model.waypoint(id).unwrap().is_favorite, !before);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_set_filter_applies_on_pump() {
        let mut app = loaded_app();
        app.set_filter(FilterKind::Future);
        assert_eq!(app.list_presenter.filter_kind(), FilterKind::Everything);
        app.pump();
        assert_eq!(app.list_presenter.filter_kind(), FilterKind::Future);
    }

    #[test]
    fn test_cycle_sort_walks_kinds() {
        let mut app = loaded_app();
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Day);
        app.cycle_sort();
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Duration);
        app.cycle_sort();
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Price);
        app.cycle_sort();
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Day);
    }

    #[test]
    fn test_create_and_cancel_flow() {
        let mut app = loaded_app();
        app.begin_create();
        assert!(app.is_editing());
        assert!(app.list_presenter.is_creating());

        app.cancel_active();
        assert!(!app.is_editing());
        assert!(!app.list_presenter.is_creating());
    }

    #[test]
    fn test_submit_edited_form_through_app() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        app.begin_edit_selected();
        if let Some((form, _)) = app.active_form_mut() {
            form.draft.date_to = form.draft.date_to + Duration::hours(6);
        }
        app.submit_active();
        app.pump();

        assert!(!app.is_editing());
        let updated = app.trip_model.waypoint(id).unwrap();
        assert!(updated.duration() >= Duration::hours(6));
    }

    #[test]
    fn test_delete_active_through_app() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        app.begin_edit_selected();
        app.delete_active();
        app.pump();

        assert!(app.trip_model.waypoint(id).is_none());
        assert_eq!(app.card_count(), 2);
    }
}
