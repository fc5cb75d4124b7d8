use crate::application::{App, FormField};
use crate::domain::FilterKind;
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::Path;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if app.help_open {
            Self::handle_help_mode(app, key);
        } else if app.is_editing() {
            Self::handle_form_mode(app, key, modifiers);
        } else {
            Self::handle_browse_mode(app, key, modifiers);
        }
        // Deliver the notifications of whatever was dispatched before the
        // next key event is processed.
        app.pump();
    }

    fn handle_browse_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                Self::export_csv(app);
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next();
            }
            KeyCode::Enter | KeyCode::F(2) => {
                app.begin_edit_selected();
            }
            KeyCode::Char('f') => {
                app.toggle_favorite_selected();
            }
            KeyCode::Char('n') => {
                app.begin_create();
            }
            KeyCode::Char('s') => {
                app.cycle_sort();
            }
            KeyCode::Char('1') => {
                app.set_filter(FilterKind::Everything);
            }
            KeyCode::Char('2') => {
                app.set_filter(FilterKind::Future);
            }
            KeyCode::Char('3') => {
                app.set_filter(FilterKind::Past);
            }
            KeyCode::Char('y') => {
                Self::copy_selected(app);
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.help_open = true;
            }
            KeyCode::Char('q') => {
                // Handled by the main loop.
            }
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('d') = key {
                app.delete_active();
            }
            return;
        }

        match key {
            KeyCode::Enter => {
                app.submit_active();
            }
            KeyCode::Esc => {
                app.cancel_active();
            }
            KeyCode::Tab | KeyCode::Down => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.focus_next();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.focus_prev();
                }
            }
            KeyCode::Left => {
                if let Some((form, data)) = app.active_form_mut() {
                    match form.field {
                        FormField::Destination => form.cycle_destination(-1, &data.destinations),
                        FormField::Offers => form.move_offer_cursor(-1, data.offers.len()),
                        _ => form.cursor_left(),
                    }
                }
            }
            KeyCode::Right => {
                if let Some((form, data)) = app.active_form_mut() {
                    match form.field {
                        FormField::Destination => form.cycle_destination(1, &data.destinations),
                        FormField::Offers => form.move_offer_cursor(1, data.offers.len()),
                        _ => form.cursor_right(),
                    }
                }
            }
            KeyCode::Char(' ') => {
                if let Some((form, data)) = app.active_form_mut() {
                    if form.field == FormField::Offers {
                        form.toggle_offer(&data.offers);
                    } else {
                        form.insert_char(' ');
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.backspace();
                }
            }
            KeyCode::Delete => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.delete();
                }
            }
            KeyCode::Home => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.cursor_home();
                }
            }
            KeyCode::End => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.cursor_end();
                }
            }
            KeyCode::Char(c) => {
                if let Some((form, _)) = app.active_form_mut() {
                    form.insert_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.help_open = false;
            }
            _ => {}
        }
    }

    fn copy_selected(app: &mut App) {
        let line = match app.selected_card() {
            Some(card) => format!(
                "{} {} ({}) {} €{}",
                card.day, card.times, card.duration, card.title, card.price
            ),
            None => return,
        };
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(line));
        app.status_message = Some(match result {
            Ok(()) => "Copied selected point to clipboard".to_string(),
            Err(err) => format!("Copy failed: {}", err),
        });
    }

    fn export_csv(app: &mut App) {
        let path = Path::new("itinerary.csv");
        app.status_message =
            Some(match CsvExporter::export_itinerary(app.trip_model.data(), path) {
                Ok(()) => format!("Exported to {}", path.display()),
                Err(err) => err.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::EditorHandle;
    use crate::domain::{ItineraryData, SortKind};

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.init();
        app.load_initial(ItineraryData::seed(App::now()));
        app
    }

    #[test]
    fn test_navigation_keys_move_selection() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_enter_opens_edit_and_typing_reaches_the_form() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.is_editing());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('9'));
        let (form, _) = app.active_form_mut().unwrap();
        assert_eq!(form.field, FormField::DateFrom);
        assert!(form.input.ends_with('9'));
    }

    #[test]
    fn test_escape_cancels_edit_without_saving() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        let before = app.trip_model.waypoint(id).unwrap().clone();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Esc);

        assert!(!app.is_editing());
        assert_eq!(app.trip_model.waypoint(id).unwrap(), &before);
    }

    #[test]
    fn test_enter_submits_edited_price() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        press(&mut app, KeyCode::Enter);

        // Focus the price field and retype it.
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        if let Some((form, _)) = app.active_form_mut() {
            assert_eq!(form.field, FormField::Price);
            form.input.clear();
            form.cursor = 0;
        }
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);

        assert!(!app.is_editing());
        assert_eq!(app.trip_model.waypoint(id).unwrap().base_price, 321);
    }

    #[test]
    fn test_invalid_input_keeps_the_form_open() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        if let Some((form, _)) = app.active_form_mut() {
            form.input = "nonsense".to_string();
            form.cursor = form.input.len();
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.is_editing());
        let (form, _) = app.active_form_mut().unwrap();
        assert!(form.error.is_some());
    }

    #[test]
    fn test_n_key_starts_creation_flow() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('n'));

        assert!(app.list_presenter.is_creating());
        assert_eq!(app.list_presenter.active_editor(), Some(EditorHandle::Creator));
        assert_eq!(app.list_presenter.filter_kind(), FilterKind::Everything);
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Day);

        press(&mut app, KeyCode::Esc);
        assert!(!app.list_presenter.is_creating());
    }

    #[test]
    fn test_space_toggles_offer_in_creation_form() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::BackTab);
        if let Some((form, _)) = app.active_form_mut() {
            assert_eq!(form.field, FormField::Offers);
        }
        press(&mut app, KeyCode::Char(' '));

        let (form, data) = app.active_form_mut().unwrap();
        let first = data.offers[0].id;
        assert!(form.draft.has_offer(first));
    }

    #[test]
    fn test_filter_keys_go_through_the_filter_model() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.filter_model.active(), FilterKind::Future);
        assert_eq!(app.list_presenter.filter_kind(), FilterKind::Future);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.list_presenter.filter_kind(), FilterKind::Everything);
    }

    #[test]
    fn test_sort_key_cycles_kinds() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Duration);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.list_presenter.sort_kind(), SortKind::Price);
    }

    #[test]
    fn test_favorite_key_flips_selected() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        let before = app.trip_model.waypoint(id).unwrap().is_favorite;
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.trip_model.waypoint(id).unwrap().is_favorite, !before);
    }

    #[test]
    fn test_ctrl_d_deletes_the_edited_point() {
        let mut app = loaded_app();
        let id = app.selected_waypoint().unwrap();
        press(&mut app, KeyCode::Enter);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);

        assert!(app.trip_model.waypoint(id).is_none());
        assert!(!app.is_editing());
    }

    #[test]
    fn test_help_captures_keys_until_closed() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_open);

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.list_presenter.is_creating());

        press(&mut app, KeyCode::Esc);
        assert!(!app.help_open);
    }
}
