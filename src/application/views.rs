//! View data built by the presenters and rendered by the terminal layer.
//!
//! Views are plain values: a card or summary is a bag of preformatted
//! strings, while the edit/creation form additionally owns its interactive
//! state (focused field, text buffer, offer cursor, inline error) the same
//! way the application state owns its input buffer in other modes.

use crate::domain::{
    Destination, DomainError, DomainResult, ItineraryData, Offer, SortKind, TripSummary, Waypoint,
    WaypointId, format_form_datetime, humanize_day, humanize_duration, humanize_time,
    parse_form_datetime,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind {
    Loading(LoadingView),
    Message(MessageView),
    SortBar(SortBarView),
    Summary(SummaryView),
    Card(CardView),
    Form(FormView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadingView;

impl LoadingView {
    pub const TEXT: &'static str = "Loading...";
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortBarView {
    pub active: SortKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub summary: TripSummary,
}

/// Read-only row for one waypoint in Default mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub waypoint_id: WaypointId,
    pub day: String,
    pub title: String,
    pub times: String,
    pub duration: String,
    pub price: u32,
    pub offer_titles: Vec<String>,
    pub is_favorite: bool,
}

impl CardView {
    pub fn new(waypoint: &Waypoint, data: &ItineraryData) -> Self {
        let title = data
            .destination(waypoint.destination)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let offer_titles = waypoint
            .offers
            .iter()
            .filter_map(|id| data.offer(*id))
            .map(|offer| offer.title.clone())
            .collect();
        Self {
            waypoint_id: waypoint.id,
            day: humanize_day(waypoint.date_from),
            title,
            times: format!(
                "{} — {}",
                humanize_time(waypoint.date_from),
                humanize_time(waypoint.date_to)
            ),
            duration: humanize_duration(waypoint.duration()),
            price: waypoint.base_price,
            offer_titles,
            is_favorite: waypoint.is_favorite,
        }
    }
}

/// Focusable parts of the edit/creation form, cycled with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Destination,
    DateFrom,
    DateTo,
    Price,
    Offers,
}

impl FormField {
    pub fn next(self) -> FormField {
        match self {
            FormField::Destination => FormField::DateFrom,
            FormField::DateFrom => FormField::DateTo,
            FormField::DateTo => FormField::Price,
            FormField::Price => FormField::Offers,
            FormField::Offers => FormField::Destination,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Destination => FormField::Offers,
            FormField::DateFrom => FormField::Destination,
            FormField::DateTo => FormField::DateFrom,
            FormField::Price => FormField::DateTo,
            FormField::Offers => FormField::Price,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Destination => "Destination",
            FormField::DateFrom => "From",
            FormField::DateTo => "To",
            FormField::Price => "Price",
            FormField::Offers => "Offers",
        }
    }
}

/// The editable view for both the edit flow and the creation flow.
///
/// Text fields (dates, price) are edited through a buffer with a cursor and
/// written back into the draft when focus moves or the form finishes; the
/// destination and offer fields mutate the draft directly. A commit or
/// validation failure lands in `error` and the form stays open.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub draft: Waypoint,
    pub is_new: bool,
    pub field: FormField,
    pub input: String,
    pub cursor: usize,
    pub offer_cursor: usize,
    pub error: Option<String>,
}

impl FormView {
    pub fn edit(snapshot: Waypoint) -> Self {
        Self::with_mode(snapshot, false)
    }

    pub fn create(draft: Waypoint) -> Self {
        Self::with_mode(draft, true)
    }

    fn with_mode(draft: Waypoint, is_new: bool) -> Self {
        let mut form = Self {
            draft,
            is_new,
            field: FormField::Destination,
            input: String::new(),
            cursor: 0,
            offer_cursor: 0,
            error: None,
        };
        form.load_field();
        form
    }

    pub fn waypoint_id(&self) -> WaypointId {
        self.draft.id
    }

    fn field_text(&self) -> Option<String> {
        match self.field {
            FormField::DateFrom => Some(format_form_datetime(self.draft.date_from)),
            FormField::DateTo => Some(format_form_datetime(self.draft.date_to)),
            FormField::Price => Some(self.draft.base_price.to_string()),
            FormField::Destination | FormField::Offers => None,
        }
    }

    fn load_field(&mut self) {
        self.input = self.field_text().unwrap_or_default();
        self.cursor = self.input.len();
    }

    /// Writes the focused text buffer back into the draft.
    pub fn commit_field(&mut self) -> DomainResult<()> {
        match self.field {
            FormField::DateFrom => {
                self.draft.date_from = parse_form_datetime(&self.input)
                    .ok_or_else(|| DomainError::InvalidDate(self.input.clone()))?;
            }
            FormField::DateTo => {
                self.draft.date_to = parse_form_datetime(&self.input)
                    .ok_or_else(|| DomainError::InvalidDate(self.input.clone()))?;
            }
            FormField::Price => {
                self.draft.base_price = self
                    .input
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| DomainError::InvalidPrice(self.input.clone()))?;
            }
            FormField::Destination | FormField::Offers => {}
        }
        Ok(())
    }

    pub fn focus_next(&mut self) {
        self.focus(self.field.next());
    }

    pub fn focus_prev(&mut self) {
        self.focus(self.field.prev());
    }

    fn focus(&mut self, target: FormField) {
        match self.commit_field() {
            Ok(()) => {
                self.error = None;
                self.field = target;
                self.load_field();
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_text().is_some() {
            self.input.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.input.remove(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.input.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Left/Right on the destination field walk the catalog, wrapping.
    pub fn cycle_destination(&mut self, step: i32, destinations: &[Destination]) {
        if self.field != FormField::Destination || destinations.is_empty() {
            return;
        }
        let len = destinations.len() as i32;
        let pos = destinations
            .iter()
            .position(|d| d.id == self.draft.destination)
            .unwrap_or(0) as i32;
        let next = ((pos + step) % len + len) % len;
        self.draft.destination = destinations[next as usize].id;
    }

    pub fn move_offer_cursor(&mut self, step: i32, offer_count: usize) {
        if self.field != FormField::Offers || offer_count == 0 {
            return;
        }
        let len = offer_count as i32;
        let next = ((self.offer_cursor as i32 + step) % len + len) % len;
        self.offer_cursor = next as usize;
    }

    pub fn toggle_offer(&mut self, offers: &[Offer]) {
        if self.field != FormField::Offers {
            return;
        }
        if let Some(offer) = offers.get(self.offer_cursor) {
            self.draft.toggle_offer(offer.id);
        }
    }

    /// Commits the focused field, validates the interval, and returns the
    /// finished draft for dispatch. On failure the inline error is set and
    /// the form stays as it is.
    pub fn finish(&mut self) -> DomainResult<Waypoint> {
        let result = self.commit_field().and_then(|()| {
            if self.draft.date_to < self.draft.date_from {
                return Err(DomainError::EndBeforeStart);
            }
            Ok(self.draft.clone())
        });
        match &result {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
        result
    }
}
