//! Pure itinerary services: the filter-predicate and sort-comparator tables,
//! date/duration humanizing, and trip summary aggregation.
//!
//! Everything here is a function of its inputs; the presenters apply these
//! services to model snapshots and never mutate anything through them.

use super::models::{ItineraryData, Waypoint};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Ordering applied to the visible waypoint list.
///
/// `Day` is the default: ascending by start instant. `Duration` and `Price`
/// put the longest and the most expensive first, respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKind {
    #[default]
    Day,
    Duration,
    Price,
}

impl SortKind {
    pub const ALL: [SortKind; 3] = [SortKind::Day, SortKind::Duration, SortKind::Price];

    pub fn label(self) -> &'static str {
        match self {
            SortKind::Day => "Day",
            SortKind::Duration => "Time",
            SortKind::Price => "Price",
        }
    }

    /// The next kind in display order, wrapping around. Used by the sort
    /// control to cycle through kinds.
    pub fn next(self) -> SortKind {
        match self {
            SortKind::Day => SortKind::Duration,
            SortKind::Duration => SortKind::Price,
            SortKind::Price => SortKind::Day,
        }
    }
}

/// Membership test applied before sorting. `Everything` is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    Everything,
    Future,
    Past,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] =
        [FilterKind::Everything, FilterKind::Future, FilterKind::Past];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Everything => "Everything",
            FilterKind::Future => "Future",
            FilterKind::Past => "Past",
        }
    }

    pub fn matches(self, waypoint: &Waypoint, now: NaiveDateTime) -> bool {
        match self {
            FilterKind::Everything => true,
            FilterKind::Future => waypoint.date_from >= now,
            FilterKind::Past => waypoint.date_to < now,
        }
    }

    /// Message shown instead of the list when the filtered view is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            FilterKind::Everything => "Click New Event to create your first point",
            FilterKind::Future => "There are no future events now",
            FilterKind::Past => "There are no past events now",
        }
    }
}

pub fn filter_waypoints(
    kind: FilterKind,
    waypoints: &[Waypoint],
    now: NaiveDateTime,
) -> Vec<Waypoint> {
    waypoints
        .iter()
        .filter(|wp| kind.matches(wp, now))
        .cloned()
        .collect()
}

pub fn sort_waypoints(kind: SortKind, mut waypoints: Vec<Waypoint>) -> Vec<Waypoint> {
    match kind {
        SortKind::Day => waypoints.sort_by_key(|wp| wp.date_from),
        SortKind::Duration => {
            waypoints.sort_by(|a, b| b.duration().cmp(&a.duration()));
        }
        SortKind::Price => {
            waypoints.sort_by(|a, b| b.base_price.cmp(&a.base_price));
        }
    }
    waypoints
}

/// "Jul 10" style day label.
pub fn humanize_day(date: NaiveDateTime) -> String {
    date.format("%b %-d").to_string()
}

/// "08:25" style time of day.
pub fn humanize_time(date: NaiveDateTime) -> String {
    date.format("%H:%M").to_string()
}

/// Full datetime as shown and parsed in edit forms: "10/07/24 08:25".
pub fn format_form_datetime(date: NaiveDateTime) -> String {
    date.format("%d/%m/%y %H:%M").to_string()
}

pub fn parse_form_datetime(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), "%d/%m/%y %H:%M").ok()
}

/// Duration in the itinerary's zero-padded buckets: minutes only under an
/// hour, hours and minutes under a day, then days too.
///
/// ```
/// use chrono::Duration;
/// use tript::domain::humanize_duration;
///
/// assert_eq!(humanize_duration(Duration::minutes(45)), "45M");
/// assert_eq!(humanize_duration(Duration::minutes(150)), "02H 30M");
/// assert_eq!(humanize_duration(Duration::minutes(1590)), "01D 02H 30M");
/// ```
pub fn humanize_duration(duration: Duration) -> String {
    let total = duration.num_minutes().max(0);
    let days = total / (24 * 60);
    let hours = (total / 60) % 24;
    let minutes = total % 60;
    if days > 0 {
        format!("{:02}D {:02}H {:02}M", days, hours, minutes)
    } else if hours > 0 {
        format!("{:02}H {:02}M", hours, minutes)
    } else {
        format!("{:02}M", minutes)
    }
}

/// Aggregate panel over the visible list: route template, date range and
/// total cost (base prices plus every selected offer's price).
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub route: String,
    pub dates: String,
    pub total_cost: u32,
}

impl TripSummary {
    pub fn compute(waypoints: &[Waypoint], data: &ItineraryData) -> Self {
        if waypoints.is_empty() {
            return Self { route: String::new(), dates: String::new(), total_cost: 0 };
        }

        let names: Vec<&str> = waypoints
            .iter()
            .filter_map(|wp| data.destination(wp.destination))
            .map(|d| d.name.as_str())
            .collect();
        let route = match names.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [first, .., last] if names.len() > 3 => format!("{} — … — {}", first, last),
            _ => names.join(" — "),
        };

        let start = waypoints.iter().map(|wp| wp.date_from).min();
        let end = waypoints.iter().map(|wp| wp.date_to).max();
        let dates = match (start, end) {
            (Some(start), Some(end)) => {
                format!("{} — {}", humanize_day(start), humanize_day(end))
            }
            _ => String::new(),
        };

        let total_cost = waypoints
            .iter()
            .map(|wp| {
                let offers: u32 = wp
                    .offers
                    .iter()
                    .filter_map(|id| data.offer(*id))
                    .map(|offer| offer.price)
                    .sum();
                wp.base_price + offers
            })
            .sum();

        Self { route, dates, total_cost }
    }
}
