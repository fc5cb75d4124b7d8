use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type WaypointId = Uuid;
pub type DestinationId = u32;
pub type OfferId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub destination: DestinationId,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub base_price: u32,
    pub offers: Vec<OfferId>,
    pub is_favorite: bool,
}

impl Waypoint {
    /// Draft for the create flow: fresh id, placeholder destination,
    /// empty offer selection, a zero-length interval at `now`.
    pub fn draft(destination: DestinationId, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination,
            date_from: now,
            date_to: now,
            base_price: 0,
            offers: Vec::new(),
            is_favorite: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    pub fn has_offer(&self, offer: OfferId) -> bool {
        self.offers.contains(&offer)
    }

    pub fn toggle_offer(&mut self, offer: OfferId) {
        if let Some(pos) = self.offers.iter().position(|&id| id == offer) {
            self.offers.remove(pos);
        } else {
            self.offers.push(offer);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub price: u32,
}

/// Everything the model needs to come alive: the waypoint collection plus
/// the read-only destination and offer catalogs. This is also the persisted
/// file format and the payload of the remote source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryData {
    pub waypoints: Vec<Waypoint>,
    pub destinations: Vec<Destination>,
    pub offers: Vec<Offer>,
}

impl ItineraryData {
    /// Built-in itinerary used when no file or remote source is configured.
    /// Dates are laid out relative to `now` so the Future and Past filters
    /// both have something to show.
    pub fn seed(now: NaiveDateTime) -> Self {
        let destinations = vec![
            Destination {
                id: 0,
                name: "Amsterdam".to_string(),
                description: "Canals, gabled houses and bicycle bells.".to_string(),
            },
            Destination {
                id: 1,
                name: "Geneva".to_string(),
                description: "Lakeside city at the foot of the Alps.".to_string(),
            },
            Destination {
                id: 2,
                name: "Chamonix".to_string(),
                description: "Mountain resort beneath Mont Blanc.".to_string(),
            },
        ];
        let offers = vec![
            Offer { id: 0, title: "Add luggage".to_string(), price: 50 },
            Offer { id: 1, title: "Switch to comfort".to_string(), price: 80 },
            Offer { id: 2, title: "Add meal".to_string(), price: 15 },
            Offer { id: 3, title: "Book tickets".to_string(), price: 40 },
        ];
        let waypoints = vec![
            Waypoint {
                id: Uuid::new_v4(),
                destination: 0,
                date_from: now - Duration::days(2),
                date_to: now - Duration::days(2) + Duration::minutes(95),
                base_price: 600,
                offers: vec![0, 2],
                is_favorite: true,
            },
            Waypoint {
                id: Uuid::new_v4(),
                destination: 1,
                date_from: now + Duration::days(1),
                date_to: now + Duration::days(1) + Duration::hours(4),
                base_price: 1100,
                offers: vec![1],
                is_favorite: false,
            },
            Waypoint {
                id: Uuid::new_v4(),
                destination: 2,
                date_from: now + Duration::days(3),
                date_to: now + Duration::days(4) + Duration::minutes(30),
                base_price: 420,
                offers: Vec::new(),
                is_favorite: false,
            },
        ];
        Self { waypoints, destinations, offers }
    }

    pub fn destination(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn offer(&self, id: OfferId) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_draft_defaults() {
        let draft = Waypoint::draft(3, noon());
        assert_eq!(draft.destination, 3);
        assert_eq!(draft.date_from, noon());
        assert_eq!(draft.date_to, noon());
        assert_eq!(draft.base_price, 0);
        assert!(draft.offers.is_empty());
        assert!(!draft.is_favorite);
    }

    #[test]
    fn test_draft_ids_are_unique() {
        let a = Waypoint::draft(0, noon());
        let b = Waypoint::draft(0, noon());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_duration() {
        let mut wp = Waypoint::draft(0, noon());
        wp.date_to = wp.date_from + Duration::minutes(150);
        assert_eq!(wp.duration(), Duration::minutes(150));
    }

    #[test]
    fn test_toggle_offer() {
        let mut wp = Waypoint::draft(0, noon());
        wp.toggle_offer(2);
        assert!(wp.has_offer(2));
        wp.toggle_offer(2);
        assert!(!wp.has_offer(2));
    }

    #[test]
    fn test_seed_catalogs_resolve() {
        let data = ItineraryData::seed(noon());
        assert!(!data.waypoints.is_empty());
        for wp in &data.waypoints {
            assert!(data.destination(wp.destination).is_some());
            for offer in &wp.offers {
                assert!(data.offer(*offer).is_some());
            }
        }
    }

    #[test]
    fn test_seed_spans_past_and_future() {
        let data = ItineraryData::seed(noon());
        assert!(data.waypoints.iter().any(|wp| wp.date_from < noon()));
        assert!(data.waypoints.iter().any(|wp| wp.date_from > noon()));
    }
}
