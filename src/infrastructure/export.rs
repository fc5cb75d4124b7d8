//! CSV export of the itinerary: values only, offers joined by title.

use crate::domain::{DomainError, DomainResult, ItineraryData, format_form_datetime};
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    pub fn export_itinerary(data: &ItineraryData, path: &Path) -> DomainResult<()> {
        let mut writer =
            csv::Writer::from_path(path).map_err(|err| DomainError::Export(err.to_string()))?;
        writer
            .write_record(["destination", "from", "to", "price", "offers", "favorite"])
            .map_err(|err| DomainError::Export(err.to_string()))?;
        for wp in &data.waypoints {
            let destination = data
                .destination(wp.destination)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            let offers = wp
                .offers
                .iter()
                .filter_map(|id| data.offer(*id))
                .map(|offer| offer.title.clone())
                .collect::<Vec<_>>()
                .join("; ");
            writer
                .write_record([
                    destination,
                    format_form_datetime(wp.date_from),
                    format_form_datetime(wp.date_to),
                    wp.base_price.to_string(),
                    offers,
                    wp.is_favorite.to_string(),
                ])
                .map_err(|err| DomainError::Export(err.to_string()))?;
        }
        writer.flush().map_err(|err| DomainError::Export(err.to_string()))
    }
}
