use crate::domain::{DomainError, DomainResult, ItineraryData};
use std::fs;
use std::path::Path;

pub struct FileRepository;

impl FileRepository {
    pub fn save_itinerary(data: &ItineraryData, path: &Path) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|err| DomainError::Persistence(format!("serialization failed: {}", err)))?;
        fs::write(path, json).map_err(|err| DomainError::Persistence(err.to_string()))
    }

    pub fn load_itinerary(path: &Path) -> DomainResult<ItineraryData> {
        let content =
            fs::read_to_string(path).map_err(|err| DomainError::Persistence(err.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|err| DomainError::Persistence(format!("invalid file format: {}", err)))
    }
}
