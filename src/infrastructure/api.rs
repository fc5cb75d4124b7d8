//! One-shot remote itinerary source, fetched before the first real render.

use crate::domain::{DomainError, DomainResult, ItineraryData};

pub struct RemoteRepository {
    base_url: String,
}

impl RemoteRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn fetch_itinerary(&self) -> DomainResult<ItineraryData> {
        let response = reqwest::blocking::get(self.base_url.as_str())
            .map_err(|err| DomainError::Fetch(err.to_string()))?;
        if !response.status().is_success() {
            return Err(DomainError::Fetch(format!("HTTP {}", response.status())));
        }
        response
            .json::<ItineraryData>()
            .map_err(|err| DomainError::Fetch(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_a_fetch_error() {
        let result = RemoteRepository::new("not a url").fetch_itinerary();
        assert!(matches!(result, Err(DomainError::Fetch(_))));
    }
}
