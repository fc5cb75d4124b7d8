use super::models::WaypointId;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    UnknownWaypoint(WaypointId),
    NoDestinations,
    InvalidDate(String),
    InvalidPrice(String),
    EndBeforeStart,
    Persistence(String),
    Fetch(String),
    Export(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::UnknownWaypoint(id) => {
                write!(f, "Unknown waypoint: {}", id)
            }
            DomainError::NoDestinations => {
                write!(f, "No destinations available")
            }
            DomainError::InvalidDate(input) => {
                write!(f, "Invalid date (expected DD/MM/YY HH:MM): {}", input)
            }
            DomainError::InvalidPrice(input) => {
                write!(f, "Invalid price: {}", input)
            }
            DomainError::EndBeforeStart => {
                write!(f, "End date is before start date")
            }
            DomainError::Persistence(msg) => {
                write!(f, "Persistence failed: {}", msg)
            }
            DomainError::Fetch(msg) => {
                write!(f, "Fetch failed: {}", msg)
            }
            DomainError::Export(msg) => {
                write!(f, "Export failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
